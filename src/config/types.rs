//! Input document types.
//!
//! This module contains the structures deserialized from the YAML log
//! document, and the resolved [`WorkLogConfig`] the engine runs against.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    FlexConfig, HolidayTable, LogRecord, NATIONAL_REGION, PayPeriodConfig, PeriodType, ProjectKey,
    PublicHoliday, UNASSIGNED_LABEL, VacationRange,
};

/// Textual date format used throughout the log document.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses a `DD/MM/YYYY` date.
///
/// # Example
///
/// ```
/// use worklog_engine::config::parse_log_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(parse_log_date("22/01/2024"), NaiveDate::from_ymd_opt(2024, 1, 22));
/// assert_eq!(parse_log_date("2024-01-22"), None);
/// ```
pub fn parse_log_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// The `config` section: work-hours settings.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkHoursSection {
    /// Contracted hours per week.
    pub hours_per_week: Decimal,
    /// Region code for public holidays.
    #[serde(default)]
    pub holiday_region: Option<String>,
    /// Reject entries without a project tag.
    #[serde(default)]
    pub require_project: bool,
}

/// The `payperiod` section, in either of its two accepted shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PayPeriodSection {
    /// Legacy shorthand, e.g. `payperiod: monthly`.
    Legacy(String),
    /// Full form with type and anchor date.
    Detailed {
        /// Period type; defaults to biweekly.
        #[serde(rename = "type", default)]
        period_type: Option<String>,
        /// Anchor date in `DD/MM/YYYY`.
        #[serde(default)]
        start: Option<String>,
    },
}

/// One entry of the `vacation` list.
#[derive(Debug, Clone, Deserialize)]
pub struct VacationSection {
    /// First day, `DD/MM/YYYY`.
    pub start: String,
    /// Last day, `DD/MM/YYYY`.
    pub end: String,
}

/// One entry of the `holidays` list.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaySection {
    /// Holiday date, `DD/MM/YYYY`.
    pub date: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Region code; omitted means national.
    #[serde(default)]
    pub region: Option<String>,
}

/// The complete log document as written by the user.
#[derive(Debug, Clone, Deserialize)]
pub struct LogDocument {
    /// Raw log records.
    pub logs: Vec<LogRecord>,
    /// Work-hours settings; flex tracking is enabled when present.
    #[serde(default)]
    pub config: Option<WorkHoursSection>,
    /// Project code to display label. Codes may be written as numbers.
    #[serde(default)]
    pub project_codes: Option<serde_yaml::Mapping>,
    /// Pay-period settings.
    #[serde(default)]
    pub payperiod: Option<PayPeriodSection>,
    /// Vacation ranges.
    #[serde(default)]
    pub vacation: Vec<VacationSection>,
    /// Additional public holidays.
    #[serde(default)]
    pub holidays: Vec<HolidaySection>,
}

impl LogDocument {
    /// Resolves the document's settings into a typed [`WorkLogConfig`].
    ///
    /// `today` is only used to default the anchor of a monthly pay period
    /// to the first of January of the current year.
    pub fn resolve_config(&self, today: NaiveDate) -> EngineResult<WorkLogConfig> {
        let pay_period = resolve_pay_period(self.payperiod.as_ref(), today)?;

        let flex = self.config.as_ref().map(|section| FlexConfig {
            hours_per_week: section.hours_per_week,
            holiday_region: section.holiday_region.clone(),
        });

        let vacations = self
            .vacation
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let start = parse_config_date(&v.start, &format!("vacation[{i}].start"))?;
                let end = parse_config_date(&v.end, &format!("vacation[{i}].end"))?;
                if end < start {
                    return Err(EngineError::InvalidConfig {
                        field: format!("vacation[{i}]"),
                        message: format!("end {end} is before start {start}"),
                    });
                }
                Ok(VacationRange { start, end })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let holidays = self
            .holidays
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let date = parse_config_date(&h.date, &format!("holidays[{i}].date"))?;
                Ok(PublicHoliday {
                    date,
                    name: h.name.clone().unwrap_or_else(|| "Holiday".to_string()),
                    region: h
                        .region
                        .clone()
                        .unwrap_or_else(|| NATIONAL_REGION.to_string()),
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let project_labels = self
            .project_codes
            .as_ref()
            .map(|codes| {
                codes
                    .iter()
                    .map(|(code, label)| {
                        let code = scalar_to_string(code).ok_or_else(|| EngineError::InvalidConfig {
                            field: "project_codes".to_string(),
                            message: "project codes must be scalars".to_string(),
                        })?;
                        let label = scalar_to_string(label).unwrap_or_else(|| code.clone());
                        Ok((code, label))
                    })
                    .collect::<EngineResult<BTreeMap<_, _>>>()
            })
            .transpose()?;

        debug!(
            period_type = %pay_period.period_type,
            anchor = %pay_period.anchor_start,
            flex = flex.is_some(),
            vacations = vacations.len(),
            holidays = holidays.len(),
            "resolved log document configuration"
        );

        Ok(WorkLogConfig {
            pay_period,
            flex,
            require_project: self.config.as_ref().is_some_and(|c| c.require_project),
            project_labels,
            vacations,
            holidays: HolidayTable::new(holidays),
        })
    }
}

/// Renders a YAML scalar as the text the user wrote.
///
/// Returns `None` for null, sequences and mappings.
///
/// ```
/// use worklog_engine::config::scalar_to_string;
/// use serde_yaml::Value;
///
/// assert_eq!(scalar_to_string(&Value::from(700)), Some("700".to_string()));
/// assert_eq!(scalar_to_string(&Value::from("ABC")), Some("ABC".to_string()));
/// assert_eq!(scalar_to_string(&Value::Null), None);
/// ```
pub fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value;

    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn parse_config_date(value: &str, field: &str) -> EngineResult<NaiveDate> {
    parse_log_date(value).ok_or_else(|| EngineError::InvalidConfig {
        field: field.to_string(),
        message: format!("invalid date '{value}', expected DD/MM/YYYY"),
    })
}

fn resolve_pay_period(
    section: Option<&PayPeriodSection>,
    today: NaiveDate,
) -> EngineResult<PayPeriodConfig> {
    let default_anchor = PayPeriodConfig::default_biweekly_anchor();

    match section {
        None => Ok(PayPeriodConfig::default()),
        Some(PayPeriodSection::Legacy(kind)) => Ok(PayPeriodConfig {
            period_type: kind.parse()?,
            anchor_start: default_anchor,
        }),
        Some(PayPeriodSection::Detailed { period_type, start }) => {
            let period_type = match period_type {
                Some(kind) => kind.parse()?,
                None => PeriodType::Biweekly,
            };
            let anchor_start = match start {
                Some(start) => parse_config_date(start, "payperiod.start")?,
                None if period_type == PeriodType::Monthly => {
                    NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(default_anchor)
                }
                None => default_anchor,
            };
            Ok(PayPeriodConfig {
                period_type,
                anchor_start,
            })
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct WorkLogConfig {
    /// Pay-period partitioning.
    pub pay_period: PayPeriodConfig,
    /// Flex-time policy, when the document enables it.
    pub flex: Option<FlexConfig>,
    /// Reject entries without a project tag.
    pub require_project: bool,
    /// Project code to display label; `None` disables code validation.
    pub project_labels: Option<BTreeMap<String, String>>,
    /// Vacation ranges excluded from expected hours.
    pub vacations: Vec<VacationRange>,
    /// Holidays listed in the document.
    pub holidays: HolidayTable,
}

impl WorkLogConfig {
    /// Returns the display label for a project.
    ///
    /// Unknown codes fall back to the code itself; the normalizer rejects
    /// them earlier whenever a label mapping exists.
    pub fn project_label(&self, project: &ProjectKey) -> String {
        match project {
            ProjectKey::Assigned(code) => self
                .project_labels
                .as_ref()
                .and_then(|labels| labels.get(code))
                .cloned()
                .unwrap_or_else(|| code.clone()),
            ProjectKey::Unassigned => UNASSIGNED_LABEL.to_string(),
        }
    }
}

impl Default for WorkLogConfig {
    fn default() -> Self {
        Self {
            pay_period: PayPeriodConfig::default(),
            flex: None,
            require_project: false,
            project_labels: None,
            vacations: Vec::new(),
            holidays: HolidayTable::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn parse(yaml: &str) -> LogDocument {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn today() -> NaiveDate {
        make_date("2026-10-15")
    }

    /// CF-001: missing payperiod defaults to biweekly from 2024-01-22
    #[test]
    fn test_missing_payperiod_defaults() {
        let doc = parse("logs: []");
        let config = doc.resolve_config(today()).unwrap();
        assert_eq!(config.pay_period, PayPeriodConfig::default());
        assert!(config.flex.is_none());
        assert!(!config.require_project);
    }

    /// CF-002: legacy string form
    #[test]
    fn test_legacy_payperiod_string() {
        let doc = parse("logs: []\npayperiod: Monthly\n");
        let config = doc.resolve_config(today()).unwrap();
        assert_eq!(config.pay_period.period_type, PeriodType::Monthly);
        assert_eq!(config.pay_period.anchor_start, make_date("2024-01-22"));
    }

    /// CF-003: detailed form with explicit anchor
    #[test]
    fn test_detailed_payperiod() {
        let doc = parse("logs: []\npayperiod:\n  type: biweekly\n  start: 05/02/2024\n");
        let config = doc.resolve_config(today()).unwrap();
        assert_eq!(config.pay_period.period_type, PeriodType::Biweekly);
        assert_eq!(config.pay_period.anchor_start, make_date("2024-02-05"));
    }

    /// CF-004: monthly without start anchors at January 1st of this year
    #[test]
    fn test_monthly_without_start() {
        let doc = parse("logs: []\npayperiod:\n  type: monthly\n");
        let config = doc.resolve_config(today()).unwrap();
        assert_eq!(config.pay_period.anchor_start, make_date("2026-01-01"));
    }

    #[test]
    fn test_detailed_without_type_is_biweekly() {
        let doc = parse("logs: []\npayperiod:\n  start: 01/07/2024\n");
        let config = doc.resolve_config(today()).unwrap();
        assert_eq!(config.pay_period.period_type, PeriodType::Biweekly);
        assert_eq!(config.pay_period.anchor_start, make_date("2024-07-01"));
    }

    /// CF-005: unsupported period type fails resolution
    #[test]
    fn test_unsupported_period_type() {
        let doc = parse("logs: []\npayperiod:\n  type: quarterly\n");
        match doc.resolve_config(today()) {
            Err(EngineError::UnsupportedPeriodType { period_type }) => {
                assert_eq!(period_type, "quarterly");
            }
            other => panic!("Expected UnsupportedPeriodType, got {:?}", other),
        }
    }

    #[test]
    fn test_flex_config_section() {
        let doc = parse(
            "logs: []\nconfig:\n  hours_per_week: 37.5\n  holiday_region: AU\n  require_project: true\n",
        );
        let config = doc.resolve_config(today()).unwrap();
        let flex = config.flex.unwrap();
        assert_eq!(flex.hours_per_week, Decimal::new(375, 1));
        assert_eq!(flex.holiday_region.as_deref(), Some("AU"));
        assert!(config.require_project);
    }

    #[test]
    fn test_vacation_ranges_parsed() {
        let doc = parse("logs: []\nvacation:\n  - start: 23/12/2024\n    end: 03/01/2025\n");
        let config = doc.resolve_config(today()).unwrap();
        assert_eq!(
            config.vacations,
            vec![VacationRange {
                start: make_date("2024-12-23"),
                end: make_date("2025-01-03"),
            }]
        );
    }

    #[test]
    fn test_inverted_vacation_rejected() {
        let doc = parse("logs: []\nvacation:\n  - start: 03/01/2025\n    end: 23/12/2024\n");
        match doc.resolve_config(today()) {
            Err(EngineError::InvalidConfig { field, .. }) => assert_eq!(field, "vacation[0]"),
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_vacation_date_rejected() {
        let doc = parse("logs: []\nvacation:\n  - start: 2024-12-23\n    end: 03/01/2025\n");
        match doc.resolve_config(today()) {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "vacation[0].start")
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_holidays_default_to_national() {
        let doc = parse("logs: []\nholidays:\n  - date: 05/11/2024\n    name: Cup Day\n");
        let config = doc.resolve_config(today()).unwrap();
        let holidays = config.holidays.holidays();
        assert_eq!(holidays.len(), 1);
        assert_eq!(holidays[0].region, "national");
        assert_eq!(holidays[0].name, "Cup Day");
    }

    #[test]
    fn test_numeric_project_codes() {
        let doc = parse("logs: []\nproject_codes:\n  700: Work For Hire\n");
        let config = doc.resolve_config(today()).unwrap();
        assert_eq!(
            config.project_label(&ProjectKey::Assigned("700".to_string())),
            "Work For Hire"
        );
    }

    #[test]
    fn test_project_label_lookup() {
        let doc = parse("logs: []\nproject_codes:\n  ABC: Alpha Build\n");
        let config = doc.resolve_config(today()).unwrap();
        assert_eq!(
            config.project_label(&ProjectKey::Assigned("ABC".to_string())),
            "Alpha Build"
        );
        assert_eq!(
            config.project_label(&ProjectKey::Assigned("XYZ".to_string())),
            "XYZ"
        );
        assert_eq!(config.project_label(&ProjectKey::Unassigned), "Unassigned");
    }
}
