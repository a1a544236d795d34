//! Pay period, vacation and flex-time configuration models.
//!
//! This module contains the [`PayPeriodConfig`] that drives pay-period
//! bucketing, the [`VacationRange`] windows excluded from expected hours,
//! and the [`FlexConfig`] work-hours policy.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The anchor used for biweekly periods when the document gives none.
pub const DEFAULT_BIWEEKLY_ANCHOR: (i32, u32, u32) = (2024, 1, 22);

/// Working days per week used to spread weekly hours over single days.
pub const WORKING_DAYS_PER_WEEK: i64 = 5;

/// How pay periods are partitioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    /// Calendar months.
    Monthly,
    /// Rolling 14-day windows anchored to an arbitrary start date.
    Biweekly,
}

impl FromStr for PeriodType {
    type Err = EngineError;

    /// Parses a period type case-insensitively.
    ///
    /// # Example
    ///
    /// ```
    /// use worklog_engine::models::PeriodType;
    ///
    /// assert_eq!("Monthly".parse::<PeriodType>().unwrap(), PeriodType::Monthly);
    /// assert!("quarterly".parse::<PeriodType>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(PeriodType::Monthly),
            "biweekly" => Ok(PeriodType::Biweekly),
            _ => Err(EngineError::UnsupportedPeriodType {
                period_type: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodType::Monthly => write!(f, "monthly"),
            PeriodType::Biweekly => write!(f, "biweekly"),
        }
    }
}

/// Pay-period partitioning for a run.
///
/// The anchor is fixed for the whole run. For biweekly periods every key is
/// a multiple of 14 days away from it; monthly periods ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriodConfig {
    /// The partitioning algorithm.
    pub period_type: PeriodType,
    /// The first day of a known pay period.
    pub anchor_start: NaiveDate,
}

impl PayPeriodConfig {
    /// Creates a biweekly configuration anchored at `anchor_start`.
    pub fn biweekly(anchor_start: NaiveDate) -> Self {
        Self {
            period_type: PeriodType::Biweekly,
            anchor_start,
        }
    }

    /// Creates a monthly configuration.
    pub fn monthly(anchor_start: NaiveDate) -> Self {
        Self {
            period_type: PeriodType::Monthly,
            anchor_start,
        }
    }

    /// Returns the anchor used when a document names no start date.
    pub fn default_biweekly_anchor() -> NaiveDate {
        let (y, m, d) = DEFAULT_BIWEEKLY_ANCHOR;
        NaiveDate::from_ymd_opt(y, m, d).expect("Valid default anchor date")
    }
}

impl Default for PayPeriodConfig {
    fn default() -> Self {
        Self::biweekly(Self::default_biweekly_anchor())
    }
}

/// A vacation window, inclusive of both ends.
///
/// # Example
///
/// ```
/// use worklog_engine::models::VacationRange;
/// use chrono::NaiveDate;
///
/// let vacation = VacationRange {
///     start: NaiveDate::from_ymd_opt(2024, 12, 23).unwrap(),
///     end: NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
/// };
///
/// assert!(vacation.contains_date(NaiveDate::from_ymd_opt(2024, 12, 23).unwrap())); // start
/// assert!(vacation.contains_date(NaiveDate::from_ymd_opt(2025, 1, 3).unwrap())); // end
/// assert!(!vacation.contains_date(NaiveDate::from_ymd_opt(2025, 1, 4).unwrap())); // after
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationRange {
    /// First vacation day.
    pub start: NaiveDate,
    /// Last vacation day.
    pub end: NaiveDate,
}

impl VacationRange {
    /// Checks if a given date falls within this vacation (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// The work-hours policy used for flex-time tracking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexConfig {
    /// Contracted hours per five-day week.
    pub hours_per_week: Decimal,
    /// Region code for public holiday lookups (e.g. "AU").
    pub holiday_region: Option<String>,
}

impl FlexConfig {
    /// Returns the hours a single working day contributes.
    ///
    /// ```
    /// use worklog_engine::models::FlexConfig;
    /// use rust_decimal::Decimal;
    ///
    /// let flex = FlexConfig { hours_per_week: Decimal::new(375, 1), holiday_region: None };
    /// assert_eq!(flex.daily_hours(), Decimal::new(75, 1));
    /// ```
    pub fn daily_hours(&self) -> Decimal {
        self.hours_per_week / Decimal::from(WORKING_DAYS_PER_WEEK)
    }
}
