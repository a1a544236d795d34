//! Expected-hours calculation.
//!
//! This module sweeps the calendar from the first logged day to "today" and
//! counts the days on which the configured weekly hours are owed.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{FlexConfig, HolidayCalendar, NATIONAL_REGION, VacationRange};

/// How a single calendar day counts towards expected hours.
///
/// # Example
///
/// ```
/// use worklog_engine::calculation::DayKind;
///
/// assert_eq!(DayKind::Vacation.to_string(), "Vacation");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    /// Monday to Friday, not a holiday or vacation day. Hours are owed.
    Working,
    /// Saturday or Sunday.
    Weekend,
    /// A weekday that is a public holiday in the configured region.
    Holiday,
    /// A weekday inside a vacation range.
    Vacation,
}

impl std::fmt::Display for DayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayKind::Working => write!(f, "Working"),
            DayKind::Weekend => write!(f, "Weekend"),
            DayKind::Holiday => write!(f, "Holiday"),
            DayKind::Vacation => write!(f, "Vacation"),
        }
    }
}

/// Everything the sweep needs besides the date span.
#[derive(Clone, Copy)]
pub struct ExpectedHoursPolicy<'a> {
    /// Weekly hours and holiday region.
    pub flex: &'a FlexConfig,
    /// Vacation ranges, inclusive.
    pub vacations: &'a [VacationRange],
    /// Source of public holidays.
    pub holidays: &'a dyn HolidayCalendar,
}

impl ExpectedHoursPolicy<'_> {
    /// Returns the region used for holiday lookups.
    ///
    /// A document without a region only sees national holidays.
    pub fn region(&self) -> &str {
        self.flex
            .holiday_region
            .as_deref()
            .unwrap_or(NATIONAL_REGION)
    }

    /// Classifies one day.
    ///
    /// Weekends win over everything else; a weekday that is both a holiday
    /// and a vacation day is reported as a holiday.
    pub fn classify_day(&self, date: NaiveDate) -> DayKind {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => DayKind::Weekend,
            _ if self.holidays.is_holiday(self.region(), date) => DayKind::Holiday,
            _ if self.vacations.iter().any(|v| v.contains_date(date)) => DayKind::Vacation,
            _ => DayKind::Working,
        }
    }
}

/// The outcome of an expected-hours sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedHoursResult {
    /// First day of the span, if the span is non-empty.
    pub first_day: Option<NaiveDate>,
    /// Last day of the span ("today"), if the span is non-empty.
    pub last_day: Option<NaiveDate>,
    /// Days on which hours are owed.
    pub working_days: u32,
    /// Weekdays skipped as public holidays.
    pub holiday_days: u32,
    /// Weekdays skipped as vacation.
    pub vacation_days: u32,
    /// `working_days * hours_per_week / 5`.
    pub expected_hours: Decimal,
}

impl ExpectedHoursResult {
    /// A result for an empty span.
    pub fn empty() -> Self {
        Self {
            first_day: None,
            last_day: None,
            working_days: 0,
            holiday_days: 0,
            vacation_days: 0,
            expected_hours: Decimal::ZERO,
        }
    }
}

/// Calculates the hours owed between the first logged day and `today`.
///
/// Both ends are inclusive. Each Monday to Friday that is neither a
/// holiday in the policy's region nor inside a vacation range contributes
/// `hours_per_week / 5`.
///
/// # Arguments
///
/// * `first_logged` - The earliest logged date, or `None` when nothing was logged
/// * `today` - The last day of the span
/// * `policy` - Weekly hours, vacations and holiday calendar
///
/// # Returns
///
/// An [`ExpectedHoursResult`]. The span is empty (zero hours) when nothing
/// was logged or when the first log lies after `today`.
///
/// # Example
///
/// ```
/// use worklog_engine::calculation::{ExpectedHoursPolicy, calculate_expected_hours};
/// use worklog_engine::models::{FlexConfig, NoHolidays};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let flex = FlexConfig { hours_per_week: Decimal::new(375, 1), holiday_region: None };
/// let policy = ExpectedHoursPolicy { flex: &flex, vacations: &[], holidays: &NoHolidays };
///
/// // Monday 2024-01-22 to Sunday 2024-01-28
/// let result = calculate_expected_hours(
///     NaiveDate::from_ymd_opt(2024, 1, 22),
///     NaiveDate::from_ymd_opt(2024, 1, 28).unwrap(),
///     &policy,
/// );
/// assert_eq!(result.working_days, 5);
/// assert_eq!(result.expected_hours, Decimal::new(375, 1));
/// ```
pub fn calculate_expected_hours(
    first_logged: Option<NaiveDate>,
    today: NaiveDate,
    policy: &ExpectedHoursPolicy<'_>,
) -> ExpectedHoursResult {
    let Some(first) = first_logged.filter(|first| *first <= today) else {
        return ExpectedHoursResult::empty();
    };

    let mut working_days = 0u32;
    let mut holiday_days = 0u32;
    let mut vacation_days = 0u32;

    let mut day = first;
    while day <= today {
        match policy.classify_day(day) {
            DayKind::Working => working_days += 1,
            DayKind::Holiday => holiday_days += 1,
            DayKind::Vacation => vacation_days += 1,
            DayKind::Weekend => {}
        }
        day += Duration::days(1);
    }

    let expected_hours = policy.flex.daily_hours() * Decimal::from(working_days);

    debug!(
        first = %first,
        today = %today,
        region = policy.region(),
        working_days,
        holiday_days,
        vacation_days,
        expected_hours = %expected_hours,
        "calculated expected hours"
    );

    ExpectedHoursResult {
        first_day: Some(first),
        last_day: Some(today),
        working_days,
        holiday_days,
        vacation_days,
        expected_hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AustralianHolidays, HolidayTable, NoHolidays, PublicHoliday};

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn flex(hours: &str, region: Option<&str>) -> FlexConfig {
        FlexConfig {
            hours_per_week: dec(hours),
            holiday_region: region.map(str::to_string),
        }
    }

    /// EH-001: five plain weekdays at 37.5 hours per week
    #[test]
    fn test_five_weekdays() {
        let flex = flex("37.5", None);
        let policy = ExpectedHoursPolicy {
            flex: &flex,
            vacations: &[],
            holidays: &NoHolidays,
        };
        // Monday to Friday
        let result = calculate_expected_hours(
            Some(make_date("2024-01-22")),
            make_date("2024-01-26"),
            &policy,
        );
        assert_eq!(result.working_days, 5);
        assert_eq!(result.expected_hours, dec("37.5"));
    }

    /// EH-002: weekends are never owed
    #[test]
    fn test_weekend_only_span() {
        let flex = flex("40", None);
        let policy = ExpectedHoursPolicy {
            flex: &flex,
            vacations: &[],
            holidays: &NoHolidays,
        };
        let result = calculate_expected_hours(
            Some(make_date("2024-01-27")),
            make_date("2024-01-28"),
            &policy,
        );
        assert_eq!(result.working_days, 0);
        assert_eq!(result.expected_hours, Decimal::ZERO);
        assert_eq!(result.first_day, Some(make_date("2024-01-27")));
    }

    /// EH-003: span entirely inside a vacation
    #[test]
    fn test_span_inside_vacation() {
        let flex = flex("37.5", None);
        let vacations = [VacationRange {
            start: make_date("2024-01-15"),
            end: make_date("2024-02-15"),
        }];
        let policy = ExpectedHoursPolicy {
            flex: &flex,
            vacations: &vacations,
            holidays: &NoHolidays,
        };
        let result = calculate_expected_hours(
            Some(make_date("2024-01-22")),
            make_date("2024-01-31"),
            &policy,
        );
        assert_eq!(result.expected_hours, Decimal::ZERO);
        assert_eq!(result.vacation_days, 8);
    }

    /// EH-004: first log equal to today evaluates one day
    #[test]
    fn test_single_day_span() {
        let flex = flex("40", None);
        let policy = ExpectedHoursPolicy {
            flex: &flex,
            vacations: &[],
            holidays: &NoHolidays,
        };
        let today = make_date("2024-01-24");
        let result = calculate_expected_hours(Some(today), today, &policy);
        assert_eq!(result.working_days, 1);
        assert_eq!(result.expected_hours, dec("8"));
    }

    /// EH-005: first log after today is an empty span
    #[test]
    fn test_first_log_after_today() {
        let flex = flex("40", None);
        let policy = ExpectedHoursPolicy {
            flex: &flex,
            vacations: &[],
            holidays: &NoHolidays,
        };
        let result = calculate_expected_hours(
            Some(make_date("2024-02-01")),
            make_date("2024-01-31"),
            &policy,
        );
        assert_eq!(result, ExpectedHoursResult::empty());
    }

    /// EH-006: nothing logged
    #[test]
    fn test_no_entries() {
        let flex = flex("40", None);
        let policy = ExpectedHoursPolicy {
            flex: &flex,
            vacations: &[],
            holidays: &NoHolidays,
        };
        let result = calculate_expected_hours(None, make_date("2024-01-31"), &policy);
        assert_eq!(result.expected_hours, Decimal::ZERO);
        assert_eq!(result.first_day, None);
    }

    /// EH-007: Australian public holidays are skipped
    #[test]
    fn test_australian_holiday_skipped() {
        let flex = flex("37.5", Some("AU"));
        let policy = ExpectedHoursPolicy {
            flex: &flex,
            vacations: &[],
            holidays: &AustralianHolidays,
        };
        // Week of Anzac Day 2024 (Thursday)
        let result = calculate_expected_hours(
            Some(make_date("2024-04-22")),
            make_date("2024-04-26"),
            &policy,
        );
        assert_eq!(result.working_days, 4);
        assert_eq!(result.holiday_days, 1);
        assert_eq!(result.expected_hours, dec("30"));
    }

    #[test]
    fn test_region_without_data_has_no_holidays() {
        let flex = flex("37.5", Some("XX"));
        let policy = ExpectedHoursPolicy {
            flex: &flex,
            vacations: &[],
            holidays: &AustralianHolidays,
        };
        let result = calculate_expected_hours(
            Some(make_date("2024-04-22")),
            make_date("2024-04-26"),
            &policy,
        );
        assert_eq!(result.working_days, 5);
        assert_eq!(result.holiday_days, 0);
    }

    #[test]
    fn test_holiday_inside_vacation_counts_as_holiday() {
        let flex = flex("40", Some("VIC"));
        let table = HolidayTable::new(vec![PublicHoliday {
            date: make_date("2024-11-05"),
            name: "Melbourne Cup".to_string(),
            region: "VIC".to_string(),
        }]);
        let vacations = [VacationRange {
            start: make_date("2024-11-04"),
            end: make_date("2024-11-08"),
        }];
        let policy = ExpectedHoursPolicy {
            flex: &flex,
            vacations: &vacations,
            holidays: &table,
        };
        assert_eq!(policy.classify_day(make_date("2024-11-05")), DayKind::Holiday);
        assert_eq!(policy.classify_day(make_date("2024-11-06")), DayKind::Vacation);
        assert_eq!(policy.classify_day(make_date("2024-11-09")), DayKind::Weekend);
        assert_eq!(policy.classify_day(make_date("2024-11-11")), DayKind::Working);
    }

    #[test]
    fn test_missing_region_uses_national_holidays() {
        let flex = flex("40", None);
        let table = HolidayTable::new(vec![PublicHoliday {
            date: make_date("2024-07-01"),
            name: "Company Day".to_string(),
            region: "national".to_string(),
        }]);
        let policy = ExpectedHoursPolicy {
            flex: &flex,
            vacations: &[],
            holidays: &table,
        };
        assert_eq!(policy.region(), "national");
        assert_eq!(policy.classify_day(make_date("2024-07-01")), DayKind::Holiday);
    }

    #[test]
    fn test_two_week_span() {
        let flex = flex("37.5", None);
        let policy = ExpectedHoursPolicy {
            flex: &flex,
            vacations: &[],
            holidays: &NoHolidays,
        };
        // Wednesday to the Tuesday two weeks later: 10 weekdays
        let result = calculate_expected_hours(
            Some(make_date("2024-01-24")),
            make_date("2024-02-06"),
            &policy,
        );
        assert_eq!(result.working_days, 10);
        assert_eq!(result.expected_hours, dec("75"));
    }
}
