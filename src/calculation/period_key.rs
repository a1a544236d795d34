//! Period key functions.
//!
//! Pure functions mapping a calendar date to the bucket it belongs to: an
//! ISO week, a calendar month, or a rolling pay period. Together with the
//! bucket aggregator they produce every periodic view of the log.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Serialize, Serializer};

use crate::models::{PayPeriodConfig, PeriodType};

/// Length of a rolling biweekly pay period, in days.
pub const BIWEEKLY_PERIOD_DAYS: i64 = 14;

/// The bucket a date falls into.
///
/// Keys order chronologically within a variant. Keys from different
/// variants are never mixed in one table.
///
/// # Example
///
/// ```
/// use worklog_engine::calculation::{PeriodKey, week_key};
/// use chrono::NaiveDate;
///
/// let key = week_key(NaiveDate::from_ymd_opt(2024, 12, 30).unwrap());
/// assert_eq!(key, PeriodKey::Week { year: 2025, week: 1 });
/// assert_eq!(key.to_string(), "2025-W01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeriodKey {
    /// ISO-8601 week: ISO week-year and week number.
    Week {
        /// ISO week-numbering year.
        year: i32,
        /// ISO week number (1-53).
        week: u32,
    },
    /// Calendar month.
    Month {
        /// Calendar year.
        year: i32,
        /// Month number (1-12).
        month: u32,
    },
    /// Rolling period identified by its first day.
    Rolling(NaiveDate),
}

impl PeriodKey {
    /// Returns the first day of the period.
    pub fn first_day(&self) -> Option<NaiveDate> {
        match *self {
            PeriodKey::Week { year, week } => NaiveDate::from_isoywd_opt(year, week, Weekday::Mon),
            PeriodKey::Month { year, month } => NaiveDate::from_ymd_opt(year, month, 1),
            PeriodKey::Rolling(start) => Some(start),
        }
    }

    /// Returns the last day of the period.
    pub fn last_day(&self) -> Option<NaiveDate> {
        match *self {
            PeriodKey::Week { year, week } => NaiveDate::from_isoywd_opt(year, week, Weekday::Sun),
            PeriodKey::Month { year, month } => {
                let (next_year, next_month) = if month == 12 {
                    (year + 1, 1)
                } else {
                    (year, month + 1)
                };
                NaiveDate::from_ymd_opt(next_year, next_month, 1).map(|d| d - Duration::days(1))
            }
            PeriodKey::Rolling(start) => Some(start + Duration::days(BIWEEKLY_PERIOD_DAYS - 1)),
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Week { year, week } => write!(f, "{year}-W{week:02}"),
            PeriodKey::Month { year, month } => write!(f, "{year}-{month:02}"),
            PeriodKey::Rolling(start) => write!(f, "{}", start.format("%Y-%m-%d")),
        }
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Returns the ISO-8601 week key of a date.
///
/// Uses the ISO week-numbering year, so late-December dates can belong to
/// week 1 of the next year and early-January dates to week 52/53 of the
/// previous one.
pub fn week_key(date: NaiveDate) -> PeriodKey {
    let iso = date.iso_week();
    PeriodKey::Week {
        year: iso.year(),
        week: iso.week(),
    }
}

/// Returns the calendar-month key of a date.
pub fn month_key(date: NaiveDate) -> PeriodKey {
    PeriodKey::Month {
        year: date.year(),
        month: date.month(),
    }
}

/// Returns the rolling-period key of a date.
///
/// The key is `anchor + length * floor((date - anchor) / length)` days.
/// Floor division keeps dates before the anchor in the correct earlier
/// window.
///
/// # Example
///
/// ```
/// use worklog_engine::calculation::{PeriodKey, rolling_key};
/// use chrono::NaiveDate;
///
/// let anchor = NaiveDate::from_ymd_opt(2024, 1, 22).unwrap();
/// let day_before = NaiveDate::from_ymd_opt(2024, 1, 21).unwrap();
/// assert_eq!(
///     rolling_key(day_before, anchor, 14),
///     PeriodKey::Rolling(NaiveDate::from_ymd_opt(2024, 1, 8).unwrap())
/// );
/// ```
pub fn rolling_key(date: NaiveDate, anchor: NaiveDate, length_days: i64) -> PeriodKey {
    let offset = (date - anchor).num_days();
    let periods = offset.div_euclid(length_days);
    PeriodKey::Rolling(anchor + Duration::days(periods * length_days))
}

/// Returns the pay-period key of a date under `config`.
pub fn pay_period_key(date: NaiveDate, config: &PayPeriodConfig) -> PeriodKey {
    match config.period_type {
        PeriodType::Monthly => month_key(date),
        PeriodType::Biweekly => rolling_key(date, config.anchor_start, BIWEEKLY_PERIOD_DAYS),
    }
}

/// Returns the key of the ISO week before the one containing `today`.
pub fn previous_week_key(today: NaiveDate) -> PeriodKey {
    week_key(today - Duration::days(7))
}

/// Returns the key of the pay period before the one containing `today`.
///
/// Monthly periods step back one calendar month (January goes to December
/// of the previous year); biweekly periods step back 14 days.
pub fn previous_pay_period_key(today: NaiveDate, config: &PayPeriodConfig) -> PeriodKey {
    match config.period_type {
        PeriodType::Monthly => {
            if today.month() == 1 {
                PeriodKey::Month {
                    year: today.year() - 1,
                    month: 12,
                }
            } else {
                PeriodKey::Month {
                    year: today.year(),
                    month: today.month() - 1,
                }
            }
        }
        PeriodType::Biweekly => {
            pay_period_key(today - Duration::days(BIWEEKLY_PERIOD_DAYS), config)
        }
    }
}
