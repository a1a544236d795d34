//! Report rendering.
//!
//! Everything in this module reads a finished [`WorkLog`](crate::worklog::WorkLog)
//! and writes text to an [`std::io::Write`] sink: the console summary, the
//! daily breakdown, period tables, CSV exports and the JSON summary.

mod csv_export;
mod summary;
mod table;

use rust_decimal::{Decimal, RoundingStrategy};

pub use csv_export::{
    BASIC_CSV_HEADER, HOURS_COLUMN, PROJECT_LABEL_COLUMN, detailed_columns, write_basic_csv,
    write_detailed_csv,
};
pub use summary::{PeriodHours, Summary, build_summary, write_summary, write_summary_json};
pub use table::{TableKind, write_daily_breakdown, write_period_table};

/// Formats hours with exactly two decimal places.
///
/// ```
/// use worklog_engine::report::format_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_hours(Decimal::new(75, 1)), "7.50");
/// assert_eq!(format_hours(Decimal::ONE / Decimal::new(3, 0)), "0.33");
/// ```
pub fn format_hours(hours: Decimal) -> String {
    let rounded = hours.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// Formats a flex balance with an explicit sign.
///
/// ```
/// use worklog_engine::report::format_signed_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_signed_hours(Decimal::new(25, 1)), "+2.50");
/// assert_eq!(format_signed_hours(Decimal::new(-75, 1)), "-7.50");
/// assert_eq!(format_signed_hours(Decimal::ZERO), "+0.00");
/// ```
pub fn format_signed_hours(hours: Decimal) -> String {
    let rounded = hours.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded < Decimal::ZERO {
        format_hours(rounded)
    } else {
        format!("+{}", format_hours(rounded.abs()))
    }
}

/// Formats a minute count as `HH:MM`.
///
/// ```
/// use worklog_engine::report::format_clock;
///
/// assert_eq!(format_clock(450), "07:30");
/// assert_eq!(format_clock(5), "00:05");
/// assert_eq!(format_clock(1500), "25:00");
/// ```
pub fn format_clock(minutes: i64) -> String {
    format!("{:02}:{:02}", minutes.div_euclid(60), minutes.rem_euclid(60))
}
