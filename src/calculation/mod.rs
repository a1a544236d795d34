//! Calculation logic for the work-log engine.
//!
//! This module contains the aggregation pipeline: record normalization,
//! daily aggregation, period key functions, bucket aggregation, expected
//! hours and flex-time reconciliation. Every function is pure over its
//! inputs; "today" is always passed in.

mod bucket;
mod daily;
mod expected_hours;
mod flex;
mod normalize;
mod period_key;

pub use bucket::{HoursTable, PeriodTotals, bucket_by_project, bucket_totals};
pub use daily::{MinutesByDateProject, aggregate_daily};
pub use expected_hours::{
    DayKind, ExpectedHoursPolicy, ExpectedHoursResult, calculate_expected_hours,
};
pub use flex::{FlexBalance, reconcile_flex};
pub use normalize::{MAX_MINUTE_OFFSET, NormalizeOptions, normalize_entries};
pub use period_key::{
    BIWEEKLY_PERIOD_DAYS, PeriodKey, month_key, pay_period_key, previous_pay_period_key,
    previous_week_key, rolling_key, week_key,
};
