//! Core data models for the work-log engine.
//!
//! This module contains the domain models shared by the calculation and
//! report layers.

mod holiday;
mod log_entry;
mod pay_period;

pub use holiday::{
    AUSTRALIA_REGION, AustralianHolidays, HolidayCalendar, HolidayCalendars, HolidayTable,
    NATIONAL_REGION, NoHolidays, PublicHoliday,
};
pub use log_entry::{LogEntry, LogRecord, ProjectKey, UNASSIGNED_LABEL, minutes_to_hours};
pub use pay_period::{
    DEFAULT_BIWEEKLY_ANCHOR, FlexConfig, PayPeriodConfig, PeriodType, VacationRange,
    WORKING_DAYS_PER_WEEK,
};
