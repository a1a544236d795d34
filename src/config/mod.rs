//! Log document loading and configuration.
//!
//! This module reads the YAML log document and resolves its settings
//! (pay period, flex policy, vacations, holidays, project labels) into a
//! typed [`WorkLogConfig`].
//!
//! # Example
//!
//! ```no_run
//! use worklog_engine::config::DocumentLoader;
//! use chrono::Local;
//!
//! let loader = DocumentLoader::load("./log.yaml").unwrap();
//! let config = loader.resolve(Local::now().date_naive()).unwrap();
//! println!("Pay periods: {}", config.pay_period.period_type);
//! ```

mod loader;
mod types;

pub use loader::DocumentLoader;
pub use types::{
    DATE_FORMAT, HolidaySection, LogDocument, PayPeriodSection, VacationSection, WorkHoursSection,
    WorkLogConfig, parse_log_date, scalar_to_string,
};
