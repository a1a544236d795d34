//! Log entry model and project keys.
//!
//! This module defines [`LogEntry`], the normalized form of one work
//! interval, and [`ProjectKey`], the project dimension every aggregation
//! groups by.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// A raw log record exactly as it appears in the input document.
///
/// Keys are kept verbatim so that the detailed CSV export can reproduce
/// every original field, including ones the engine does not interpret.
pub type LogRecord = BTreeMap<String, serde_yaml::Value>;

/// Label used for entries that carry no project tag.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// The project an entry is booked against.
///
/// `Unassigned` sorts after every assigned project so that tables list it
/// last.
///
/// # Example
///
/// ```
/// use worklog_engine::models::ProjectKey;
///
/// let key = ProjectKey::from(Some("ABC".to_string()));
/// assert_eq!(key.to_string(), "ABC");
/// assert_eq!(ProjectKey::from(None).to_string(), "Unassigned");
/// assert!(ProjectKey::Assigned("ZZZ".to_string()) < ProjectKey::Unassigned);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProjectKey {
    /// An entry tagged with a project code.
    Assigned(String),
    /// An entry without a project tag.
    Unassigned,
}

impl ProjectKey {
    /// Returns the project code, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            ProjectKey::Assigned(code) => Some(code),
            ProjectKey::Unassigned => None,
        }
    }
}

impl From<Option<String>> for ProjectKey {
    fn from(code: Option<String>) -> Self {
        code.map_or(ProjectKey::Unassigned, ProjectKey::Assigned)
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectKey::Assigned(code) => write!(f, "{code}"),
            ProjectKey::Unassigned => write!(f, "{UNASSIGNED_LABEL}"),
        }
    }
}

impl Serialize for ProjectKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A normalized work interval.
///
/// Start and end are minute offsets within the entry's calendar date.
///
/// # Example
///
/// ```
/// use worklog_engine::models::{LogEntry, ProjectKey};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let entry = LogEntry {
///     index: 0,
///     date: NaiveDate::from_ymd_opt(2024, 1, 22).unwrap(),
///     project: ProjectKey::Unassigned,
///     start_minute: 540,
///     end_minute: 1020,
/// };
/// assert_eq!(entry.duration_minutes(), 480);
/// assert_eq!(entry.hours(), Decimal::new(8, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Zero-based position of the source record in the document.
    pub index: usize,
    /// The calendar date the work was done on.
    pub date: NaiveDate,
    /// The project the work is booked against.
    pub project: ProjectKey,
    /// Start of the interval, in minutes.
    pub start_minute: i64,
    /// End of the interval, in minutes.
    pub end_minute: i64,
}

impl LogEntry {
    /// Returns the length of the interval in minutes, saturating at the
    /// `i64` bounds.
    pub fn duration_minutes(&self) -> i64 {
        self.end_minute.saturating_sub(self.start_minute)
    }

    /// Returns the length of the interval in hours.
    pub fn hours(&self) -> Decimal {
        minutes_to_hours(self.duration_minutes())
    }
}

/// Converts a minute count into decimal hours.
pub fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::new(minutes, 0) / Decimal::new(60, 0)
}
