//! Log record normalization.
//!
//! Turns raw document records into [`LogEntry`] values, rejecting records
//! the rest of the engine cannot aggregate.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_yaml::Value;
use tracing::debug;

use crate::config::{parse_log_date, scalar_to_string};
use crate::error::{EngineError, EngineResult};
use crate::models::{LogEntry, LogRecord, ProjectKey};

/// Largest accepted `start`/`end` magnitude, in minutes.
pub const MAX_MINUTE_OFFSET: i64 = i32::MAX as i64;

/// Validation switches for [`normalize_entries`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions<'a> {
    /// Reject records without a `project` tag.
    pub require_project: bool,
    /// Known project codes. When present, every tagged record must use one.
    pub project_labels: Option<&'a BTreeMap<String, String>>,
}

/// Normalizes every record in the document.
///
/// The first invalid record aborts the whole batch; no partial output is
/// returned.
///
/// # Errors
///
/// - `MalformedEntry` for a missing or unparseable date, a missing or
///   non-numeric `start`/`end`, an offset beyond [`MAX_MINUTE_OFFSET`], or a
///   batch whose total minutes overflow
/// - `MissingProject` when `require_project` is set and the record has no project
/// - `UnknownProjectCode` when a label mapping exists and lacks the record's code
/// - `NegativeDuration` when `end` is before `start`
///
/// # Example
///
/// ```
/// use worklog_engine::calculation::{NormalizeOptions, normalize_entries};
/// use worklog_engine::models::LogRecord;
///
/// let records: Vec<LogRecord> = serde_yaml::from_str(
///     "- { date: 22/01/2024, start: 540, end: 1020, project: ABC }",
/// ).unwrap();
/// let entries = normalize_entries(&records, &NormalizeOptions::default()).unwrap();
/// assert_eq!(entries[0].duration_minutes(), 480);
/// ```
pub fn normalize_entries(
    records: &[LogRecord],
    options: &NormalizeOptions<'_>,
) -> EngineResult<Vec<LogEntry>> {
    let entries = records
        .iter()
        .enumerate()
        .map(|(index, record)| normalize_record(index, record, options))
        .collect::<EngineResult<Vec<_>>>()?;

    let mut total: i64 = 0;
    for entry in &entries {
        total = total
            .checked_add(entry.duration_minutes())
            .ok_or_else(|| EngineError::MalformedEntry {
                index: entry.index,
                date: Some(entry.date),
                message: "total logged minutes overflow".to_string(),
            })?;
    }

    debug!(entries = entries.len(), total_minutes = total, "normalized log records");
    Ok(entries)
}

fn normalize_record(
    index: usize,
    record: &LogRecord,
    options: &NormalizeOptions<'_>,
) -> EngineResult<LogEntry> {
    let date = read_date(index, record)?;
    let start_minute = read_minutes(index, date, record, "start")?;
    let end_minute = read_minutes(index, date, record, "end")?;

    let project = match record.get("project") {
        None | Some(Value::Null) => None,
        Some(value) => Some(scalar_to_string(value).ok_or_else(|| {
            EngineError::MalformedEntry {
                index,
                date: Some(date),
                message: "'project' must be a scalar".to_string(),
            }
        })?),
    };

    match &project {
        None if options.require_project => {
            return Err(EngineError::MissingProject { index, date });
        }
        Some(code) => {
            if let Some(labels) = options.project_labels {
                if !labels.contains_key(code) {
                    return Err(EngineError::UnknownProjectCode {
                        index,
                        date: Some(date),
                        code: code.clone(),
                    });
                }
            }
        }
        None => {}
    }

    if end_minute < start_minute {
        return Err(EngineError::NegativeDuration {
            index,
            date,
            start: start_minute,
            end: end_minute,
        });
    }

    Ok(LogEntry {
        index,
        date,
        project: ProjectKey::from(project),
        start_minute,
        end_minute,
    })
}

fn read_date(index: usize, record: &LogRecord) -> EngineResult<NaiveDate> {
    let raw = record
        .get("date")
        .and_then(scalar_to_string)
        .ok_or_else(|| EngineError::MalformedEntry {
            index,
            date: None,
            message: "missing 'date'".to_string(),
        })?;

    parse_log_date(&raw).ok_or_else(|| EngineError::MalformedEntry {
        index,
        date: None,
        message: format!("invalid date '{raw}', expected DD/MM/YYYY"),
    })
}

fn read_minutes(
    index: usize,
    date: NaiveDate,
    record: &LogRecord,
    field: &str,
) -> EngineResult<i64> {
    let malformed = |message: String| EngineError::MalformedEntry {
        index,
        date: Some(date),
        message,
    };

    let minutes = match record.get(field) {
        None | Some(Value::Null) => return Err(malformed(format!("missing '{field}'"))),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .filter(|f| f.abs() <= MAX_MINUTE_OFFSET as f64)
                    .map(|f| f as i64)
            })
            .ok_or_else(|| malformed(format!("'{field}' must be a whole number of minutes, got {n}")))?,
        Some(_) => return Err(malformed(format!("'{field}' is not a number"))),
    };

    if !(-MAX_MINUTE_OFFSET..=MAX_MINUTE_OFFSET).contains(&minutes) {
        return Err(malformed(format!(
            "'{field}' is out of range: {minutes} (limit {MAX_MINUTE_OFFSET})"
        )));
    }
    Ok(minutes)
}
