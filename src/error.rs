//! Error types for the work-log engine.
//!
//! Every failure is fatal to a run: the engine never produces a partial
//! report. Each variant carries enough context (record index, date, path)
//! for the diagnostic to point at the offending input.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the work-log engine.
///
/// # Example
///
/// ```
/// use worklog_engine::error::EngineError;
///
/// let error = EngineError::UnknownProjectCode {
///     index: 3,
///     date: None,
///     code: "X".to_string(),
/// };
/// assert_eq!(error.to_string(), "Entry #3: unknown project code 'X'");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The input document was not found or could not be read.
    #[error("Log document not found: {path}")]
    DocumentNotFound {
        /// The path that could not be read.
        path: String,
    },

    /// The input document is not valid YAML or has the wrong shape.
    #[error("Failed to parse log document '{path}': {message}")]
    DocumentParseError {
        /// The path to the document.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A log record has an unparseable date or non-numeric start/end.
    #[error("Entry #{index}{}: {message}", fmt_date(.date))]
    MalformedEntry {
        /// Zero-based index of the record in the `logs` list.
        index: usize,
        /// The record's date, when it could be parsed.
        date: Option<NaiveDate>,
        /// What was wrong with the record.
        message: String,
    },

    /// Strict-project mode is on and a record has no project tag.
    #[error("Entry #{index} ({date}): missing project")]
    MissingProject {
        /// Zero-based index of the record.
        index: usize,
        /// The record's date.
        date: NaiveDate,
    },

    /// A record references a project code absent from `project_codes`.
    #[error("Entry #{index}{}: unknown project code '{code}'", fmt_date(.date))]
    UnknownProjectCode {
        /// Zero-based index of the record.
        index: usize,
        /// The record's date, when it could be parsed.
        date: Option<NaiveDate>,
        /// The unrecognised project code.
        code: String,
    },

    /// A record ends before it starts.
    #[error("Entry #{index} ({date}): end {end} is before start {start}")]
    NegativeDuration {
        /// Zero-based index of the record.
        index: usize,
        /// The record's date.
        date: NaiveDate,
        /// Start minute offset.
        start: i64,
        /// End minute offset.
        end: i64,
    },

    /// The pay-period configuration names an unsupported period type.
    #[error("Unsupported pay period type: {period_type}")]
    UnsupportedPeriodType {
        /// The period type as written in the document.
        period_type: String,
    },

    /// A configuration section holds an invalid value.
    #[error("Invalid configuration '{field}': {message}")]
    InvalidConfig {
        /// The configuration field (e.g. "vacation[0].end").
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// A report could not be written to its destination.
    #[error("Failed to write export: {message}")]
    ExportError {
        /// A description of the write failure.
        message: String,
    },
}

impl From<csv::Error> for EngineError {
    fn from(err: csv::Error) -> Self {
        EngineError::ExportError {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::ExportError {
            message: err.to_string(),
        }
    }
}

fn fmt_date(date: &Option<NaiveDate>) -> String {
    date.map(|d| format!(" ({d})")).unwrap_or_default()
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
