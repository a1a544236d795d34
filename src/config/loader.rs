//! Log document loading.
//!
//! This module provides the [`DocumentLoader`] type for reading a YAML log
//! document from disk.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{LogDocument, WorkLogConfig};

/// Loads a log document and gives access to its resolved settings.
///
/// # Document Structure
///
/// ```text
/// logs:            # required list of { date, start, end, project? }
/// config:          # optional { hours_per_week, holiday_region?, require_project? }
/// project_codes:   # optional { code: label }
/// payperiod:       # optional { type, start } or "monthly" / "biweekly"
/// vacation:        # optional list of { start, end }
/// holidays:        # optional list of { date, name?, region? }
/// ```
///
/// # Example
///
/// ```no_run
/// use worklog_engine::config::DocumentLoader;
/// use chrono::NaiveDate;
///
/// let loader = DocumentLoader::load("./log.yaml")?;
/// let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let config = loader.resolve(today)?;
/// println!("{} records, {} pay periods", loader.document().logs.len(), config.pay_period.period_type);
/// # Ok::<(), worklog_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    document: LogDocument,
}

impl DocumentLoader {
    /// Loads a log document from `path`.
    ///
    /// # Returns
    ///
    /// Returns a `DocumentLoader` on success, or an error if:
    /// - The file is missing or unreadable (`DocumentNotFound`)
    /// - The file is not valid YAML or lacks a `logs` list (`DocumentParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::DocumentNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::from_yaml(&content, &path_str)?;
        info!(
            path = %path_str,
            records = loader.document.logs.len(),
            "loaded log document"
        );
        Ok(loader)
    }

    /// Parses a log document from YAML text.
    ///
    /// `origin` names the source in error messages.
    pub fn from_yaml(content: &str, origin: &str) -> EngineResult<Self> {
        let document =
            serde_yaml::from_str(content).map_err(|e| EngineError::DocumentParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { document })
    }

    /// Returns the parsed document.
    pub fn document(&self) -> &LogDocument {
        &self.document
    }

    /// Consumes the loader and returns the parsed document.
    pub fn into_document(self) -> LogDocument {
        self.document
    }

    /// Resolves the document's settings for a run on `today`.
    pub fn resolve(&self, today: NaiveDate) -> EngineResult<WorkLogConfig> {
        self.document.resolve_config(today)
    }
}
