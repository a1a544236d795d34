//! CSV exports.
//!
//! Two shapes are supported. The basic export has one row per
//! `(date, project)` cell of the daily aggregation. The detailed export has
//! one row per original log record, keeping every field the user wrote and
//! adding the project's display label and the record's hours.

use std::collections::BTreeSet;
use std::io::Write;

use serde_yaml::Value;
use tracing::debug;

use crate::config::scalar_to_string;
use crate::error::EngineResult;
use crate::models::{LogRecord, minutes_to_hours};
use crate::worklog::WorkLog;

use super::format_hours;

/// Header of the basic export.
pub const BASIC_CSV_HEADER: [&str; 3] = [PROJECT_LABEL_COLUMN, "date", HOURS_COLUMN];

/// Derived column holding the project's display label.
pub const PROJECT_LABEL_COLUMN: &str = "project_label";

/// Derived column holding a row's hours.
pub const HOURS_COLUMN: &str = "hours";

/// Writes one row per `(date, project)`, sorted by date then label.
///
/// Dates are `YYYY-MM-DD` and hours carry two decimals.
pub fn write_basic_csv<W: Write>(out: W, worklog: &WorkLog) -> EngineResult<()> {
    let config = worklog.config();
    let mut rows: Vec<_> = worklog
        .daily()
        .iter()
        .map(|(date, project, minutes)| (date, config.project_label(project), minutes))
        .collect();
    rows.sort();

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(BASIC_CSV_HEADER)?;
    for (date, label, minutes) in &rows {
        writer.write_record([
            label.clone(),
            date.format("%Y-%m-%d").to_string(),
            format_hours(minutes_to_hours(*minutes)),
        ])?;
    }
    writer.flush()?;

    debug!(rows = rows.len(), "wrote basic CSV export");
    Ok(())
}

/// Returns the detailed export's columns for `records`.
///
/// The union of all record keys in alphabetical order. `project_label` is
/// moved to the front and `hours` to the back unless a record already
/// carries a key of that name, in which case the column keeps its
/// alphabetical position.
///
/// # Example
///
/// ```
/// use worklog_engine::models::LogRecord;
/// use worklog_engine::report::detailed_columns;
///
/// let records: Vec<LogRecord> = serde_yaml::from_str(
///     "- { date: 22/01/2024, start: 540, end: 600, project: ABC }\n- { date: 23/01/2024, start: 0, end: 60, note: x }",
/// ).unwrap();
/// assert_eq!(
///     detailed_columns(&records),
///     vec!["project_label", "date", "end", "note", "project", "start", "hours"]
/// );
/// ```
pub fn detailed_columns(records: &[LogRecord]) -> Vec<String> {
    let keys: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.keys().map(String::as_str))
        .collect();

    let mut columns = Vec::with_capacity(keys.len() + 2);
    if !keys.contains(PROJECT_LABEL_COLUMN) {
        columns.push(PROJECT_LABEL_COLUMN.to_string());
    }
    columns.extend(keys.iter().map(|k| k.to_string()));
    if !keys.contains(HOURS_COLUMN) {
        columns.push(HOURS_COLUMN.to_string());
    }
    columns
}

/// Writes one row per original record.
///
/// Record fields are rendered as written; a record without a column's key
/// gets an empty field. `project_label` and `hours` are always the derived
/// values, even when a record carries keys of the same name.
///
/// `records` must be the records `worklog` was built from.
pub fn write_detailed_csv<W: Write>(
    out: W,
    records: &[LogRecord],
    worklog: &WorkLog,
) -> EngineResult<()> {
    let config = worklog.config();
    let columns = detailed_columns(records);

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(&columns)?;

    for (record, entry) in records.iter().zip(worklog.entries()) {
        let row: Vec<String> = columns
            .iter()
            .map(|column| match column.as_str() {
                PROJECT_LABEL_COLUMN => config.project_label(&entry.project),
                HOURS_COLUMN => format_hours(entry.hours()),
                key => record.get(key).map(render_value).unwrap_or_default(),
            })
            .collect();
        writer.write_record(&row)?;
    }
    writer.flush()?;

    debug!(
        rows = records.len(),
        columns = columns.len(),
        "wrote detailed CSV export"
    );
    Ok(())
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Sequence(_) | Value::Mapping(_) => serde_yaml::to_string(value)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
        scalar => scalar_to_string(scalar).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DocumentLoader;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    const LOG: &str = "\
project_codes:
  ABC: Alpha Build
  700: Work For Hire
logs:
  - { date: 23/01/2024, start: 540, end: 600, project: ABC, note: 'standup, planning' }
  - { date: 22/01/2024, start: 540, end: 1020, project: ABC }
  - { date: 22/01/2024, start: 1020, end: 1050 }
  - { date: 22/01/2024, start: 600, end: 645, project: 700 }
";

    fn load() -> (Vec<LogRecord>, WorkLog) {
        let loader = DocumentLoader::from_yaml(LOG, "inline").unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let config = loader.resolve(today).unwrap();
        let worklog = WorkLog::from_document(loader.document(), config).unwrap();
        (loader.into_document().logs, worklog)
    }

    /// CSV-001: basic export rows sorted by date then label
    #[test]
    fn test_basic_export() {
        let (_, worklog) = load();
        let mut out = Vec::new();
        write_basic_csv(&mut out, &worklog).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "project_label,date,hours\n\
             Alpha Build,2024-01-22,8.00\n\
             Unassigned,2024-01-22,0.50\n\
             Work For Hire,2024-01-22,0.75\n\
             Alpha Build,2024-01-23,1.00\n"
        );
    }

    /// CSV-002: detailed export round trip
    #[test]
    fn test_detailed_round_trip() {
        let (records, worklog) = load();
        let mut out = Vec::new();
        write_detailed_csv(&mut out, &records, &worklog).unwrap();

        let mut reader = csv::Reader::from_reader(out.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["project_label", "date", "end", "note", "project", "start", "hours"]
        );

        let rows: Vec<BTreeMap<String, String>> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), records.len());

        for (row, record) in rows.iter().zip(&records) {
            for (key, value) in record {
                assert_eq!(row[key], render_value(value), "field {key}");
            }
        }

        assert_eq!(rows[0]["note"], "standup, planning");
        assert_eq!(rows[0]["hours"], "1.00");
        assert_eq!(rows[2]["project"], "");
        assert_eq!(rows[2]["project_label"], "Unassigned");
        assert_eq!(rows[3]["project"], "700");
        assert_eq!(rows[3]["project_label"], "Work For Hire");
    }

    #[test]
    fn test_columns_keep_natural_hours_position() {
        let records: Vec<LogRecord> =
            serde_yaml::from_str("- { date: 22/01/2024, start: 0, end: 60, hours: 1 }").unwrap();
        assert_eq!(
            detailed_columns(&records),
            vec!["project_label", "date", "end", "hours", "start"]
        );
    }

    /// CSV-003: derived label and hours replace same-named record fields
    #[test]
    fn test_derived_columns_shadow_record_fields() {
        let loader = DocumentLoader::from_yaml(
            "project_codes:\n  ABC: Alpha Build\nlogs:\n  - { date: 22/01/2024, start: 540, end: 600, project: ABC, project_label: mine, hours: 99 }\n",
            "inline",
        )
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let worklog = WorkLog::from_document(loader.document(), loader.resolve(today).unwrap()).unwrap();
        let records = loader.into_document().logs;

        let mut out = Vec::new();
        write_detailed_csv(&mut out, &records, &worklog).unwrap();

        let mut reader = csv::Reader::from_reader(out.as_slice());
        assert_eq!(
            reader.headers().unwrap().iter().collect::<Vec<_>>(),
            vec!["date", "end", "hours", "project", "project_label", "start"]
        );
        let rows: Vec<BTreeMap<String, String>> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows[0]["project_label"], "Alpha Build");
        assert_eq!(rows[0]["hours"], "1.00");
        assert_eq!(rows[0]["project"], "ABC");
    }

    #[test]
    fn test_columns_for_no_records() {
        assert_eq!(detailed_columns(&[]), vec!["project_label", "hours"]);
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&Value::Null), "");
        assert_eq!(render_value(&Value::from(540)), "540");
        assert_eq!(render_value(&Value::from("22/01/2024")), "22/01/2024");
        assert_eq!(render_value(&Value::from(true)), "true");
    }
}
