//! Console tables: the period by project grid and the daily breakdown.

use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{HoursTable, MinutesByDateProject};
use crate::config::WorkLogConfig;
use crate::error::{EngineError, EngineResult};
use crate::worklog::WorkLog;

use super::{format_clock, format_hours};

const TOTAL_LABEL: &str = "Total";
const EMPTY_CELL: &str = "-";

/// Which period the rows of a table represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// One row per ISO week.
    Week,
    /// One row per pay period.
    PayPeriod,
    /// One row per calendar day.
    Day,
}

impl FromStr for TableKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(TableKind::Week),
            "payperiod" | "pay_period" => Ok(TableKind::PayPeriod),
            "day" => Ok(TableKind::Day),
            other => Err(EngineError::InvalidConfig {
                field: "table".to_string(),
                message: format!("unknown table kind '{other}', expected week, payperiod or day"),
            }),
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::Week => write!(f, "Week"),
            TableKind::PayPeriod => write!(f, "Pay period"),
            TableKind::Day => write!(f, "Day"),
        }
    }
}

/// Writes a period by project table for `worklog`.
///
/// Columns carry project display labels, followed by a `Total` column; the
/// last row holds per-project totals.
pub fn write_period_table<W: Write>(
    out: &mut W,
    worklog: &WorkLog,
    kind: TableKind,
) -> EngineResult<()> {
    let header = kind.to_string();
    match kind {
        TableKind::Week => write_grid(out, &header, &worklog.weekly_by_project(), worklog.config()),
        TableKind::PayPeriod => write_grid(
            out,
            &header,
            &worklog.pay_period_by_project(),
            worklog.config(),
        ),
        TableKind::Day => write_grid(
            out,
            &header,
            &worklog.daily_by_project(),
            worklog.config(),
        ),
    }
}

/// Writes one `YYYY/MM/DD: HH:MM` line per logged day, in date order.
pub fn write_daily_breakdown<W: Write>(
    out: &mut W,
    daily: &MinutesByDateProject,
) -> EngineResult<()> {
    for (date, minutes) in daily.day_totals() {
        writeln!(out, "{}: {}", date.format("%Y/%m/%d"), format_clock(minutes))?;
    }
    Ok(())
}

fn write_grid<W: Write, K: Ord + Clone + Display>(
    out: &mut W,
    header: &str,
    table: &HoursTable<K>,
    config: &WorkLogConfig,
) -> EngineResult<()> {
    if table.is_empty() {
        writeln!(out, "no hours logged")?;
        return Ok(());
    }

    let projects: Vec<_> = table.projects().into_iter().cloned().collect();
    let cell = |hours: Option<Decimal>| hours.map_or_else(|| EMPTY_CELL.to_string(), format_hours);

    let mut rows: Vec<Vec<String>> = Vec::new();
    rows.push(
        std::iter::once(header.to_string())
            .chain(projects.iter().map(|p| config.project_label(p)))
            .chain(std::iter::once(TOTAL_LABEL.to_string()))
            .collect(),
    );
    for period in table.periods() {
        rows.push(
            std::iter::once(period.to_string())
                .chain(projects.iter().map(|p| cell(table.hours(period, p))))
                .chain(std::iter::once(format_hours(table.period_hours(period))))
                .collect(),
        );
    }
    rows.push(
        std::iter::once(TOTAL_LABEL.to_string())
            .chain(projects.iter().map(|p| format_hours(table.project_hours(p))))
            .chain(std::iter::once(format_hours(table.total_hours())))
            .collect(),
    );

    let columns = projects.len() + 2;
    let widths: Vec<usize> = (0..columns)
        .map(|c| rows.iter().map(|r| r[c].chars().count()).max().unwrap_or(0))
        .collect();

    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(c, (text, &width))| {
                if c == 0 {
                    format!("{text:<width$}")
                } else {
                    format!("{text:>width$}")
                }
            })
            .collect();
        writeln!(out, "{}", line.join("  ").trim_end())?;
    }
    Ok(())
}
