//! Command-line interface.
//!
//! Argument definitions for the `worklog` binary and the function that runs
//! one invocation against an output sink.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{ArgGroup, Parser, ValueEnum};
use tracing::{debug, warn};

use crate::config::{DocumentLoader, parse_log_date};
use crate::report::{
    TableKind, build_summary, write_basic_csv, write_daily_breakdown, write_detailed_csv,
    write_period_table, write_summary, write_summary_json,
};
use crate::worklog::WorkLog;

/// Summarise a YAML work log.
///
/// Prints hours for today, this and last week, this and last pay period,
/// the overall total and, when the log configures contracted hours, the
/// flex-time balance.
#[derive(Debug, Parser)]
#[command(name = "worklog", version, about, long_about = None)]
#[command(group(ArgGroup::new("format").args(["csv", "csv_detailed", "json"])))]
pub struct Cli {
    /// Path to the YAML log document.
    pub path: PathBuf,

    /// Export one row per day and project as CSV.
    #[arg(long)]
    pub csv: bool,

    /// Export one row per log record as CSV, keeping every original field.
    #[arg(long)]
    pub csv_detailed: bool,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,

    /// Print hours for every logged day.
    #[arg(short, long)]
    pub daily: bool,

    /// Print a period by project table.
    #[arg(short, long, value_enum)]
    pub table: Option<TableArg>,

    /// Reference date (DD/MM/YYYY); defaults to the local date.
    #[arg(long, value_parser = parse_today)]
    pub today: Option<NaiveDate>,

    /// Reject log records without a project.
    #[arg(long)]
    pub strict_projects: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Rows of the `--table` view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableArg {
    /// ISO weeks.
    Week,
    /// Pay periods.
    Payperiod,
    /// Calendar days.
    Day,
}

impl From<TableArg> for TableKind {
    fn from(arg: TableArg) -> Self {
        match arg {
            TableArg::Week => TableKind::Week,
            TableArg::Payperiod => TableKind::PayPeriod,
            TableArg::Day => TableKind::Day,
        }
    }
}

fn parse_today(s: &str) -> std::result::Result<NaiveDate, String> {
    parse_log_date(s).ok_or_else(|| format!("invalid date '{s}', expected DD/MM/YYYY"))
}

/// Runs one invocation, writing every report to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    debug!(today = %today, path = %cli.path.display(), "starting run");

    let loader = DocumentLoader::load(&cli.path).context("failed to load log document")?;
    let mut config = loader
        .resolve(today)
        .context("failed to resolve log configuration")?;
    config.require_project |= cli.strict_projects;

    let worklog = WorkLog::from_document(loader.document(), config)
        .context("failed to process log entries")?;

    let machine_readable = cli.csv || cli.csv_detailed || cli.json;
    if machine_readable && (cli.daily || cli.table.is_some()) {
        warn!("--daily and --table are ignored with --csv, --csv-detailed and --json");
    }

    if cli.csv {
        write_basic_csv(&mut *out, &worklog).context("failed to write CSV export")?;
        return Ok(());
    }
    if cli.csv_detailed {
        write_detailed_csv(&mut *out, &loader.document().logs, &worklog)
            .context("failed to write CSV export")?;
        return Ok(());
    }

    let holidays = worklog.holiday_calendar();
    let summary = build_summary(&worklog, today, &holidays);

    if cli.json {
        write_summary_json(out, &summary).context("failed to write JSON summary")?;
        return Ok(());
    }

    if cli.daily {
        write_daily_breakdown(out, worklog.daily())?;
    }
    if let Some(table) = cli.table {
        write_period_table(out, &worklog, table.into())?;
        writeln!(out)?;
    }
    write_summary(out, &summary)?;
    Ok(())
}
