//! Console and JSON summary.

use std::io::Write;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::calculation::{
    FlexBalance, PeriodKey, PeriodTotals, pay_period_key, previous_pay_period_key,
    previous_week_key, week_key,
};
use crate::error::{EngineError, EngineResult};
use crate::models::HolidayCalendar;
use crate::worklog::WorkLog;

use super::{format_hours, format_signed_hours};

/// Hours logged in one named period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodHours {
    /// The period's key.
    pub period: PeriodKey,
    /// Hours logged, or `None` when nothing was logged in the period.
    pub hours: Option<Decimal>,
}

impl PeriodHours {
    fn lookup(totals: &PeriodTotals<PeriodKey>, period: PeriodKey) -> Self {
        Self {
            hours: totals.hours(&period),
            period,
        }
    }
}

/// The headline numbers of a run, relative to `today`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// The reference date.
    pub today: NaiveDate,
    /// Hours logged on `today`.
    pub hours_today: Option<Decimal>,
    /// The ISO week containing `today`.
    pub this_week: PeriodHours,
    /// The ISO week before it.
    pub last_week: PeriodHours,
    /// The pay period containing `today`.
    pub this_pay_period: PeriodHours,
    /// The pay period before it.
    pub last_pay_period: PeriodHours,
    /// Hours logged across the whole document.
    pub total_hours: Decimal,
    /// Flex-time balance, when the document configures work hours.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<FlexBalance>,
}

/// Assembles the summary for `today`.
///
/// # Example
///
/// ```
/// use worklog_engine::config::DocumentLoader;
/// use worklog_engine::models::NoHolidays;
/// use worklog_engine::report::build_summary;
/// use worklog_engine::worklog::WorkLog;
/// use chrono::NaiveDate;
///
/// let loader = DocumentLoader::from_yaml("logs: []", "inline")?;
/// let today = NaiveDate::from_ymd_opt(2024, 1, 22).unwrap();
/// let worklog = WorkLog::from_document(loader.document(), loader.resolve(today)?)?;
///
/// let summary = build_summary(&worklog, today, &NoHolidays);
/// assert_eq!(summary.hours_today, None);
/// assert!(summary.flex.is_none());
/// # Ok::<(), worklog_engine::error::EngineError>(())
/// ```
pub fn build_summary(worklog: &WorkLog, today: NaiveDate, holidays: &dyn HolidayCalendar) -> Summary {
    let pay_period = worklog.config().pay_period;
    let weekly = worklog.weekly_totals();
    let periodic = worklog.pay_period_totals();

    let summary = Summary {
        today,
        hours_today: worklog.day_hours(today),
        this_week: PeriodHours::lookup(&weekly, week_key(today)),
        last_week: PeriodHours::lookup(&weekly, previous_week_key(today)),
        this_pay_period: PeriodHours::lookup(&periodic, pay_period_key(today, &pay_period)),
        last_pay_period: PeriodHours::lookup(
            &periodic,
            previous_pay_period_key(today, &pay_period),
        ),
        total_hours: worklog.total_hours(),
        flex: worklog.flex_balance(today, holidays),
    };

    debug!(
        today = %today,
        total_hours = %summary.total_hours,
        flex = summary.flex.is_some(),
        "built summary"
    );
    summary
}

/// Writes the console summary.
///
/// Periods without entries print `no hours <period>`; that is an ordinary
/// outcome, not an error.
pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> EngineResult<()> {
    write_period_line(out, "today", summary.hours_today)?;
    write_period_line(out, "this week", summary.this_week.hours)?;
    write_period_line(out, "last week", summary.last_week.hours)?;
    write_period_line(out, "this payperiod", summary.this_pay_period.hours)?;
    write_period_line(out, "last payperiod", summary.last_pay_period.hours)?;
    writeln!(out, "total hours: {}", format_hours(summary.total_hours))?;

    if let Some(flex) = &summary.flex {
        writeln!(
            out,
            "expected hours: {} ({} working days)",
            format_hours(flex.expected.expected_hours),
            flex.expected.working_days
        )?;
        writeln!(out, "flex balance: {}", format_signed_hours(flex.balance))?;
    }
    Ok(())
}

/// Writes the summary as pretty-printed JSON.
pub fn write_summary_json<W: Write>(out: &mut W, summary: &Summary) -> EngineResult<()> {
    serde_json::to_writer_pretty(&mut *out, summary).map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })?;
    writeln!(out)?;
    Ok(())
}

fn write_period_line<W: Write>(out: &mut W, label: &str, hours: Option<Decimal>) -> EngineResult<()> {
    match hours {
        Some(hours) => writeln!(out, "hours {label}: {}", format_hours(hours))?,
        None => writeln!(out, "no hours {label}")?,
    }
    Ok(())
}
