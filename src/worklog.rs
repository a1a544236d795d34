//! The immutable snapshot a run reports from.
//!
//! A [`WorkLog`] is built once from the log document: records are
//! normalized and aggregated per day eagerly, and every periodic view is
//! derived from that daily map on request.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::calculation::{
    ExpectedHoursPolicy, ExpectedHoursResult, FlexBalance, HoursTable, MinutesByDateProject,
    NormalizeOptions, PeriodKey, PeriodTotals, aggregate_daily, bucket_by_project, bucket_totals,
    calculate_expected_hours, normalize_entries, pay_period_key, reconcile_flex, week_key,
};
use crate::config::{LogDocument, WorkLogConfig};
use crate::error::EngineResult;
use crate::models::{
    AustralianHolidays, HolidayCalendar, HolidayCalendars, LogEntry, LogRecord, minutes_to_hours,
};

/// Normalized entries, their daily aggregation and the run's settings.
///
/// # Example
///
/// ```
/// use worklog_engine::config::DocumentLoader;
/// use worklog_engine::worklog::WorkLog;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let loader = DocumentLoader::from_yaml(
///     "logs:\n  - { date: 22/01/2024, start: 540, end: 1020, project: ABC }\n",
///     "inline",
/// )?;
/// let today = NaiveDate::from_ymd_opt(2024, 1, 22).unwrap();
/// let config = loader.resolve(today)?;
/// let worklog = WorkLog::from_document(loader.document(), config)?;
///
/// assert_eq!(worklog.total_hours(), Decimal::new(8, 0));
/// # Ok::<(), worklog_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct WorkLog {
    config: WorkLogConfig,
    entries: Vec<LogEntry>,
    daily: MinutesByDateProject,
}

impl WorkLog {
    /// Builds the snapshot from a parsed document and its resolved settings.
    pub fn from_document(document: &LogDocument, config: WorkLogConfig) -> EngineResult<Self> {
        Self::from_records(&document.logs, config)
    }

    /// Builds the snapshot from raw records.
    ///
    /// # Errors
    ///
    /// Any normalization error aborts the build; see
    /// [`normalize_entries`](crate::calculation::normalize_entries).
    pub fn from_records(records: &[LogRecord], config: WorkLogConfig) -> EngineResult<Self> {
        let options = NormalizeOptions {
            require_project: config.require_project,
            project_labels: config.project_labels.as_ref(),
        };
        let entries = normalize_entries(records, &options)?;
        let daily = aggregate_daily(&entries);

        info!(
            entries = entries.len(),
            days = daily.day_totals().len(),
            total_minutes = daily.total_minutes(),
            "built work log"
        );

        Ok(Self {
            config,
            entries,
            daily,
        })
    }

    /// Returns the run's settings.
    pub fn config(&self) -> &WorkLogConfig {
        &self.config
    }

    /// Returns the normalized entries, in document order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Returns the per-day, per-project aggregation.
    pub fn daily(&self) -> &MinutesByDateProject {
        &self.daily
    }

    /// Returns the hours logged on `date`, if anything was logged.
    pub fn day_hours(&self, date: NaiveDate) -> Option<Decimal> {
        self.daily.day_total(date).map(minutes_to_hours)
    }

    /// Returns the total minutes logged.
    pub fn total_minutes(&self) -> i64 {
        self.daily.total_minutes()
    }

    /// Returns the total hours logged.
    pub fn total_hours(&self) -> Decimal {
        minutes_to_hours(self.total_minutes())
    }

    /// Hours per ISO week.
    pub fn weekly_totals(&self) -> PeriodTotals<PeriodKey> {
        bucket_totals(&self.daily, week_key)
    }

    /// Hours per pay period.
    pub fn pay_period_totals(&self) -> PeriodTotals<PeriodKey> {
        let pay_period = self.config.pay_period;
        bucket_totals(&self.daily, move |date| pay_period_key(date, &pay_period))
    }

    /// Hours per ISO week and project.
    pub fn weekly_by_project(&self) -> HoursTable<PeriodKey> {
        bucket_by_project(&self.daily, week_key)
    }

    /// Hours per pay period and project.
    pub fn pay_period_by_project(&self) -> HoursTable<PeriodKey> {
        let pay_period = self.config.pay_period;
        bucket_by_project(&self.daily, move |date| pay_period_key(date, &pay_period))
    }

    /// Hours per day and project.
    pub fn daily_by_project(&self) -> HoursTable<NaiveDate> {
        bucket_by_project(&self.daily, |date| date)
    }

    /// Builds the holiday calendar for this run.
    ///
    /// Combines the built-in Australian calendar with the holidays listed in
    /// the document. A configured region neither source knows about is
    /// logged and treated as having no holidays.
    pub fn holiday_calendar(&self) -> HolidayCalendars {
        let calendars = HolidayCalendars::new()
            .with(AustralianHolidays)
            .with(self.config.holidays.clone());

        if let (Some(region), Some(first), Some(last)) = (
            self.config
                .flex
                .as_ref()
                .and_then(|f| f.holiday_region.as_deref()),
            self.daily.first_date(),
            self.daily.last_date(),
        ) {
            if !calendars.knows_region(region, first.year()..=last.year()) {
                warn!(
                    region,
                    "no holiday data for region, treating every weekday as a working day"
                );
            }
        }

        calendars
    }

    /// Calculates expected hours up to `today`.
    ///
    /// Returns `None` when the document has no work-hours `config` section.
    pub fn expected_hours(
        &self,
        today: NaiveDate,
        holidays: &dyn HolidayCalendar,
    ) -> Option<ExpectedHoursResult> {
        let flex = self.config.flex.as_ref()?;
        let policy = ExpectedHoursPolicy {
            flex,
            vacations: &self.config.vacations,
            holidays,
        };
        Some(calculate_expected_hours(
            self.daily.first_date(),
            today,
            &policy,
        ))
    }

    /// Reconciles logged hours against expected hours up to `today`.
    ///
    /// Returns `None` when flex tracking is not configured.
    pub fn flex_balance(
        &self,
        today: NaiveDate,
        holidays: &dyn HolidayCalendar,
    ) -> Option<FlexBalance> {
        self.expected_hours(today, holidays)
            .map(|expected| reconcile_flex(self.total_minutes(), expected))
    }
}
