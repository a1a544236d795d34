//! Bucket aggregation.
//!
//! Re-groups the daily `(date, project)` map under any key function. Cells
//! accumulate whole minutes and convert to hours on read, so the grand total
//! is identical whichever key function is used.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{ProjectKey, minutes_to_hours};

use super::daily::MinutesByDateProject;

/// Hours per `(period, project)`.
///
/// # Example
///
/// ```
/// use worklog_engine::calculation::{aggregate_daily, bucket_by_project, week_key};
/// use worklog_engine::models::{LogEntry, ProjectKey};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let entry = LogEntry {
///     index: 0,
///     date: NaiveDate::from_ymd_opt(2024, 1, 22).unwrap(),
///     project: ProjectKey::Assigned("ABC".to_string()),
///     start_minute: 540,
///     end_minute: 1020,
/// };
/// let daily = aggregate_daily(&[entry]);
/// let table = bucket_by_project(&daily, week_key);
/// assert_eq!(table.total_hours(), Decimal::new(8, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoursTable<K> {
    cells: BTreeMap<(K, ProjectKey), i64>,
}

impl<K: Ord + Clone> HoursTable<K> {
    /// Returns the hours in one cell, if anything was logged there.
    pub fn hours(&self, period: &K, project: &ProjectKey) -> Option<Decimal> {
        self.cells
            .get(&(period.clone(), project.clone()))
            .map(|m| minutes_to_hours(*m))
    }

    /// Returns the distinct periods, in order.
    pub fn periods(&self) -> BTreeSet<&K> {
        self.cells.keys().map(|(period, _)| period).collect()
    }

    /// Returns the distinct projects, in order.
    pub fn projects(&self) -> BTreeSet<&ProjectKey> {
        self.cells.keys().map(|(_, project)| project).collect()
    }

    /// Returns the hours logged in a period across all projects.
    pub fn period_hours(&self, period: &K) -> Decimal {
        minutes_to_hours(
            self.cells
                .iter()
                .filter(|((p, _), _)| p == period)
                .map(|(_, m)| *m)
                .sum(),
        )
    }

    /// Returns the hours logged for a project across all periods.
    pub fn project_hours(&self, project: &ProjectKey) -> Decimal {
        minutes_to_hours(
            self.cells
                .iter()
                .filter(|((_, p), _)| p == project)
                .map(|(_, m)| *m)
                .sum(),
        )
    }

    /// Returns the grand total in minutes.
    pub fn total_minutes(&self) -> i64 {
        self.cells.values().sum()
    }

    /// Returns the grand total in hours.
    pub fn total_hours(&self) -> Decimal {
        minutes_to_hours(self.total_minutes())
    }

    /// Iterates over `(period, project, hours)`.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &ProjectKey, Decimal)> {
        self.cells
            .iter()
            .map(|((period, project), m)| (period, project, minutes_to_hours(*m)))
    }

    /// Collapses the project dimension.
    pub fn totals(&self) -> PeriodTotals<K> {
        let mut totals = BTreeMap::new();
        for ((period, _), minutes) in &self.cells {
            *totals.entry(period.clone()).or_insert(0) += minutes;
        }
        PeriodTotals { totals }
    }

    /// Returns true if the table has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Hours per period, without a project breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodTotals<K> {
    totals: BTreeMap<K, i64>,
}

impl<K: Ord> PeriodTotals<K> {
    /// Returns the hours logged in a period.
    ///
    /// `None` means nothing was logged in that period. This is an ordinary
    /// empty result, not an error.
    pub fn hours(&self, period: &K) -> Option<Decimal> {
        self.totals.get(period).map(|m| minutes_to_hours(*m))
    }

    /// Returns the minutes logged in a period.
    pub fn minutes(&self, period: &K) -> Option<i64> {
        self.totals.get(period).copied()
    }

    /// Iterates over `(period, hours)` in period order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, Decimal)> {
        self.totals.iter().map(|(k, m)| (k, minutes_to_hours(*m)))
    }

    /// Returns the grand total in minutes.
    pub fn total_minutes(&self) -> i64 {
        self.totals.values().sum()
    }

    /// Returns the grand total in hours.
    pub fn total_hours(&self) -> Decimal {
        minutes_to_hours(self.total_minutes())
    }

    /// Returns the number of periods.
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Returns true if there are no periods.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Groups the daily map by `key_fn`, keeping the project dimension.
pub fn bucket_by_project<K, F>(daily: &MinutesByDateProject, key_fn: F) -> HoursTable<K>
where
    K: Ord + Clone,
    F: Fn(NaiveDate) -> K,
{
    let mut cells = BTreeMap::new();
    for (date, project, minutes) in daily.iter() {
        *cells.entry((key_fn(date), project.clone())).or_insert(0) += minutes;
    }
    HoursTable { cells }
}

/// Groups the daily map by `key_fn`, summing across projects.
pub fn bucket_totals<K, F>(daily: &MinutesByDateProject, key_fn: F) -> PeriodTotals<K>
where
    K: Ord,
    F: Fn(NaiveDate) -> K,
{
    let mut totals = BTreeMap::new();
    for (date, _, minutes) in daily.iter() {
        *totals.entry(key_fn(date)).or_insert(0) += minutes;
    }
    PeriodTotals { totals }
}
