//! Daily aggregation.
//!
//! Sums normalized entries per `(date, project)`. Every later view (weeks,
//! pay periods, flex time) is derived from this map.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{LogEntry, ProjectKey};

/// Accumulated minutes per `(date, project)`.
///
/// Built once per run and read-only afterwards. Iteration is ordered by
/// date, then project.
///
/// # Example
///
/// ```
/// use worklog_engine::calculation::aggregate_daily;
/// use worklog_engine::models::{LogEntry, ProjectKey};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 22).unwrap();
/// let entry = |start, end| LogEntry {
///     index: 0,
///     date,
///     project: ProjectKey::Unassigned,
///     start_minute: start,
///     end_minute: end,
/// };
///
/// let daily = aggregate_daily(&[entry(540, 720), entry(780, 1020)]);
/// assert_eq!(daily.minutes(date, &ProjectKey::Unassigned), Some(420));
/// assert_eq!(daily.total_minutes(), 420);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MinutesByDateProject {
    minutes: BTreeMap<(NaiveDate, ProjectKey), i64>,
}

impl MinutesByDateProject {
    /// Returns the minutes logged for a project on a date, if any entry exists.
    pub fn minutes(&self, date: NaiveDate, project: &ProjectKey) -> Option<i64> {
        self.minutes.get(&(date, project.clone())).copied()
    }

    /// Returns the minutes logged on a date across all projects.
    ///
    /// `None` means nothing was logged that day, which is different from a
    /// day whose entries add up to zero minutes.
    pub fn day_total(&self, date: NaiveDate) -> Option<i64> {
        let mut cells = self
            .minutes
            .range((date, ProjectKey::Assigned(String::new()))..=(date, ProjectKey::Unassigned))
            .map(|(_, minutes)| *minutes)
            .peekable();
        cells.peek()?;
        Some(cells.sum())
    }

    /// Returns per-day totals across all projects.
    pub fn day_totals(&self) -> BTreeMap<NaiveDate, i64> {
        let mut totals = BTreeMap::new();
        for ((date, _), minutes) in &self.minutes {
            *totals.entry(*date).or_insert(0) += minutes;
        }
        totals
    }

    /// Iterates over `(date, project, minutes)` in date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &ProjectKey, i64)> {
        self.minutes
            .iter()
            .map(|((date, project), minutes)| (*date, project, *minutes))
    }

    /// Returns the sum of all logged minutes.
    pub fn total_minutes(&self) -> i64 {
        self.minutes.values().sum()
    }

    /// Returns the earliest logged date.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.minutes.keys().next().map(|(date, _)| *date)
    }

    /// Returns the latest logged date.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.minutes.keys().next_back().map(|(date, _)| *date)
    }

    /// Returns every project seen, in sort order.
    pub fn projects(&self) -> BTreeSet<&ProjectKey> {
        self.minutes.keys().map(|(_, project)| project).collect()
    }

    /// Returns the number of `(date, project)` cells.
    pub fn len(&self) -> usize {
        self.minutes.len()
    }

    /// Returns true if nothing was logged.
    pub fn is_empty(&self) -> bool {
        self.minutes.is_empty()
    }
}

/// Groups entries by `(date, project)`, summing their durations.
pub fn aggregate_daily(entries: &[LogEntry]) -> MinutesByDateProject {
    let mut minutes = BTreeMap::new();
    for entry in entries {
        let cell = minutes
            .entry((entry.date, entry.project.clone()))
            .or_insert(0i64);
        *cell = cell.saturating_add(entry.duration_minutes());
    }

    debug!(
        entries = entries.len(),
        cells = minutes.len(),
        "aggregated daily minutes"
    );
    MinutesByDateProject { minutes }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(date: &str, project: Option<&str>, start: i64, end: i64) -> LogEntry {
        LogEntry {
            index: 0,
            date: make_date(date),
            project: ProjectKey::from(project.map(str::to_string)),
            start_minute: start,
            end_minute: end,
        }
    }

    fn abc() -> ProjectKey {
        ProjectKey::Assigned("ABC".to_string())
    }

    /// DA-001: entries on the same day and project are summed
    #[test]
    fn test_same_day_same_project_summed() {
        let daily = aggregate_daily(&[
            entry("2024-01-22", Some("ABC"), 540, 720),
            entry("2024-01-22", Some("ABC"), 780, 1020),
        ]);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily.minutes(make_date("2024-01-22"), &abc()), Some(420));
    }

    /// DA-002: different projects on one day stay separate
    #[test]
    fn test_projects_kept_separate() {
        let daily = aggregate_daily(&[
            entry("2024-01-22", Some("ABC"), 540, 720),
            entry("2024-01-22", None, 780, 840),
        ]);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily.day_total(make_date("2024-01-22")), Some(240));
        assert_eq!(
            daily.minutes(make_date("2024-01-22"), &ProjectKey::Unassigned),
            Some(60)
        );
    }

    /// DA-003: input order does not matter
    #[test]
    fn test_cell_sum_saturates() {
        let daily = aggregate_daily(&[
            entry("2024-01-22", None, 0, i64::MAX),
            entry("2024-01-22", None, 0, i64::MAX),
        ]);
        assert_eq!(daily.total_minutes(), i64::MAX);
    }

    #[test]
    fn test_order_independent() {
        let a = entry("2024-01-23", Some("ABC"), 0, 60);
        let b = entry("2024-01-22", Some("ABC"), 0, 30);
        let c = entry("2024-01-23", None, 0, 15);
        let forward = aggregate_daily(&[a.clone(), b.clone(), c.clone()]);
        let backward = aggregate_daily(&[c, b, a]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_day_total_none_when_nothing_logged() {
        let daily = aggregate_daily(&[entry("2024-01-22", Some("ABC"), 540, 600)]);
        assert_eq!(daily.day_total(make_date("2024-01-23")), None);
    }

    #[test]
    fn test_day_total_zero_length_entry_is_present() {
        let daily = aggregate_daily(&[entry("2024-01-22", None, 600, 600)]);
        assert_eq!(daily.day_total(make_date("2024-01-22")), Some(0));
    }

    #[test]
    fn test_first_and_last_date() {
        let daily = aggregate_daily(&[
            entry("2024-03-01", None, 0, 60),
            entry("2024-01-22", Some("ABC"), 0, 60),
            entry("2024-02-10", None, 0, 60),
        ]);
        assert_eq!(daily.first_date(), Some(make_date("2024-01-22")));
        assert_eq!(daily.last_date(), Some(make_date("2024-03-01")));
    }

    #[test]
    fn test_empty_aggregation() {
        let daily = aggregate_daily(&[]);
        assert!(daily.is_empty());
        assert_eq!(daily.first_date(), None);
        assert_eq!(daily.total_minutes(), 0);
    }

    #[test]
    fn test_day_totals_and_projects() {
        let daily = aggregate_daily(&[
            entry("2024-01-22", Some("ABC"), 0, 60),
            entry("2024-01-22", None, 0, 30),
            entry("2024-01-23", Some("XYZ"), 0, 45),
        ]);
        let totals = daily.day_totals();
        assert_eq!(totals.get(&make_date("2024-01-22")), Some(&90));
        assert_eq!(totals.get(&make_date("2024-01-23")), Some(&45));

        let projects: Vec<String> = daily.projects().iter().map(|p| p.to_string()).collect();
        assert_eq!(projects, vec!["ABC", "XYZ", "Unassigned"]);
    }
}
