//! Property tests for the aggregation pipeline.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use worklog_engine::calculation::{
    BIWEEKLY_PERIOD_DAYS, PeriodKey, aggregate_daily, bucket_by_project, bucket_totals, month_key,
    pay_period_key, rolling_key, week_key,
};
use worklog_engine::models::{LogEntry, PayPeriodConfig, ProjectKey};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650).prop_map(|offset| base_date() + Duration::days(offset))
}

fn arb_entry() -> impl Strategy<Value = LogEntry> {
    (
        arb_date(),
        prop::option::of(prop::sample::select(vec!["ABC", "OPS", "700"])),
        0i64..1440,
        0i64..600,
    )
        .prop_map(|(date, project, start, length)| LogEntry {
            index: 0,
            date,
            project: ProjectKey::from(project.map(str::to_string)),
            start_minute: start,
            end_minute: start + length,
        })
}

proptest! {
    /// Re-bucketing never gains or loses minutes.
    #[test]
    fn prop_totals_conserved(entries in prop::collection::vec(arb_entry(), 0..200), anchor in arb_date()) {
        let daily = aggregate_daily(&entries);
        let expected: i64 = entries.iter().map(LogEntry::duration_minutes).sum();
        prop_assert_eq!(daily.total_minutes(), expected);

        let biweekly = PayPeriodConfig::biweekly(anchor);
        prop_assert_eq!(bucket_totals(&daily, week_key).total_minutes(), expected);
        prop_assert_eq!(bucket_totals(&daily, month_key).total_minutes(), expected);
        prop_assert_eq!(
            bucket_totals(&daily, |d| pay_period_key(d, &biweekly)).total_minutes(),
            expected
        );
        prop_assert_eq!(bucket_by_project(&daily, week_key).total_minutes(), expected);
    }

    /// Biweekly keys are constant inside a window and change across it.
    #[test]
    fn prop_biweekly_piecewise_constant(date in arb_date(), anchor in arb_date()) {
        let key = rolling_key(date, anchor, BIWEEKLY_PERIOD_DAYS);
        let PeriodKey::Rolling(start) = key else {
            panic!("Expected a rolling key");
        };

        prop_assert!(start <= date);
        prop_assert!(date - start < Duration::days(BIWEEKLY_PERIOD_DAYS));
        prop_assert_eq!((start - anchor).num_days().rem_euclid(BIWEEKLY_PERIOD_DAYS), 0);
        prop_assert_eq!(rolling_key(start + Duration::days(13), anchor, BIWEEKLY_PERIOD_DAYS), key);
        prop_assert_ne!(rolling_key(date + Duration::days(14), anchor, BIWEEKLY_PERIOD_DAYS), key);
    }

    /// Every date lies inside the bounds of its own week and month keys.
    #[test]
    fn prop_keys_contain_their_date(date in arb_date()) {
        for key in [week_key(date), month_key(date)] {
            prop_assert!(key.first_day().unwrap() <= date);
            prop_assert!(key.last_day().unwrap() >= date);
        }
    }
}
