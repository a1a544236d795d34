//! Flex-time reconciliation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::minutes_to_hours;

use super::expected_hours::ExpectedHoursResult;

/// Logged hours measured against expected hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexBalance {
    /// Total hours logged across the whole document.
    pub logged_hours: Decimal,
    /// The expected-hours sweep the balance is measured against.
    pub expected: ExpectedHoursResult,
    /// `logged_hours - expected.expected_hours`. Positive means surplus.
    pub balance: Decimal,
}

impl FlexBalance {
    /// Returns true if more hours were logged than expected.
    pub fn is_surplus(&self) -> bool {
        self.balance > Decimal::ZERO
    }
}

/// Reconciles logged minutes against an expected-hours result.
///
/// # Example
///
/// ```
/// use worklog_engine::calculation::{ExpectedHoursResult, reconcile_flex};
/// use rust_decimal::Decimal;
///
/// let mut expected = ExpectedHoursResult::empty();
/// expected.expected_hours = Decimal::new(375, 1);
///
/// let flex = reconcile_flex(40 * 60, expected);
/// assert_eq!(flex.balance, Decimal::new(25, 1));
/// assert!(flex.is_surplus());
/// ```
pub fn reconcile_flex(logged_minutes: i64, expected: ExpectedHoursResult) -> FlexBalance {
    let logged_hours = minutes_to_hours(logged_minutes);
    let balance = logged_hours - expected.expected_hours;
    FlexBalance {
        logged_hours,
        expected,
        balance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected(hours: &str) -> ExpectedHoursResult {
        ExpectedHoursResult {
            expected_hours: hours.parse().unwrap(),
            ..ExpectedHoursResult::empty()
        }
    }

    /// FX-001: forty logged against thirty-seven and a half expected
    #[test]
    fn test_surplus() {
        let flex = reconcile_flex(2400, expected("37.5"));
        assert_eq!(flex.logged_hours, Decimal::new(40, 0));
        assert_eq!(flex.balance, Decimal::new(25, 1));
    }

    /// FX-002: deficit is negative
    #[test]
    fn test_deficit() {
        let flex = reconcile_flex(1800, expected("37.5"));
        assert_eq!(flex.balance, Decimal::new(-75, 1));
        assert!(!flex.is_surplus());
    }

    #[test]
    fn test_nothing_logged_nothing_expected() {
        let flex = reconcile_flex(0, ExpectedHoursResult::empty());
        assert_eq!(flex.balance, Decimal::ZERO);
    }
}
