//! Suspension scoring based on payment recency.
//!
//! The score counts down the days a device has left before suspension:
//! 90 while payments are current, decaying through two grace segments,
//! 0 once the device is suspended.

use crate::error::{ReportError, Result};
use crate::record::PaymentRecord;
use chrono::NaiveDateTime;

/// Computes the days-from-suspension score for one device's payment history.
///
/// `now` is injected rather than read from the system clock so results are
/// deterministic and testable.
///
/// Elapsed time is the calendar-date difference between `now` and the most
/// recent payment; time of day is ignored. The policy, first match wins:
///
/// - up to 30 days elapsed: 90 (up to date)
/// - 31 to 60 days: `90 - (elapsed - 30)` (grace period 1, decays to 60)
/// - 61 to 91 days: `90 - (elapsed - 60)` (grace period 2, decays to 59)
/// - beyond 91 days: 0 (suspended)
///
/// Grace period 2 restarts its decay from 90 with an origin at day 60
/// instead of continuing from grace period 1's final value, so the score
/// jumps from 60 at day 60 to 89 at day 61. That discontinuity is the
/// intended policy and must not be smoothed out.
///
/// # Errors
///
/// Returns [`ReportError::EmptyHistory`] if `history` has no records; a
/// device with no payments cannot be scored and reaching this state is an
/// integration error, not a data condition.
pub fn days_from_suspension(history: &[PaymentRecord], now: NaiveDateTime) -> Result<u8> {
    let last_payment = history
        .iter()
        .map(|p| p.created_at)
        .max()
        .ok_or(ReportError::EmptyHistory)?;

    // Negative for future-dated payments, which land in the first arm.
    let elapsed_days = (now.date() - last_payment.date()).num_days();

    let score = if elapsed_days <= 30 {
        90
    } else if elapsed_days <= 60 {
        90 - (elapsed_days - 30)
    } else if elapsed_days <= 91 {
        90 - (elapsed_days - 60)
    } else {
        0
    };

    Ok(score as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn payment(created: &str) -> PaymentRecord {
        PaymentRecord {
            payment_type: "CASH".to_string(),
            amount: Amount::from_str("100.0").unwrap(),
            created_at: NaiveDateTime::parse_from_str(created, "%Y-%m-%d %H:%M:%S").unwrap(),
            device_id: "12345".to_string(),
        }
    }

    fn at_midnight(date: &str) -> NaiveDateTime {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_up_to_date() {
        // 29 days elapsed
        let history = vec![payment("2024-11-14 10:30:00")];
        let score = days_from_suspension(&history, at_midnight("2024-12-13")).unwrap();
        assert_eq!(score, 90);
    }

    #[test]
    fn test_same_day_payment() {
        let history = vec![payment("2024-12-13 10:30:00")];
        let score = days_from_suspension(&history, at_midnight("2024-12-13")).unwrap();
        assert_eq!(score, 90);
    }

    #[test]
    fn test_grace_period_1() {
        // 40 days elapsed
        let history = vec![payment("2024-11-03 10:30:00")];
        let score = days_from_suspension(&history, at_midnight("2024-12-13")).unwrap();
        assert_eq!(score, 80);
    }

    #[test]
    fn test_grace_period_2() {
        // 70 days elapsed
        let history = vec![payment("2024-10-04 10:30:00")];
        let score = days_from_suspension(&history, at_midnight("2024-12-13")).unwrap();
        assert_eq!(score, 80);
    }

    #[test]
    fn test_suspended() {
        // 92 days elapsed
        let history = vec![payment("2024-09-12 10:30:00")];
        let score = days_from_suspension(&history, at_midnight("2024-12-13")).unwrap();
        assert_eq!(score, 0);
    }

    #[test]
    fn test_segment_boundaries() {
        let now = at_midnight("2024-12-31");
        let day = |elapsed: i64| {
            let created = now.date() - chrono::Duration::days(elapsed);
            vec![payment(&format!("{} 12:00:00", created))]
        };

        assert_eq!(days_from_suspension(&day(30), now).unwrap(), 90);
        assert_eq!(days_from_suspension(&day(31), now).unwrap(), 89);
        assert_eq!(days_from_suspension(&day(60), now).unwrap(), 60);
        // Grace period 2 restarts from 90, not from 60
        assert_eq!(days_from_suspension(&day(61), now).unwrap(), 89);
        assert_eq!(days_from_suspension(&day(91), now).unwrap(), 59);
        assert_eq!(days_from_suspension(&day(92), now).unwrap(), 0);
    }

    #[test]
    fn test_monotonic_decay_within_segments() {
        let now = at_midnight("2024-12-31");
        let score_at = |elapsed: i64| {
            let created = now.date() - chrono::Duration::days(elapsed);
            days_from_suspension(&[payment(&format!("{} 12:00:00", created))], now).unwrap()
        };

        for elapsed in 0..60 {
            assert!(score_at(elapsed + 1) <= score_at(elapsed));
        }
        for elapsed in 61..92 {
            assert!(score_at(elapsed + 1) <= score_at(elapsed));
        }
    }

    #[test]
    fn test_score_always_in_range() {
        let now = at_midnight("2024-12-31");
        for elapsed in 0..200i64 {
            let created = now.date() - chrono::Duration::days(elapsed);
            let score =
                days_from_suspension(&[payment(&format!("{} 12:00:00", created))], now).unwrap();
            assert!(score <= 90);
        }
    }

    #[test]
    fn test_uses_most_recent_payment() {
        let history = vec![
            payment("2024-01-01 10:30:00"),
            payment("2024-12-01 10:30:00"),
            payment("2024-06-15 10:30:00"),
        ];
        let score = days_from_suspension(&history, at_midnight("2024-12-13")).unwrap();
        assert_eq!(score, 90);
    }

    #[test]
    fn test_future_payment_scores_as_current() {
        let history = vec![payment("2025-01-01 00:00:00")];
        let score = days_from_suspension(&history, at_midnight("2024-12-13")).unwrap();
        assert_eq!(score, 90);
    }

    #[test]
    fn test_empty_history_is_an_error() {
        let err = days_from_suspension(&[], at_midnight("2024-12-13")).unwrap_err();
        assert!(matches!(err, ReportError::EmptyHistory));
    }
}
