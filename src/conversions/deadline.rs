// ============================================================================
// Loan Deadlines
// Relative-time rendering of loan expiry
// ============================================================================

use crate::interfaces::Clock;
use chrono::TimeDelta;
use std::fmt;

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
/// Average Gregorian month and year, in seconds
const MONTH: i64 = 2_629_746;
const YEAR: i64 = 31_556_952;

/// What a loan row shows in its deadline column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineDisplay {
    /// Deadline is at or before now
    Expired,
    /// Time left until the deadline
    Remaining(TimeDelta),
}

impl DeadlineDisplay {
    pub fn is_expired(&self) -> bool {
        matches!(self, DeadlineDisplay::Expired)
    }

    /// Remaining time without the "in" prefix, e.g. `"3 days"`.
    pub fn remaining(&self) -> Option<String> {
        match self {
            DeadlineDisplay::Expired => None,
            DeadlineDisplay::Remaining(left) => Some(humanize(*left)),
        }
    }
}

impl fmt::Display for DeadlineDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeadlineDisplay::Expired => write!(f, "Expired"),
            DeadlineDisplay::Remaining(left) => write!(f, "in {}", humanize(*left)),
        }
    }
}

/// Classify a loan deadline (Unix milliseconds) against the clock.
pub fn loan_deadline_display(deadline_ms: i64, clock: &dyn Clock) -> DeadlineDisplay {
    let left = deadline_ms.saturating_sub(clock.now_millis());
    if left <= 0 {
        DeadlineDisplay::Expired
    } else {
        DeadlineDisplay::Remaining(TimeDelta::milliseconds(left))
    }
}

#[inline]
fn div_round(value: i64, unit: i64) -> i64 {
    value.saturating_add(unit / 2) / unit
}

/// Coarse English phrasing of a duration: "a few seconds", "an hour",
/// "3 days", "2 months". The sign of the duration is ignored.
pub fn humanize(duration: TimeDelta) -> String {
    let millis = duration.num_milliseconds().saturating_abs();
    let seconds = div_round(millis, 1000);
    let minutes = div_round(seconds, MINUTE);
    let hours = div_round(seconds, HOUR);
    let days = div_round(seconds, DAY);
    let months = div_round(seconds, MONTH);
    let years = div_round(seconds, YEAR);

    if seconds <= 44 {
        "a few seconds".to_string()
    } else if seconds <= 89 {
        "a minute".to_string()
    } else if minutes <= 44 {
        format!("{minutes} minutes")
    } else if minutes <= 89 {
        "an hour".to_string()
    } else if hours <= 21 {
        format!("{hours} hours")
    } else if hours <= 35 {
        "a day".to_string()
    } else if days <= 25 {
        format!("{days} days")
    } else if days <= 45 {
        "a month".to_string()
    } else if months <= 10 {
        format!("{months} months")
    } else if months <= 17 {
        "a year".to_string()
    } else {
        format!("{} years", years.max(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::FixedClock;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_expired_deadlines() {
        let clock = FixedClock::from_millis(NOW);
        assert_eq!(loan_deadline_display(NOW - 1, &clock), DeadlineDisplay::Expired);
        assert_eq!(loan_deadline_display(NOW, &clock).to_string(), "Expired");
        assert!(loan_deadline_display(0, &clock).is_expired());
    }

    #[test]
    fn test_future_deadline() {
        let clock = FixedClock::from_millis(NOW);
        let display = loan_deadline_display(NOW + 3 * DAY * 1000, &clock);
        assert_eq!(display.to_string(), "in 3 days");
        assert_eq!(display.remaining().as_deref(), Some("3 days"));
        assert!(!display.is_expired());
    }

    #[test]
    fn test_deadline_is_deterministic() {
        let clock = FixedClock::from_millis(NOW);
        let deadline = NOW + 5 * HOUR * 1000;
        assert_eq!(
            loan_deadline_display(deadline, &clock),
            loan_deadline_display(deadline, &clock)
        );
    }

    #[test]
    fn test_humanize_thresholds() {
        let cases = [
            (10, "a few seconds"),
            (60, "a minute"),
            (5 * MINUTE, "5 minutes"),
            (HOUR, "an hour"),
            (5 * HOUR, "5 hours"),
            (30 * HOUR, "a day"),
            (14 * DAY, "14 days"),
            (30 * DAY, "a month"),
            (90 * DAY, "3 months"),
            (400 * DAY, "a year"),
            (3 * YEAR, "3 years"),
        ];
        for (seconds, expected) in cases {
            assert_eq!(humanize(TimeDelta::seconds(seconds)), expected, "{seconds}s");
        }
    }

    #[test]
    fn test_humanize_ignores_sign() {
        assert_eq!(humanize(TimeDelta::seconds(-5 * HOUR)), "5 hours");
    }
}
