//! Bounded polling and read-retry policies.
//!
//! Both are plain values owned by the caller. The client loops over them;
//! nothing here sleeps or schedules timers.

use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
pub const DEFAULT_POLL_ATTEMPTS: u32 = 5;

/// Fixed-interval polling that gives up after `max_attempts` checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// Total number of checks, including the first.
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_POLL_ATTEMPTS,
        }
    }
}

impl PollPolicy {
    #[must_use]
    pub const fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// Whether another check is allowed after `attempts_made` checks.
    #[must_use]
    pub const fn should_continue(&self, attempts_made: u32) -> bool {
        attempts_made < self.max_attempts
    }

    /// Longest time a poll can take.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.interval * self.max_attempts
    }

    /// Sleeps between consecutive checks; one fewer than the check count.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        std::iter::repeat_n(self.interval, self.max_attempts.saturating_sub(1) as usize)
    }
}

/// Outcome of a single poll check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStep<T> {
    Ready(T),
    Pending,
}

/// Exponential backoff for retrying failed reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Backoff is capped here.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Whether attempt number `attempt` (1-based) may be followed by another.
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Delay after failed attempt `attempt` (1-based): `base * 2^(attempt-1)`,
    /// capped at `max_delay`.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1).min(16);
        self.base_delay
            .saturating_mul(1 << exp)
            .min(self.max_delay)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn default_poll_window_is_ten_seconds() {
        let policy = PollPolicy::default();
        assert_eq!(policy.window(), Duration::from_secs(10));
        assert_eq!(policy.delays().count(), 4);
        assert!(policy.should_continue(4));
        assert!(!policy.should_continue(5));
    }

    #[test]
    fn zero_attempts_never_polls() {
        let policy = PollPolicy::new(Duration::from_secs(1), 0);
        assert!(!policy.should_continue(0));
        assert_eq!(policy.delays().count(), 0);
    }

    #[rstest]
    #[case(1, 200)]
    #[case(2, 400)]
    #[case(3, 800)]
    #[case(4, 1600)]
    #[case(5, 2000)]
    #[case(40, 2000)]
    fn backoff_doubles_and_caps(#[case] attempt: u32, #[case] millis: u64) {
        assert_eq!(
            RetryPolicy::default().delay_for(attempt),
            Duration::from_millis(millis)
        );
    }

    #[test]
    fn no_retry_policy() {
        let policy = RetryPolicy::none();
        assert!(!policy.should_retry(1));
    }
}
