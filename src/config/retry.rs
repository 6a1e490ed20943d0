//! Retry policy for the HTTP transport.
//!
//! [`RetryPolicy`] is a pure value: it decides whether a failed attempt
//! should be retried and how long to wait first. The sleeping itself happens
//! in [`HttpClient`](crate::clients::HttpClient), which races every wait
//! against the caller's [`Context`](crate::clients::Context).

use std::time::Duration;

use crate::error::ConfigError;

/// The observable result of a single request attempt, as far as retrying
/// is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The server answered with a non-2xx HTTP status.
    Status(u16),
    /// The connection failed before a status was received (connect error,
    /// timeout, or the request could not be written).
    TransientFailure,
    /// A failure that will not improve by retrying.
    Fatal,
}

/// Returns `true` for HTTP statuses that are worth retrying: 429 and 5xx.
#[must_use]
pub const fn is_retryable_status(status: u16) -> bool {
    status == 429 || (status >= 500 && status <= 599)
}

/// Bounded exponential backoff configuration.
///
/// A request is attempted at most `max_retries + 1` times. Before retry
/// number `n` (1-based) the client waits `min_backoff * 2^(n-1)`, clamped to
/// `[min_backoff, max_backoff]`.
///
/// # Example
///
/// ```rust
/// use cloudflare_api::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(2, Duration::ZERO, Duration::from_secs(1)).unwrap();
/// assert_eq!(policy.max_retries(), 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    min_backoff: Duration,
    max_backoff: Duration,
}

impl RetryPolicy {
    /// Default number of retries after the first attempt.
    pub const DEFAULT_MAX_RETRIES: u32 = 3;
    /// Default lower backoff bound.
    pub const DEFAULT_MIN_BACKOFF: Duration = Duration::from_secs(1);
    /// Default upper backoff bound.
    pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(30);

    /// Creates a retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRetryPolicy`] if `min_backoff` exceeds
    /// `max_backoff`.
    pub fn new(
        max_retries: u32,
        min_backoff: Duration,
        max_backoff: Duration,
    ) -> Result<Self, ConfigError> {
        if min_backoff > max_backoff {
            return Err(ConfigError::InvalidRetryPolicy {
                reason: format!(
                    "min_backoff ({min_backoff:?}) must not exceed max_backoff ({max_backoff:?})"
                ),
            });
        }
        Ok(Self {
            max_retries,
            min_backoff,
            max_backoff,
        })
    }

    /// A policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            min_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    /// Returns the maximum number of retries.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the lower backoff bound.
    #[must_use]
    pub const fn min_backoff(&self) -> Duration {
        self.min_backoff
    }

    /// Returns the upper backoff bound.
    #[must_use]
    pub const fn max_backoff(&self) -> Duration {
        self.max_backoff
    }

    /// Returns the delay to observe before retry number `retry` (1-based).
    #[must_use]
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 2_u32.checked_pow(retry.saturating_sub(1)).unwrap_or(u32::MAX);
        self.min_backoff
            .checked_mul(factor)
            .unwrap_or(self.max_backoff)
            .clamp(self.min_backoff, self.max_backoff)
    }

    /// Decides whether to retry after `attempts` attempts ended in `outcome`.
    ///
    /// Returns the delay to wait before the next attempt, or `None` when the
    /// failure must be surfaced to the caller.
    #[must_use]
    pub fn should_retry(&self, outcome: AttemptOutcome, attempts: u32) -> Option<Duration> {
        let retryable = match outcome {
            AttemptOutcome::Status(status) => is_retryable_status(status),
            AttemptOutcome::TransientFailure => true,
            AttemptOutcome::Fatal => false,
        };
        if !retryable || attempts > self.max_retries {
            return None;
        }
        Some(self.backoff(attempts))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: Self::DEFAULT_MAX_RETRIES,
            min_backoff: Self::DEFAULT_MIN_BACKOFF,
            max_backoff: Self::DEFAULT_MAX_BACKOFF,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(max: u32, min_ms: u64, max_ms: u64) -> RetryPolicy {
        RetryPolicy::new(
            max,
            Duration::from_millis(min_ms),
            Duration::from_millis(max_ms),
        )
        .unwrap()
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(429));
        assert!(is_retryable_status(500));
        assert!(is_retryable_status(503));
        assert!(!is_retryable_status(400));
        assert!(!is_retryable_status(404));
        assert!(!is_retryable_status(200));
    }

    #[test]
    fn test_backoff_is_exponential_and_clamped() {
        let policy = policy(10, 100, 1000);
        assert_eq!(policy.backoff(1), Duration::from_millis(100));
        assert_eq!(policy.backoff(2), Duration::from_millis(200));
        assert_eq!(policy.backoff(3), Duration::from_millis(400));
        assert_eq!(policy.backoff(5), Duration::from_millis(1000));
        assert_eq!(policy.backoff(64), Duration::from_millis(1000));
    }

    #[test]
    fn test_zero_min_backoff_yields_zero_delay() {
        let policy = policy(2, 0, 1000);
        assert_eq!(policy.backoff(1), Duration::ZERO);
        assert_eq!(policy.backoff(2), Duration::ZERO);
    }

    #[test]
    fn test_should_retry_allows_max_retries_plus_one_attempts() {
        let policy = policy(2, 0, 1000);
        assert!(policy.should_retry(AttemptOutcome::Status(500), 1).is_some());
        assert!(policy.should_retry(AttemptOutcome::Status(429), 2).is_some());
        assert!(policy.should_retry(AttemptOutcome::Status(500), 3).is_none());
    }

    #[test]
    fn test_should_retry_rejects_client_errors_and_fatal_failures() {
        let policy = policy(5, 0, 0);
        assert!(policy.should_retry(AttemptOutcome::Status(400), 1).is_none());
        assert!(policy.should_retry(AttemptOutcome::Status(403), 1).is_none());
        assert!(policy.should_retry(AttemptOutcome::Fatal, 1).is_none());
        assert!(policy
            .should_retry(AttemptOutcome::TransientFailure, 1)
            .is_some());
    }

    #[test]
    fn test_no_retries_when_max_is_zero() {
        let policy = RetryPolicy::none();
        assert!(policy.should_retry(AttemptOutcome::Status(503), 1).is_none());
        assert!(policy
            .should_retry(AttemptOutcome::TransientFailure, 1)
            .is_none());
    }

    #[test]
    fn test_new_rejects_inverted_bounds() {
        let result = RetryPolicy::new(1, Duration::from_secs(5), Duration::from_secs(1));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidRetryPolicy { .. })
        ));
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries(), 3);
        assert_eq!(policy.min_backoff(), Duration::from_secs(1));
        assert_eq!(policy.max_backoff(), Duration::from_secs(30));
    }
}
