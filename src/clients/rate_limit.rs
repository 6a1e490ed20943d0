//! Client-side request rate limiting.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::clients::context::Context;
use crate::clients::errors::Error;

/// Token bucket gating every outbound attempt of one client.
///
/// The bucket holds at most `capacity` tokens (the configured rate, but at
/// least one) and refills at `rate` tokens per second. It starts full.
#[derive(Debug)]
pub struct RateLimiter {
    bucket: Mutex<TokenBucket>,
    capacity: f64,
    refill_per_second: f64,
}

#[derive(Debug)]
struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    /// Creates a limiter allowing `requests_per_second` requests per second.
    ///
    /// Callers must pass a positive, finite rate; the config builder
    /// enforces this.
    #[must_use]
    pub fn new(requests_per_second: f64) -> Self {
        let capacity = requests_per_second.max(1.0);
        Self {
            bucket: Mutex::new(TokenBucket {
                tokens: capacity,
                last_refill: Instant::now(),
            }),
            capacity,
            refill_per_second: requests_per_second,
        }
    }

    /// Returns the configured refill rate.
    #[must_use]
    pub const fn rate(&self) -> f64 {
        self.refill_per_second
    }

    /// Takes a token if one is available, otherwise returns how long until
    /// the next one.
    async fn try_acquire(&self) -> Result<(), Duration> {
        let mut bucket = self.bucket.lock().await;
        let now = Instant::now();

        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = elapsed
            .mul_add(self.refill_per_second, bucket.tokens)
            .min(self.capacity);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            Ok(())
        } else {
            let missing = 1.0 - bucket.tokens;
            let wait = missing / self.refill_per_second;
            Err(Duration::try_from_secs_f64(wait).unwrap_or(Duration::MAX))
        }
    }

    /// Waits for a token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] if `ctx` finishes while waiting.
    pub async fn acquire(&self, ctx: &Context) -> Result<(), Error> {
        loop {
            match ctx.run(self.try_acquire()).await? {
                Ok(()) => return Ok(()),
                Err(wait) => {
                    tracing::debug!(wait_ms = wait.as_millis(), "waiting for rate limit token");
                    ctx.run(tokio::time::sleep(wait)).await?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::context::CancelReason;

    #[tokio::test(start_paused = true)]
    async fn test_bucket_starts_full() {
        let limiter = RateLimiter::new(4.0);
        let ctx = Context::background();
        let start = Instant::now();
        for _ in 0..4 {
            limiter.acquire(&ctx).await.unwrap();
        }
        assert_eq!(Instant::now(), start);
    }

    #[tokio::test(start_paused = true)]
    async fn test_acquire_waits_for_refill() {
        let limiter = RateLimiter::new(2.0);
        let ctx = Context::background();
        let start = Instant::now();
        for _ in 0..4 {
            limiter.acquire(&ctx).await.unwrap();
        }
        // Two tokens up front, then one every 500ms.
        let elapsed = Instant::now().duration_since(start);
        assert!(elapsed >= Duration::from_millis(1000));
        assert!(elapsed < Duration::from_millis(1100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fractional_rate_has_capacity_one() {
        let limiter = RateLimiter::new(0.5);
        let ctx = Context::background();
        let start = Instant::now();
        limiter.acquire(&ctx).await.unwrap();
        limiter.acquire(&ctx).await.unwrap();
        assert!(Instant::now().duration_since(start) >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tiny_rate_waits_instead_of_overflowing() {
        let limiter = RateLimiter::new(1e-20);
        limiter.acquire(&Context::background()).await.unwrap();

        let ctx = Context::with_timeout(Duration::from_millis(100));
        let result = limiter.acquire(&ctx).await;
        assert!(matches!(
            result,
            Err(Error::Cancelled(CancelReason::DeadlineExceeded))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_is_cancellable() {
        let limiter = RateLimiter::new(1.0);
        limiter.acquire(&Context::background()).await.unwrap();

        let ctx = Context::with_timeout(Duration::from_millis(100));
        let result = limiter.acquire(&ctx).await;
        assert!(matches!(
            result,
            Err(Error::Cancelled(CancelReason::DeadlineExceeded))
        ));
    }
}
