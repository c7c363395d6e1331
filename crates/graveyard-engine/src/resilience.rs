//! Retry policy with exponential backoff.
//!
//! The one piece of nontrivial timing logic in the engine, isolated so it
//! can be tested with millisecond delays instead of the production
//! 1s/2s/4s schedule.

use std::time::Duration;

use tracing::debug;

use crate::error::EngineResult;

/// Bounded exponential-backoff retry policy.
///
/// Only transient errors (per
/// [`EngineError::is_transient`](crate::EngineError::is_transient)) are
/// retried; permanent errors return immediately without consuming a
/// retry. The delay before attempt N is `base_delay * 2^(N-2)`, so the
/// default policy sleeps 1s before the second attempt and 2s before the
/// third. No jitter, no delay cap beyond the attempt ceiling.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles for each further retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Result of driving an operation through a [`RetryPolicy`], with the
/// number of attempts actually consumed.
#[derive(Debug)]
pub struct RetryOutcome<T> {
    /// Attempts consumed, counting the first call.
    pub attempts: u32,
    /// The final result: the first success, the first permanent error,
    /// or the last transient error after exhausting all attempts.
    pub result: EngineResult<T>,
}

impl RetryPolicy {
    /// Create a policy with explicit attempt and delay settings.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Delay slept before the given attempt number (attempt 2 is the
    /// first retry).
    pub fn delay_before(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.pow(attempt.saturating_sub(2))
    }

    /// Drive `operation` until it succeeds, fails permanently, or the
    /// attempt budget is exhausted.
    pub async fn run<F, Fut, T>(&self, mut operation: F) -> RetryOutcome<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = EngineResult<T>>,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match operation().await {
                Ok(value) => {
                    return RetryOutcome {
                        attempts: attempt,
                        result: Ok(value),
                    }
                }
                Err(err) => {
                    if err.is_permanent() || attempt >= self.max_attempts {
                        return RetryOutcome {
                            attempts: attempt,
                            result: Err(err),
                        };
                    }

                    let delay = self.delay_before(attempt + 1);
                    debug!(
                        attempt,
                        max_attempts = self.max_attempts,
                        retry_delay_ms = delay.as_millis() as u64,
                        error = %err,
                        error_code = err.error_code(),
                        "Attempt failed, retrying with exponential backoff"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
