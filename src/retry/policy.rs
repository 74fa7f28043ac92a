//! Retry Policy Module
//!
//! Bounded exponential-backoff retry with additive jitter for remote
//! generative calls. The wrapper is generic over the operation's result
//! type and assumes nothing about the operation beyond idempotency:
//! callers must only hand it operations that are safe to repeat.

use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

use crate::error::StyleError;

/// Retry policy configuration.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Number of retries after the first attempt. Total attempts is
    /// `max_retries + 1`.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Upper bound on any single delay, jitter included.
    pub max_delay: Duration,
    /// Maximum jitter as a fraction of the computed delay (0.0 to 1.0).
    /// Jitter only adds; it desynchronizes concurrent retriers.
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(10),
            jitter_factor: 0.3,
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the retry budget.
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the delay before the first retry.
    pub const fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Set the delay ceiling.
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the jitter fraction. Pass 0.0 for deterministic delays.
    pub fn with_jitter_factor(mut self, factor: f64) -> Self {
        self.jitter_factor = factor.clamp(0.0, 1.0);
        self
    }

    /// Delay before the retry following failed attempt `attempt` (0-based):
    /// `min(base * 2^attempt + jitter, max_delay)`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exp = self.base_delay.as_millis() as f64 * 2f64.powi(attempt as i32);
        let jittered = exp + self.jitter(exp);
        Duration::from_millis(jittered as u64).min(self.max_delay)
    }

    fn jitter(&self, delay_ms: f64) -> f64 {
        if self.jitter_factor <= 0.0 || delay_ms <= 0.0 {
            return 0.0;
        }
        let mut rng = rand::thread_rng();
        rng.gen_range(0.0..=delay_ms * self.jitter_factor)
    }
}

/// Executes operations under a [`RetryPolicy`].
pub struct RetryExecutor {
    policy: RetryPolicy,
}

impl RetryExecutor {
    /// Create a new retry executor.
    pub const fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Attempt `operation` up to `max_retries + 1` times.
    ///
    /// Non-retryable errors short-circuit immediately. When the budget is
    /// exhausted the last underlying failure is wrapped in
    /// [`StyleError::MaxRetriesExceeded`] together with `context`, a
    /// human-readable label for diagnostics.
    pub async fn execute<F, Fut, T>(&self, context: &str, mut operation: F) -> Result<T, StyleError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, StyleError>>,
    {
        let attempts = self.policy.max_retries + 1;
        let mut last_error = None;

        for attempt in 0..attempts {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    if !error.is_retryable() {
                        return Err(error);
                    }
                    tracing::warn!(
                        context,
                        attempt,
                        error = %error,
                        "retryable failure"
                    );
                    last_error = Some(error);

                    if attempt + 1 == attempts {
                        break;
                    }
                    sleep(self.policy.delay_for_attempt(attempt)).await;
                }
            }
        }

        let source = last_error.unwrap_or_else(|| {
            StyleError::InternalError("retry loop exited without an error".to_string())
        });
        Err(StyleError::MaxRetriesExceeded {
            context: context.to_string(),
            attempts,
            source: Box::new(source),
        })
    }
}

/// Retry an operation with the default policy.
pub async fn with_retry<F, Fut, T>(context: &str, operation: F) -> Result<T, StyleError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, StyleError>>,
{
    RetryExecutor::new(RetryPolicy::default())
        .execute(context, operation)
        .await
}
