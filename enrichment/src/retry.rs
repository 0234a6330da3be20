//! Bounded retry with exponential backoff
//!
//! Local to a single strategy attempt: retries never run concurrently
//! with each other and never block sibling strategies or other bookmark
//! creations (the delay is a cooperative `tokio::time::sleep`).

use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Multiplier applied to the delay after each failed attempt
pub const BACKOFF_FACTOR: f64 = 1.5;

/// Retry knobs shared by both extraction pipelines
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay before the second attempt; grows by [`BACKOFF_FACTOR`]
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(300),
        }
    }
}

/// Run `op` up to `max_attempts` times, sleeping between attempts with
/// exponential backoff. The last failure is propagated to the caller.
pub async fn with_retry<T, E, F, Fut>(
    mut op: F,
    max_attempts: u32,
    initial_delay: Duration,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut delay = initial_delay;
    let mut attempt = 1u32;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= max_attempts.max(1) => return Err(e),
            Err(e) => {
                debug!(attempt, delay_ms = delay.as_millis() as u64, error = %e, "attempt failed, retrying");
                tokio::time::sleep(delay).await;
                delay = delay.mul_f64(BACKOFF_FACTOR);
                attempt += 1;
            }
        }
    }
}
