use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff policy for startup-time database connections.
///
/// Delays grow exponentially from `initial_delay_ms` toward `max_delay_ms`.
/// Jitter keeps parallel replicas from reconnecting in lockstep.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first failed attempt
    pub max_retries: u32,

    /// Delay before the first retry, in milliseconds
    pub initial_delay_ms: u64,

    /// Ceiling for the computed delay, in milliseconds
    pub max_delay_ms: u64,

    /// Growth factor between consecutive delays
    pub backoff_multiplier: f64,

    /// Scale each delay by a random factor in [0.5, 1.0]
    pub use_jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay_ms: u64) -> Self {
        self.initial_delay_ms = delay_ms;
        self
    }

    /// Deterministic delays, mainly for tests
    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    /// Delay to sleep before retry number `attempt` (1-based)
    fn delay_before(&self, attempt: u32) -> Duration {
        let growth = self
            .backoff_multiplier
            .powi(attempt.saturating_sub(1) as i32);
        let mut ms = ((self.initial_delay_ms as f64 * growth) as u64).min(self.max_delay_ms);
        if self.use_jitter {
            ms = jittered(ms);
        }
        Duration::from_millis(ms)
    }
}

/// Scale a delay by a pseudo-random factor in [0.5, 1.0].
///
/// Entropy comes from hashing the current time through `RandomState`,
/// which is plenty for pacing connection attempts.
fn jittered(ms: u64) -> u64 {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let sample = RandomState::new().hash_one(std::time::SystemTime::now()) % 50;
    let factor = 0.5 + sample as f64 / 100.0;
    (ms as f64 * factor) as u64
}

/// Run an async operation, retrying failures per the given policy.
///
/// The operation runs once plus up to `max_retries` more times; the last
/// error is returned if every attempt fails.
///
/// # Example
/// ```ignore
/// use database::common::{retry_with_backoff, RetryConfig};
///
/// let policy = RetryConfig::new().with_max_retries(5);
/// let client = retry_with_backoff(|| database::mongodb::connect(&mongo_url), policy).await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut failures = 0;

    loop {
        match operation().await {
            Ok(value) => {
                if failures > 0 {
                    debug!("Operation succeeded after {} failed attempts", failures);
                }
                return Ok(value);
            }
            Err(e) if failures < config.max_retries => {
                failures += 1;
                let delay = config.delay_before(failures);
                debug!(
                    "Attempt {}/{} failed: {}. Next try in {:?}",
                    failures, config.max_retries, e, delay
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                warn!("Giving up after {} retries: {}", config.max_retries, e);
                return Err(e);
            }
        }
    }
}

/// Retry with the default policy (3 retries, 100ms initial delay).
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with_backoff(operation, RetryConfig::default()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_first_success_needs_no_retry() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let result = retry(|| {
            let calls = calls_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>("connected")
            }
        })
        .await;

        assert_eq!(result.unwrap(), "connected");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovers_within_retry_budget() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let policy = RetryConfig::new().with_initial_delay(10).without_jitter();
        let result = retry_with_backoff(
            || {
                let calls = calls_clone.clone();
                async move {
                    match calls.fetch_add(1, Ordering::SeqCst) {
                        0 | 1 => Err("connection refused".to_string()),
                        _ => Ok("connected"),
                    }
                }
            },
            policy,
        )
        .await;

        assert_eq!(result.unwrap(), "connected");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_returns_last_error_when_exhausted() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = calls.clone();

        let policy = RetryConfig::new()
            .with_max_retries(2)
            .with_initial_delay(10)
            .without_jitter();
        let result = retry_with_backoff(
            || {
                let calls = calls_clone.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err::<&str, _>("connection refused")
                }
            },
            policy,
        )
        .await;

        assert_eq!(result.unwrap_err(), "connection refused");
        // One initial attempt plus two retries
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_delay_grows_and_caps() {
        let policy = RetryConfig {
            max_retries: 5,
            initial_delay_ms: 100,
            max_delay_ms: 300,
            backoff_multiplier: 2.0,
            use_jitter: false,
        };

        assert_eq!(policy.delay_before(1), Duration::from_millis(100));
        assert_eq!(policy.delay_before(2), Duration::from_millis(200));
        assert_eq!(policy.delay_before(3), Duration::from_millis(300));
        assert_eq!(policy.delay_before(4), Duration::from_millis(300));
    }

    #[test]
    fn test_jitter_stays_within_bounds() {
        for _ in 0..10 {
            let ms = jittered(1000);
            assert!((500..=1000).contains(&ms));
        }
    }
}
