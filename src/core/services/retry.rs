//! Bounded retry with linear backoff for rate-limited requests
//!
//! Attempt `n` (1-based) that is rate limited waits `base_delay * n` before
//! the next attempt. After `max_retries` rate-limited attempts the call fails
//! with [`NetworkError::RateLimit`]. Any other outcome is returned as-is.

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::NetworkError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

impl RetryPolicy {
    /// `max_retries` is clamped to at least one attempt
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries: max_retries.max(1),
            base_delay,
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Delay slept after the given rate-limited attempt
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

/// Outcome of a single attempt as seen by the retry loop
pub enum Attempt<T> {
    Done(T),
    RateLimited,
}

#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Run `operation` until it stops being rate limited or attempts run out
pub async fn retry_rate_limited<T, F, Fut>(
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    mut operation: F,
) -> Result<T, NetworkError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Attempt<T>, NetworkError>>,
{
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match operation(attempt).await? {
            Attempt::Done(value) => return Ok(value),
            Attempt::RateLimited => {
                if attempt >= policy.max_retries {
                    warn!("Rate limited on all {} attempt(s), giving up", attempt);
                    return Err(NetworkError::RateLimit { attempts: attempt });
                }
                let delay = policy.delay_after(attempt);
                debug!("Rate limited (attempt {}), retrying in {:?}", attempt, delay);
                sleeper.sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSleeper {
        delays: Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.delays.lock().unwrap().push(duration);
        }
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let policy = RetryPolicy::new(4, Duration::from_millis(500));
        let sleeper = RecordingSleeper::default();
        let calls = AtomicU32::new(0);

        let result: Result<(), NetworkError> = retry_rate_limited(&policy, &sleeper, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(Attempt::RateLimited) }
        })
        .await;

        assert!(matches!(result, Err(NetworkError::RateLimit { attempts: 4 })));
        assert_eq!(calls.load(Ordering::SeqCst), 4);

        let delays = sleeper.delays.lock().unwrap().clone();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(500),
                Duration::from_millis(1000),
                Duration::from_millis(1500),
            ]
        );
        assert!(delays.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_returns_first_success() {
        let policy = RetryPolicy::new(5, Duration::from_millis(10));
        let sleeper = RecordingSleeper::default();

        let result = retry_rate_limited(&policy, &sleeper, |attempt| async move {
            if attempt < 3 {
                Ok(Attempt::RateLimited)
            } else {
                Ok(Attempt::Done(attempt))
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(sleeper.delays.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_other_errors_are_not_retried() {
        let policy = RetryPolicy::new(3, Duration::from_millis(10));
        let sleeper = RecordingSleeper::default();
        let calls = AtomicU32::new(0);

        let result: Result<(), NetworkError> = retry_rate_limited(&policy, &sleeper, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(NetworkError::Authentication) }
        })
        .await;

        assert!(matches!(result, Err(NetworkError::Authentication)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(sleeper.delays.lock().unwrap().is_empty());
    }

    #[test]
    fn test_single_attempt_minimum() {
        let policy = RetryPolicy::new(0, Duration::from_secs(1));
        assert_eq!(policy.max_retries(), 1);
    }
}
