use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::errors::Result;

/// Fixed-interval retry policy for session lifecycle operations.
///
/// Only errors reporting [`is_retryable`](crate::DriverError::is_retryable)
/// are attempted again; deterministic failures such as an unsupported browser
/// kind propagate immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Fixed wait between attempts.
    pub wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            wait: Duration::from_millis(2000),
        }
    }
}

impl RetryPolicy {
    /// Run `op` until it succeeds, the error is not retryable, or attempts
    /// run out. The last error is propagated unchanged.
    pub async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    error!("{what} failed on attempt {attempt}/{attempts}: {err}");
                    if !err.is_retryable() || attempt >= attempts {
                        return Err(err);
                    }
                    attempt += 1;
                    tokio::time::sleep(self.wait).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use thirtyfour::error::WebDriverError;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::errors::DriverError;

    fn transient() -> DriverError {
        DriverError::WebDriver(WebDriverError::RequestFailed("connection reset".into()))
    }

    #[tokio::test(start_paused = true)]
    async fn retries_transient_failures_with_fixed_wait() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);
        let calls = &calls;
        let before = tokio::time::Instant::now();

        let result = policy
            .run("connect", || async move {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(transient())
                } else {
                    Ok(42)
                }
            })
            .await;

        assert_eq!(assert_ok!(result), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(before.elapsed(), Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn propagates_last_error_when_attempts_run_out() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);
        let calls = &calls;

        let result: Result<()> = policy
            .run("connect", || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(transient())
            })
            .await;

        let err = assert_err!(result);
        assert!(matches!(err, DriverError::WebDriver(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn deterministic_errors_fail_fast() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);
        let calls = &calls;
        let before = tokio::time::Instant::now();

        let result: Result<()> = policy
            .run("connect", || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(DriverError::InvalidConfiguration("safari".into()))
            })
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, DriverError::InvalidConfiguration(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn zero_attempts_still_runs_once() {
        let policy = RetryPolicy {
            max_attempts: 0,
            wait: Duration::ZERO,
        };
        let result = policy.run("connect", || async { Ok(1) }).await;
        assert_eq!(result.unwrap(), 1);
    }
}
