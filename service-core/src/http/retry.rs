//! HTTP client retry utilities for calls to the bookkeeping backend.
//!
//! Provides configurable retry logic with exponential backoff.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{info, warn};

/// Failure of a single upstream call, classified for the retry loop.
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    /// Connection refused, reset, timed out before a response arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// The upstream answered with a non-success status.
    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The body could not be decoded into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            UpstreamError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            UpstreamError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}

impl UpstreamError {
    /// Determines if the failure may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            UpstreamError::Transport(_) => true,
            UpstreamError::Status { status, .. } => {
                matches!(*status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            UpstreamError::Decode(_) => false,
        }
    }

    /// HTTP status returned by the upstream, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// How often and how patiently a failed backend call is retried. The delay
/// doubles per attempt from `base_delay` up to `max_delay`; with `jitter`,
/// up to a quarter of the delay is added on top.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Attempts after the first one.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::with_max_retries(3)
    }
}

impl RetryConfig {
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            jitter: true,
        }
    }

    pub fn no_retry() -> Self {
        Self::with_max_retries(0)
    }

    /// Two retries with millisecond delays and no jitter, for tests.
    pub fn quick() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(100),
            jitter: false,
        }
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        let delay = self.base_delay.saturating_mul(factor).min(self.max_delay);

        if self.jitter {
            delay + delay.mul_f64(0.25 * clock_fraction())
        } else {
            delay
        }
    }
}

/// Sub-second clock noise scaled to [0.0, 1.0); enough to spread retries
/// from concurrent requests.
fn clock_fraction() -> f64 {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or_default();
    f64::from(nanos % 1000) / 1000.0
}

/// Execute an HTTP call with retry logic.
///
/// # Example
/// ```ignore
/// let accounts = retry_http_call(&RetryConfig::default(), "list_accounts", || async {
///     client.fetch::<Vec<Account>>("/api/akun").await
/// })
/// .await?;
/// ```
pub async fn retry_http_call<F, Fut, T>(
    config: &RetryConfig,
    operation_name: &str,
    f: F,
) -> Result<T, UpstreamError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, UpstreamError>>,
{
    let mut attempt = 0;

    loop {
        match f().await {
            Ok(result) => {
                if attempt > 0 {
                    info!(
                        operation = operation_name,
                        attempt = attempt + 1,
                        "HTTP call succeeded after retry"
                    );
                }
                return Ok(result);
            }
            Err(err) => {
                if attempt >= config.max_retries {
                    warn!(
                        operation = operation_name,
                        attempt = attempt + 1,
                        error = %err,
                        "HTTP call failed after max retries"
                    );
                    return Err(err);
                }

                if !err.is_retryable() {
                    warn!(
                        operation = operation_name,
                        status = ?err.status(),
                        error = %err,
                        "HTTP call failed with non-retryable error"
                    );
                    return Err(err);
                }

                let backoff = config.delay_for(attempt);
                warn!(
                    operation = operation_name,
                    attempt = attempt + 1,
                    error = %err,
                    backoff_ms = backoff.as_millis() as u64,
                    "HTTP call failed, retrying after backoff"
                );

                sleep(backoff).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn status(code: u16) -> UpstreamError {
        UpstreamError::Status {
            status: code,
            message: String::new(),
        }
    }

    #[test]
    fn test_presets() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.base_delay, Duration::from_millis(100));
        assert_eq!(RetryConfig::no_retry().max_retries, 0);
        assert_eq!(RetryConfig::with_max_retries(5).max_retries, 5);
    }

    #[test]
    fn test_delay_doubles_until_capped() {
        let config = RetryConfig {
            jitter: false,
            max_delay: Duration::from_millis(300),
            ..Default::default()
        };

        assert_eq!(config.delay_for(0), Duration::from_millis(100));
        assert_eq!(config.delay_for(1), Duration::from_millis(200));
        assert_eq!(config.delay_for(2), Duration::from_millis(300));
        assert_eq!(config.delay_for(40), Duration::from_millis(300));
    }

    #[test]
    fn test_jitter_adds_at_most_a_quarter() {
        let config = RetryConfig::default();
        let delay = config.delay_for(1);
        assert!(delay >= Duration::from_millis(200));
        assert!(delay <= Duration::from_millis(250));
    }

    #[test]
    fn test_is_retryable() {
        assert!(UpstreamError::Transport("reset".into()).is_retryable());
        assert!(status(503).is_retryable());
        assert!(status(429).is_retryable());
        assert!(!status(400).is_retryable());
        assert!(!status(401).is_retryable());
        assert!(!status(404).is_retryable());
        assert!(!UpstreamError::Decode("eof".into()).is_retryable());
    }

    #[tokio::test]
    async fn test_retry_success_first_attempt() {
        let config = RetryConfig::default();
        let result = retry_http_call(&config, "test_op", || async { Ok::<_, UpstreamError>(42) })
            .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_retry_recovers_from_transient_failure() {
        let calls = AtomicU32::new(0);
        let result = retry_http_call(&RetryConfig::quick(), "test_op", || {
            let attempt = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Err(status(502))
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_retry_permanent_failure() {
        let calls = AtomicU32::new(0);
        let result = retry_http_call(&RetryConfig::quick(), "test_op", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<i32, _>(status(404)) }
        })
        .await;

        assert_eq!(result.unwrap_err().status(), Some(404));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);
        let result = retry_http_call(&RetryConfig::quick(), "test_op", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<i32, _>(UpstreamError::Transport("refused".into())) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
