use std::future::Future;
use std::time::Duration;

use crate::error::Result;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
        }
    }
}

/// Run `operation` up to `max_attempts` times, doubling the delay between
/// attempts. Fatal errors stop the loop immediately. Only the final error
/// is reported after exhaustion.
pub async fn retry_with_backoff<T, F, Fut>(policy: RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut delay = policy.initial_delay;
    let mut attempt = 1;
    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_fatal() || attempt >= policy.max_attempts => return Err(error),
            Err(error) => {
                tracing::debug!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    "transient failure, backing off"
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SummaryError;
    use crate::provider::ProviderKey;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn returns_first_success_without_retrying() {
        let calls = AtomicU32::new(0);
        let result = retry_with_backoff(fast_policy(), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(42) }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_transient_failures_until_success() {
        let calls = AtomicU32::new(0);
        let result = retry_with_backoff(fast_policy(), |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 3 {
                    Err(SummaryError::Timeout)
                } else {
                    Ok("done")
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn fatal_errors_short_circuit() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = retry_with_backoff(fast_policy(), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(SummaryError::Auth {
                    provider: ProviderKey::OpenAi,
                    status: 401,
                })
            }
        })
        .await;
        assert!(matches!(result, Err(SummaryError::Auth { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhaustion_reports_the_final_error() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = retry_with_backoff(fast_policy(), |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 3 {
                    Err(SummaryError::Timeout)
                } else {
                    Err(SummaryError::Refusal)
                }
            }
        })
        .await;
        assert!(matches!(result, Err(SummaryError::Refusal)));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
