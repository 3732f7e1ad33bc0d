//! Timeout utilities for upstream calls
//!
//! Every outbound provider request is bounded. When the bound elapses the
//! request future is dropped, which cancels the in-flight call.

use std::time::Duration;

/// Default bound on one outbound provider call.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(60);

/// Apply timeout to an async operation
///
/// Returns `TimeoutError::Inner` for errors from the operation itself and
/// `TimeoutError::Timeout` when the deadline fires first.
pub async fn with_timeout<T, E>(
    timeout: Duration,
    future: impl std::future::Future<Output = Result<T, E>>,
) -> Result<T, TimeoutError<E>> {
    match tokio::time::timeout(timeout, future).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(TimeoutError::Inner(err)),
        Err(_) => Err(TimeoutError::Timeout(timeout)),
    }
}

/// Error type for timeout operations
#[derive(Debug, thiserror::Error)]
pub enum TimeoutError<E> {
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Inner(E),
}

impl<E> TimeoutError<E> {
    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, TimeoutError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_timeout_success() {
        let result: Result<i32, TimeoutError<String>> = with_timeout(
            Duration::from_secs(1),
            async { Ok::<_, String>(42) },
        )
        .await;

        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_timeout_inner_error() {
        let result: Result<i32, TimeoutError<String>> = with_timeout(
            Duration::from_secs(1),
            async { Err::<i32, _>("upstream refused".to_string()) },
        )
        .await;

        let err = result.unwrap_err();
        assert!(!err.is_timeout());
        assert!(matches!(err, TimeoutError::Inner(ref msg) if msg == "upstream refused"));
    }

    #[tokio::test]
    async fn test_with_timeout_elapsed() {
        let result: Result<i32, TimeoutError<String>> = with_timeout(
            Duration::from_millis(10),
            async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok::<_, String>(42)
            },
        )
        .await;

        let err = result.unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "Operation timed out after 10ms");
    }
}
