use std::future::Future;
use std::time::Duration;

use crate::account::errors::AccountError;

/// Upper bound on how long a single credential store call may take.
///
/// Dropping the future returned by `run` cancels the store call with it.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreDeadline {
    timeout: Option<Duration>,
}

impl StoreDeadline {
    /// No deadline; store calls run to completion.
    pub fn none() -> Self {
        Self { timeout: None }
    }

    pub fn after(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    /// Await a store call, failing with `StorageUnavailable` once the
    /// deadline elapses.
    pub async fn run<T, F>(&self, operation: &'static str, call: F) -> Result<T, AccountError>
    where
        F: Future<Output = Result<T, AccountError>>,
    {
        let Some(timeout) = self.timeout else {
            return call.await;
        };

        match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    operation,
                    timeout_ms = timeout.as_millis() as u64,
                    "Credential store call timed out"
                );
                Err(AccountError::StorageUnavailable(format!(
                    "{} timed out after {:?}",
                    operation, timeout
                )))
            }
        }
    }
}
