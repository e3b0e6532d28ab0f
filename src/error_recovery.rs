// src/error_recovery.rs
//! Caller-side retry with exponential backoff for catalog operations.
//!
//! The network boundary never retries; callers that want to opt in wrap
//! the operation here.

use crate::algebras::RemoteError;
use std::time::Duration;

/// Retries an async operation with exponential backoff.
///
/// Only transient failures ([`RemoteError::is_retryable`]) are retried; any
/// other error is returned immediately. `max_attempts` counts the first
/// attempt, and zero is treated as one.
pub async fn retry_with_backoff<F, T, Fut>(
    mut operation: F,
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
) -> Result<T, RemoteError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, RemoteError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut delay = initial_delay;
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                log::warn!(
                    "Attempt {} failed ({}), retrying after {:?}",
                    attempt,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;

                // Exponential backoff with cap
                delay = std::cmp::min(delay * 2, max_delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
