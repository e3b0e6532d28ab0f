// src/api/boundary.rs
//! Network call boundary.
//!
//! [`safe_call`] runs exactly one outbound request and turns everything that
//! can go wrong at the transport or protocol level into a [`RemoteError`].
//! Nothing above this module ever sees a `reqwest::Error`.
//!
//! No retries happen here; see [`crate::error_recovery`] for caller-side retry.

use super::client::ApiResponse;
use crate::algebras::RemoteError;
use serde::de::DeserializeOwned;
use std::future::Future;

/// A transport-level failure, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFault {
    /// Connecting or completing the call took longer than the configured timeout.
    Timeout,
    /// DNS resolution or connection establishment failed.
    UnresolvedAddress,
    /// Anything else that went wrong while performing the call.
    Other(String),
}

impl From<reqwest::Error> for TransportFault {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::UnresolvedAddress
        } else {
            Self::Other(err.to_string())
        }
    }
}

impl From<TransportFault> for RemoteError {
    fn from(fault: TransportFault) -> Self {
        match fault {
            TransportFault::Timeout => RemoteError::RequestTimeout,
            TransportFault::UnresolvedAddress => RemoteError::NoInternet,
            TransportFault::Other(_) => RemoteError::Unknown,
        }
    }
}

/// Executes one request-producing operation and classifies its outcome.
///
/// If the enclosing task has been aborted while the call was failing, the
/// yield before reporting [`RemoteError::Unknown`] is where the task is
/// dropped, so cancellation is never reported as a data error.
pub async fn safe_call<T, F, Fut>(execute: F) -> Result<T, RemoteError>
where
    T: DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<ApiResponse<String>, TransportFault>>,
{
    let response = match execute().await {
        Ok(response) => response,
        Err(TransportFault::Other(message)) => {
            tokio::task::yield_now().await;
            log::debug!("Request failed: {}", message);
            return Err(RemoteError::Unknown);
        }
        Err(fault) => {
            log::debug!("Request failed: {:?}", fault);
            return Err(fault.into());
        }
    };

    response_to_result(response)
}

/// Classifies a completed response by status and decodes success bodies.
pub fn response_to_result<T>(response: ApiResponse<String>) -> Result<T, RemoteError>
where
    T: DeserializeOwned,
{
    match response.status.as_u16() {
        200..=299 => serde_json::from_str(&response.data).map_err(|e| {
            log::warn!("Failed to decode response from {}: {}", response.url, e);
            RemoteError::Serialization
        }),
        408 => Err(RemoteError::RequestTimeout),
        429 => Err(RemoteError::TooManyRequests),
        500..=599 => Err(RemoteError::Server),
        other => {
            log::debug!("Unexpected status {} from {}", other, response.url);
            Err(RemoteError::Unknown)
        }
    }
}
