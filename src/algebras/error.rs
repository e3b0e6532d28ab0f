// src/algebras/error.rs
//! Failure taxonomy for data operations.
//!
//! Every failure that leaves the data layer ends in exactly one of these
//! kinds. Cancellation is not part of the vocabulary: a cancelled operation
//! simply never produces a value.

use thiserror::Error;

/// Failure of a call against the remote catalog.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteError {
    #[error("request timed out")]
    RequestTimeout,

    #[error("too many requests")]
    TooManyRequests,

    #[error("no internet connection")]
    NoInternet,

    #[error("server error")]
    Server,

    #[error("response could not be decoded")]
    Serialization,

    #[error("unknown remote error")]
    Unknown,
}

impl RemoteError {
    /// Returns `true` if this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RequestTimeout | Self::TooManyRequests | Self::NoInternet | Self::Server
        )
    }
}

/// Failure of an operation against the local favorites store.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalError {
    #[error("local storage is full")]
    DiskFull,

    #[error("unknown local storage error")]
    Unknown,
}

/// Any data failure, for operations that may touch either source.
///
/// The only way in is through the `From` injections below, so widening
/// a narrower error is always an explicit conversion.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataError {
    #[error("remote: {0}")]
    Remote(#[from] RemoteError),

    #[error("local: {0}")]
    Local(#[from] LocalError),
}

impl DataError {
    /// The remote kind, if this failure came from the catalog.
    pub fn as_remote(&self) -> Option<RemoteError> {
        match self {
            Self::Remote(e) => Some(*e),
            Self::Local(_) => None,
        }
    }

    /// The local kind, if this failure came from the favorites store.
    pub fn as_local(&self) -> Option<LocalError> {
        match self {
            Self::Local(e) => Some(*e),
            Self::Remote(_) => None,
        }
    }
}
