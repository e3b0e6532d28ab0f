// src/error.rs
//! Application error types with structured error handling.
//!
//! The data layer speaks the closed [`DataError`] taxonomy. Everything the
//! binary can fail on, from configuration to store bootstrap, is collected
//! here into [`AppError`].

use crate::algebras::{DataError, LocalError, RemoteError};
use crate::store::StoreError;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Favorites store error: {0}")]
    Store(#[from] StoreError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

impl From<RemoteError> for AppError {
    fn from(err: RemoteError) -> Self {
        AppError::Data(err.into())
    }
}

impl From<LocalError> for AppError {
    fn from(err: LocalError) -> Self {
        AppError::Data(err.into())
    }
}

impl AppError {
    /// The data-layer classification, if this error came from the data layer.
    pub fn data_error(&self) -> Option<DataError> {
        match self {
            AppError::Data(e) => Some(*e),
            _ => None,
        }
    }
}
