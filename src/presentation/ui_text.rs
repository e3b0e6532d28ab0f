// src/presentation/ui_text.rs
//! User-facing messages for data failures.

use crate::algebras::{DataError, LocalError, RemoteError};
use std::fmt;

/// Fixed text shown to the user for a known condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiText(pub &'static str);

impl fmt::Display for UiText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Conversion of a failure into the message the user sees.
pub trait ToUiText {
    fn to_ui_text(&self) -> UiText;
}

impl ToUiText for RemoteError {
    fn to_ui_text(&self) -> UiText {
        UiText(match self {
            RemoteError::RequestTimeout => "The request timed out.",
            RemoteError::TooManyRequests => "Oops, it seems like your quota is exceeded.",
            RemoteError::NoInternet => "Couldn't reach server, please check your internet connection.",
            RemoteError::Server => "Something went wrong on the server.",
            RemoteError::Serialization => "Couldn't parse data.",
            RemoteError::Unknown => "Oops, something went wrong.",
        })
    }
}

impl ToUiText for LocalError {
    fn to_ui_text(&self) -> UiText {
        UiText(match self {
            LocalError::DiskFull => "It looks like your storage is full.",
            LocalError::Unknown => "Oops, something went wrong.",
        })
    }
}

impl ToUiText for DataError {
    fn to_ui_text(&self) -> UiText {
        match self {
            DataError::Remote(e) => e.to_ui_text(),
            DataError::Local(e) => e.to_ui_text(),
        }
    }
}
