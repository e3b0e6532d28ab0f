// src/algebras/outcome.rs
//! Combinators over `Result` for fluent success/error handling.
//!
//! `Result<T, E>` already is the success/error sum type; `map` is
//! [`Result::map`]. This module adds the pass-through hooks and the
//! explicit widening step the data layer relies on.
//!
//! # Laws
//!
//! - **L1 (Map-Error Identity)**: `Err(e).map(f) == Err(e)` and `f` is not called.
//! - **L2 (Map-Success)**: `Ok(v).map(f) == Ok(f(v))`.
//! - **L3 (Hook Transparency)**: `r.on_success(f) == r` and `r.on_error(g) == r`
//!   for every `r`; `f` runs only on `Ok`, `g` only on `Err`.
//! - **L4 (Widening)**: `r.widen::<E2>()` equals `r.map_err(E2::from)`.

/// Success without a payload, for write operations.
pub type EmptyResult<E> = Result<(), E>;

/// Pass-through hooks and conversions for any `Result`.
pub trait ResultExt<T, E>: Sized {
    /// Runs `f` on the success value and returns `self` unchanged.
    fn on_success<F: FnOnce(&T)>(self, f: F) -> Self;

    /// Runs `f` on the error value and returns `self` unchanged.
    fn on_error<F: FnOnce(&E)>(self, f: F) -> Self;

    /// Injects the error into a wider error type.
    fn widen<E2: From<E>>(self) -> Result<T, E2>;

    /// Discards the success payload.
    fn as_empty(self) -> EmptyResult<E>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn on_success<F: FnOnce(&T)>(self, f: F) -> Self {
        if let Ok(value) = &self {
            f(value);
        }
        self
    }

    fn on_error<F: FnOnce(&E)>(self, f: F) -> Self {
        if let Err(error) = &self {
            f(error);
        }
        self
    }

    fn widen<E2: From<E>>(self) -> Result<T, E2> {
        self.map_err(E2::from)
    }

    fn as_empty(self) -> EmptyResult<E> {
        self.map(|_| ())
    }
}
