// src/algebras/mod.rs
//! Capability algebras for bookpedia.
//!
//! This module defines the vocabulary every data operation speaks:
//!
//! - [`outcome`]: combinators over `Result` used to chain side effects
//!   without losing the original value
//! - [`error`]: the closed failure taxonomy ([`DataError`], [`RemoteError`],
//!   [`LocalError`])
//! - [`books`]: the [`BookRepository`] capability presentation logic depends on
//!
//! # Architecture
//!
//! ```text
//! Presentation (presentation/, search/)
//!         ↓
//! Algebras (algebras/)
//!         ↓
//! Interpreters (repository.rs → api/, store/)
//! ```
//!
//! Traits are object-safe and async via `async_trait`, so callers hold
//! `Arc<dyn BookRepository>` and never see HTTP or storage details.

pub mod books;
pub mod error;
pub mod outcome;

pub use books::BookRepository;
pub use error::{DataError, LocalError, RemoteError};
pub use outcome::{EmptyResult, ResultExt};
