// src/search/mod.rs
//! Search coordination: turns a stream of query edits into at most one
//! catalog search at a time.
//!
//! Query changes are debounced, blank queries fall back to the last
//! successful result set, short queries are ignored, and a newer search
//! always supersedes an older one.

mod coordinator;
mod state;

pub use coordinator::SearchCoordinator;
pub use state::{SearchPhase, SearchState};
