// src/search/state.rs
//! Published search state.

use crate::algebras::RemoteError;
use crate::model::Book;

/// Where the coordinator is in its query lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// Nothing searched yet, or the query is blank.
    #[default]
    Idle,
    /// The query changed and the debounce timer is running.
    Debouncing,
    /// A search is outstanding.
    InFlight,
    /// The latest search finished, successfully or not.
    Settled,
}

/// Read-only snapshot published to observers of a [`super::SearchCoordinator`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    /// The query as last typed, before debouncing.
    pub query: String,
    pub results: Vec<Book>,
    pub is_loading: bool,
    /// Whether a non-empty successful result set is cached.
    pub cached_available: bool,
    pub error: Option<RemoteError>,
    pub phase: SearchPhase,
}
