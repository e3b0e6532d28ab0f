// src/search/coordinator.rs
//! Debounced, single-flight search driver.

use super::state::{SearchPhase, SearchState};
use crate::algebras::{BookRepository, RemoteError};
use crate::config::SearchConfig;
use crate::model::Book;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Mutable bookkeeping behind the published [`SearchState`].
///
/// Every transition takes this lock before touching the state channel, so
/// a completing search and the dispatch superseding it never interleave.
#[derive(Default)]
struct SearchSession {
    /// Bumped on every dispatch and every blank reset. A search may only
    /// write state while its generation is current.
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
    /// Last successful, non-superseded result set.
    cache: Vec<Book>,
    /// Whether any search has completed.
    settled: bool,
}

impl SearchSession {
    fn resting_phase(&self) -> SearchPhase {
        if self.in_flight.is_some() {
            SearchPhase::InFlight
        } else if self.settled {
            SearchPhase::Settled
        } else {
            SearchPhase::Idle
        }
    }
}

struct Shared {
    repository: Arc<dyn BookRepository>,
    config: SearchConfig,
    session: Mutex<SearchSession>,
    state: watch::Sender<SearchState>,
}

/// Debounced, single-flight search over a [`BookRepository`].
///
/// Owns the visible search state; nothing else writes it. Dropping the
/// coordinator stops the debounce driver and aborts any outstanding search.
pub struct SearchCoordinator {
    shared: Arc<Shared>,
    query: watch::Sender<String>,
    driver: JoinHandle<()>,
}

impl SearchCoordinator {
    /// Starts the debounce driver on the current tokio runtime.
    pub fn spawn(repository: Arc<dyn BookRepository>, config: SearchConfig) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        let shared = Arc::new(Shared {
            repository,
            config,
            session: Mutex::new(SearchSession::default()),
            state,
        });
        let (query, queries) = watch::channel(String::new());
        let driver = tokio::spawn(drive(Arc::clone(&shared), queries));

        Self {
            shared,
            query,
            driver,
        }
    }

    /// Records a query edit and restarts the debounce timer.
    /// Setting the current query again does nothing.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        let changed = self.query.send_if_modified(|current| {
            if *current == query {
                false
            } else {
                current.clone_from(&query);
                true
            }
        });
        if changed {
            self.shared.state.send_modify(|state| {
                state.query = query;
                state.phase = SearchPhase::Debouncing;
            });
        }
    }

    /// Live view of the search state.
    pub fn state(&self) -> watch::Receiver<SearchState> {
        self.shared.state.subscribe()
    }

    pub fn snapshot(&self) -> SearchState {
        self.shared.state.borrow().clone()
    }
}

impl Drop for SearchCoordinator {
    fn drop(&mut self) {
        self.driver.abort();
        if let Some(search) = self.shared.session.lock().in_flight.take() {
            search.abort();
        }
    }
}

/// Waits for the query to stay unchanged for the debounce delay, then settles it.
async fn drive(shared: Arc<Shared>, mut queries: watch::Receiver<String>) {
    while queries.changed().await.is_ok() {
        loop {
            tokio::select! {
                _ = tokio::time::sleep(shared.config.debounce) => break,
                changed = queries.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
            }
        }
        let query = queries.borrow_and_update().clone();
        shared.settle(query);
    }
}

impl Shared {
    fn settle(self: &Arc<Self>, query: String) {
        let mut session = self.session.lock();

        if query.trim().is_empty() {
            self.reset_to_cache(&mut session);
        } else if query.chars().count() < self.config.min_query_len {
            let phase = session.resting_phase();
            self.state.send_modify(|state| state.phase = phase);
        } else {
            self.dispatch(&mut session, query);
        }
    }

    fn reset_to_cache(&self, session: &mut SearchSession) {
        if let Some(search) = session.in_flight.take() {
            search.abort();
        }
        session.generation += 1;
        let cache = session.cache.clone();
        self.state.send_modify(|state| {
            state.cached_available = !cache.is_empty();
            state.results = cache;
            state.error = None;
            state.is_loading = false;
            state.phase = SearchPhase::Idle;
        });
    }

    fn dispatch(self: &Arc<Self>, session: &mut SearchSession, query: String) {
        if let Some(previous) = session.in_flight.take() {
            previous.abort();
        }
        session.generation += 1;
        let generation = session.generation;
        log::debug!("Dispatching search #{} for {:?}", generation, query);

        self.state.send_modify(|state| {
            state.is_loading = true;
            state.phase = SearchPhase::InFlight;
        });

        let shared = Arc::clone(self);
        session.in_flight = Some(tokio::spawn(async move {
            let outcome = shared.repository.search_books(&query).await;
            shared.complete(generation, &query, outcome);
        }));
    }

    fn complete(&self, generation: u64, query: &str, outcome: Result<Vec<Book>, RemoteError>) {
        let mut session = self.session.lock();
        if session.generation != generation {
            log::debug!("Discarding superseded results for {:?}", query);
            return;
        }
        session.in_flight = None;
        session.settled = true;

        match outcome {
            Ok(books) => {
                session.cache = books.clone();
                self.state.send_modify(|state| {
                    state.cached_available = !books.is_empty();
                    state.results = books;
                    state.error = None;
                    state.is_loading = false;
                    state.phase = SearchPhase::Settled;
                });
            }
            Err(error) => {
                log::debug!("Search for {:?} failed: {}", query, error);
                self.state.send_modify(|state| {
                    state.results.clear();
                    state.error = Some(error);
                    state.is_loading = false;
                    state.phase = SearchPhase::Settled;
                });
            }
        }
    }
}
