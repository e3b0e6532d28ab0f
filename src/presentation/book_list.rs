// src/presentation/book_list.rs
//! List screen: search results and favorites folded into one state.

use super::ui_text::{ToUiText, UiText};
use crate::algebras::BookRepository;
use crate::config::SearchConfig;
use crate::model::Book;
use crate::search::{SearchCoordinator, SearchState};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Which list the screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookListTab {
    #[default]
    Search,
    Favorites,
}

/// Everything the list screen renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookListState {
    pub search_query: String,
    pub search_results: Vec<Book>,
    pub favorite_books: Vec<Book>,
    pub is_loading: bool,
    pub selected_tab: BookListTab,
    pub error_message: Option<UiText>,
}

impl BookListState {
    /// The books of the selected tab.
    pub fn visible_books(&self) -> &[Book] {
        match self.selected_tab {
            BookListTab::Search => &self.search_results,
            BookListTab::Favorites => &self.favorite_books,
        }
    }

    fn fold_search(&mut self, search: &SearchState) {
        self.search_query.clone_from(&search.query);
        self.search_results.clone_from(&search.results);
        self.is_loading = search.is_loading;
        self.error_message = search.error.map(|e| e.to_ui_text());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookListAction {
    SearchQueryChanged(String),
    BookClicked(Book),
    TabSelected(BookListTab),
}

/// Requests the list screen makes of its host.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    OpenDetail(Book),
}

/// Drives the list screen: search through a [`SearchCoordinator`], favorites
/// straight from the repository.
pub struct BookListPresenter {
    coordinator: SearchCoordinator,
    state: Arc<watch::Sender<BookListState>>,
    events: mpsc::UnboundedSender<ListEvent>,
    folder: JoinHandle<()>,
}

impl BookListPresenter {
    pub fn spawn(
        repository: Arc<dyn BookRepository>,
        search: SearchConfig,
    ) -> (Self, mpsc::UnboundedReceiver<ListEvent>) {
        let coordinator = SearchCoordinator::spawn(Arc::clone(&repository), search);
        let mut search_rx = coordinator.state();
        let mut favorites_rx = repository.favorite_books();

        let mut initial = BookListState::default();
        initial.fold_search(&search_rx.borrow_and_update());
        initial.favorite_books = favorites_rx.borrow_and_update().clone();
        let state = Arc::new(watch::channel(initial).0);

        let folder = {
            let state = Arc::clone(&state);
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        changed = search_rx.changed() => {
                            if changed.is_err() {
                                break;
                            }
                            let search = search_rx.borrow_and_update().clone();
                            state.send_modify(|s| s.fold_search(&search));
                        }
                        changed = favorites_rx.changed() => {
                            if changed.is_err() {
                                break;
                            }
                            let favorites = favorites_rx.borrow_and_update().clone();
                            state.send_modify(|s| s.favorite_books = favorites);
                        }
                    }
                }
            })
        };

        let (events, events_rx) = mpsc::unbounded_channel();
        (
            Self {
                coordinator,
                state,
                events,
                folder,
            },
            events_rx,
        )
    }

    pub fn on_action(&self, action: BookListAction) {
        match action {
            BookListAction::SearchQueryChanged(query) => self.coordinator.set_query(query),
            BookListAction::BookClicked(book) => {
                // The host may have stopped listening; nothing to recover.
                let _ = self.events.send(ListEvent::OpenDetail(book));
            }
            BookListAction::TabSelected(tab) => {
                self.state.send_if_modified(|s| {
                    let changed = s.selected_tab != tab;
                    s.selected_tab = tab;
                    changed
                });
            }
        }
    }

    pub fn state(&self) -> watch::Receiver<BookListState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> BookListState {
        self.state.borrow().clone()
    }
}

impl Drop for BookListPresenter {
    fn drop(&mut self) {
        self.folder.abort();
    }
}
