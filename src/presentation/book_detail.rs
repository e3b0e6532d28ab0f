// src/presentation/book_detail.rs
//! Detail screen: description loading and the favorite toggle for one book.

use super::ui_text::{ToUiText, UiText};
use crate::algebras::{BookRepository, ResultExt};
use crate::model::Book;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Everything the detail screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDetailState {
    pub book: Option<Book>,
    /// True until the description lookup has finished.
    pub is_loading: bool,
    pub is_favorite: bool,
}

impl Default for BookDetailState {
    fn default() -> Self {
        Self {
            book: None,
            is_loading: true,
            is_favorite: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailAction {
    FavoriteClicked,
    /// Replaces the displayed book, e.g. with a fresher copy from the list.
    SelectedBookChanged(Book),
}

/// One-shot outcomes that are not part of the screen state.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailEvent {
    FavoriteFailed(UiText),
}

/// Drives the detail screen for one book.
///
/// On start the description is fetched (local first) and filled into the
/// held book, and the favorite status is mirrored for as long as the
/// presenter lives.
pub struct BookDetailPresenter {
    repository: Arc<dyn BookRepository>,
    state: Arc<watch::Sender<BookDetailState>>,
    events: mpsc::UnboundedSender<DetailEvent>,
    tasks: Vec<JoinHandle<()>>,
}

impl BookDetailPresenter {
    pub fn spawn(
        repository: Arc<dyn BookRepository>,
        book: Book,
    ) -> (Self, mpsc::UnboundedReceiver<DetailEvent>) {
        let id = book.id.clone();
        let mut favorite_rx = repository.is_book_favorite(&id);
        let initial = BookDetailState {
            book: Some(book),
            is_loading: true,
            is_favorite: *favorite_rx.borrow_and_update(),
        };
        let state = Arc::new(watch::channel(initial).0);

        let description = {
            let repository = Arc::clone(&repository);
            let state = Arc::clone(&state);
            tokio::spawn(async move {
                let outcome = repository
                    .book_description(&id)
                    .await
                    .on_error(|e| log::debug!("Description for {} unavailable: {}", id, e));
                state.send_modify(|s| {
                    if let Ok(description) = outcome {
                        s.book = s.book.take().map(|b| b.with_description(description));
                    }
                    s.is_loading = false;
                });
            })
        };

        let favorite = {
            let state = Arc::clone(&state);
            tokio::spawn(async move {
                while favorite_rx.changed().await.is_ok() {
                    let is_favorite = *favorite_rx.borrow_and_update();
                    state.send_modify(|s| s.is_favorite = is_favorite);
                }
            })
        };

        let (events, events_rx) = mpsc::unbounded_channel();
        (
            Self {
                repository,
                state,
                events,
                tasks: vec![description, favorite],
            },
            events_rx,
        )
    }

    pub async fn on_action(&self, action: DetailAction) {
        match action {
            DetailAction::SelectedBookChanged(book) => {
                self.state.send_modify(|s| s.book = Some(book));
            }
            DetailAction::FavoriteClicked => self.toggle_favorite().await,
        }
    }

    async fn toggle_favorite(&self) {
        let current = self.state.borrow().clone();
        let Some(book) = current.book else {
            return;
        };

        let outcome = if current.is_favorite {
            self.repository.delete_from_favorites(&book.id).await
        } else {
            self.repository.mark_as_favorite(&book).await
        };

        if let Err(e) = outcome {
            // The host may have stopped listening; nothing to recover.
            let _ = self.events.send(DetailEvent::FavoriteFailed(e.to_ui_text()));
        }
    }

    pub fn state(&self) -> watch::Receiver<BookDetailState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> BookDetailState {
        self.state.borrow().clone()
    }
}

impl Drop for BookDetailPresenter {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
