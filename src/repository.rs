// src/repository.rs
//! The reconciling repository: remote catalog plus local favorites behind
//! one [`BookRepository`].

use crate::algebras::{BookRepository, DataError, EmptyResult, LocalError, RemoteError, ResultExt};
use crate::api::responses::{BookWorkDto, SearchResponseDto};
use crate::api::RemoteBookSource;
use crate::constants::VIEW_TEARDOWN_GRACE;
use crate::live::{self, LiveView};
use crate::model::Book;
use crate::store::{BookRecord, FavoriteBookStore, StoreError};
use crate::types::BookId;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Tuning for [`DefaultBookRepository`].
#[derive(Debug, Clone)]
pub struct RepositoryConfig {
    /// Result limit passed to every search; `None` defers to the source.
    pub result_limit: Option<u32>,
    /// How long the favorites view outlives its last subscriber.
    pub view_grace: Duration,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            result_limit: None,
            view_grace: VIEW_TEARDOWN_GRACE,
        }
    }
}

/// [`BookRepository`] over a [`RemoteBookSource`] and a [`FavoriteBookStore`].
pub struct DefaultBookRepository {
    remote: Arc<dyn RemoteBookSource>,
    store: Arc<dyn FavoriteBookStore>,
    config: RepositoryConfig,
    favorites: LiveView<Vec<Book>>,
}

impl DefaultBookRepository {
    pub fn new(
        remote: Arc<dyn RemoteBookSource>,
        store: Arc<dyn FavoriteBookStore>,
        config: RepositoryConfig,
    ) -> Self {
        let favorites = {
            let store = Arc::clone(&store);
            LiveView::new(Vec::new(), config.view_grace, move || {
                live::derive(store.observe(), |records: &Vec<BookRecord>| {
                    records_to_books(records)
                })
            })
        };

        Self {
            remote,
            store,
            config,
            favorites,
        }
    }
}

fn records_to_books(records: &[BookRecord]) -> Vec<Book> {
    records
        .iter()
        .filter_map(|record| match record.to_book() {
            Ok(book) => Some(book),
            Err(e) => {
                log::warn!("Skipping corrupt favorite {}: {}", record.id, e);
                None
            }
        })
        .collect()
}

fn classify_store_error(error: &StoreError) -> LocalError {
    if error.is_storage_full() {
        LocalError::DiskFull
    } else {
        LocalError::Unknown
    }
}

#[async_trait]
impl BookRepository for DefaultBookRepository {
    async fn search_books(&self, query: &str) -> Result<Vec<Book>, RemoteError> {
        self.remote
            .search_books(query, self.config.result_limit)
            .await
            .map(SearchResponseDto::into_books)
    }

    async fn book_description(&self, id: &BookId) -> Result<Option<String>, DataError> {
        match self.store.find(id).await {
            Ok(Some(record)) => return Ok(record.description),
            Ok(None) => {}
            Err(e) => {
                log::warn!("Favorites lookup for {} failed: {}", id, e);
                return Err(LocalError::Unknown.into());
            }
        }

        self.remote
            .book_details(id)
            .await
            .map(BookWorkDto::description_text)
            .widen()
    }

    fn favorite_books(&self) -> watch::Receiver<Vec<Book>> {
        self.favorites.subscribe()
    }

    fn is_book_favorite(&self, id: &BookId) -> watch::Receiver<bool> {
        let id = id.clone();
        live::derive(self.favorites.subscribe(), move |books: &Vec<Book>| {
            books.iter().any(|book| book.id == id)
        })
    }

    async fn mark_as_favorite(&self, book: &Book) -> EmptyResult<LocalError> {
        self.store
            .upsert(BookRecord::from_book(book))
            .await
            .on_error(|e| log::warn!("Could not favorite {}: {}", book.id, e))
            .map_err(|e| classify_store_error(&e))
    }

    async fn delete_from_favorites(&self, id: &BookId) -> EmptyResult<LocalError> {
        self.store
            .delete(id)
            .await
            .on_error(|e| log::warn!("Could not remove favorite {}: {}", id, e))
            .map_err(|e| classify_store_error(&e))
    }
}
