// src/algebras/books.rs
//! Book data algebra: the single read/write surface presentation logic uses.

use crate::model::Book;
use crate::types::BookId;
use async_trait::async_trait;
use tokio::sync::watch;

use super::error::{DataError, LocalError, RemoteError};
use super::outcome::EmptyResult;

/// Book data capability combining the remote catalog and the local favorites.
///
/// Nothing outside an implementation of this trait touches either source.
///
/// # Laws
///
/// All implementations must satisfy these laws:
///
/// - **L1 (Favorite Membership)**: after `mark_as_favorite(book)` succeeds,
///   `is_book_favorite(book.id)` eventually holds `true` and
///   `favorite_books()` eventually contains `book.id`.
///   ```text
///   mark_as_favorite(b) == Ok(())
///   is_book_favorite(b.id) ~> true
///   ```
///
/// - **L2 (Removal)**: after `delete_from_favorites(id)` succeeds, the views
///   eventually exclude `id`. Deleting an absent id succeeds.
///   ```text
///   delete_from_favorites(id) == Ok(())
///   is_book_favorite(id) ~> false
///   ```
///
/// - **L3 (Local-First Description)**: for a favorited id,
///   `book_description(id)` returns the stored description without a
///   remote call.
///
/// - **L4 (Live Views)**: `favorite_books()` and `is_book_favorite(id)`
///   re-emit after every store mutation, including mutations of other ids.
///
/// This trait is **object-safe** and can be used as `Arc<dyn BookRepository>`.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Searches the remote catalog. Description is unset on every result.
    async fn search_books(&self, query: &str) -> Result<Vec<Book>, RemoteError>;

    /// Returns the description of a book, preferring the favorites store.
    async fn book_description(&self, id: &BookId) -> Result<Option<String>, DataError>;

    /// Live list of favorite books in store order.
    fn favorite_books(&self) -> watch::Receiver<Vec<Book>>;

    /// Live favorite status of one book.
    fn is_book_favorite(&self, id: &BookId) -> watch::Receiver<bool>;

    /// Inserts or replaces a favorite.
    async fn mark_as_favorite(&self, book: &Book) -> EmptyResult<LocalError>;

    /// Removes a favorite; absent ids are a no-op.
    async fn delete_from_favorites(&self, id: &BookId) -> EmptyResult<LocalError>;
}
