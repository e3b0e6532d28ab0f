// src/store/mod.rs
//! Favorites store: durable key/value persistence of favorited books.
//!
//! A record's presence is the only definition of "this book is a favorite".
//! Stores serialize their own reads and writes and publish the full table
//! after every successful mutation.

mod file;
mod memory;
mod record;
mod table;

pub use file::JsonFileFavoriteStore;
pub use memory::InMemoryFavoriteStore;
pub use record::{decode_string_list, encode_string_list, BookRecord};

use crate::types::BookId;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::watch;

/// Failure reported by a favorites store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage is full while writing {path}")]
    StorageFull { path: PathBuf },

    #[error("Filesystem IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt favorites table at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode favorites table: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl StoreError {
    /// Classifies an IO failure, separating storage exhaustion from the rest.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::StorageFull {
            Self::StorageFull { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// Whether the store ran out of space.
    pub fn is_storage_full(&self) -> bool {
        matches!(self, Self::StorageFull { .. })
    }
}

/// Durable favorites persistence.
///
/// # Laws
///
/// - **L1 (Upsert-Find)**: after `upsert(r)` succeeds, `find(r.id)` returns `r`.
/// - **L2 (Delete-Find)**: after `delete(id)` succeeds, `find(id)` returns `None`;
///   deleting an absent id succeeds and publishes nothing.
/// - **L3 (Observe)**: every successful mutation publishes the whole table, in
///   insertion order, to `observe()` receivers; failed mutations publish nothing.
/// - **L4 (Stable Order)**: upserting an existing id keeps its position.
///
/// This trait is **object-safe** and can be used as `Arc<dyn FavoriteBookStore>`.
#[async_trait]
pub trait FavoriteBookStore: Send + Sync {
    /// Point lookup.
    async fn find(&self, id: &BookId) -> Result<Option<BookRecord>, StoreError>;

    /// Live query over all records. The receiver starts with the current table.
    fn observe(&self) -> watch::Receiver<Vec<BookRecord>>;

    /// Insert or replace the record with the same id.
    async fn upsert(&self, record: BookRecord) -> Result<(), StoreError>;

    /// Remove a record; absent ids are a no-op.
    async fn delete(&self, id: &BookId) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_storage_full_classification() {
        let full = StoreError::from_io("/tmp/x", io::Error::from(io::ErrorKind::StorageFull));
        assert!(full.is_storage_full());

        let denied = StoreError::from_io(
            "/tmp/x",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(!denied.is_storage_full());
        assert!(denied.to_string().contains("/tmp/x"));
    }
}
