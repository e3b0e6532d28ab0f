// src/store/memory.rs
//! Volatile backend for the favorites store.

use super::table::FavoriteTable;
use super::{BookRecord, FavoriteBookStore, StoreError};
use crate::types::BookId;
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::watch;

/// Volatile favorites store. Mutations never fail.
pub struct InMemoryFavoriteStore {
    table: Mutex<FavoriteTable>,
}

impl InMemoryFavoriteStore {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Starts with the given records, in order.
    pub fn with_records(records: Vec<BookRecord>) -> Self {
        Self {
            table: Mutex::new(FavoriteTable::new(records)),
        }
    }
}

impl Default for InMemoryFavoriteStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FavoriteBookStore for InMemoryFavoriteStore {
    async fn find(&self, id: &BookId) -> Result<Option<BookRecord>, StoreError> {
        Ok(self.table.lock().get(id))
    }

    fn observe(&self) -> watch::Receiver<Vec<BookRecord>> {
        self.table.lock().subscribe()
    }

    async fn upsert(&self, record: BookRecord) -> Result<(), StoreError> {
        let mut table = self.table.lock();
        table.apply_upsert(record);
        table.publish();
        Ok(())
    }

    async fn delete(&self, id: &BookId) -> Result<(), StoreError> {
        let mut table = self.table.lock();
        if table.apply_delete(id).is_some() {
            table.publish();
        }
        Ok(())
    }
}
