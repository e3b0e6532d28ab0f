// src/store/file.rs
//! JSON file backend for the favorites store.

use super::table::{FavoriteTable, Undo};
use super::{BookRecord, FavoriteBookStore, StoreError};
use crate::types::BookId;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::{watch, Mutex};

/// Favorites persisted as a JSON array in a single file.
///
/// Every mutation rewrites the file through a sibling temp file and a rename,
/// so a crash leaves either the old or the new table on disk. The table lock
/// is held across the write: mutations are applied, made durable, and only
/// then published. A failed write rolls the in-memory table back.
pub struct JsonFileFavoriteStore {
    path: PathBuf,
    table: Mutex<FavoriteTable>,
    observer: watch::Receiver<Vec<BookRecord>>,
}

impl JsonFileFavoriteStore {
    /// Opens the table at `path`, creating parent directories as needed.
    /// A missing file is an empty table; it is created on the first write.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::from_io(parent, e))?;
        }

        let records = match tokio::fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => {
                serde_json::from_str::<Vec<BookRecord>>(&content).map_err(|source| {
                    StoreError::Corrupt {
                        path: path.clone(),
                        source,
                    }
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(StoreError::from_io(&path, e)),
        };

        log::debug!(
            "Opened favorites table {} with {} record(s)",
            path.display(),
            records.len()
        );

        let table = FavoriteTable::new(records);
        let observer = table.subscribe();
        Ok(Self {
            path,
            table: Mutex::new(table),
            observer,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn persist(&self, table: &FavoriteTable) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(&table.snapshot())?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, json)
            .await
            .map_err(|e| StoreError::from_io(&temp, e))?;
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(StoreError::from_io(&self.path, e));
        }
        Ok(())
    }

    /// Makes an applied mutation durable, or reverts it.
    async fn commit(&self, table: &mut FavoriteTable, undo: Undo) -> Result<(), StoreError> {
        match self.persist(table).await {
            Ok(()) => {
                table.publish();
                Ok(())
            }
            Err(e) => {
                log::warn!("Favorites write to {} failed: {}", self.path.display(), e);
                table.undo(undo);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl FavoriteBookStore for JsonFileFavoriteStore {
    async fn find(&self, id: &BookId) -> Result<Option<BookRecord>, StoreError> {
        Ok(self.table.lock().await.get(id))
    }

    fn observe(&self) -> watch::Receiver<Vec<BookRecord>> {
        let mut rx = self.observer.clone();
        rx.borrow_and_update();
        rx
    }

    async fn upsert(&self, record: BookRecord) -> Result<(), StoreError> {
        let mut table = self.table.lock().await;
        let undo = table.apply_upsert(record);
        self.commit(&mut table, undo).await
    }

    async fn delete(&self, id: &BookId) -> Result<(), StoreError> {
        let mut table = self.table.lock().await;
        match table.apply_delete(id) {
            Some(undo) => self.commit(&mut table, undo).await,
            None => Ok(()),
        }
    }
}
