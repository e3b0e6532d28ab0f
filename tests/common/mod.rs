// tests/common/mod.rs
//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use bookpedia::{
    BookId, BookRecord, BookWorkDto, DefaultBookRepository, DescriptionDto, FavoriteBookStore,
    InMemoryFavoriteStore, RemoteBookSource, RemoteError, RepositoryConfig, SearchResponseDto,
    SearchedBookDto, StoreError,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// A search hit with just an id and a title.
pub fn hit(key: &str, title: &str) -> SearchedBookDto {
    SearchedBookDto {
        id: format!("/works/{}", key),
        title: title.to_string(),
        ..SearchedBookDto::default()
    }
}

/// Remote catalog with canned answers per query and per work id.
///
/// Unscripted searches return no hits; unscripted works have no description.
/// Every call is recorded, in order.
#[derive(Default)]
pub struct ScriptedRemote {
    searches: Mutex<HashMap<String, Result<Vec<SearchedBookDto>, RemoteError>>>,
    delays: Mutex<HashMap<String, Duration>>,
    works: Mutex<HashMap<String, Result<Option<String>, RemoteError>>>,
    search_calls: Mutex<Vec<String>>,
    detail_calls: Mutex<Vec<String>>,
}

impl ScriptedRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn answer(&self, query: &str, outcome: Result<Vec<SearchedBookDto>, RemoteError>) {
        self.searches.lock().insert(query.to_string(), outcome);
    }

    pub fn delay(&self, query: &str, delay: Duration) {
        self.delays.lock().insert(query.to_string(), delay);
    }

    pub fn describe(&self, id: &str, outcome: Result<Option<String>, RemoteError>) {
        self.works.lock().insert(id.to_string(), outcome);
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().clone()
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().clone()
    }
}

#[async_trait]
impl RemoteBookSource for ScriptedRemote {
    async fn search_books(
        &self,
        query: &str,
        _result_limit: Option<u32>,
    ) -> Result<SearchResponseDto, RemoteError> {
        self.search_calls.lock().push(query.to_string());
        let delay = self.delays.lock().get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let outcome = self
            .searches
            .lock()
            .get(query)
            .cloned()
            .unwrap_or(Ok(Vec::new()));
        outcome.map(|results| SearchResponseDto { results })
    }

    async fn book_details(&self, work_id: &BookId) -> Result<BookWorkDto, RemoteError> {
        self.detail_calls.lock().push(work_id.to_string());
        let outcome = self
            .works
            .lock()
            .get(work_id.as_str())
            .cloned()
            .unwrap_or(Ok(None));
        outcome.map(|text| BookWorkDto {
            description: text.map(DescriptionDto::Plain),
        })
    }
}

/// How a [`FaultyStore`] misbehaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    None,
    /// Writes fail because the disk is full.
    DiskFull,
    /// Writes fail with a generic IO error.
    WriteIo,
    /// Lookups fail.
    LookupIo,
}

/// In-memory store that fails on demand.
pub struct FaultyStore {
    inner: InMemoryFavoriteStore,
    fault: Mutex<Fault>,
}

impl FaultyStore {
    pub fn new(fault: Fault) -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryFavoriteStore::new(),
            fault: Mutex::new(fault),
        })
    }

    pub fn set_fault(&self, fault: Fault) {
        *self.fault.lock() = fault;
    }

    fn write_fault(&self) -> Option<StoreError> {
        let path = PathBuf::from("/data/favorites.json");
        match *self.fault.lock() {
            Fault::DiskFull => Some(StoreError::StorageFull { path }),
            Fault::WriteIo => Some(StoreError::Io {
                path,
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            }),
            Fault::None | Fault::LookupIo => None,
        }
    }
}

#[async_trait]
impl FavoriteBookStore for FaultyStore {
    async fn find(&self, id: &BookId) -> Result<Option<BookRecord>, StoreError> {
        if *self.fault.lock() == Fault::LookupIo {
            return Err(StoreError::Io {
                path: PathBuf::from("/data/favorites.json"),
                source: std::io::Error::from(std::io::ErrorKind::Other),
            });
        }
        self.inner.find(id).await
    }

    fn observe(&self) -> watch::Receiver<Vec<BookRecord>> {
        self.inner.observe()
    }

    async fn upsert(&self, record: BookRecord) -> Result<(), StoreError> {
        match self.write_fault() {
            Some(e) => Err(e),
            None => self.inner.upsert(record).await,
        }
    }

    async fn delete(&self, id: &BookId) -> Result<(), StoreError> {
        match self.write_fault() {
            Some(e) => Err(e),
            None => self.inner.delete(id).await,
        }
    }
}

/// Repository over the given doubles with default settings.
pub fn repository(
    remote: &Arc<ScriptedRemote>,
    store: &Arc<FaultyStore>,
) -> Arc<DefaultBookRepository> {
    Arc::new(DefaultBookRepository::new(
        Arc::clone(remote) as Arc<dyn RemoteBookSource>,
        Arc::clone(store) as Arc<dyn FavoriteBookStore>,
        RepositoryConfig::default(),
    ))
}

/// Waits until the receiver's value satisfies `predicate`, failing the test
/// after `within`.
pub async fn eventually<T, F>(rx: &mut watch::Receiver<T>, within: Duration, predicate: F) -> T
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    let value = tokio::time::timeout(within, rx.wait_for(predicate))
        .await
        .expect("condition not reached in time")
        .expect("channel closed");
    T::clone(&value)
}
