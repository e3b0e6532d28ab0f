// src/lib.rs
//! bookpedia library: searches the Open Library catalog and keeps a local
//! favorites list consistent with it through live views.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Algebras**: `BookRepository`, `DataError`, `ResultExt`
//! - **Network boundary**: `safe_call`, `response_to_result`, `OpenLibraryClient`
//! - **Favorites store**: `FavoriteBookStore`, `JsonFileFavoriteStore`
//! - **Coordination**: `SearchCoordinator`, `DefaultBookRepository`, `live`
//! - **Presentation**: list and detail presenters, `formatting`

mod algebras;
mod api;
mod config;
mod constants;
mod error;
mod error_recovery;
pub mod formatting;
pub mod live;
mod model;
mod presentation;
mod repository;
mod search;
mod store;
mod types;

// --- Error Handling ---
pub use crate::error::AppError;
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{AppConfig, ClientConfig, Command, CommandLineInput, SearchConfig};
pub use crate::repository::RepositoryConfig;

// --- Domain Model ---
pub use crate::model::Book;

// --- Domain Types ---
pub use crate::types::{BookId, ValidatedUrl};

// --- Algebras (Capability Traits) ---
pub use crate::algebras::{
    BookRepository, DataError, EmptyResult, LocalError, RemoteError, ResultExt,
};

// --- API Client ---
pub use crate::api::{
    response_to_result,
    responses::{BookWorkDto, DescriptionDto, SearchResponseDto, SearchedBookDto, ToDomain},
    safe_call, ApiResponse, OpenLibraryClient, RemoteBookSource, TransportFault,
};

// --- Favorites Store ---
pub use crate::store::{
    decode_string_list, encode_string_list, BookRecord, FavoriteBookStore,
    InMemoryFavoriteStore, JsonFileFavoriteStore, StoreError,
};

// --- Coordination ---
pub use crate::error_recovery::retry_with_backoff;
pub use crate::repository::DefaultBookRepository;
pub use crate::search::{SearchCoordinator, SearchPhase, SearchState};

// --- Presentation ---
pub use crate::presentation::{
    BookDetailPresenter, BookDetailState, BookListAction, BookListPresenter, BookListState,
    BookListTab, DetailAction, DetailEvent, ListEvent, ToUiText, UiText,
};
