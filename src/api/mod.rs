// src/api/mod.rs
//! Open Library interaction: the ability to search the remote catalog.
//!
//! Split into a transport wrapper ([`client`]), the call boundary that
//! classifies failures ([`boundary`]) and the wire types ([`responses`]).

pub mod boundary;
pub mod client;
pub mod responses;

use crate::algebras::RemoteError;
use crate::types::BookId;
use responses::{BookWorkDto, SearchResponseDto};

/// The ability to query the remote book catalog.
///
/// Business logic depends on this trait, never on HTTP details.
#[async_trait::async_trait]
pub trait RemoteBookSource: Send + Sync {
    /// Searches the catalog. `result_limit` overrides the configured default.
    async fn search_books(
        &self,
        query: &str,
        result_limit: Option<u32>,
    ) -> Result<SearchResponseDto, RemoteError>;

    /// Fetches the work record for one book.
    async fn book_details(&self, work_id: &BookId) -> Result<BookWorkDto, RemoteError>;
}

pub use boundary::{response_to_result, safe_call, TransportFault};
pub use client::{ApiResponse, OpenLibraryClient};
