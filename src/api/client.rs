// src/api/client.rs
//! HTTP client for the Open Library API.
//!
//! This module provides a thin wrapper around reqwest for issuing GET
//! requests. Transport failures are reported as [`TransportFault`] and
//! classified by [`safe_call`]; response parsing lives in [`super::responses`].

use super::boundary::{safe_call, TransportFault};
use super::responses::{BookWorkDto, SearchResponseDto};
use super::RemoteBookSource;
use crate::algebras::RemoteError;
use crate::config::ClientConfig;
use crate::constants::SEARCH_RESULT_FIELDS;
use crate::types::BookId;
use reqwest::{header, Client, Response};

/// A thin wrapper around reqwest Client for Open Library requests.
#[derive(Clone)]
pub struct OpenLibraryClient {
    client: Client,
    config: ClientConfig,
}

impl OpenLibraryClient {
    /// Creates a client with the configured timeouts and default headers.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .default_headers(Self::create_headers())
            .connect_timeout(config.request_timeout)
            .timeout(config.request_timeout)
            .user_agent(concat!("bookpedia/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }

    /// Makes a GET request to the specified endpoint.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - The API endpoint path (without base URL)
    /// * `query` - Query parameters appended to the URL
    ///
    /// # Returns
    ///
    /// The status and body of the response, or the transport fault that
    /// prevented one.
    pub async fn get(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<ApiResponse<String>, TransportFault> {
        let url = self.config.base_url.endpoint(endpoint);
        log::debug!("GET {} {:?}", url, query);

        let response = self.client.get(url).query(query).send().await?;
        extract_response_text(response).await
    }

    fn search_params(&self, query: &str, result_limit: Option<u32>) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", query.to_string())];
        if let Some(limit) = result_limit.or(self.config.result_limit) {
            params.push(("limit", limit.to_string()));
        }
        params.push(("language", self.config.language.clone()));
        params.push(("fields", SEARCH_RESULT_FIELDS.to_string()));
        params
    }
}

#[async_trait::async_trait]
impl RemoteBookSource for OpenLibraryClient {
    async fn search_books(
        &self,
        query: &str,
        result_limit: Option<u32>,
    ) -> Result<SearchResponseDto, RemoteError> {
        let params = self.search_params(query, result_limit);
        safe_call(|| self.get("search.json", &params)).await
    }

    async fn book_details(&self, work_id: &BookId) -> Result<BookWorkDto, RemoteError> {
        let endpoint = format!("works/{}.json", work_id.as_str());
        safe_call(|| self.get(&endpoint, &[])).await
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
///
/// Reading the body can still fail at the transport level, so the error
/// side is a [`TransportFault`] like the request itself.
pub async fn extract_response_text(
    response: Response,
) -> Result<ApiResponse<String>, TransportFault> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
