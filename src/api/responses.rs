// src/api/responses.rs
//! Wire types for the Open Library API and their mapping to the domain model.
//!
//! Unknown fields are ignored; every field the catalog may omit is optional.

use crate::constants::{COVER_BY_EDITION_URL, COVER_BY_ID_URL};
use crate::model::Book;
use crate::types::{BookId, ValidationError};
use serde::{Deserialize, Serialize};

/// Response of `GET /search.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponseDto {
    #[serde(rename = "docs", default)]
    pub results: Vec<SearchedBookDto>,
}

/// One hit of a catalog search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchedBookDto {
    /// Work key, e.g. `/works/OL45883W`.
    #[serde(rename = "key")]
    pub id: String,
    pub title: String,
    #[serde(rename = "language", default)]
    pub languages: Option<Vec<String>>,
    #[serde(rename = "cover_i", default)]
    pub cover_alternative_key: Option<i64>,
    #[serde(rename = "author_key", default)]
    pub author_keys: Option<Vec<String>>,
    #[serde(rename = "author_name", default)]
    pub author_names: Option<Vec<String>>,
    #[serde(rename = "cover_edition_key", default)]
    pub cover_key: Option<String>,
    #[serde(default)]
    pub first_publish_year: Option<i32>,
    #[serde(default)]
    pub ratings_average: Option<f64>,
    #[serde(default)]
    pub ratings_count: Option<u32>,
    #[serde(rename = "number_of_pages_median", default)]
    pub num_pages_median: Option<u32>,
    #[serde(rename = "edition_count", default)]
    pub num_editions: Option<u32>,
}

/// Response of `GET /works/{id}.json`, reduced to what the app reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookWorkDto {
    #[serde(default)]
    pub description: Option<DescriptionDto>,
}

/// The catalog sends descriptions either as a bare string or as a typed text object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DescriptionDto {
    Plain(String),
    Text { value: String },
}

impl DescriptionDto {
    pub fn into_text(self) -> String {
        match self {
            Self::Plain(value) | Self::Text { value } => value,
        }
    }
}

impl BookWorkDto {
    /// The description text, whichever shape it arrived in.
    pub fn description_text(self) -> Option<String> {
        self.description.map(DescriptionDto::into_text)
    }
}

/// Conversion from wire types to domain types.
///
/// Wire identifiers go through the same validation as ids read back from
/// storage, so anything that maps successfully can be persisted and reloaded.
pub trait ToDomain<T> {
    fn to_domain(self) -> Result<T, ValidationError>;
}

impl ToDomain<Book> for SearchedBookDto {
    fn to_domain(self) -> Result<Book, ValidationError> {
        let id = BookId::parse(&self.id)?;
        let image_url = match (&self.cover_key, self.cover_alternative_key) {
            (Some(edition), _) => COVER_BY_EDITION_URL.replace("{}", edition),
            (None, Some(cover)) => COVER_BY_ID_URL.replace("{}", &cover.to_string()),
            (None, None) => String::new(),
        };

        Ok(Book {
            id,
            title: self.title,
            image_url,
            authors: self.author_names.unwrap_or_default(),
            description: None,
            languages: self.languages.unwrap_or_default(),
            first_publish_year: self.first_publish_year,
            average_rating: self.ratings_average,
            rating_count: self.ratings_count,
            num_pages: self.num_pages_median,
            num_editions: self.num_editions.unwrap_or(0),
        })
    }
}

impl SearchResponseDto {
    /// Convert all hits to domain books, keeping catalog order.
    ///
    /// Hits whose work key is not a usable id are dropped.
    pub fn into_books(self) -> Vec<Book> {
        self.results
            .into_iter()
            .filter_map(|dto| match dto.to_domain() {
                Ok(book) => Some(book),
                Err(e) => {
                    log::warn!("Skipping search hit: {}", e);
                    None
                }
            })
            .collect()
    }
}
