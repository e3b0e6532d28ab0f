// src/store/record.rs
//! Stored form of a favorite book.

use crate::model::Book;
use crate::types::BookId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored favorite: the full book projection plus bookkeeping.
///
/// List-valued fields are kept as JSON array strings so the stored form is
/// flat and deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: BookId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub languages: String,
    pub authors: String,
    pub first_publish_year: Option<i32>,
    pub ratings_average: Option<f64>,
    pub ratings_count: Option<u32>,
    pub num_pages_median: Option<u32>,
    pub num_editions: u32,
    pub favorited_at: DateTime<Utc>,
}

impl BookRecord {
    /// Projects a book into its stored form, stamped now.
    pub fn from_book(book: &Book) -> Self {
        Self::from_book_at(book, Utc::now())
    }

    pub fn from_book_at(book: &Book, favorited_at: DateTime<Utc>) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            description: book.description.clone(),
            image_url: book.image_url.clone(),
            languages: encode_string_list(&book.languages),
            authors: encode_string_list(&book.authors),
            first_publish_year: book.first_publish_year,
            ratings_average: book.average_rating,
            ratings_count: book.rating_count,
            num_pages_median: book.num_pages,
            num_editions: book.num_editions,
            favorited_at,
        }
    }

    /// Rebuilds the book. Fails only if a list column is not a JSON string array.
    pub fn to_book(&self) -> Result<Book, serde_json::Error> {
        Ok(Book {
            id: self.id.clone(),
            title: self.title.clone(),
            image_url: self.image_url.clone(),
            authors: decode_string_list(&self.authors)?,
            description: self.description.clone(),
            languages: decode_string_list(&self.languages)?,
            first_publish_year: self.first_publish_year,
            average_rating: self.ratings_average,
            rating_count: self.ratings_count,
            num_pages: self.num_pages_median,
            num_editions: self.num_editions,
        })
    }
}

/// Encodes a string list as a JSON array.
pub fn encode_string_list(list: &[String]) -> String {
    // Serializing a slice of strings cannot fail.
    serde_json::to_string(list).unwrap_or_else(|_| String::from("[]"))
}

/// Decodes a JSON array produced by [`encode_string_list`].
pub fn decode_string_list(value: &str) -> Result<Vec<String>, serde_json::Error> {
    serde_json::from_str(value)
}
