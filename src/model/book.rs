// src/model/book.rs
//! The `Book` entity shared by search results, details and favorites.

use crate::types::BookId;
use serde::{Deserialize, Serialize};

/// A catalog book as the rest of the application sees it.
///
/// Values are never mutated in place; builders such as
/// [`Book::with_description`] return a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    /// Cover image URL, empty when the catalog has no cover for the work.
    pub image_url: String,
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub languages: Vec<String>,
    pub first_publish_year: Option<i32>,
    pub average_rating: Option<f64>,
    pub rating_count: Option<u32>,
    pub num_pages: Option<u32>,
    pub num_editions: u32,
}

impl Book {
    /// Creates a book with only the identifying fields set.
    pub fn new(id: BookId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            image_url: String::new(),
            authors: Vec::new(),
            description: None,
            languages: Vec::new(),
            first_publish_year: None,
            average_rating: None,
            rating_count: None,
            num_pages: None,
            num_editions: 0,
        }
    }

    /// Returns a copy carrying the given description.
    pub fn with_description(self, description: Option<String>) -> Self {
        Self {
            description,
            ..self
        }
    }

    /// Authors joined for display, or `None` when the catalog lists none.
    pub fn author_line(&self) -> Option<String> {
        if self.authors.is_empty() {
            None
        } else {
            Some(self.authors.join(", "))
        }
    }
}
