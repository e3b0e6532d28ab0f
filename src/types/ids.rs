// src/types/ids.rs
//! Catalog identifiers.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable catalog identifier of a book (an Open Library work id such as `OL45883W`).
///
/// The value is opaque: it is never interpreted beyond stripping the
/// `/works/` style path prefix the search endpoint puts in front of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId {
    value: String,
}

impl BookId {
    /// Parse a work id or work key (`/works/OL45883W`) into a normalized id.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = normalize_work_key(input);
        if normalized.is_empty() {
            return Err(ValidationError::InvalidId(input.to_string()));
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidId(format!(
                "{} (whitespace is not allowed)",
                input
            )));
        }
        Ok(Self {
            value: normalized.to_string(),
        })
    }

    /// Get the ID as a string reference
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Serialize for BookId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        BookId::parse(&value).map_err(serde::de::Error::custom)
    }
}

/// Keep only what follows the last `/` of a work key.
///
/// A key ending in `/` has an empty final segment and normalizes to `""`.
fn normalize_work_key(input: &str) -> &str {
    let input = input.trim();
    match input.rfind('/') {
        Some(pos) => &input[pos + 1..],
        None => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parsing() {
        let id = BookId::parse("OL45883W").unwrap();
        assert_eq!(id.as_str(), "OL45883W");

        let id = BookId::parse("/works/OL45883W").unwrap();
        assert_eq!(id.as_str(), "OL45883W");

        let id = BookId::parse("  /works/OL45883W ").unwrap();
        assert_eq!(id.as_str(), "OL45883W");
    }

    #[test]
    fn test_invalid_ids() {
        assert!(BookId::parse("").is_err());
        assert!(BookId::parse("/works/").is_err());
        assert!(BookId::parse("/works/OL1W/").is_err());
        assert!(BookId::parse("/").is_err());
        assert!(BookId::parse("OL1 W").is_err());
    }

    #[test]
    fn test_serde_roundtrip_normalizes() {
        let id: BookId = serde_json::from_str("\"/works/OL1W\"").unwrap();
        assert_eq!(id.as_str(), "OL1W");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"OL1W\"");
    }
}
