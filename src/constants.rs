// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Open Library API
// ---------------------------------------------------------------------------

/// Catalog the client talks to unless configured otherwise.
pub const OPEN_LIBRARY_BASE_URL: &str = "https://openlibrary.org";

/// Fields requested from the search endpoint; everything `Book` is built from.
pub const SEARCH_RESULT_FIELDS: &str = "key,title,author_name,author_key,cover_edition_key,cover_i,ratings_average,ratings_count,first_publish_year,language,number_of_pages_median,edition_count";

/// Language filter applied to searches.
pub const SEARCH_LANGUAGE: &str = "eng";

/// Cover image by edition key (`{}` is replaced by the key).
pub const COVER_BY_EDITION_URL: &str = "https://covers.openlibrary.org/b/olid/{}-L.jpg";

/// Cover image by numeric cover id (`{}` is replaced by the id).
pub const COVER_BY_ID_URL: &str = "https://covers.openlibrary.org/b/id/{}-L.jpg";

/// Socket and whole-request timeout for catalog calls.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

// ---------------------------------------------------------------------------
// Search behavior
// ---------------------------------------------------------------------------

/// How long the query must stay unchanged before a search is considered.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Queries shorter than this (in characters) never reach the network.
pub const MIN_SEARCH_QUERY_LEN: usize = 2;

// ---------------------------------------------------------------------------
// Live views
// ---------------------------------------------------------------------------

/// How long a shared view keeps its producer alive after the last subscriber leaves.
pub const VIEW_TEARDOWN_GRACE: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Local storage
// ---------------------------------------------------------------------------

/// File name of the favorites table inside the data directory.
pub const FAVORITES_FILE_NAME: &str = "favorites.json";
