// src/formatting.rs
//! Plain-text rendering of books and screen state for the terminal.

use crate::model::Book;
use crate::presentation::{BookDetailState, BookListState, BookListTab};
use std::fmt::Write;

/// One numbered line: title, authors, first publication year and id.
pub fn book_line(position: usize, book: &Book) -> String {
    let mut line = format!("{:>3}. {}", position, book.title);
    if let Some(authors) = book.author_line() {
        let _ = write!(line, " by {}", authors);
    }
    if let Some(year) = book.first_publish_year {
        let _ = write!(line, " ({})", year);
    }
    let _ = write!(line, " [{}]", book.id);
    line
}

/// Numbered list, one book per line, or a placeholder when empty.
pub fn book_list(books: &[Book], empty_message: &str) -> String {
    if books.is_empty() {
        return format!("{}\n", empty_message);
    }
    books
        .iter()
        .enumerate()
        .map(|(i, book)| book_line(i + 1, book) + "\n")
        .collect()
}

/// Full record of one book.
pub fn book_details(book: &Book, is_favorite: bool, description_pending: bool) -> String {
    let mut out = String::new();
    let marker = if is_favorite { " *" } else { "" };
    let _ = writeln!(out, "{}{}", book.title, marker);
    let _ = writeln!(out, "  id:        {}", book.id);
    if let Some(authors) = book.author_line() {
        let _ = writeln!(out, "  authors:   {}", authors);
    }
    if let Some(year) = book.first_publish_year {
        let _ = writeln!(out, "  published: {}", year);
    }
    if let Some(rating) = book.average_rating {
        let count = book.rating_count.unwrap_or(0);
        let _ = writeln!(out, "  rating:    {:.1} ({} ratings)", rating, count);
    }
    if let Some(pages) = book.num_pages {
        let _ = writeln!(out, "  pages:     {}", pages);
    }
    let _ = writeln!(out, "  editions:  {}", book.num_editions);
    if !book.languages.is_empty() {
        let _ = writeln!(out, "  languages: {}", book.languages.join(", "));
    }
    if !book.image_url.is_empty() {
        let _ = writeln!(out, "  cover:     {}", book.image_url);
    }

    out.push('\n');
    match &book.description {
        _ if description_pending => out.push_str("  (loading description...)\n"),
        Some(description) if !description.trim().is_empty() => {
            for paragraph in description.lines() {
                let _ = writeln!(out, "  {}", paragraph);
            }
        }
        _ => out.push_str("  No description available.\n"),
    }
    out
}

/// The list screen as a status line plus the selected tab's books.
pub fn list_screen(state: &BookListState) -> String {
    let mut out = String::new();
    let tab = match state.selected_tab {
        BookListTab::Search => "search",
        BookListTab::Favorites => "favorites",
    };
    let _ = write!(out, "[{}] query: {:?}", tab, state.search_query);
    if state.is_loading {
        out.push_str(" (searching...)");
    }
    out.push('\n');

    if let Some(message) = &state.error_message {
        let _ = writeln!(out, "! {}", message);
    }

    let empty = match state.selected_tab {
        BookListTab::Search => "No results.",
        BookListTab::Favorites => "No favorite books yet.",
    };
    out.push_str(&book_list(state.visible_books(), empty));
    out
}

/// The detail screen, or nothing when no book is selected.
pub fn detail_screen(state: &BookDetailState) -> Option<String> {
    state
        .book
        .as_ref()
        .map(|book| book_details(book, state.is_favorite, state.is_loading))
}
