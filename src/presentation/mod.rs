// src/presentation/mod.rs
//! Presentation state for the list and detail screens.
//!
//! Presenters fold repository and coordinator outputs into plain state
//! structs published on `watch` channels. One-shot outcomes that should not
//! linger in state are delivered on an event channel instead.

mod book_detail;
mod book_list;
mod ui_text;

pub use book_detail::{BookDetailPresenter, BookDetailState, DetailAction, DetailEvent};
pub use book_list::{BookListAction, BookListPresenter, BookListState, BookListTab, ListEvent};
pub use ui_text::{ToUiText, UiText};
