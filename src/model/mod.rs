// src/model/mod.rs
//! Domain model: the values presentation logic works with.

mod book;

pub use book::Book;
