//! Data models for Biblio

pub mod book;
pub mod borrow;

// Re-export commonly used types
pub use book::{Book, BookListQuery, CreateBook, Genre, SortDirection, UpdateBook};
pub use borrow::{Borrow, BorrowListQuery, BorrowRecord, BorrowSummary, CreateBorrow};
