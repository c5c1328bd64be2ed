//! Data models for Bookshelf

pub mod book;
pub mod method;

// Re-export commonly used types
pub use book::{Book, BookFilter, LibraryStats, NewBook};
pub use method::Method;
