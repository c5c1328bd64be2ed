//! Book (catalog record) model and related types

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;
use utoipa::ToSchema;

/// Lowest rating accepted by the rate operation
pub const MIN_RATING: f64 = 1.0;
/// Highest rating accepted by the rate operation
pub const MAX_RATING: f64 = 5.0;

/// Book record held in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: i64,
    pub pages: i64,
    /// 0.0 until the book is rated, then within [1.0, 5.0]
    pub rating: f64,
    pub description: String,
    pub available: bool,
    /// Creation date (YYYY-MM-DD)
    pub added_date: NaiveDate,
}

impl Book {
    /// Case-insensitive substring match on title, author or description.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.author.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Validated input for a new book
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: i64,
    pub pages: i64,
    pub description: String,
}

/// Filters for listing books
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    /// Exact genre, compared case-insensitively
    pub genre: Option<String>,
    pub available_only: bool,
}

impl BookFilter {
    pub fn accepts(&self, book: &Book) -> bool {
        if let Some(ref genre) = self.genre {
            if book.genre.to_lowercase() != genre.to_lowercase() {
                return false;
            }
        }
        !self.available_only || book.available
    }
}

/// Library statistics
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LibraryStats {
    pub total_books: usize,
    pub available_books: usize,
    pub borrowed_books: usize,
    /// Mean of all ratings, one decimal place
    pub average_rating: f64,
    /// Number of books per genre, in first-seen order
    #[schema(value_type = Object)]
    pub genres: IndexMap<String, usize>,
}
