//! Statistics service

use indexmap::IndexMap;

use crate::{
    models::book::{Book, LibraryStats},
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get library statistics
    pub async fn get_library_stats(&self) -> LibraryStats {
        let books = self.repository.books.snapshot().await;
        compute_stats(&books)
    }
}

fn compute_stats(books: &[Book]) -> LibraryStats {
    let total_books = books.len();
    let mut available_books = 0;
    let mut rating_sum = 0.0;
    let mut genres: IndexMap<String, usize> = IndexMap::new();

    for book in books {
        if book.available {
            available_books += 1;
        }
        rating_sum += book.rating;
        *genres.entry(book.genre.clone()).or_insert(0) += 1;
    }

    let average_rating = if total_books > 0 {
        round_one_decimal(rating_sum / total_books as f64)
    } else {
        0.0
    };

    LibraryStats {
        total_books,
        available_books,
        borrowed_books: total_books - available_books,
        average_rating,
        genres,
    }
}

/// Round half-to-even on the exact binary value
fn round_one_decimal(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}
