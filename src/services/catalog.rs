//! Catalog management service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFilter, NewBook, MAX_RATING, MIN_RATING},
    repository::Repository,
};

use super::Clock;

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl CatalogService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// List books with optional genre and availability filters
    pub async fn list_books(&self, filter: &BookFilter) -> Vec<Book> {
        self.repository.books.list(filter).await
    }

    /// Search books by title, author or description
    pub async fn search_books(&self, query: &str) -> AppResult<Vec<Book>> {
        if query.is_empty() {
            return Err(AppError::MissingParam("Query parameter is required".to_string()));
        }
        Ok(self.repository.books.search(query).await)
    }

    /// Get a book by ID
    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Number of books in the catalog
    pub async fn count_books(&self) -> usize {
        self.repository.books.count().await
    }

    /// Add a book, stamped with today's date
    pub async fn add_book(&self, new_book: NewBook) -> Book {
        let book = self.repository.books.create(new_book, self.clock.today()).await;
        tracing::info!(book_id = book.id, "Book added: {}", book.title);
        book
    }

    /// Borrow a book (mark as unavailable)
    pub async fn borrow_book(&self, id: i64) -> AppResult<Book> {
        let book = self.repository.books.set_available(id, false).await?;
        tracing::info!(book_id = id, "Book borrowed");
        Ok(book)
    }

    /// Return a book (mark as available)
    pub async fn return_book(&self, id: i64) -> AppResult<Book> {
        let book = self.repository.books.set_available(id, true).await?;
        tracing::info!(book_id = id, "Book returned");
        Ok(book)
    }

    /// Rate a book. The range is checked before the book is looked up.
    pub async fn rate_book(&self, id: i64, rating: f64) -> AppResult<Book> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::RatingOutOfRange);
        }
        let book = self.repository.books.set_rating(id, rating).await?;
        tracing::info!(book_id = id, rating, "Book rated");
        Ok(book)
    }
}
