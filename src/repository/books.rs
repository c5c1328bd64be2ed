//! Books repository for in-memory catalog operations

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFilter, NewBook},
};

use super::seed;

/// Book collection plus the ID generator.
///
/// IDs are handed out sequentially and never reused; records are never removed.
#[derive(Debug, Clone)]
pub struct BookStore {
    books: Vec<Book>,
    next_id: i64,
}

impl BookStore {
    pub fn empty() -> Self {
        Self {
            books: Vec::new(),
            next_id: 1,
        }
    }

    /// Store holding the initial catalog
    pub fn seeded() -> Self {
        Self::from_books(seed::seed_books())
    }

    /// Store holding `books`, with the counter one past the highest ID
    pub fn from_books(books: Vec<Book>) -> Self {
        let next_id = books.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        Self { books, next_id }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn find_mut(&mut self, id: i64) -> AppResult<&mut Book> {
        self.books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(AppError::NotFound(id))
    }
}

impl Default for BookStore {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Clone)]
pub struct BooksRepository {
    store: Arc<RwLock<BookStore>>,
}

impl BooksRepository {
    pub fn new(store: BookStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// List books matching the filter, in insertion order
    pub async fn list(&self, filter: &BookFilter) -> Vec<Book> {
        let store = self.store.read().await;
        store
            .books
            .iter()
            .filter(|b| filter.accepts(b))
            .cloned()
            .collect()
    }

    /// Books whose title, author or description contains `query` (case-insensitive)
    pub async fn search(&self, query: &str) -> Vec<Book> {
        let needle = query.to_lowercase();
        let store = self.store.read().await;
        store
            .books
            .iter()
            .filter(|b| b.matches(&needle))
            .cloned()
            .collect()
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        let store = self.store.read().await;
        store
            .books
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(AppError::NotFound(id))
    }

    /// Append a new book under the next ID
    pub async fn create(&self, new_book: NewBook, added_date: NaiveDate) -> Book {
        let mut store = self.store.write().await;
        let book = Book {
            id: store.next_id,
            title: new_book.title,
            author: new_book.author,
            genre: new_book.genre,
            year: new_book.year,
            pages: new_book.pages,
            rating: 0.0,
            description: new_book.description,
            available: true,
            added_date,
        };
        store.books.push(book.clone());
        store.next_id += 1;
        book
    }

    /// Flip availability. Rejects a transition to the state the book is already in.
    pub async fn set_available(&self, id: i64, available: bool) -> AppResult<Book> {
        let mut store = self.store.write().await;
        let book = store.find_mut(id)?;
        if book.available == available {
            return Err(if available {
                AppError::AlreadyAvailable(book.title.clone())
            } else {
                AppError::AlreadyBorrowed(book.title.clone())
            });
        }
        book.available = available;
        Ok(book.clone())
    }

    /// Overwrite the rating of a book
    pub async fn set_rating(&self, id: i64, rating: f64) -> AppResult<Book> {
        let mut store = self.store.write().await;
        let book = store.find_mut(id)?;
        book.rating = rating;
        Ok(book.clone())
    }

    /// Copy of every book, taken under a single lock
    pub async fn snapshot(&self) -> Vec<Book> {
        self.store.read().await.books.clone()
    }

    pub async fn count(&self) -> usize {
        self.store.read().await.len()
    }
}
