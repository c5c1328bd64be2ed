//! Repository layer for catalog state

pub mod books;
pub mod seed;

pub use books::BookStore;

/// Main repository struct holding the in-memory stores
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository owning the given store
    pub fn new(store: BookStore) -> Self {
        Self {
            books: books::BooksRepository::new(store),
        }
    }
}
