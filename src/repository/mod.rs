//! Repository layer: the `BookStore` capability and its implementations

pub mod books;
pub mod memory;
pub mod seed;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::Book};

/// Persistence capability for catalog books.
///
/// Implementations return books in ascending id order, which is insertion
/// order since ids are assigned monotonically.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Book>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>>;

    /// Insert when `book.id` is unset or unknown, replace otherwise.
    /// Returns the stored book with its id populated.
    async fn save(&self, book: Book) -> AppResult<Book>;

    /// Returns `false` when no book with that id existed
    async fn delete_by_id(&self, id: i64) -> AppResult<bool>;

    async fn exists_by_id(&self, id: i64) -> AppResult<bool>;

    /// Connectivity probe used by the readiness endpoint
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Main repository struct holding the configured store
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Repository backed by PostgreSQL
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self::with_store(books::BooksRepository::new(pool))
    }

    /// Repository backed by process memory, optionally holding the reference catalog
    pub fn in_memory(seed: bool) -> Self {
        let store = if seed {
            memory::InMemoryBookStore::with_books(seed::reference_catalog())
        } else {
            memory::InMemoryBookStore::new()
        };
        Self::with_store(store)
    }

    pub fn with_store(store: impl BookStore + 'static) -> Self {
        Self {
            books: Arc::new(store),
        }
    }
}
