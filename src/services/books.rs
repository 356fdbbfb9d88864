//! Book catalog service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::Book,
    repository::BookStore,
};

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn BookStore>,
}

impl BooksService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// All books in store order
    pub async fn find_all(&self) -> AppResult<Vec<Book>> {
        self.store.find_all().await
    }

    pub async fn find_one(&self, id: i64) -> AppResult<Book> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::book_not_found(id))
    }

    pub async fn exist(&self, id: i64) -> AppResult<bool> {
        self.store.exists_by_id(id).await
    }

    /// Persist a book, returning it with its id populated
    pub async fn save(&self, book: Book) -> AppResult<Book> {
        self.store.save(book).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.store.delete_by_id(id).await? {
            return Err(AppError::book_not_found(id));
        }
        Ok(())
    }

    /// Storage readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
