//! In-process book store used by tests and database-less runs

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::BookStore;
use crate::{error::AppResult, models::Book};

#[derive(Default)]
struct Inner {
    books: BTreeMap<i64, Book>,
    next_id: i64,
}

impl Inner {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Book store keeping records in a map keyed by id
#[derive(Default)]
pub struct InMemoryBookStore {
    inner: RwLock<Inner>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding `books`, each assigned the next id in order
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        let mut inner = Inner::default();
        for mut book in books {
            let id = inner.allocate_id();
            book.id = Some(id);
            inner.books.insert(id, book);
        }
        Self {
            inner: RwLock::new(inner),
        }
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        Ok(self.inner.read().await.books.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        Ok(self.inner.read().await.books.get(&id).cloned())
    }

    async fn save(&self, mut book: Book) -> AppResult<Book> {
        let mut inner = self.inner.write().await;
        let id = match book.id {
            Some(id) if inner.books.contains_key(&id) => id,
            _ => inner.allocate_id(),
        };
        book.id = Some(id);
        inner.books.insert(id, book.clone());
        Ok(book)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        Ok(self.inner.write().await.books.remove(&id).is_some())
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        Ok(self.inner.read().await.books.contains_key(&id))
    }
}
