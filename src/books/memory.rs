use async_trait::async_trait;
use bson::oid::ObjectId;
use tokio::sync::Mutex;

use super::BookStore;
use crate::error::StoreError;
use crate::model::{Book, NewBook};

/// In-process book store used by the handler tests. Insertion order stands
/// in for the database's natural order.
#[derive(Default)]
pub struct MemoryBookStore {
    books: Mutex<Vec<Book>>,
    unavailable: bool,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails, as if the database were unreachable.
    pub fn unavailable() -> Self {
        Self {
            books: Mutex::new(vec![]),
            unavailable: true,
        }
    }

    pub async fn len(&self) -> usize {
        self.books.lock().await.len()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn create(&self, book: NewBook) -> Result<Book, StoreError> {
        self.check()?;
        let book = Book {
            id: ObjectId::new().to_hex(),
            title: book.title,
            author: book.author,
            publish_year: book.publish_year,
        };
        self.books.lock().await.push(book.clone());
        Ok(book)
    }

    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        self.check()?;
        Ok(self.books.lock().await.clone())
    }

    async fn get(&self, id: ObjectId) -> Result<Option<Book>, StoreError> {
        self.check()?;
        let id = id.to_hex();
        Ok(self.books.lock().await.iter().find(|b| b.id == id).cloned())
    }

    async fn update(&self, id: ObjectId, book: NewBook) -> Result<Option<Book>, StoreError> {
        self.check()?;
        let id = id.to_hex();
        let mut books = self.books.lock().await;
        let Some(existing) = books.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        existing.title = book.title;
        existing.author = book.author;
        existing.publish_year = book.publish_year;
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, id: ObjectId) -> Result<Option<Book>, StoreError> {
        self.check()?;
        let id = id.to_hex();
        let mut books = self.books.lock().await;
        let position = books.iter().position(|b| b.id == id);
        Ok(position.map(|i| books.remove(i)))
    }
}
