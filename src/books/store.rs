use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures_util::TryStreamExt;
use mongodb::{Collection, options::ReturnDocument};

use crate::db::Database;
use crate::error::StoreError;
use crate::model::{Book, BookDoc, NewBook};

#[async_trait]
pub trait BookStore: Send + Sync {
    async fn create(&self, book: NewBook) -> Result<Book, StoreError>;
    async fn list(&self) -> Result<Vec<Book>, StoreError>;
    async fn get(&self, id: ObjectId) -> Result<Option<Book>, StoreError>;
    /// Replaces the fields of an existing book, returning the updated record.
    async fn update(&self, id: ObjectId, book: NewBook) -> Result<Option<Book>, StoreError>;
    /// Removes a book, returning the record that was deleted.
    async fn delete(&self, id: ObjectId) -> Result<Option<Book>, StoreError>;
}

const BOOKS: &str = "books";

pub struct MongoBookStore {
    books: Collection<BookDoc>,
}

impl MongoBookStore {
    pub fn new(db: &Database) -> Self {
        Self { books: db.books() }
    }

    fn to_book(doc: BookDoc) -> Result<Book, StoreError> {
        match doc.id {
            Some(id) => Ok(doc.into_book(id)),
            None => Err(StoreError::MissingId {
                collection: BOOKS,
                operation: "read",
            }),
        }
    }
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn create(&self, book: NewBook) -> Result<Book, StoreError> {
        let doc = BookDoc::from(book);
        let result = self.books.insert_one(&doc).await?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or(StoreError::MissingId {
                collection: BOOKS,
                operation: "insert",
            })?;

        tracing::info!(id = %id, "[books] created");
        Ok(doc.into_book(id))
    }

    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        let docs: Vec<BookDoc> = self.books.find(doc! {}).await?.try_collect().await?;
        docs.into_iter().map(Self::to_book).collect()
    }

    async fn get(&self, id: ObjectId) -> Result<Option<Book>, StoreError> {
        self.books
            .find_one(doc! { "_id": id })
            .await?
            .map(Self::to_book)
            .transpose()
    }

    async fn update(&self, id: ObjectId, book: NewBook) -> Result<Option<Book>, StoreError> {
        let update = doc! {
            "$set": {
                "title": book.title,
                "author": book.author,
                "publishYear": book.publish_year,
            }
        };

        self.books
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await?
            .map(Self::to_book)
            .transpose()
    }

    async fn delete(&self, id: ObjectId) -> Result<Option<Book>, StoreError> {
        self.books
            .find_one_and_delete(doc! { "_id": id })
            .await?
            .map(Self::to_book)
            .transpose()
    }
}
