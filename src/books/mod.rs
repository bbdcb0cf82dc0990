//! Book catalog
//!
//! Create, list, show, edit and delete books stored in a MongoDB collection.
//! Handlers talk to the collection only through the [`BookStore`] trait; the
//! production implementation is [`MongoBookStore`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use bookshelf::books;
//!
//! let store: Arc<dyn books::BookStore> = Arc::new(books::MongoBookStore::new(&db));
//! let app = Router::new()
//!     .nest("/books", books::routes())
//!     .with_state(app_state);
//! ```

mod handler;
#[cfg(test)]
mod memory;
mod routes;
mod store;

pub use routes::routes;
pub use store::{BookStore, MongoBookStore};

#[cfg(test)]
pub use memory::MemoryBookStore;
