//! Movie reviews
//!
//! Read-only, paginated access to a pre-existing `movies` collection. A query
//! carries one [`MovieFilter`] (everything, a free-text title search, or an
//! exact `rated` match) and a zero-based page; the result is the page plus the
//! total number of matching documents so clients can render page counts.
//!
//! [`MovieCatalog::get_movies`] returns a `Result`. Callers that prefer an
//! empty page on failure can use `unwrap_or_default()`.

mod dao;
mod handler;
#[cfg(test)]
mod memory;
mod routes;

pub use dao::{DEFAULT_MOVIES_PER_PAGE, MovieCatalog, MovieFilter, MovieQuery, MoviesDao, MoviesPage};
pub use routes::routes;

#[cfg(test)]
pub use memory::MemoryMovieCatalog;
