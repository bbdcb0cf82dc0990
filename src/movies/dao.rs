use async_trait::async_trait;
use bson::{Document, doc};
use futures_util::TryStreamExt;
use mongodb::Collection;

use crate::db::Database;
use crate::error::StoreError;

pub const DEFAULT_MOVIES_PER_PAGE: u32 = 20;

/// Which movies a query matches. Exactly one predicate applies.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MovieFilter {
    #[default]
    All,
    /// Free-text search against the collection's text index.
    Title(String),
    /// Exact match on the `rated` field.
    Rated(String),
}

impl MovieFilter {
    pub fn to_document(&self) -> Document {
        match self {
            MovieFilter::All => doc! {},
            MovieFilter::Title(text) => doc! { "$text": { "$search": text } },
            MovieFilter::Rated(rated) => doc! { "rated": { "$eq": rated } },
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            MovieFilter::All => serde_json::json!({}),
            MovieFilter::Title(text) => serde_json::json!({ "title": text }),
            MovieFilter::Rated(rated) => serde_json::json!({ "rated": rated }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieQuery {
    pub filter: MovieFilter,
    pub page: u64,
    pub per_page: u32,
}

impl Default for MovieQuery {
    fn default() -> Self {
        MovieQuery {
            filter: MovieFilter::All,
            page: 0,
            per_page: DEFAULT_MOVIES_PER_PAGE,
        }
    }
}

impl MovieQuery {
    /// A page size of zero would mean "no limit" to the server, so it falls
    /// back to the default.
    pub fn new(filter: MovieFilter, page: u64, per_page: u32) -> Self {
        let per_page = if per_page == 0 { DEFAULT_MOVIES_PER_PAGE } else { per_page };
        MovieQuery { filter, page, per_page }
    }

    /// The driver encodes `skip` as an i64, so it is clamped to that range.
    pub fn skip(&self) -> u64 {
        self.page
            .saturating_mul(u64::from(self.per_page))
            .min(i64::MAX as u64)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

/// One page of results plus the number of documents the filter matches in
/// total. The default value is the empty page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviesPage {
    pub movies: Vec<Document>,
    pub total: u64,
}

#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn get_movies(&self, query: MovieQuery) -> Result<MoviesPage, StoreError>;
}

pub struct MoviesDao {
    movies: Collection<Document>,
}

impl MoviesDao {
    pub fn new(db: &Database) -> Self {
        Self { movies: db.movies() }
    }
}

#[async_trait]
impl MovieCatalog for MoviesDao {
    async fn get_movies(&self, query: MovieQuery) -> Result<MoviesPage, StoreError> {
        let filter = query.filter.to_document();

        let movies: Vec<Document> = self
            .movies
            .find(filter.clone())
            .skip(query.skip())
            .limit(query.limit())
            .await?
            .try_collect()
            .await?;

        let total = self.movies.count_documents(filter).await?;

        tracing::debug!(filter = ?query.filter, page = query.page, returned = movies.len(), total, "[movies] query");
        Ok(MoviesPage { movies, total })
    }
}
