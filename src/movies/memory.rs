use async_trait::async_trait;
use bson::Document;

use super::{MovieCatalog, MovieFilter, MovieQuery, MoviesPage};
use crate::error::StoreError;

/// In-process movie catalog for tests. Title search approximates a text
/// index: a document matches when any search term equals a word of its
/// title, ignoring case.
pub struct MemoryMovieCatalog {
    movies: Vec<Document>,
    unavailable: bool,
}

impl MemoryMovieCatalog {
    pub fn new(movies: Vec<Document>) -> Self {
        Self {
            movies,
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            movies: vec![],
            unavailable: true,
        }
    }

    fn matches(filter: &MovieFilter, movie: &Document) -> bool {
        match filter {
            MovieFilter::All => true,
            MovieFilter::Rated(rated) => movie.get_str("rated").map_or(false, |r| r == rated.as_str()),
            MovieFilter::Title(text) => {
                let Ok(title) = movie.get_str("title") else {
                    return false;
                };
                let words: Vec<String> = title.split_whitespace().map(str::to_lowercase).collect();
                text.split_whitespace()
                    .map(str::to_lowercase)
                    .any(|term| words.contains(&term))
            }
        }
    }
}

#[async_trait]
impl MovieCatalog for MemoryMovieCatalog {
    async fn get_movies(&self, query: MovieQuery) -> Result<MoviesPage, StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("server selection timeout".to_string()));
        }

        let matching: Vec<&Document> = self
            .movies
            .iter()
            .filter(|m| Self::matches(&query.filter, m))
            .collect();

        let skip = usize::try_from(query.skip()).unwrap_or(usize::MAX);
        let movies = matching
            .iter()
            .skip(skip)
            .take(query.per_page as usize)
            .map(|m| (*m).clone())
            .collect();

        Ok(MoviesPage {
            movies,
            total: matching.len() as u64,
        })
    }
}
