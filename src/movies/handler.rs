use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bson::Bson;

use super::{DEFAULT_MOVIES_PER_PAGE, MovieFilter, MovieQuery};
use crate::api::{MovieParams, MoviesResponse};
use crate::error::ApiError;
use crate::handler::AppState;

impl MovieParams {
    /// A non-empty `title` takes precedence over `rated`.
    pub fn into_query(self) -> MovieQuery {
        let filter = match (self.title.filter(|t| !t.is_empty()), self.rated) {
            (Some(title), _) => MovieFilter::Title(title),
            (None, Some(rated)) => MovieFilter::Rated(rated),
            (None, None) => MovieFilter::All,
        };
        MovieQuery::new(
            filter,
            self.page.unwrap_or(0),
            self.movies_per_page.unwrap_or(DEFAULT_MOVIES_PER_PAGE),
        )
    }
}

pub async fn list_movies(
    State(state): State<AppState>,
    params: Result<Query<MovieParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let query = params.into_query();

    let page = state
        .movies
        .get_movies(query.clone())
        .await
        .map_err(|e| ApiError::StoreFailed("failed to get movies", e))?;

    let response = MoviesResponse {
        movies: page
            .movies
            .into_iter()
            .map(|m| Bson::Document(m).into_relaxed_extjson())
            .collect(),
        page: query.page,
        filters: query.filter.to_json(),
        entries_per_page: query.per_page,
        total_results: page.total,
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bson::doc;
    use serde_json::json;

    use super::*;
    use crate::books::MemoryBookStore;
    use crate::handler::tests::{body_json, send, test_app};
    use crate::movies::MemoryMovieCatalog;

    fn params(title: Option<&str>, rated: Option<&str>) -> MovieParams {
        MovieParams {
            title: title.map(str::to_string),
            rated: rated.map(str::to_string),
            page: None,
            movies_per_page: None,
        }
    }

    fn app_with(movies: MemoryMovieCatalog) -> axum::Router {
        test_app(Arc::new(MemoryBookStore::new()), Arc::new(movies))
    }

    #[test]
    fn test_title_takes_precedence_over_rated() {
        let query = params(Some("Heat"), Some("R")).into_query();
        assert_eq!(query.filter, MovieFilter::Title("Heat".into()));

        let query = params(Some(""), Some("R")).into_query();
        assert_eq!(query.filter, MovieFilter::Rated("R".into()));

        let query = params(None, None).into_query();
        assert_eq!(query, MovieQuery::default());
    }

    #[tokio::test]
    async fn test_list_movies_paginates() {
        let docs = (0..25).map(|i| doc! { "title": format!("Film {}", i), "rated": "G" }).collect();
        let app = app_with(MemoryMovieCatalog::new(docs));

        let response = send(&app, "GET", "/api/v1/movies?page=1", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["page"], 1);
        assert_eq!(body["entries_per_page"], 20);
        assert_eq!(body["total_results"], 25);
        assert_eq!(body["filters"], json!({}));
        assert_eq!(body["movies"].as_array().unwrap().len(), 5);
        assert_eq!(body["movies"][0]["title"], "Film 20");
    }

    #[tokio::test]
    async fn test_list_movies_by_title() {
        let app = app_with(MemoryMovieCatalog::new(vec![
            doc! { "title": "Gladiator", "rated": "R", "year": 2000 },
            doc! { "title": "Heat", "rated": "R", "year": 1995 },
        ]));

        let response = send(&app, "GET", "/api/v1/movies?title=Gladiator&rated=PG&moviesPerPage=5", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["filters"], json!({ "title": "Gladiator" }));
        assert_eq!(body["entries_per_page"], 5);
        assert_eq!(body["total_results"], 1);
        assert_eq!(body["movies"][0], json!({ "title": "Gladiator", "rated": "R", "year": 2000 }));
    }

    #[tokio::test]
    async fn test_list_movies_bad_page_is_rejected() {
        let app = app_with(MemoryMovieCatalog::new(vec![]));
        let response = send(&app, "GET", "/api/v1/movies?page=first", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_movies_store_failure_is_server_error() {
        let app = app_with(MemoryMovieCatalog::unavailable());
        let response = send(&app, "GET", "/api/v1/movies", None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["message"], "failed to get movies");
    }
}
