use std::sync::Arc;

use axum::{
    Json, Router,
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

use crate::api::ErrorResponse;
use crate::books::{self, BookStore};
use crate::movies::{self, MovieCatalog};

#[derive(Clone)]
pub struct AppState {
    pub books: Arc<dyn BookStore>,
    pub movies: Arc<dyn MovieCatalog>,
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    (StatusCode::OK, "Welcome to the bookshelf service")
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "not found".to_string(),
        }),
    )
}

/// Builds the CORS layer. An empty origin list allows any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("ignoring invalid cors origin {}: {}", o, e);
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

pub fn app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(healthcheck))
        .nest("/books", books::routes())
        .nest("/api/v1/movies", movies::routes())
        .fallback(not_found)
        .layer(cors)
        .with_state(state)
}
