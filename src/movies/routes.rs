use axum::{Router, routing::get};

use super::handler;
use crate::handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(handler::list_movies))
}
