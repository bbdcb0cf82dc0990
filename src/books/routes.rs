use axum::{
    Router,
    routing::{get, post},
};

use super::handler;
use crate::handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create_book).get(handler::list_books))
        .route(
            "/:id",
            get(handler::get_book)
                .put(handler::update_book)
                .delete(handler::delete_book),
        )
}
