use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bson::oid::ObjectId;

use crate::api::{BookList, MessageResponse};
use crate::error::ApiError;
use crate::handler::AppState;
use crate::model::BookPayload;

const BOOK_NOT_FOUND: &str = "Book not found";

fn parse_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::InvalidId(id.to_string()))
}

pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let new_book = payload.validate()?;

    let book = state
        .books
        .create(new_book)
        .await
        .map_err(|e| ApiError::CreateFailed("failed to create book", e))?;

    tracing::info!(id = %book.id, "book created");
    Ok((StatusCode::CREATED, Json(book)).into_response())
}

pub async fn list_books(State(state): State<AppState>) -> Result<Response, ApiError> {
    let books = state
        .books
        .list()
        .await
        .map_err(|e| ApiError::StoreFailed("failed to get books", e))?;

    tracing::info!(count = books.len(), "got books");
    Ok((StatusCode::OK, Json(BookList::new(books))).into_response())
}

pub async fn get_book(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;

    match state.books.get(id).await {
        Ok(Some(book)) => Ok((StatusCode::OK, Json(book)).into_response()),
        Ok(None) => Err(ApiError::NotFound(BOOK_NOT_FOUND)),
        Err(e) => Err(ApiError::StoreFailed("failed to get book", e)),
    }
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let Json(payload) = payload?;
    let new_book = payload.validate()?;

    match state.books.update(id, new_book).await {
        Ok(Some(book)) => {
            tracing::info!(id = %book.id, "book updated");
            let body = MessageResponse::with_book("Book updated successfully", book);
            Ok((StatusCode::OK, Json(body)).into_response())
        }
        Ok(None) => Err(ApiError::NotFound(BOOK_NOT_FOUND)),
        Err(e) => Err(ApiError::StoreFailed("failed to update book", e)),
    }
}

pub async fn delete_book(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;

    match state.books.delete(id).await {
        Ok(Some(book)) => {
            tracing::info!(id = %book.id, "book deleted");
            Ok((StatusCode::OK, Json(MessageResponse::new("Book deleted successfully"))).into_response())
        }
        Ok(None) => Err(ApiError::NotFound(BOOK_NOT_FOUND)),
        Err(e) => Err(ApiError::StoreFailed("failed to delete book", e)),
    }
}
