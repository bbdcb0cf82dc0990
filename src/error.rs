use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::MessageResponse;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("MongoError: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("MissingId: {collection} {operation} returned no ObjectId")]
    MissingId {
        collection: &'static str,
        operation: &'static str,
    },
    /// Raised by the in-memory stores to stand in for an unreachable server.
    #[cfg(test)]
    #[error("Unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("ValidationError: {0}")]
    Validation(String),
    #[error("MalformedBody: {0}")]
    MalformedBody(#[from] JsonRejection),
    #[error("MalformedQuery: {0}")]
    MalformedQuery(#[from] QueryRejection),
    #[error("InvalidId: {0}")]
    InvalidId(String),
    #[error("NotFound: {0}")]
    NotFound(&'static str),
    #[error("CreateFailed: {0}")]
    CreateFailed(&'static str, #[source] StoreError),
    #[error("StoreFailed: {0}")]
    StoreFailed(&'static str, #[source] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        use ApiError::*;
        match self {
            Validation(_) | MalformedBody(_) | MalformedQuery(_) | InvalidId(_) => StatusCode::BAD_REQUEST,
            NotFound(_) => StatusCode::NOT_FOUND,
            CreateFailed(..) => StatusCode::BAD_REQUEST,
            StoreFailed(..) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client. Store failures never leak driver text.
    pub fn message(&self) -> String {
        use ApiError::*;
        match self {
            Validation(msg) => msg.clone(),
            MalformedBody(rejection) => rejection.body_text(),
            MalformedQuery(rejection) => rejection.body_text(),
            InvalidId(id) => format!("invalid id: {}", id),
            NotFound(msg) => msg.to_string(),
            CreateFailed(msg, _) | StoreFailed(msg, _) => msg.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() || matches!(self, ApiError::CreateFailed(..)) {
            tracing::error!(error = %crate::unpack_error(&self), "request failed");
        } else {
            tracing::info!(error = %self, "rejected request");
        }
        (status, Json(MessageResponse::new(&self.message()))).into_response()
    }
}
