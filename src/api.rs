use serde::{Deserialize, Serialize};

use crate::model::Book;

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Book>,
}

impl MessageResponse {
    pub fn new(msg: &str) -> Self {
        return MessageResponse {
            message: msg.to_owned(),
            data: None,
        };
    }

    pub fn with_book(msg: &str, book: Book) -> Self {
        return MessageResponse {
            message: msg.to_owned(),
            data: Some(book),
        };
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookList {
    pub count: usize,
    pub data: Vec<Book>,
}

impl BookList {
    pub fn new(books: Vec<Book>) -> Self {
        BookList {
            count: books.len(),
            data: books,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct MovieParams {
    pub title: Option<String>,
    pub rated: Option<String>,
    pub page: Option<u64>,
    #[serde(rename = "moviesPerPage")]
    pub movies_per_page: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct MoviesResponse {
    pub movies: Vec<serde_json::Value>,
    pub page: u64,
    pub filters: serde_json::Value,
    pub entries_per_page: u32,
    pub total_results: u64,
}
