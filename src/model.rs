use bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::ApiError;

const MISSING_FIELDS: &str = "Send all required fields: title, author, publishYear";

/// A book as returned over HTTP. `_id` is the hex form of the store's ObjectId.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(rename = "publishYear")]
    pub publish_year: i32,
}

/// The stored shape of a book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub author: String,
    #[serde(rename = "publishYear")]
    pub publish_year: i32,
}

impl BookDoc {
    pub fn into_book(self, id: ObjectId) -> Book {
        Book {
            id: id.to_hex(),
            title: self.title,
            author: self.author,
            publish_year: self.publish_year,
        }
    }
}

/// Validated fields for creating or replacing a book.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub publish_year: i32,
}

impl From<NewBook> for BookDoc {
    fn from(book: NewBook) -> Self {
        BookDoc {
            id: None,
            title: book.title,
            author: book.author,
            publish_year: book.publish_year,
        }
    }
}

/// Request body for create and update. Every field is optional here so that a
/// missing one is reported as a validation error rather than a decode error.
#[derive(Debug, Default, Deserialize)]
pub struct BookPayload {
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde(rename = "publishYear", default, deserialize_with = "deserialize_year")]
    pub publish_year: Option<i32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YearInput {
    Number(i32),
    Text(String),
}

// Form inputs post the year as a string, so "2001" is accepted alongside 2001.
// An empty string counts as absent.
fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<YearInput>::deserialize(deserializer)? {
        None => Ok(None),
        Some(YearInput::Number(year)) => Ok(Some(year)),
        Some(YearInput::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("publishYear must be a number, got {:?}", text)))
        }
    }
}

impl BookPayload {
    pub fn validate(self) -> Result<NewBook, ApiError> {
        let title = self.title.filter(|s| !s.is_empty());
        let author = self.author.filter(|s| !s.is_empty());
        let publish_year = self.publish_year.filter(|y| *y != 0);

        match (title, author, publish_year) {
            (Some(title), Some(author), Some(publish_year)) => Ok(NewBook {
                title,
                author,
                publish_year,
            }),
            _ => Err(ApiError::Validation(MISSING_FIELDS.to_string())),
        }
    }
}
