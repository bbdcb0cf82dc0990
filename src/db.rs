use bson::{Document, doc};
use mongodb::{Client, Collection};

use crate::config::DatabaseConfig;
use crate::error::StoreError;
use crate::model::BookDoc;

/// Shared MongoDB handle. The driver pools connections internally, so one
/// `Database` is built at startup and every data-access object borrows
/// collections from it.
#[derive(Clone)]
pub struct Database {
    client: Client,
    cfg: DatabaseConfig,
}

impl Database {
    pub async fn new(cfg: &DatabaseConfig) -> Result<Self, StoreError> {
        tracing::info!("[db] connecting to {}", redact_uri(&cfg.url));

        let client = Client::with_uri_str(&with_selection_timeout(&cfg.url)).await?;
        client.database(&cfg.name).run_command(doc! { "ping": 1 }).await?;

        tracing::info!(database = %cfg.name, movies = %cfg.movies_namespace, "[db] connected");

        Ok(Database {
            client,
            cfg: cfg.clone(),
        })
    }

    pub fn books(&self) -> Collection<BookDoc> {
        self.client
            .database(&self.cfg.name)
            .collection(&self.cfg.books_collection)
    }

    pub fn movies(&self) -> Collection<Document> {
        self.client
            .database(&self.cfg.movies_namespace)
            .collection(&self.cfg.movies_collection)
    }
}

// Fail fast when the server is unreachable instead of waiting on the
// driver's 30s default.
fn with_selection_timeout(uri: &str) -> String {
    if uri.contains("serverSelectionTimeoutMS") {
        return uri.to_string();
    }
    let sep = if uri.contains('?') { '&' } else { '?' };
    format!("{}{}serverSelectionTimeoutMS=5000", uri, sep)
}

fn redact_uri(uri: &str) -> String {
    match (uri.find("://"), uri.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &uri[..scheme_end], &uri[at..])
        }
        _ => uri.to_string(),
    }
}
