use std::sync::Arc;

use bookshelf::books::MongoBookStore;
use bookshelf::config::{Cli, Config, default_config_path};
use bookshelf::db::Database;
use bookshelf::handler::{AppState, app, cors_layer};
use bookshelf::movies::MoviesDao;
use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // .env is optional; real environment variables win
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    tracing::info!("bookshelf.svc starting");

    let config_path = args
        .config_path
        .map(std::path::PathBuf::from)
        .unwrap_or_else(default_config_path);

    let cfg = Config::new(&config_path).unwrap_or_else(|e| {
        tracing::error!(error = %e, path = ?config_path, "failed to load config file");
        std::process::exit(1);
    });

    let db = Database::new(&cfg.database).await.unwrap_or_else(|e| {
        tracing::error!(error = %bookshelf::unpack_error(&e), "failed to setup database");
        std::process::exit(1);
    });

    let state = AppState {
        books: Arc::new(MongoBookStore::new(&db)),
        movies: Arc::new(MoviesDao::new(&db)),
    };
    let router = app(state, cors_layer(&cfg.app.cors_origins));

    let address = format!("0.0.0.0:{}", cfg.app.get_port());
    let listener = tokio::net::TcpListener::bind(&address).await.unwrap_or_else(|e| {
        tracing::error!(error = %e, "failed to setup tcp listener");
        std::process::exit(1);
    });

    let cancellation_token = CancellationToken::new();
    let shutdown_token = cancellation_token.clone();
    tokio::spawn(async move {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl+c");
            return;
        }
        tracing::info!("ctrl+c signal received, preparing to shutdown");
        shutdown_token.cancel();
    });

    tracing::info!("bookshelf.svc running on {}", &address);
    let server = axum::serve(listener, router).with_graceful_shutdown(cancellation_token.cancelled_owned());
    if let Err(err) = server.await {
        tracing::error!(error = %err, "server exited with error");
        std::process::exit(1);
    }

    tracing::info!("bookshelf.svc going off, graceful shutdown complete");
}
