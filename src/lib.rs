mod data_formats;
mod db_helpers;
mod errors;
mod handlers;
mod models;
mod passwords;

use anyhow::Context;
pub use anyhow::Result;
use axum::{routing::*, Extension, Router};
pub use data_formats::*;
use handlers::*;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::{
    net::{SocketAddr, TcpListener},
    sync::Arc,
};

/// Serves the router on `address` with the pool injected as an extension.
/// The pool arrives as a parameter so callers (main, tests) decide which
/// database the app runs against.
pub async fn run_app(app: Router, address: SocketAddr, db: SqlitePool) -> Result<()> {
    let app = app.layer(Extension(Arc::new(db)));
    axum::Server::bind(&address)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

/// Creates the database when missing, connects, and brings the schema up to
/// date.
pub async fn init_db(db_url: &str) -> Result<SqlitePool> {
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        tracing::info!("creating database {db_url}");
        Sqlite::create_database(db_url)
            .await
            .context("Failed to create database")?;
    }
    let pool = SqlitePool::connect(db_url).await?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("migrations completed");
    Ok(pool)
}

pub fn get_random_free_port() -> (u16, SocketAddr) {
    let listener = TcpListener::bind("localhost:0").unwrap();
    match listener.local_addr() {
        Ok(addr) => (addr.port(), addr),
        Err(_) => panic!("Could not get a free port"),
    }
}

pub fn make_router() -> Router {
    Router::new()
        .route("/check_health", get(alive))
        .route("/api", get(get_api_endpoints))
        .route("/api/topics", get(get_topics))
        .route("/api/articles", get(get_articles))
        .route(
            "/api/articles/:article_id",
            get(get_article).patch(update_article_votes),
        )
        .route(
            "/api/articles/:article_id/comments",
            get(get_article_comments).post(add_comment_to_article),
        )
        .route("/api/comments/:comment_id", delete(delete_comment_by_id))
        .route("/api/users", get(get_users))
        .route("/api/users/register", post(register_user))
        .fallback(not_found)
}
