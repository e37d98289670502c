use std::net::SocketAddr;

use anyhow::Context;
use newsroom::{init_db, make_router, run_app};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let db_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let port = match std::env::var("PORT") {
        Ok(raw) => raw.parse().context("PORT must be a number")?,
        Err(_) => 3001,
    };

    let db = init_db(&db_url).await?;
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let router = make_router();
    tracing::info!("server started on {addr}");
    run_app(router, addr, db).await
}
