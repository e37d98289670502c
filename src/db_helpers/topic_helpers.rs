use sqlx::{Sqlite, SqlitePool};

use crate::errors::ApiError;
use crate::models::Topic;

pub async fn list_topics_in_db(pool: &SqlitePool) -> Result<Vec<Topic>, ApiError> {
    let topics = sqlx::query_as::<Sqlite, Topic>("SELECT slug, description FROM topics")
        .fetch_all(pool)
        .await?;

    Ok(topics)
}

pub async fn topic_exists(pool: &SqlitePool, slug: &str) -> Result<bool, ApiError> {
    let row = sqlx::query("SELECT slug FROM topics WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}
