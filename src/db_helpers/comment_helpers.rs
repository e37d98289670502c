use sqlx::{Sqlite, SqlitePool};

use crate::data_formats::NewComment;
use crate::errors::ApiError;
use crate::models::Comment;

use super::article_exists;

/// Comments for one article, newest first. Stored timestamps have second
/// resolution, so same-second rows fall back to `comment_id` to keep the
/// order deterministic.
pub async fn get_comments_by_article_id(
    pool: &SqlitePool,
    article_id: i64,
) -> Result<Vec<Comment>, ApiError> {
    let comments = sqlx::query_as::<Sqlite, Comment>(
        r#"
        SELECT comment_id, article_id, author, body, votes, created_at
        FROM comments
        WHERE article_id = $1
        ORDER BY created_at DESC, comment_id DESC
        "#,
    )
    .bind(article_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// The guard read runs first: comments carry no foreign key to articles, so
/// this is the only thing standing between a typo'd id and an orphan row.
pub async fn insert_comment_in_db(
    pool: &SqlitePool,
    article_id: i64,
    NewComment { username, body }: NewComment,
) -> Result<Comment, ApiError> {
    if !article_exists(pool, article_id).await? {
        return Err(ApiError::NotFound("Article not found"));
    }

    // The RETURNING row arrives before the write is durable; the explicit
    // commit is what publishes it to other connections.
    let mut tx = pool.begin().await?;
    let comment = sqlx::query_as::<Sqlite, Comment>(
        r#"
        INSERT INTO comments (article_id, author, body)
        VALUES ($1, $2, $3)
        RETURNING comment_id, article_id, author, body, votes, created_at
        "#,
    )
    .bind(article_id)
    .bind(username)
    .bind(body)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;

    Ok(comment)
}

pub async fn delete_comment_in_db(pool: &SqlitePool, comment_id: i64) -> Result<(), ApiError> {
    let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Comment not found"));
    }

    Ok(())
}
