use sqlx::{Sqlite, SqlitePool};

use crate::data_formats::ArticleListQuery;
use crate::errors::ApiError;
use crate::models::{Article, ArticleSummary};

const LIST_ARTICLES_QUERY: &str = r#"
SELECT articles.author,
       articles.title,
       articles.article_id,
       articles.topic,
       articles.created_at,
       articles.votes,
       articles.article_img_url,
       COUNT(comments.comment_id) AS comment_count
FROM articles
LEFT JOIN comments ON comments.article_id = articles.article_id
"#;

const SINGLE_ARTICLE_QUERY: &str = r#"
SELECT articles.article_id,
       articles.title,
       articles.topic,
       articles.author,
       articles.body,
       articles.created_at,
       articles.votes,
       articles.article_img_url,
       COUNT(comments.comment_id) AS comment_count
FROM articles
LEFT JOIN comments ON comments.article_id = articles.article_id
WHERE articles.article_id = $1
GROUP BY articles.article_id
"#;

/// Runs the listing aggregate: every article with its comment count,
/// optionally filtered to one topic, ordered by the validated column and
/// direction. The ORDER BY text comes from the `SortColumn`/`SortOrder`
/// tables, never from raw input; the topic value is a bound parameter.
///
/// Rows with equal sort keys come back in storage order; no secondary sort
/// key is applied.
pub async fn list_articles_in_db(
    pool: &SqlitePool,
    query: &ArticleListQuery,
) -> Result<Vec<ArticleSummary>, ApiError> {
    let mut sql = String::from(LIST_ARTICLES_QUERY);
    if query.topic.is_some() {
        sql.push_str("WHERE articles.topic = $1\n");
    }
    sql.push_str("GROUP BY articles.article_id\n");
    sql.push_str(&format!(
        "ORDER BY {} {}",
        query.sort_by.as_order_expr(),
        query.order.as_sql()
    ));

    let mut articles = sqlx::query_as::<Sqlite, ArticleSummary>(&sql);
    if let Some(topic) = &query.topic {
        articles = articles.bind(topic);
    }

    Ok(articles.fetch_all(pool).await?)
}

pub async fn get_article_by_id(pool: &SqlitePool, article_id: i64) -> Result<Article, ApiError> {
    let article = sqlx::query_as::<Sqlite, Article>(SINGLE_ARTICLE_QUERY)
        .bind(article_id)
        .fetch_optional(pool)
        .await?;

    match article {
        Some(article) => Ok(article),
        None => Err(ApiError::NotFound("Article not found")),
    }
}

pub async fn article_exists(pool: &SqlitePool, article_id: i64) -> Result<bool, ApiError> {
    let row = sqlx::query("SELECT article_id FROM articles WHERE article_id = $1")
        .bind(article_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

/// Applies the increment as a single atomic statement so concurrent
/// adjustments never lose updates, then re-reads the row for a fresh
/// `comment_count`.
pub async fn adjust_article_votes_in_db(
    pool: &SqlitePool,
    article_id: i64,
    inc_votes: i64,
) -> Result<Article, ApiError> {
    let result = sqlx::query("UPDATE articles SET votes = votes + $1 WHERE article_id = $2")
        .bind(inc_votes)
        .bind(article_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Article not found"));
    }

    get_article_by_id(pool, article_id).await
}
