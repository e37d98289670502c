use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query},
    http::{StatusCode, Uri},
    Extension, Json,
};
use sqlx::SqlitePool;

use crate::{
    db_helpers::{
        adjust_article_votes_in_db, delete_comment_in_db, get_article_by_id,
        get_comments_by_article_id, insert_comment_in_db, insert_user, list_articles_in_db,
        list_topics_in_db, list_users_in_db, topic_exists,
    },
    errors::ApiError,
    models::{Article, Comment},
    passwords::hash_password,
    ArticleListQuery, ArticleWrapper, ArticlesWrapper, CommentWrapper, CommentsWrapper,
    NewCommentRequest, RegisterRequest, TopicsWrapper, UpdateVotesRequest, UserResponse,
    UserWrapper, UsersWrapper,
};

type ArticleJson = ArticleWrapper<Article>;
type CommentJson = CommentWrapper<Comment>;
type UserJson = UserWrapper<UserResponse>;

type ApiResult<T> = Result<T, ApiError>;

const ENDPOINTS_JSON: &str = include_str!("../endpoints.json");

// ----------------- Helper Handlers -----------------

pub async fn alive() -> &'static str {
    "alive"
}

pub async fn not_found(uri: Uri) -> Result<(), (StatusCode, String)> {
    Err((
        StatusCode::NOT_FOUND,
        format!("URL {} provided was not found", uri),
    ))
}

fn parse_article_id(raw: &str) -> ApiResult<i64> {
    raw.parse()
        .map_err(|_| ApiError::Validation("Invalid article_id"))
}

fn parse_comment_id(raw: &str) -> ApiResult<i64> {
    raw.parse()
        .map_err(|_| ApiError::Validation("Invalid comment_id"))
}

// ----------------- Documentation Handlers -----------------

pub async fn get_api_endpoints(
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<serde_json::Value>> {
    if !params.is_empty() {
        return Err(ApiError::Validation("Invalid query parameters"));
    }

    let endpoints: serde_json::Value = serde_json::from_str(ENDPOINTS_JSON)
        .map_err(|_| ApiError::Internal("Failed to load endpoint data"))?;
    Ok(Json(endpoints))
}

// ----------------- Topic Handlers -----------------

pub async fn get_topics(
    Extension(pool): Extension<Arc<SqlitePool>>,
) -> ApiResult<Json<TopicsWrapper>> {
    let topics = list_topics_in_db(&pool).await?;
    Ok(Json(TopicsWrapper { topics }))
}

// ----------------- Article Handlers -----------------

pub async fn get_articles(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ArticlesWrapper>> {
    let query = ArticleListQuery::from_params(&params)?;
    let articles = list_articles_in_db(&pool, &query).await?;

    // An empty page is only an error when the filter names a topic that does
    // not exist; an existing topic with no articles serves an empty list.
    if articles.is_empty() {
        if let Some(topic) = &query.topic {
            if !topic_exists(&pool, topic).await? {
                return Err(ApiError::NotFound("Topic not found"));
            }
        }
    }

    Ok(Json(ArticlesWrapper { articles }))
}

pub async fn get_article(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(article_id): Path<String>,
) -> ApiResult<Json<ArticleJson>> {
    let article_id = parse_article_id(&article_id)?;
    let article = get_article_by_id(&pool, article_id).await?;
    Ok(Json(ArticleWrapper { article }))
}

pub async fn update_article_votes(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(article_id): Path<String>,
    Json(request): Json<UpdateVotesRequest>,
) -> ApiResult<Json<ArticleJson>> {
    let inc_votes = request.increment()?;
    let article_id = parse_article_id(&article_id)?;
    let article = adjust_article_votes_in_db(&pool, article_id, inc_votes).await?;
    Ok(Json(ArticleWrapper { article }))
}

// ----------------- Comment Handlers -----------------

pub async fn get_article_comments(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(article_id): Path<String>,
) -> ApiResult<Json<CommentsWrapper>> {
    let article_id = parse_article_id(&article_id)?;
    let comments = get_comments_by_article_id(&pool, article_id).await?;

    if comments.is_empty() {
        return Err(ApiError::NotFound(
            "No comments found for this article or article does not exist",
        ));
    }

    Ok(Json(CommentsWrapper { comments }))
}

pub async fn add_comment_to_article(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(article_id): Path<String>,
    Json(request): Json<NewCommentRequest>,
) -> ApiResult<(StatusCode, Json<CommentJson>)> {
    let new_comment = request.validate()?;
    let article_id = parse_article_id(&article_id)?;
    let comment = insert_comment_in_db(&pool, article_id, new_comment).await?;
    Ok((StatusCode::CREATED, Json(CommentWrapper { comment })))
}

pub async fn delete_comment_by_id(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Path(comment_id): Path<String>,
) -> ApiResult<StatusCode> {
    let comment_id = parse_comment_id(&comment_id)?;
    delete_comment_in_db(&pool, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ----------------- User Handlers -----------------

pub async fn get_users(
    Extension(pool): Extension<Arc<SqlitePool>>,
) -> ApiResult<Json<UsersWrapper>> {
    let users = list_users_in_db(&pool).await?;
    Ok(Json(UsersWrapper { users }))
}

pub async fn register_user(
    Extension(pool): Extension<Arc<SqlitePool>>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserJson>)> {
    let mut new_user = request.validate()?;
    new_user.password = hash_password(new_user.password)
        .await
        .map_err(|_| ApiError::Internal("Internal server error"))?;

    let user = insert_user(&pool, &new_user).await.map_err(|e| {
        if let ApiError::Database(sqlx::Error::Database(db_err)) = &e {
            if db_err.message().contains("UNIQUE constraint failed") {
                return ApiError::Conflict("Username or email already exists");
            }
        }
        e
    })?;

    Ok((
        StatusCode::CREATED,
        Json(UserWrapper {
            user: UserResponse::new(user),
        }),
    ))
}
