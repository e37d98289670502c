use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::ApiError;

// ----------------- Article List Query -----------------

/// Columns the article listing accepts in `sort_by`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Author,
    Title,
    ArticleId,
    Topic,
    CreatedAt,
    Votes,
    ArticleImgUrl,
    CommentCount,
}

impl SortColumn {
    fn from_param(value: &str) -> Option<Self> {
        match value {
            "author" => Some(Self::Author),
            "title" => Some(Self::Title),
            "article_id" => Some(Self::ArticleId),
            "topic" => Some(Self::Topic),
            "created_at" => Some(Self::CreatedAt),
            "votes" => Some(Self::Votes),
            "article_img_url" => Some(Self::ArticleImgUrl),
            "comment_count" => Some(Self::CommentCount),
            _ => None,
        }
    }

    /// ORDER BY expression for the listing query. Every value is a fixed
    /// identifier, so raw query input never reaches the SQL text.
    pub const fn as_order_expr(self) -> &'static str {
        match self {
            Self::Author => "articles.author",
            Self::Title => "articles.title",
            Self::ArticleId => "articles.article_id",
            Self::Topic => "articles.topic",
            Self::CreatedAt => "articles.created_at",
            Self::Votes => "articles.votes",
            Self::ArticleImgUrl => "articles.article_img_url",
            Self::CommentCount => "comment_count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn from_param(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

const VALID_QUERY_KEYS: [&str; 3] = ["topic", "sort_by", "order"];

/// Validated query for `GET /api/articles`.
#[derive(Debug, Clone)]
pub struct ArticleListQuery {
    pub topic: Option<String>,
    pub sort_by: SortColumn,
    pub order: SortOrder,
}

impl ArticleListQuery {
    /// Checks the raw query-string pairs against the whitelists. Pure:
    /// rejected input never reaches the store. Missing `sort_by`/`order`
    /// default to `created_at`/`desc`.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ApiError> {
        if params
            .keys()
            .any(|key| !VALID_QUERY_KEYS.contains(&key.as_str()))
        {
            return Err(ApiError::Validation("Invalid query parameter"));
        }

        let sort_by = match params.get("sort_by") {
            Some(value) => SortColumn::from_param(value)
                .ok_or(ApiError::Validation("Invalid sort_by parameter"))?,
            None => SortColumn::CreatedAt,
        };

        let order = match params.get("order") {
            Some(value) => SortOrder::from_param(value)
                .ok_or(ApiError::Validation("Invalid order parameter"))?,
            None => SortOrder::Desc,
        };

        Ok(ArticleListQuery {
            topic: params.get("topic").cloned(),
            sort_by,
            order,
        })
    }
}

// ----------------- Comment Request -----------------

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct NewCommentRequest {
    pub username: Option<String>,
    pub body: Option<String>,
}

/// A comment request that passed field validation.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub username: String,
    pub body: String,
}

impl NewCommentRequest {
    pub fn validate(self) -> Result<NewComment, ApiError> {
        match (non_empty(self.username), non_empty(self.body)) {
            (Some(username), Some(body)) => Ok(NewComment { username, body }),
            _ => Err(ApiError::Validation(
                "Missing required fields: username, body",
            )),
        }
    }
}

// ----------------- Vote Request -----------------

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct UpdateVotesRequest {
    pub inc_votes: Option<serde_json::Value>,
}

impl UpdateVotesRequest {
    /// `inc_votes` must be a JSON integer; `votes` is an integer column.
    pub fn increment(&self) -> Result<i64, ApiError> {
        self.inc_votes
            .as_ref()
            .and_then(serde_json::Value::as_i64)
            .ok_or(ApiError::Validation("Invalid input for votes"))
    }
}

// ----------------- Registration Request -----------------

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct RegisterRequest {
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A registration request that passed field validation. The password is
/// still plaintext at this point; hashing happens in the handler.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub surname: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<NewUser, ApiError> {
        match (
            non_empty(self.first_name),
            non_empty(self.surname),
            non_empty(self.username),
            non_empty(self.email),
            non_empty(self.password),
        ) {
            (Some(first_name), Some(surname), Some(username), Some(email), Some(password)) => {
                Ok(NewUser {
                    first_name,
                    surname,
                    username,
                    email,
                    password,
                })
            }
            _ => Err(ApiError::Validation("Missing required fields")),
        }
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
