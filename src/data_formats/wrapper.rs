use serde::{Deserialize, Serialize};

use super::response::UserResponse;
use crate::models::{ArticleSummary, Comment, Topic};

#[derive(Debug, Deserialize, Serialize)]
pub struct ArticleWrapper<T> {
    pub article: T,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CommentWrapper<T> {
    pub comment: T,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UserWrapper<T> {
    pub user: T,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TopicsWrapper {
    pub topics: Vec<Topic>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ArticlesWrapper {
    pub articles: Vec<ArticleSummary>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CommentsWrapper {
    pub comments: Vec<Comment>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UsersWrapper {
    pub users: Vec<UserResponse>,
}
