use serde::{Deserialize, Serialize};

use crate::models::User;

/// Public projection of a user row; the password hash stays behind.
#[derive(Deserialize, Serialize, Debug, Clone, sqlx::FromRow)]
pub struct UserResponse {
    pub username: String,
    pub first_name: String,
    pub surname: String,
    pub email: String,
}

impl UserResponse {
    pub fn new(
        User {
            username,
            first_name,
            surname,
            email,
            ..
        }: User,
    ) -> Self {
        UserResponse {
            username,
            first_name,
            surname,
            email,
        }
    }
}
