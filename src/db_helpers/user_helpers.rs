use sqlx::{Sqlite, SqlitePool};

use crate::data_formats::{NewUser, UserResponse};
use crate::errors::ApiError;
use crate::models::User;

pub async fn list_users_in_db(pool: &SqlitePool) -> Result<Vec<UserResponse>, ApiError> {
    let users = sqlx::query_as::<Sqlite, UserResponse>(
        "SELECT username, first_name, surname, email FROM users",
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// `user.password` must already hold the argon2 hash by the time this runs.
/// Unique-constraint violations bubble up as `Database` errors; the handler
/// translates those into the conflict response.
pub async fn insert_user(pool: &SqlitePool, user: &NewUser) -> Result<User, ApiError> {
    // The RETURNING row arrives before the write is durable; the explicit
    // commit is what publishes it to other connections.
    let mut tx = pool.begin().await?;
    let user = sqlx::query_as::<Sqlite, User>(
        r#"
        INSERT INTO users (username, first_name, surname, email, password)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING username, first_name, surname, email, password
        "#,
    )
    .bind(&user.username)
    .bind(&user.first_name)
    .bind(&user.surname)
    .bind(&user.email)
    .bind(&user.password)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;

    Ok(user)
}
