use anyhow::{Context, Result};
use argon2::{password_hash::SaltString, Argon2, PasswordHash};

/// One-way hash for stored passwords. Argon2 is CPU-bound, so the work runs
/// on a blocking task instead of the request's async thread.
pub async fn hash_password(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(rand::thread_rng());
        let hash = PasswordHash::generate(Argon2::default(), password, salt.as_salt())
            .map_err(|_| anyhow::anyhow!("Failed to hash password"))?;
        Ok(hash.to_string())
    })
    .await
    .context("Failed to hash password")?
}
