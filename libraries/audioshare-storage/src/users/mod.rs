//! User management and credential queries

use crate::error::{violation, Violation};
use audioshare_core::{
    error::Result,
    types::{CreateUser, User, UserId},
    AudioShareError,
};
use sqlx::{Row, SqlitePool};

/// Create a user with a bcrypt hash of their password
///
/// Hashing runs on the blocking pool; bcrypt is deliberately slow.
pub async fn create(pool: &SqlitePool, user: CreateUser, bcrypt_cost: u32) -> Result<UserId> {
    let CreateUser {
        name,
        username,
        password,
    } = user;

    let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt_cost))
        .await
        .map_err(|e| AudioShareError::PasswordHash(e.to_string()))?
        .map_err(|e| AudioShareError::PasswordHash(e.to_string()))?;

    let result = sqlx::query(
        "INSERT INTO users (name, username, password_hash) VALUES (?, ?, ?) RETURNING user_id",
    )
    .bind(&name)
    .bind(&username)
    .bind(&password_hash)
    .fetch_one(pool)
    .await;

    match result {
        Ok(row) => {
            let id = UserId::new(row.try_get("user_id")?);
            tracing::debug!(user_id = %id, %username, "user created");
            Ok(id)
        }
        Err(e) if violation(&e) == Some(Violation::Unique) => Err(AudioShareError::DuplicateUser),
        Err(e) => Err(e.into()),
    }
}

/// Find a user by username and check the password against the stored hash
pub async fn get_by_credentials(pool: &SqlitePool, username: &str, password: &str) -> Result<User> {
    let row = sqlx::query(
        "SELECT user_id, name, username, password_hash FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?
    .ok_or(AudioShareError::InvalidCredentials)?;

    let password_hash: String = row.try_get("password_hash")?;
    let password = password.to_owned();
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|e| AudioShareError::PasswordHash(e.to_string()))?
        .map_err(|e| AudioShareError::PasswordHash(e.to_string()))?;

    if !verified {
        return Err(AudioShareError::InvalidCredentials);
    }

    Ok(User {
        id: UserId::new(row.try_get("user_id")?),
        name: row.try_get("name")?,
        username: row.try_get("username")?,
    })
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT user_id, name, username FROM users ORDER BY name, user_id")
        .fetch_all(pool)
        .await?;

    let users = rows
        .into_iter()
        .map(|row| {
            Ok(User {
                id: UserId::new(row.try_get("user_id")?),
                name: row.try_get("name")?,
                username: row.try_get("username")?,
            })
        })
        .collect::<std::result::Result<Vec<_>, sqlx::Error>>()?;

    Ok(users)
}
