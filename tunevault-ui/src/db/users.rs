//! User database operations

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tunevault_common::db::models::User;
use tunevault_common::Result;

pub(crate) fn user_from_row(row: &SqliteRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
    }
}

/// Create a new user; the caller supplies an already-hashed password
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
    first_name: &str,
    last_name: &str,
) -> Result<User> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (username, password_hash, first_name, last_name)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(first_name)
    .bind(last_name)
    .execute(pool)
    .await?;

    Ok(User {
        id: result.last_insert_rowid(),
        username: username.to_string(),
        password_hash: password_hash.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    })
}

pub async fn user_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT id, username, password_hash, first_name, last_name FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| user_from_row(&r)))
}

pub async fn user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>> {
    let row = sqlx::query(
        "SELECT id, username, password_hash, first_name, last_name FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| user_from_row(&r)))
}

/// Replace a user's names and password hash; username and id never change
pub async fn update_user(
    pool: &SqlitePool,
    id: i64,
    first_name: &str,
    last_name: &str,
    password_hash: &str,
) -> Result<()> {
    sqlx::query(
        "UPDATE users SET first_name = ?, last_name = ?, password_hash = ? WHERE id = ?",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(password_hash)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}
