//! Session database operations
//!
//! Tokens are opaque uuids; a row maps a token to its user for the cookie
//! round-trip.

use sqlx::SqlitePool;
use tunevault_common::db::models::User;
use tunevault_common::Result;
use uuid::Uuid;

use super::users::user_from_row;

/// Issue a new session for a user, returning the token
pub async fn create_session(pool: &SqlitePool, user_id: i64) -> Result<String> {
    let token = Uuid::new_v4().to_string();

    sqlx::query("INSERT INTO sessions (token, user_id) VALUES (?, ?)")
        .bind(&token)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(token)
}

/// Resolve a session token to its user, if the session exists
pub async fn user_for_token(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        r#"
        SELECT u.id, u.username, u.password_hash, u.first_name, u.last_name
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token = ?
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| user_from_row(&r)))
}

/// End a session (logout); deleting an unknown token is a no-op
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(())
}

/// Replace a session with a fresh token for the same user.
///
/// Used after a password change so the user stays logged in; the new row is
/// inserted before the old one is removed.
pub async fn rotate_session(pool: &SqlitePool, old_token: &str, user_id: i64) -> Result<String> {
    let token = create_session(pool, user_id).await?;
    delete_session(pool, old_token).await?;
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::{seed_user, test_pool};

    #[tokio::test]
    async fn token_resolves_to_its_user() {
        let pool = test_pool().await;
        let user = seed_user(&pool, "alice").await;

        let token = create_session(&pool, user.id).await.unwrap();

        let resolved = user_for_token(&pool, &token).await.unwrap().unwrap();
        assert_eq!(resolved.id, user.id);

        assert!(user_for_token(&pool, "unknown-token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleted_session_no_longer_resolves() {
        let pool = test_pool().await;
        let user = seed_user(&pool, "alice").await;

        let token = create_session(&pool, user.id).await.unwrap();
        delete_session(&pool, &token).await.unwrap();

        assert!(user_for_token(&pool, &token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rotation_keeps_the_user_logged_in() {
        let pool = test_pool().await;
        let user = seed_user(&pool, "alice").await;

        let old = create_session(&pool, user.id).await.unwrap();
        let new = rotate_session(&pool, &old, user.id).await.unwrap();

        assert_ne!(old, new);
        assert!(user_for_token(&pool, &old).await.unwrap().is_none());
        assert_eq!(
            user_for_token(&pool, &new).await.unwrap().unwrap().id,
            user.id
        );
    }
}
