//! Database operations for tunevault-ui
//!
//! Per-entity async free functions over the shared pool. All listing queries
//! scope by the owning user; nothing here reads ambient identity.

pub mod albums;
pub mod sessions;
pub mod songs;
pub mod users;

#[cfg(test)]
pub(crate) mod testing {
    use sqlx::SqlitePool;
    use tunevault_common::db::models::{Album, Song, User};

    /// Fresh in-memory database with the full schema
    ///
    /// Single connection: each connection to `sqlite::memory:` is its own
    /// database, so a pooled second connection would see empty tables.
    pub async fn test_pool() -> SqlitePool {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await
            .unwrap();
        tunevault_common::db::create_schema(&pool)
            .await
            .expect("Failed to create schema");
        pool
    }

    pub async fn seed_user(pool: &SqlitePool, username: &str) -> User {
        super::users::create_user(pool, username, "salt$digest", "Test", "User")
            .await
            .expect("Failed to seed user")
    }

    pub async fn seed_album(pool: &SqlitePool, user_id: i64, artist: &str, title: &str) -> Album {
        super::albums::insert_album(pool, user_id, artist, title, "Genre", "logo.png")
            .await
            .expect("Failed to seed album")
    }

    pub async fn seed_song(pool: &SqlitePool, album_id: i64, title: &str) -> Song {
        super::songs::insert_song(pool, album_id, title, "audio.mp3")
            .await
            .expect("Failed to seed song")
    }
}
