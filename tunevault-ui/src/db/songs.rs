//! Song database operations
//!
//! A song's owner is its album's owner; every listing query joins through
//! albums to scope by user.

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tunevault_common::db::models::Song;
use tunevault_common::Result;

fn song_from_row(row: &SqliteRow) -> Song {
    Song {
        id: row.get("id"),
        album_id: row.get("album_id"),
        title: row.get("title"),
        audio_path: row.get("audio_path"),
        is_favourite: row.get("is_favourite"),
    }
}

/// A user's songs across all their albums, optionally filtered by a
/// case-insensitive title substring.
///
/// `None` (or an empty string) means no filter: the full owned set, never a
/// widening to other users' songs. Ordering is favourites first, then id.
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: i64,
    search: Option<&str>,
) -> Result<Vec<Song>> {
    let rows = match search.filter(|s| !s.is_empty()) {
        Some(query) => {
            sqlx::query(
                r#"
                SELECT s.id, s.album_id, s.title, s.audio_path, s.is_favourite
                FROM songs s
                JOIN albums a ON a.id = s.album_id
                WHERE a.user_id = ? AND instr(lower(s.title), lower(?)) > 0
                ORDER BY s.is_favourite DESC, s.id ASC
                "#,
            )
            .bind(user_id)
            .bind(query)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query(
                r#"
                SELECT s.id, s.album_id, s.title, s.audio_path, s.is_favourite
                FROM songs s
                JOIN albums a ON a.id = s.album_id
                WHERE a.user_id = ?
                ORDER BY s.is_favourite DESC, s.id ASC
                "#,
            )
            .bind(user_id)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows.iter().map(song_from_row).collect())
}

/// Songs of one album, favourites first, for the detail view
pub async fn list_for_album(pool: &SqlitePool, album_id: i64) -> Result<Vec<Song>> {
    let rows = sqlx::query(
        r#"
        SELECT id, album_id, title, audio_path, is_favourite
        FROM songs
        WHERE album_id = ?
        ORDER BY is_favourite DESC, id ASC
        "#,
    )
    .bind(album_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(song_from_row).collect())
}

pub async fn get_song(pool: &SqlitePool, id: i64) -> Result<Option<Song>> {
    let row = sqlx::query(
        "SELECT id, album_id, title, audio_path, is_favourite FROM songs WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| song_from_row(&r)))
}

/// Create a song under an album; new songs are not favourites
pub async fn insert_song(
    pool: &SqlitePool,
    album_id: i64,
    title: &str,
    audio_path: &str,
) -> Result<Song> {
    let result = sqlx::query(
        "INSERT INTO songs (album_id, title, audio_path, is_favourite) VALUES (?, ?, ?, 0)",
    )
    .bind(album_id)
    .bind(title)
    .bind(audio_path)
    .execute(pool)
    .await?;

    Ok(Song {
        id: result.last_insert_rowid(),
        album_id,
        title: title.to_string(),
        audio_path: audio_path.to_string(),
        is_favourite: false,
    })
}

/// Replace a song's title (and audio file, when one was uploaded);
/// the owning album never changes.
pub async fn update_song(
    pool: &SqlitePool,
    id: i64,
    title: &str,
    audio_path: Option<&str>,
) -> Result<()> {
    match audio_path {
        Some(path) => {
            sqlx::query("UPDATE songs SET title = ?, audio_path = ? WHERE id = ?")
                .bind(title)
                .bind(path)
                .bind(id)
                .execute(pool)
                .await?;
        }
        None => {
            sqlx::query("UPDATE songs SET title = ? WHERE id = ?")
                .bind(title)
                .bind(id)
                .execute(pool)
                .await?;
        }
    }

    Ok(())
}

pub async fn delete_song(pool: &SqlitePool, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Flip the favourite flag in a single atomic update
pub async fn toggle_favourite(pool: &SqlitePool, id: i64) -> Result<()> {
    sqlx::query("UPDATE songs SET is_favourite = NOT is_favourite WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
