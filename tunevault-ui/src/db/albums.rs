//! Album database operations
//!
//! Listing and search are always scoped to the owning user; ordering is
//! favourites first, then creation order (ascending id).

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tunevault_common::db::models::Album;
use tunevault_common::Result;

const ALBUM_COLUMNS: &str = "id, user_id, artist, title, genre, logo_path, is_favourite";

fn album_from_row(row: &SqliteRow) -> Album {
    Album {
        id: row.get("id"),
        user_id: row.get("user_id"),
        artist: row.get("artist"),
        title: row.get("title"),
        genre: row.get("genre"),
        logo_path: row.get("logo_path"),
        is_favourite: row.get("is_favourite"),
    }
}

/// A user's albums, favourites first, then ascending id
pub async fn list_for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Album>> {
    let rows = sqlx::query(&format!(
        "SELECT {ALBUM_COLUMNS} FROM albums WHERE user_id = ? ORDER BY is_favourite DESC, id ASC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(album_from_row).collect())
}

pub async fn get_album(pool: &SqlitePool, id: i64) -> Result<Option<Album>> {
    let row = sqlx::query(&format!("SELECT {ALBUM_COLUMNS} FROM albums WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| album_from_row(&r)))
}

/// Create an album owned by the given user; new albums are not favourites
pub async fn insert_album(
    pool: &SqlitePool,
    user_id: i64,
    artist: &str,
    title: &str,
    genre: &str,
    logo_path: &str,
) -> Result<Album> {
    let result = sqlx::query(
        r#"
        INSERT INTO albums (user_id, artist, title, genre, logo_path, is_favourite)
        VALUES (?, ?, ?, ?, ?, 0)
        "#,
    )
    .bind(user_id)
    .bind(artist)
    .bind(title)
    .bind(genre)
    .bind(logo_path)
    .execute(pool)
    .await?;

    Ok(Album {
        id: result.last_insert_rowid(),
        user_id,
        artist: artist.to_string(),
        title: title.to_string(),
        genre: genre.to_string(),
        logo_path: logo_path.to_string(),
        is_favourite: false,
    })
}

/// Replace an album's mutable fields; the owner never changes.
///
/// `logo_path` is only written when a replacement artwork was uploaded.
pub async fn update_album(
    pool: &SqlitePool,
    id: i64,
    artist: &str,
    title: &str,
    genre: &str,
    logo_path: Option<&str>,
) -> Result<()> {
    match logo_path {
        Some(path) => {
            sqlx::query(
                "UPDATE albums SET artist = ?, title = ?, genre = ?, logo_path = ? WHERE id = ?",
            )
            .bind(artist)
            .bind(title)
            .bind(genre)
            .bind(path)
            .bind(id)
            .execute(pool)
            .await?;
        }
        None => {
            sqlx::query("UPDATE albums SET artist = ?, title = ?, genre = ? WHERE id = ?")
                .bind(artist)
                .bind(title)
                .bind(genre)
                .bind(id)
                .execute(pool)
                .await?;
        }
    }

    Ok(())
}

/// Delete an album and all of its songs in one transaction
pub async fn delete_album(pool: &SqlitePool, id: i64) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM songs WHERE album_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM albums WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}

/// Flip the favourite flag in a single atomic update
pub async fn toggle_favourite(pool: &SqlitePool, id: i64) -> Result<()> {
    sqlx::query("UPDATE albums SET is_favourite = NOT is_favourite WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Case-sensitive title-substring search over the user's albums.
///
/// SQLite's LIKE is case-insensitive for ASCII, so containment is checked
/// with instr() instead. An empty query returns the full owned set.
pub async fn search_for_user(pool: &SqlitePool, user_id: i64, query: &str) -> Result<Vec<Album>> {
    if query.is_empty() {
        return list_for_user(pool, user_id).await;
    }

    let rows = sqlx::query(&format!(
        "SELECT {ALBUM_COLUMNS} FROM albums
         WHERE user_id = ? AND instr(title, ?) > 0
         ORDER BY is_favourite DESC, id ASC"
    ))
    .bind(user_id)
    .bind(query)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(album_from_row).collect())
}

/// Other albums by the same artist for the detail view's sidebar.
///
/// Exclusion is by title, matching the original application's behavior: two
/// same-titled albums by one artist will hide each other here.
pub async fn related_for_user(
    pool: &SqlitePool,
    user_id: i64,
    artist: &str,
    exclude_title: &str,
) -> Result<Vec<Album>> {
    let rows = sqlx::query(&format!(
        "SELECT {ALBUM_COLUMNS} FROM albums
         WHERE user_id = ? AND artist = ? AND title <> ?
         ORDER BY id ASC"
    ))
    .bind(user_id)
    .bind(artist)
    .bind(exclude_title)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(album_from_row).collect())
}
