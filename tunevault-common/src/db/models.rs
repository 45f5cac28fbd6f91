//! Database models
//!
//! Plain data records; all behavior lives in the store operations that load
//! and persist them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Salted digest in `salt$hex` form, never the cleartext password
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: i64,
    /// Owning user; immutable after creation
    pub user_id: i64,
    pub artist: String,
    pub title: String,
    pub genre: String,
    /// Stored artwork filename under the media directory
    pub logo_path: String,
    pub is_favourite: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    /// Owning album; a song's owner is its album's owner
    pub album_id: i64,
    pub title: String,
    /// Stored audio filename under the media directory
    pub audio_path: String,
    pub is_favourite: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
}
