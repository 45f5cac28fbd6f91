//! Access policy
//!
//! Ownership is re-derived from the stored rows on every request; no
//! authorization decision is cached.

use tunevault_common::db::models::{Album, User};

/// A user may view or mutate an album iff they own it
pub fn can_access_album(user: &User, album: &Album) -> bool {
    album.user_id == user.id
}

/// A song's ownership is its album's ownership
pub fn can_access_song(user: &User, album_of_song: &Album) -> bool {
    can_access_album(user, album_of_song)
}
