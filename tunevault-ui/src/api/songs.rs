//! Song handlers: listing/search, create/update/delete, favourite

use axum::{
    extract::{Multipart, Path, Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tunevault_common::db::models::{Album, Song, User};

use crate::auth::CurrentUser;
use crate::{db, policy, uploads, AppState};

use super::notice::{set_notice, take_notice, Notice};
use super::pages;
use super::{referrer, ApiError};

#[derive(Debug, Deserialize)]
pub struct SongSearchQuery {
    pub s: Option<String>,
}

/// Parsed song multipart form: the title plus the optional audio upload
struct SongForm {
    title: String,
    audio: Option<(String, Vec<u8>)>,
}

async fn read_song_form(mut multipart: Multipart) -> Result<SongForm, ApiError> {
    let mut form = SongForm {
        title: String::new(),
        audio: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Upload(e.to_string()))?
    {
        match field.name().unwrap_or("") {
            "title" => form.title = field.text().await.map_err(|e| ApiError::Upload(e.to_string()))?,
            "audio_file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Upload(e.to_string()))?;
                if !filename.is_empty() {
                    form.audio = Some((filename, data.to_vec()));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Load an album and check the user owns it; `None` means redirect to `/`
async fn owned_album(
    state: &AppState,
    user: &User,
    album_id: i64,
) -> Result<Option<Album>, ApiError> {
    let Some(album) = db::albums::get_album(&state.db, album_id).await? else {
        return Ok(None);
    };
    if !policy::can_access_album(user, &album) {
        return Ok(None);
    }
    Ok(Some(album))
}

/// Load a song of the given owned album; `None` means redirect to `/`
async fn owned_song(
    state: &AppState,
    album: &Album,
    song_id: i64,
) -> Result<Option<Song>, ApiError> {
    let Some(song) = db::songs::get_song(&state.db, song_id).await? else {
        return Ok(None);
    };
    if song.album_id != album.id {
        return Ok(None);
    }
    Ok(Some(song))
}

/// GET /songs?s=
///
/// The user's songs across all their albums; `s` filters titles
/// case-insensitively and its absence means the full owned set.
pub async fn song_index(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Query(params): Query<SongSearchQuery>,
) -> Result<Response, ApiError> {
    let songs = db::songs::list_for_user(&state.db, user.id, params.s.as_deref()).await?;

    let (jar, notice) = take_notice(jar);
    Ok((jar, Html(pages::songs_page(&songs, params.s.as_deref(), notice))).into_response())
}

/// GET /:album_id/add/
pub async fn song_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(album_id): Path<i64>,
) -> Result<Response, ApiError> {
    let Some(album) = owned_album(&state, &user, album_id).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    let action = format!("/{}/add/", album.id);
    Ok(Html(pages::song_form_page("Add song", &action, None)).into_response())
}

/// POST /:album_id/add/
///
/// Rejects non-audio uploads before anything is persisted: back to the
/// referring page with a notice and no song row.
pub async fn create_song(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    headers: HeaderMap,
    Path(album_id): Path<i64>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let Some(album) = owned_album(&state, &user, album_id).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    let form = read_song_form(multipart).await?;

    let Some((filename, data)) = form.audio else {
        let jar = set_notice(jar, Notice::InvalidFileType);
        return Ok((jar, Redirect::to(&referrer(&headers))).into_response());
    };
    if !uploads::is_allowed_audio(&filename) {
        let jar = set_notice(jar, Notice::InvalidFileType);
        return Ok((jar, Redirect::to(&referrer(&headers))).into_response());
    }

    let stored = uploads::store_upload(&state.media_root, &filename, &data).await?;
    db::songs::insert_song(&state.db, album.id, &form.title, &stored).await?;

    Ok(Redirect::to(&format!("/{}/", album.id)).into_response())
}

/// GET /:album_id/:song_id/edit/
pub async fn song_edit_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((album_id, song_id)): Path<(i64, i64)>,
) -> Result<Response, ApiError> {
    let Some(album) = owned_album(&state, &user, album_id).await? else {
        return Ok(Redirect::to("/").into_response());
    };
    let Some(song) = owned_song(&state, &album, song_id).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    let action = format!("/{}/{}/edit/", album.id, song.id);
    Ok(Html(pages::song_form_page("Edit song", &action, Some(&song))).into_response())
}

/// POST /:album_id/:song_id/edit/
pub async fn update_song(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    headers: HeaderMap,
    Path((album_id, song_id)): Path<(i64, i64)>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let Some(album) = owned_album(&state, &user, album_id).await? else {
        return Ok(Redirect::to("/").into_response());
    };
    let Some(song) = owned_song(&state, &album, song_id).await? else {
        return Ok(Redirect::to("/").into_response());
    };

    let form = read_song_form(multipart).await?;

    let stored = match form.audio {
        Some((filename, data)) => {
            if !uploads::is_allowed_audio(&filename) {
                let jar = set_notice(jar, Notice::InvalidFileType);
                return Ok((jar, Redirect::to(&referrer(&headers))).into_response());
            }
            Some(uploads::store_upload(&state.media_root, &filename, &data).await?)
        }
        None => None,
    };

    db::songs::update_song(&state.db, song.id, &form.title, stored.as_deref()).await?;

    Ok(Redirect::to(&format!("/{}/", album.id)).into_response())
}

/// POST /songs/:id/delete/
///
/// Removes the song, then returns to its (still existing) parent album.
pub async fn delete_song(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(song_id): Path<i64>,
) -> Result<Response, ApiError> {
    let Some(song) = db::songs::get_song(&state.db, song_id).await? else {
        return Ok(Redirect::to("/").into_response());
    };
    let Some(album) = db::albums::get_album(&state.db, song.album_id).await? else {
        return Ok(Redirect::to("/").into_response());
    };
    if !policy::can_access_song(&user, &album) {
        return Ok(Redirect::to("/").into_response());
    }

    db::songs::delete_song(&state.db, song.id).await?;

    Ok(Redirect::to(&format!("/{}/", album.id)).into_response())
}

/// GET /:album_id/:song_id/favourite/
pub async fn favourite_song(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    headers: HeaderMap,
    Path((album_id, song_id)): Path<(i64, i64)>,
) -> Result<Response, ApiError> {
    let Some(song) = db::songs::get_song(&state.db, song_id).await? else {
        return Ok(Redirect::to("/").into_response());
    };
    if song.album_id != album_id {
        return Ok(Redirect::to("/").into_response());
    }

    db::songs::toggle_favourite(&state.db, song.id).await?;

    Ok(Redirect::to(&referrer(&headers)).into_response())
}
