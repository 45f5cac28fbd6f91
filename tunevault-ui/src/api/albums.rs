//! Album handlers: listing, detail, create/update/delete, favourite, search

use axum::{
    extract::{Multipart, Path, Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tunevault_common::labels;

use crate::auth::CurrentUser;
use crate::{db, policy, uploads, AppState};

use super::notice::{set_notice, take_notice, Notice};
use super::pages;
use super::{referrer, ApiError};

#[derive(Debug, Deserialize)]
pub struct AlbumSearchQuery {
    pub q: Option<String>,
}

/// Parsed album multipart form: text fields plus the optional artwork upload
struct AlbumForm {
    artist: String,
    title: String,
    genre: String,
    logo: Option<(String, Vec<u8>)>,
}

async fn read_album_form(mut multipart: Multipart) -> Result<AlbumForm, ApiError> {
    let mut form = AlbumForm {
        artist: String::new(),
        title: String::new(),
        genre: String::new(),
        logo: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Upload(e.to_string()))?
    {
        match field.name().unwrap_or("") {
            "artist" => form.artist = field.text().await.map_err(|e| ApiError::Upload(e.to_string()))?,
            "title" => form.title = field.text().await.map_err(|e| ApiError::Upload(e.to_string()))?,
            "genre" => form.genre = field.text().await.map_err(|e| ApiError::Upload(e.to_string()))?,
            "logo" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Upload(e.to_string()))?;
                if !filename.is_empty() {
                    form.logo = Some((filename, data.to_vec()));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// GET /
pub async fn album_index(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> Result<Response, ApiError> {
    let albums = db::albums::list_for_user(&state.db, user.id).await?;
    let heading = labels::possessive_albums_label(&user.first_name);

    let (jar, notice) = take_notice(jar);
    Ok((jar, Html(pages::album_index_page(&heading, &user, &albums, notice, None))).into_response())
}

/// GET /search/results/?q=
///
/// Case-sensitive title search over the user's own albums; a missing or
/// empty query shows the full owned set.
pub async fn search_albums(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<AlbumSearchQuery>,
) -> Result<Response, ApiError> {
    let query = params.q.unwrap_or_default();
    let albums = db::albums::search_for_user(&state.db, user.id, &query).await?;
    let heading = labels::possessive_albums_label(&user.first_name);

    Ok(Html(pages::album_index_page(&heading, &user, &albums, None, Some(&query))).into_response())
}

/// GET /:album_id/
///
/// Detail view with the album's songs and the artist's other albums.
/// A foreign or unknown album redirects straight back to the index.
pub async fn album_detail(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    Path(album_id): Path<i64>,
) -> Result<Response, ApiError> {
    let Some(album) = db::albums::get_album(&state.db, album_id).await? else {
        return Ok(Redirect::to("/").into_response());
    };
    if !policy::can_access_album(&user, &album) {
        return Ok(Redirect::to("/").into_response());
    }

    let songs = db::songs::list_for_album(&state.db, album.id).await?;
    let related =
        db::albums::related_for_user(&state.db, user.id, &album.artist, &album.title).await?;

    let (jar, notice) = take_notice(jar);
    Ok((jar, Html(pages::album_detail_page(&album, &songs, &related, notice))).into_response())
}

/// GET /album/add/
pub async fn album_form(CurrentUser(_user): CurrentUser) -> Response {
    Html(pages::album_form_page("Add album", "/album/add/", None)).into_response()
}

/// POST /album/add/
///
/// Rejects non-image artwork before anything is persisted: the caller is
/// sent back to the referring page with a notice and no album row exists.
pub async fn create_album(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let form = read_album_form(multipart).await?;

    let Some((filename, data)) = form.logo else {
        let jar = set_notice(jar, Notice::InvalidFileType);
        return Ok((jar, Redirect::to(&referrer(&headers))).into_response());
    };
    if !uploads::is_allowed_image(&filename) {
        let jar = set_notice(jar, Notice::InvalidFileType);
        return Ok((jar, Redirect::to(&referrer(&headers))).into_response());
    }

    let stored = uploads::store_upload(&state.media_root, &filename, &data).await?;
    let album = db::albums::insert_album(
        &state.db,
        user.id,
        &form.artist,
        &form.title,
        &form.genre,
        &stored,
    )
    .await?;

    Ok(Redirect::to(&format!("/{}/", album.id)).into_response())
}

/// GET /album/:id/
pub async fn album_edit_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(album_id): Path<i64>,
) -> Result<Response, ApiError> {
    let Some(album) = db::albums::get_album(&state.db, album_id).await? else {
        return Ok(Redirect::to("/").into_response());
    };
    if !policy::can_access_album(&user, &album) {
        return Ok(Redirect::to("/").into_response());
    }

    let action = format!("/album/{}/", album.id);
    Ok(Html(pages::album_form_page("Edit album", &action, Some(&album))).into_response())
}

/// POST /album/:id/
///
/// Field-level replace; artwork only changes when a new file was uploaded.
pub async fn update_album(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    headers: HeaderMap,
    Path(album_id): Path<i64>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let Some(album) = db::albums::get_album(&state.db, album_id).await? else {
        return Ok(Redirect::to("/").into_response());
    };
    if !policy::can_access_album(&user, &album) {
        return Ok(Redirect::to("/").into_response());
    }

    let form = read_album_form(multipart).await?;

    let stored = match form.logo {
        Some((filename, data)) => {
            if !uploads::is_allowed_image(&filename) {
                let jar = set_notice(jar, Notice::InvalidFileType);
                return Ok((jar, Redirect::to(&referrer(&headers))).into_response());
            }
            Some(uploads::store_upload(&state.media_root, &filename, &data).await?)
        }
        None => None,
    };

    db::albums::update_album(
        &state.db,
        album.id,
        &form.artist,
        &form.title,
        &form.genre,
        stored.as_deref(),
    )
    .await?;

    Ok(Redirect::to(&format!("/{}/", album.id)).into_response())
}

/// POST /album/:id/delete/
///
/// Removes the album and all of its songs, then returns to the index.
pub async fn delete_album(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(album_id): Path<i64>,
) -> Result<Response, ApiError> {
    let Some(album) = db::albums::get_album(&state.db, album_id).await? else {
        return Ok(Redirect::to("/").into_response());
    };
    if !policy::can_access_album(&user, &album) {
        return Ok(Redirect::to("/").into_response());
    }

    db::albums::delete_album(&state.db, album.id).await?;

    Ok(Redirect::to("/").into_response())
}

/// GET /:album_id/favourite/
///
/// Flips the flag and returns to wherever the user came from.
pub async fn favourite_album(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    headers: HeaderMap,
    Path(album_id): Path<i64>,
) -> Result<Response, ApiError> {
    if db::albums::get_album(&state.db, album_id).await?.is_none() {
        return Ok(Redirect::to("/").into_response());
    }

    db::albums::toggle_favourite(&state.db, album_id).await?;

    Ok(Redirect::to(&referrer(&headers)).into_response())
}
