//! HTTP API handlers for tunevault-ui

pub mod albums;
pub mod health;
pub mod notice;
pub mod pages;
pub mod songs;
pub mod users;

pub use albums::{
    album_detail, album_edit_form, album_form, album_index, create_album, delete_album,
    favourite_album, search_albums, update_album,
};
pub use health::health_routes;
pub use songs::{
    create_song, delete_song, favourite_song, song_edit_form, song_form, song_index, update_song,
};
pub use users::{
    login_form, login_submit, logout, profile_form, register_form, register_submit,
    update_profile,
};

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors surfaced by HTTP handlers
///
/// Everything recoverable (unknown ids, foreign albums, bad uploads) is
/// handled as a redirect before reaching this type; what remains is faults.
#[derive(Debug)]
pub enum ApiError {
    Database(String),
    Upload(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {}", msg))
            }
            ApiError::Upload(msg) => (StatusCode::BAD_REQUEST, format!("Upload error: {}", msg)),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Internal error: {}", msg))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

impl From<tunevault_common::Error> for ApiError {
    fn from(e: tunevault_common::Error) -> Self {
        match e {
            tunevault_common::Error::Database(err) => ApiError::Database(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}

/// Referrer-based redirect target, falling back to the album index when the
/// caller sent no Referer header
pub fn referrer(headers: &HeaderMap) -> String {
    headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("/")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn referrer_falls_back_to_index() {
        let headers = HeaderMap::new();
        assert_eq!(referrer(&headers), "/");
    }

    #[test]
    fn referrer_uses_the_header_when_present() {
        let mut headers = HeaderMap::new();
        headers.insert(header::REFERER, HeaderValue::from_static("/songs"));
        assert_eq!(referrer(&headers), "/songs");
    }
}
