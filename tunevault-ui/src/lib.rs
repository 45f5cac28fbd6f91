//! tunevault-ui library - the music library web service
//!
//! Session-authenticated users upload albums (artwork + metadata) and songs
//! (audio files), browse and search their own collection, and mark
//! favourites. Server-rendered HTML over axum, SQLite persistence.

use axum::Router;
use sqlx::SqlitePool;
use std::path::PathBuf;

pub mod api;
pub mod auth;
pub mod db;
pub mod policy;
pub mod uploads;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Directory holding uploaded artwork and audio files
    pub media_root: PathBuf,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, media_root: PathBuf) -> Self {
        Self { db, media_root }
    }
}

/// Build application router
///
/// Parameterized segments share names at each position (`:album_id`,
/// `:song_id`) so the static routes (`/album/...`, `/songs/...`,
/// `/search/...`, `/user/...`) can coexist with the id-first paths.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};
    use tower_http::services::ServeDir;
    use tower_http::trace::TraceLayer;

    let media = ServeDir::new(state.media_root.clone());

    Router::new()
        .route("/", get(api::album_index))
        .route("/login/", get(api::login_form).post(api::login_submit))
        .route("/register/", get(api::register_form).post(api::register_submit))
        .route("/logout", get(api::logout))
        .route("/search/results/", get(api::search_albums))
        .route("/songs", get(api::song_index))
        .route("/songs/:id/delete/", post(api::delete_song))
        .route("/album/add/", get(api::album_form).post(api::create_album))
        .route("/album/:id/", get(api::album_edit_form).post(api::update_album))
        .route("/album/:id/delete/", post(api::delete_album))
        .route("/user/:id/edit", get(api::profile_form).post(api::update_profile))
        .route("/:album_id/", get(api::album_detail))
        .route("/:album_id/favourite/", get(api::favourite_album))
        .route("/:album_id/add/", get(api::song_form).post(api::create_song))
        .route(
            "/:album_id/:song_id/favourite/",
            get(api::favourite_song),
        )
        .route(
            "/:album_id/:song_id/edit/",
            get(api::song_edit_form).post(api::update_song),
        )
        .merge(api::health_routes())
        .nest_service("/media", media)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
