//! Registration, login, logout, and profile handlers

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::info;

use crate::auth::{self, passwords, CurrentUser, SESSION_COOKIE};
use crate::{db, AppState};

use super::notice::{set_notice, take_notice, Notice};
use super::pages;
use super::{referrer, ApiError};

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub password: String,
}

/// Whether the request already carries a valid session
async fn is_authenticated(state: &AppState, jar: &CookieJar) -> bool {
    match jar.get(SESSION_COOKIE) {
        Some(cookie) => matches!(
            db::sessions::user_for_token(&state.db, cookie.value()).await,
            Ok(Some(_))
        ),
        None => false,
    }
}

/// GET /register/
pub async fn register_form(State(state): State<AppState>, jar: CookieJar) -> Response {
    if is_authenticated(&state, &jar).await {
        return Redirect::to("/").into_response();
    }

    let (jar, notice) = take_notice(jar);
    (jar, Html(pages::register_page(notice))).into_response()
}

/// POST /register/
///
/// Creates the user and logs them straight in.
pub async fn register_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, ApiError> {
    let username = form.username.trim();
    if username.is_empty() || form.password.is_empty() {
        let jar = set_notice(jar, Notice::MissingFields);
        return Ok((jar, Redirect::to("/register/")).into_response());
    }

    if db::users::user_by_username(&state.db, username).await?.is_some() {
        let jar = set_notice(jar, Notice::UsernameTaken);
        return Ok((jar, Redirect::to("/register/")).into_response());
    }

    let hash = passwords::hash_password(&form.password);
    let user =
        db::users::create_user(&state.db, username, &hash, &form.first_name, &form.last_name)
            .await?;
    info!("Registered new user {}", user.username);

    let token = db::sessions::create_session(&state.db, user.id).await?;
    let jar = jar.add(auth::session_cookie(token));
    Ok((jar, Redirect::to("/")).into_response())
}

/// GET /login/
pub async fn login_form(State(state): State<AppState>, jar: CookieJar) -> Response {
    if is_authenticated(&state, &jar).await {
        return Redirect::to("/").into_response();
    }

    let (jar, notice) = take_notice(jar);
    (jar, Html(pages::login_page(notice))).into_response()
}

/// POST /login/
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    let user = db::users::user_by_username(&state.db, form.username.trim()).await?;

    match user {
        Some(user) if passwords::verify_password(&form.password, &user.password_hash) => {
            let token = db::sessions::create_session(&state.db, user.id).await?;
            let jar = jar.add(auth::session_cookie(token));
            Ok((jar, Redirect::to("/")).into_response())
        }
        _ => {
            let jar = set_notice(jar, Notice::BadCredentials);
            Ok((jar, Redirect::to("/login/")).into_response())
        }
    }
}

/// GET /logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, ApiError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        db::sessions::delete_session(&state.db, cookie.value()).await?;
    }

    let jar = jar.remove(auth::removal_cookie());
    Ok((jar, Redirect::to("/login/")).into_response())
}

/// GET /user/:id/edit
///
/// Only the user themself may open their profile form.
pub async fn profile_form(
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Response {
    if id != user.id {
        return Redirect::to("/").into_response();
    }

    Html(pages::profile_page(&user)).into_response()
}

/// POST /user/:id/edit
///
/// Replaces names and (when given) the password, then rotates the session so
/// the password change does not log the user out.
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Form(form): Form<ProfileForm>,
) -> Result<Response, ApiError> {
    if id != user.id {
        return Ok(Redirect::to("/").into_response());
    }

    // Empty password means "keep the current one"
    let hash = if form.password.is_empty() {
        user.password_hash.clone()
    } else {
        passwords::hash_password(&form.password)
    };

    db::users::update_user(&state.db, user.id, &form.first_name, &form.last_name, &hash).await?;

    let mut jar = jar;
    if let Some(old_token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) {
        let token = db::sessions::rotate_session(&state.db, &old_token, user.id).await?;
        jar = jar.add(auth::session_cookie(token));
    }

    Ok((jar, Redirect::to(&referrer(&headers))).into_response())
}
