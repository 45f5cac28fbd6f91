//! Session authentication
//!
//! Identity is carried in a session cookie holding an opaque token; the
//! matching row in the sessions table resolves to a user on every request.
//! Handlers receive the authenticated identity explicitly via [`CurrentUser`]
//! rather than reading any ambient state.

pub mod passwords;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts, response::Redirect};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tunevault_common::db::models::User;

use crate::{db, AppState};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "tunevault_session";

/// Authenticated user, resolved from the request's session cookie.
///
/// Rejection is a redirect to the login page; protected handlers never see
/// an unauthenticated request.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
            return Err(Redirect::to("/login/"));
        };

        match db::sessions::user_for_token(&state.db, &token).await {
            Ok(Some(user)) => Ok(CurrentUser(user)),
            Ok(None) => Err(Redirect::to("/login/")),
            Err(e) => {
                tracing::warn!("Session lookup failed: {}", e);
                Err(Redirect::to("/login/"))
            }
        }
    }
}

/// Build the session cookie for a freshly issued token
pub fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie
}

/// Cookie used to clear the session on logout
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie
}
