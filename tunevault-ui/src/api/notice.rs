//! Transient user notices
//!
//! A notice survives exactly one redirect: set as a short cookie code on the
//! way out, read and cleared by the next page render.

use axum_extra::extract::cookie::{Cookie, CookieJar};

/// Name of the notice cookie
pub const NOTICE_COOKIE: &str = "tunevault_notice";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    InvalidFileType,
    BadCredentials,
    UsernameTaken,
    MissingFields,
}

impl Notice {
    /// Cookie-safe code
    pub fn code(self) -> &'static str {
        match self {
            Notice::InvalidFileType => "invalid-file-type",
            Notice::BadCredentials => "bad-credentials",
            Notice::UsernameTaken => "username-taken",
            Notice::MissingFields => "missing-fields",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "invalid-file-type" => Some(Notice::InvalidFileType),
            "bad-credentials" => Some(Notice::BadCredentials),
            "username-taken" => Some(Notice::UsernameTaken),
            "missing-fields" => Some(Notice::MissingFields),
            _ => None,
        }
    }

    /// User-visible message
    pub fn message(self) -> &'static str {
        match self {
            Notice::InvalidFileType => "Invalid file type. Please try again.",
            Notice::BadCredentials => "Invalid username or password.",
            Notice::UsernameTaken => "That username is already taken.",
            Notice::MissingFields => "Please fill in all required fields.",
        }
    }
}

/// Queue a notice for the next page render
pub fn set_notice(jar: CookieJar, notice: Notice) -> CookieJar {
    let mut cookie = Cookie::new(NOTICE_COOKIE, notice.code());
    cookie.set_path("/");
    jar.add(cookie)
}

/// Read and clear the pending notice, if any
pub fn take_notice(jar: CookieJar) -> (CookieJar, Option<Notice>) {
    let notice = jar
        .get(NOTICE_COOKIE)
        .and_then(|c| Notice::from_code(c.value()));

    let mut removal = Cookie::new(NOTICE_COOKIE, "");
    removal.set_path("/");
    (jar.remove(removal), notice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_roundtrip() {
        for notice in [
            Notice::InvalidFileType,
            Notice::BadCredentials,
            Notice::UsernameTaken,
            Notice::MissingFields,
        ] {
            assert_eq!(Notice::from_code(notice.code()), Some(notice));
        }
        assert_eq!(Notice::from_code("garbage"), None);
    }

    #[test]
    fn set_then_take_clears_the_cookie() {
        let jar = set_notice(CookieJar::new(), Notice::InvalidFileType);
        let (jar, notice) = take_notice(jar);
        assert_eq!(notice, Some(Notice::InvalidFileType));
        // already cleared on the returned jar
        let (_, again) = take_notice(jar);
        assert_eq!(again, None);
    }
}
