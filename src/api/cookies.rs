//! Session cookie construction.

use axum_extra::extract::cookie::{Cookie, SameSite};

/// Cookie carrying a session token for `days` days.
pub fn session_cookie(name: &'static str, token: String, days: i64) -> Cookie<'static> {
    Cookie::build((name, token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .max_age(time::Duration::days(days))
        .build()
}

/// Empty cookie that expires immediately, clearing the session.
pub fn cleared_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let rendered = session_cookie("patientToken", "abc".into(), 7).to_string();

        assert!(rendered.starts_with("patientToken=abc"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("Secure"));
        assert!(rendered.contains("SameSite=None"));
        assert!(rendered.contains("Max-Age=604800"));
    }

    #[test]
    fn test_cleared_cookie_is_empty_and_expired() {
        let rendered = cleared_cookie("adminToken").to_string();

        assert!(rendered.starts_with("adminToken=;"));
        assert!(rendered.contains("Max-Age=0"));
    }
}
