//! Cookie builder for the session token.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the session token.
pub const SYNTRA_SESSION_TOKEN: &str = "syntra_session_token";

/// Session-token JWT lifetime and cookie Max-Age in seconds (30 days).
pub const SESSION_TOKEN_EXP: u64 = 2_592_000;

/// Set the session-token cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use syntra_session_types::cookie::{set_session_cookie, SYNTRA_SESSION_TOKEN};
///
/// let jar = CookieJar::new();
/// let jar = set_session_cookie(jar, "token_value".to_string(), "example.com".to_string());
/// let cookie = jar.get(SYNTRA_SESSION_TOKEN).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(2_592_000)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(jar: CookieJar, value: String, domain: String) -> CookieJar {
    let cookie = Cookie::build((SYNTRA_SESSION_TOKEN, value))
        .path("/")
        .domain(domain)
        .max_age(Duration::seconds(SESSION_TOKEN_EXP as i64))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear the session-token cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use syntra_session_types::cookie::{
///     clear_session_cookie, set_session_cookie, SYNTRA_SESSION_TOKEN,
/// };
///
/// let jar = CookieJar::new();
/// let jar = set_session_cookie(jar, "t".to_string(), "example.com".to_string());
/// let jar = clear_session_cookie(jar, "example.com".to_string());
/// let cookie = jar.get(SYNTRA_SESSION_TOKEN).unwrap();
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_session_cookie(jar: CookieJar, domain: String) -> CookieJar {
    let cookie = Cookie::build((SYNTRA_SESSION_TOKEN, ""))
        .path("/")
        .domain(domain)
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}
