// src/session.rs
use crate::locale::Locale;
use astra::Request;

pub const TOKEN_COOKIE: &str = "token";
pub const LOCALE_COOKIE: &str = "locale";

/// Who is asking, and in which language. Passed explicitly into every backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub locale: Locale,
}

impl Session {
    pub fn new(token: Option<String>, locale: Locale) -> Self {
        Self { token, locale }
    }

    pub fn anonymous(locale: Locale) -> Self {
        Self {
            token: None,
            locale,
        }
    }

    /// Token from the `token` cookie, else from `Authorization: Bearer`.
    pub fn token_from_request(req: &Request) -> Option<String> {
        cookie_value(req, TOKEN_COOKIE).or_else(|| bearer_token(req))
    }
}

pub fn cookie_value(req: &Request, name: &str) -> Option<String> {
    req.headers()
        .get_all("Cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `Set-Cookie` value for a site-wide cookie. `max_age` of `None` makes it a session cookie.
pub fn set_cookie(name: &str, value: &str, max_age: Option<i64>) -> String {
    let mut cookie = format!("{name}={value}; Path=/; SameSite=Lax");
    if name == TOKEN_COOKIE {
        cookie.push_str("; HttpOnly");
    }
    if let Some(secs) = max_age {
        cookie.push_str(&format!("; Max-Age={secs}"));
    }
    cookie
}

/// `Set-Cookie` value that removes `name`.
pub fn expired_cookie(name: &str) -> String {
    format!("{name}=; Path=/; Max-Age=0")
}

fn bearer_token(req: &Request) -> Option<String> {
    let header = req.headers().get("Authorization")?.to_str().ok()?;
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}
