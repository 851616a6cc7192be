// src/auth/guard.rs
use crate::locale::Locale;
use crate::session::{cookie_value, Session, LOCALE_COOKIE};
use astra::Request;

/// What the router may do with a request before dispatching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Sign-in pages: open to everyone. The token is passed along if present.
    Public(Session),
    Granted(Session),
    /// No token on a protected path.
    SignInRequired { location: String },
}

/// Locale for a request: the path segment, else the `locale` cookie, else `default`.
pub fn request_locale(req: &Request, default: Locale) -> Locale {
    Locale::from_path(req.uri().path())
        .or_else(|| cookie_value(req, LOCALE_COOKIE).and_then(|c| Locale::from_code(&c)))
        .unwrap_or(default)
}

pub fn is_public(path: &str) -> bool {
    path.contains("/sign-in")
}

pub fn check_access(req: &Request, default: Locale) -> Access {
    let path = req.uri().path();
    let token = Session::token_from_request(req);
    let locale = request_locale(req, default);

    if is_public(path) {
        return Access::Public(Session::new(token, locale));
    }

    match token {
        Some(token) => Access::Granted(Session::new(Some(token), locale)),
        None => {
            // Follows the locale cookie, not the path.
            let remembered = cookie_value(req, LOCALE_COOKIE)
                .and_then(|c| Locale::from_code(&c))
                .unwrap_or(default);
            tracing::debug!(path, "no session token, redirecting to sign-in");
            Access::SignInRequired {
                location: sign_in_path(remembered),
            }
        }
    }
}

pub fn sign_in_path(locale: Locale) -> String {
    format!("/{}/sign-in", locale.code())
}
