// src/auth/sign_in.rs
use crate::api::models::{AuthResponse, SignInRequest};
use crate::api::{ApiError, ListingsApi};
use crate::locale::Locale;
use chrono::{DateTime, NaiveDateTime, Utc};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Raw sign-in form as posted by the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

/// Per-field label keys for the form. `None` means the field is fine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignInOutcome {
    SignedIn {
        token: String,
        /// Seconds until `expiresOn`; `None` keeps the cookie for the browser session.
        max_age: Option<i64>,
    },
    Invalid(FieldErrors),
    /// Message for the whole form, already in the caller's locale.
    Failed(String),
}

impl SignInForm {
    pub fn from_body(body: &[u8]) -> Self {
        let mut form = SignInForm::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            match &*key {
                "email" => form.email = value.into_owned(),
                "password" => form.password = value.into_owned(),
                _ => {}
            }
        }
        form
    }

    pub fn validate(&self) -> Result<SignInRequest, FieldErrors> {
        let mut errors = FieldErrors::default();

        let email = normalize_email(&self.email);
        if email.is_none() {
            errors.email = Some("auth.invalid_email");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.password = Some("auth.password_too_short");
        }

        match email {
            Some(user_name_or_email) if errors.is_empty() => Ok(SignInRequest {
                user_name_or_email,
                password: self.password.clone(),
            }),
            _ => Err(errors),
        }
    }
}

/// Trim + lowercase, then a minimal shape check: one `@`, a non-empty local
/// part and a dotted domain.
pub fn normalize_email(email: &str) -> Option<String> {
    let e = email.trim().to_lowercase();
    let (local, domain) = e.split_once('@')?;
    if local.is_empty()
        || domain.contains('@')
        || e.chars().any(char::is_whitespace)
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return None;
    }
    Some(e)
}

pub fn sign_in(
    api: &dyn ListingsApi,
    form: &SignInForm,
    locale: Locale,
    now: DateTime<Utc>,
) -> SignInOutcome {
    let request = match form.validate() {
        Ok(request) => request,
        Err(errors) => return SignInOutcome::Invalid(errors),
    };

    match api.sign_in(&request, locale) {
        Ok(auth) if auth.is_authenticated && !auth.token.is_empty() => {
            tracing::info!(user = %auth.user_name, "signed in");
            SignInOutcome::SignedIn {
                max_age: max_age(&auth, now),
                token: auth.token,
            }
        }
        Ok(_) | Err(ApiError::Unauthorized) => {
            SignInOutcome::Failed(locale.t("auth.invalid_credentials").to_string())
        }
        Err(err @ ApiError::Rejected { .. }) => {
            tracing::info!(error = %err, "sign-in rejected");
            SignInOutcome::Failed(err.user_message(locale.t("auth.invalid_credentials")))
        }
        Err(err) => {
            tracing::warn!(error = %err, "sign-in request failed");
            SignInOutcome::Failed(locale.t("auth.generic_error").to_string())
        }
    }
}

fn max_age(auth: &AuthResponse, now: DateTime<Utc>) -> Option<i64> {
    let expires = parse_expiry(auth.expires_on.as_deref()?)?;
    Some((expires - now).num_seconds().max(0))
}

/// RFC 3339, or a naive timestamp taken as UTC.
fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
