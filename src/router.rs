use crate::api::ListingsApi;
use crate::auth::guard::sign_in_path;
use crate::auth::sign_in::FieldErrors;
use crate::auth::{check_access, sign_in, Access, SignInForm, SignInOutcome};
use crate::config::AppConfig;
use crate::domain::filters::FilterUpdate;
use crate::errors::ServerError;
use crate::locale::Locale;
use crate::responses::{html_response, hx_redirect, redirect, ResultResp};
use crate::search::url_sync::{query_of, CURRENT_URL_HEADER, REPLACE_URL_HEADER};
use crate::search::SearchSessions;
use crate::session::{expired_cookie, set_cookie, Session, LOCALE_COOKIE, TOKEN_COOKIE};
use crate::templates::{self, default_nav, Chrome};
use astra::Request;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

const HX_REQUEST_HEADER: &str = "HX-Request";
const RESET_KEY: &str = "reset";

/// Everything a request handler needs. Built once in `main`.
pub struct AppState {
    pub default_locale: Locale,
    /// How long a handler waits for in-flight fetches before rendering.
    pub settle_timeout: Duration,
    pub api: Arc<dyn ListingsApi>,
    pub searches: SearchSessions,
}

impl AppState {
    pub fn new(api: Arc<dyn ListingsApi>, cfg: &AppConfig) -> Self {
        Self {
            default_locale: cfg.default_locale,
            settle_timeout: cfg.request_timeout,
            searches: SearchSessions::new(Arc::clone(&api), cfg.search_session_capacity),
            api,
        }
    }
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().unwrap_or_default().to_string();
    let htmx = header(&req, HX_REQUEST_HEADER).as_deref() == Some("true");

    tracing::debug!(%method, %path, htmx, "request");

    if path == "/" {
        return redirect(&format!("/{}", state.default_locale.code()), &[]);
    }

    let (locale, rest) = split_locale(&path).ok_or(ServerError::NotFound)?;

    let session = match check_access(&req, state.default_locale) {
        Access::Public(session) | Access::Granted(session) => session,
        Access::SignInRequired { location } if htmx => return hx_redirect(&location, &[]),
        Access::SignInRequired { location } => return redirect(&location, &[]),
    };

    let mut resp = match (method.as_str(), rest) {
        ("GET", "") => listings_page(state, &session, &query)?,
        ("GET", "/listings") => {
            let current = header(&req, CURRENT_URL_HEADER)
                .map(|url| query_of(&url))
                .unwrap_or_default();
            listings_partial(state, &session, &query, &current, htmx)?
        }
        ("GET", "/sign-in") => sign_in_page(&session, &SignInForm::default())?,
        ("POST", "/sign-in") => {
            let form = SignInForm::from_body(&read_body(req)?);
            sign_in_submit(state, &session, locale, &form)?
        }
        ("POST", "/sign-out") => sign_out(state, &session)?,
        _ => return Err(ServerError::NotFound),
    };

    if let Ok(value) = locale.code().parse() {
        resp.headers_mut().insert("Accept-Language", value);
    }
    Ok(resp)
}

/// `/en/listings` -> `(En, "/listings")`. A trailing slash is ignored.
fn split_locale(path: &str) -> Option<(Locale, &str)> {
    let trimmed = path.trim_start_matches('/');
    let (code, rest) = match trimmed.find('/') {
        Some(i) => trimmed.split_at(i),
        None => (trimmed, ""),
    };
    let locale = Locale::from_code(code)?;
    Some((locale, rest.trim_end_matches('/')))
}

fn header(req: &Request, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn read_body(req: Request) -> Result<Vec<u8>, ServerError> {
    let mut buf = Vec::new();
    req.into_body()
        .reader()
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("unreadable body: {e}")))?;
    Ok(buf)
}

fn listings_page(state: &AppState, session: &Session, query: &str) -> ResultResp {
    let search = state.searches.open(session, query);
    let view = search.settle(state.settle_timeout);

    if view.listings.unauthorized {
        return expire_session(state, session, false);
    }

    let locale = session.locale;
    let chrome = Chrome {
        locale,
        title: locale.t("metadata.title"),
        current: &view.listings.address,
        signed_in: true,
        nav: templates::pages::type_nav(locale, &view.categories.parents),
    };
    html_response(templates::pages::listings_page(&chrome, &view))
}

/// htmx partial for one filter change.
///
/// The live search is reused when there is one; otherwise it is rebuilt from
/// the browser's current address before the change is applied.
fn listings_partial(
    state: &AppState,
    session: &Session,
    query: &str,
    current_query: &str,
    htmx: bool,
) -> ResultResp {
    let reset = url::form_urlencoded::parse(query.as_bytes()).any(|(k, _)| k == RESET_KEY);
    let update = if reset {
        None
    } else {
        Some(FilterUpdate::from_query(query).map_err(|e| ServerError::BadRequest(e.to_string()))?)
    };

    let search = state.searches.get_or_mount(session, current_query);
    match &update {
        Some(update) => search.update_filters(update),
        None => search.reset_filters(),
    };
    let view = search.settle(state.settle_timeout);

    if view.listings.unauthorized {
        return expire_session(state, session, htmx);
    }

    let markup = if reset {
        templates::pages::search_section(session.locale, &view)
    } else {
        templates::pages::listings_partial(session.locale, &view)
    };

    let mut resp = html_response(markup)?;
    if let Ok(value) = view.listings.address.parse() {
        resp.headers_mut().insert(REPLACE_URL_HEADER, value);
    }
    Ok(resp)
}

fn sign_in_page(session: &Session, form: &SignInForm) -> ResultResp {
    render_sign_in(session, form, &FieldErrors::default(), None)
}

fn render_sign_in(
    session: &Session,
    form: &SignInForm,
    errors: &FieldErrors,
    message: Option<&str>,
) -> ResultResp {
    let locale = session.locale;
    let current = sign_in_path(locale);
    let chrome = Chrome {
        locale,
        title: locale.t("auth.sign_in"),
        current: &current,
        signed_in: session.token.is_some(),
        nav: default_nav(locale),
    };
    html_response(templates::pages::sign_in_page(&chrome, form, errors, message))
}

fn sign_in_submit(
    state: &AppState,
    session: &Session,
    locale: Locale,
    form: &SignInForm,
) -> ResultResp {
    match sign_in(state.api.as_ref(), form, locale, chrono::Utc::now()) {
        SignInOutcome::SignedIn { token, max_age } => {
            // A previous account's search must not leak into the new one.
            state.searches.close(session);
            redirect(
                &format!("/{}", locale.code()),
                &[
                    set_cookie(TOKEN_COOKIE, &token, max_age),
                    set_cookie(LOCALE_COOKIE, locale.code(), max_age),
                ],
            )
        }
        SignInOutcome::Invalid(errors) => render_sign_in(session, form, &errors, None),
        SignInOutcome::Failed(message) => {
            render_sign_in(session, form, &FieldErrors::default(), Some(&message))
        }
    }
}

fn sign_out(state: &AppState, session: &Session) -> ResultResp {
    state.searches.close(session);
    tracing::info!("signed out");
    redirect(&sign_in_path(session.locale), &cleared_cookies())
}

/// The backend refused the token: forget it and send the browser to sign-in.
fn expire_session(state: &AppState, session: &Session, htmx: bool) -> ResultResp {
    tracing::info!("backend rejected session token");
    state.searches.close(session);
    let location = sign_in_path(session.locale);
    if htmx {
        hx_redirect(&location, &cleared_cookies())
    } else {
        redirect(&location, &cleared_cookies())
    }
}

fn cleared_cookies() -> [String; 2] {
    [expired_cookie(TOKEN_COOKIE), expired_cookie(LOCALE_COOKIE)]
}
