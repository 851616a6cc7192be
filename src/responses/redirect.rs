// responses/redirect.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};

/// htmx follows this header with a full page navigation.
pub const HX_REDIRECT_HEADER: &str = "HX-Redirect";

/// `302 Found` to `location`, setting each of `cookies`.
pub fn redirect(location: &str, cookies: &[String]) -> ResultResp {
    let mut builder = ResponseBuilder::new()
        .status(302)
        .header("Location", location);
    for cookie in cookies {
        builder = builder.header("Set-Cookie", cookie.as_str());
    }
    builder
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}

/// Same as [`redirect`], but as a `200` that htmx turns into a navigation.
/// A plain 302 would only be followed inside the swap.
pub fn hx_redirect(location: &str, cookies: &[String]) -> ResultResp {
    let mut builder = ResponseBuilder::new()
        .status(200)
        .header(HX_REDIRECT_HEADER, location);
    for cookie in cookies {
        builder = builder.header("Set-Cookie", cookie.as_str());
    }
    builder
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}
