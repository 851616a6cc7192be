use crate::router::handle;
use crate::tests::utils::{test_state, FakeApi};
use astra::Body;
use http::{Method, Request};
use std::sync::Arc;

fn location(resp: &astra::Response) -> &str {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

#[test]
fn root_redirects_to_default_locale() {
    let state = test_state(Arc::new(FakeApi::default()));

    let req = Request::builder()
        .method(Method::GET)
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &state).expect("Handler failed");
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/en");
}

#[test]
fn listings_without_token_redirect_to_sign_in() {
    let api = Arc::new(FakeApi::default());
    let state = test_state(api.clone());

    let req = Request::builder()
        .method(Method::GET)
        .uri("/en?cityId=1")
        .header("Cookie", "locale=ar")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &state).expect("Handler failed");
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/ar/sign-in");
    assert!(api.listing_calls().is_empty());
}

#[test]
fn htmx_request_without_token_gets_hx_redirect() {
    let state = test_state(Arc::new(FakeApi::default()));

    let req = Request::builder()
        .method(Method::GET)
        .uri("/en/listings?pageNumber=2")
        .header("HX-Request", "true")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("HX-Redirect").unwrap().to_str().unwrap(),
        "/en/sign-in"
    );
}

#[test]
fn unknown_locale_is_not_found() {
    let state = test_state(Arc::new(FakeApi::default()));

    let req = Request::builder()
        .method(Method::GET)
        .uri("/fr")
        .header("Cookie", "token=t")
        .body(Body::empty())
        .unwrap();

    assert!(matches!(
        handle(req, &state),
        Err(crate::errors::ServerError::NotFound)
    ));
}

#[test]
fn responses_carry_accept_language_of_path() {
    let state = test_state(Arc::new(FakeApi::default()));

    let req = Request::builder()
        .method(Method::GET)
        .uri("/ar/sign-in")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Accept-Language").unwrap().to_str().unwrap(),
        "ar"
    );
}
