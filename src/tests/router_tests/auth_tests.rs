use crate::api::ApiError;
use crate::router::handle;
use crate::tests::utils::{auth_ok, test_state, FakeApi};
use astra::Body;
use http::{Method, Request};
use std::io::Read;
use std::sync::Arc;

fn post_sign_in(locale: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(format!("/{locale}/sign-in"))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(body.as_bytes().to_vec()))
        .unwrap()
}

fn set_cookies(resp: &astra::Response) -> Vec<String> {
    resp.headers()
        .get_all("Set-Cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

#[test]
fn sign_in_page_loads_successfully() {
    let state = test_state(Arc::new(FakeApi::default()));

    let req = Request::builder()
        .method(Method::GET)
        .uri("/en/sign-in")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &state).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();

    assert!(body.contains("Sign in"));
    assert!(body.contains(r#"action="/en/sign-in""#));
}

#[test]
fn successful_sign_in_sets_cookies_and_redirects() {
    let api = Arc::new(FakeApi::default());
    api.set_sign_in(Ok(auth_ok("jwt-1")));
    let state = test_state(api.clone());

    let resp = handle(
        post_sign_in("ar", "email=captain%40example.com&password=secret1"),
        &state,
    )
    .expect("Failed to handle request");

    assert_eq!(resp.status(), 302);
    assert_eq!(resp.headers().get("Location").unwrap(), "/ar");

    let cookies = set_cookies(&resp);
    assert!(cookies.iter().any(|c| c.starts_with("token=jwt-1;")));
    assert!(cookies.iter().any(|c| c.starts_with("locale=ar;")));

    let calls = api.sign_in_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, crate::locale::Locale::Ar);
}

#[test]
fn invalid_form_shows_field_errors_without_backend_call() {
    let api = Arc::new(FakeApi::default());
    let state = test_state(api.clone());

    let resp = handle(post_sign_in("en", "email=nope&password=123"), &state)
        .expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();

    assert!(body.contains("Please enter a valid email address"));
    assert!(body.contains("Password must be at least 6 characters"));
    assert!(body.contains(r#"value="nope""#));
    assert!(api.sign_in_calls().is_empty());
}

#[test]
fn rejected_credentials_show_message() {
    let api = Arc::new(FakeApi::default());
    api.set_sign_in(Err(ApiError::Rejected { message: None }));
    let state = test_state(api);

    let resp = handle(post_sign_in("en", "email=a%40b.com&password=secret1"), &state)
        .expect("Failed to handle request");

    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    assert!(body.contains("Invalid credentials"));
}

#[test]
fn sign_out_clears_cookies_and_search() {
    let api = Arc::new(FakeApi::default());
    let state = test_state(api.clone());

    let open = Request::builder()
        .method(Method::GET)
        .uri("/en")
        .header("Cookie", "token=t1")
        .body(Body::empty())
        .unwrap();
    handle(open, &state).expect("Failed to open search");
    assert_eq!(state.searches.len(), 1);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/en/sign-out")
        .header("Cookie", "token=t1")
        .body(Body::empty())
        .unwrap();
    let resp = handle(req, &state).expect("Failed to handle request");

    assert_eq!(resp.status(), 302);
    assert_eq!(resp.headers().get("Location").unwrap(), "/en/sign-in");
    assert!(set_cookies(&resp)
        .iter()
        .any(|c| c.starts_with("token=;") && c.contains("Max-Age=0")));
    assert_eq!(state.searches.len(), 0);
}
