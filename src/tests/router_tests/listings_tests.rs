use crate::api::ApiError;
use crate::router::handle;
use crate::tests::utils::{
    category, city, listing_type, location, page_named, test_state, FakeApi,
};
use astra::Body;
use http::{Method, Request};
use std::io::Read;
use std::sync::Arc;

fn get(uri: &str) -> http::request::Builder {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("Cookie", "token=t1; locale=en")
}

fn body_of(resp: astra::Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

#[test]
fn full_page_reads_filters_from_address() {
    let api = Arc::new(FakeApi::default());
    api.set_listings(page_named(&["Azimut 60", "Sunseeker"], 37));
    api.set_cities(vec![city(1, "Dubai")]);
    api.set_locations(1, vec![location(10, "Dubai Marina", 1)]);
    let state = test_state(api.clone());

    let req = get("/en?cityId=1&pageNumber=2").body(Body::empty()).unwrap();
    let resp = handle(req, &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_of(resp);
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(body.contains("Azimut 60"));
    assert!(body.contains("37 results"));
    assert!(body.contains(r#"<option value="1" selected>Dubai</option>"#));
    assert!(body.contains("Dubai Marina"));

    let calls = api.listing_calls();
    assert_eq!(calls.last().unwrap().city_id, Some(1));
    assert_eq!(calls.last().unwrap().page_number, 2);
}

#[test]
fn partial_merges_change_resets_page_and_replaces_url() {
    let api = Arc::new(FakeApi::default());
    api.set_listings(page_named(&["A"], 40));
    let state = test_state(api.clone());

    handle(get("/en?pageNumber=3").body(Body::empty()).unwrap(), &state)
        .expect("Handler failed");

    let req = get("/en/listings?cityId=5")
        .header("HX-Request", "true")
        .body(Body::empty())
        .unwrap();
    let resp = handle(req, &state).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("HX-Replace-Url").unwrap().to_str().unwrap(),
        "/en?pageNumber=1&pageSize=12&cityId=5"
    );

    let body = body_of(resp);
    assert!(!body.contains("<html"));
    assert!(body.contains(r#"id="location-field" class="field" hx-swap-oob="true""#));

    let last = api.listing_calls().last().cloned().unwrap();
    assert_eq!(last.city_id, Some(5));
    assert_eq!(last.page_number, 1);
    assert_eq!(api.location_calls(), vec![5]);
}

#[test]
fn page_button_keeps_other_filters() {
    let api = Arc::new(FakeApi::default());
    api.set_listings(page_named(&["A"], 40));
    let state = test_state(api.clone());

    handle(get("/en?search=jet").body(Body::empty()).unwrap(), &state).expect("Handler failed");

    let resp = handle(
        get("/en/listings?pageNumber=2").body(Body::empty()).unwrap(),
        &state,
    )
    .expect("Handler failed");

    assert_eq!(
        resp.headers().get("HX-Replace-Url").unwrap().to_str().unwrap(),
        "/en?pageNumber=2&pageSize=12&search=jet"
    );
}

#[test]
fn new_city_drops_the_old_location() {
    let api = Arc::new(FakeApi::default());
    api.set_locations(1, vec![location(10, "Dubai Marina", 1)]);
    api.set_locations(2, vec![location(20, "Corniche", 2)]);
    let state = test_state(api.clone());

    handle(
        get("/en?cityId=1&locationId=10&listingTypeId=4&listingCategoryId=40")
            .body(Body::empty())
            .unwrap(),
        &state,
    )
    .expect("Handler failed");

    // The whole form comes back, old location and category included.
    let req = get(
        "/en/listings?cityId=2&locationId=10&listingTypeId=5&listingCategoryId=40&search=",
    )
    .header("HX-Request", "true")
    .body(Body::empty())
    .unwrap();
    let resp = handle(req, &state).expect("Handler failed");

    assert_eq!(
        resp.headers().get("HX-Replace-Url").unwrap().to_str().unwrap(),
        "/en?pageNumber=1&pageSize=12&cityId=2&listingTypeId=5"
    );
    let body = body_of(resp);
    assert!(body.contains(r#"<option value="20">Corniche</option>"#));
    assert!(!body.contains("selected>Corniche"));

    let last = api.listing_calls().last().cloned().unwrap();
    assert_eq!(last.city_id, Some(2));
    assert_eq!(last.location_id, None);
    assert_eq!(last.listing_type_id, Some(5));
    assert_eq!(last.listing_category_id, None);
}

#[test]
fn listing_types_fill_nav_and_categories_swap_in() {
    let api = Arc::new(FakeApi::default());
    api.set_types(vec![listing_type(3, "Yachts"), listing_type(4, "Jet Skis")]);
    api.set_categories(3, vec![category(30, "Sailing", 3)]);
    let state = test_state(api.clone());

    let resp = handle(get("/en").body(Body::empty()).unwrap(), &state).expect("Handler failed");
    let body = body_of(resp);
    assert!(body.contains(r#"href="/en?listingTypeId=4""#));
    assert!(body.contains(r#"<option value="3">Yachts</option>"#));

    let req = get("/en/listings?listingTypeId=3")
        .header("HX-Request", "true")
        .body(Body::empty())
        .unwrap();
    let body = body_of(handle(req, &state).expect("Handler failed"));

    assert!(body.contains(r#"id="category-field" class="field" hx-swap-oob="true""#));
    assert!(body.contains(r#"<option value="30">Sailing</option>"#));
    assert_eq!(api.category_calls(), vec![Some(3)]);
}

#[test]
fn lost_search_is_rebuilt_from_current_url() {
    let api = Arc::new(FakeApi::default());
    let state = test_state(api.clone());

    let req = get("/en/listings?pageNumber=2")
        .header("HX-Current-URL", "http://localhost:3000/en?listingTypeId=4&pageNumber=1")
        .body(Body::empty())
        .unwrap();
    let resp = handle(req, &state).expect("Handler failed");

    assert_eq!(
        resp.headers().get("HX-Replace-Url").unwrap().to_str().unwrap(),
        "/en?pageNumber=2&pageSize=12&listingTypeId=4"
    );
    assert_eq!(api.category_calls(), vec![Some(4)]);
}

#[test]
fn bad_filter_value_is_rejected() {
    let state = test_state(Arc::new(FakeApi::default()));

    let req = get("/en/listings?cityId=abc").body(Body::empty()).unwrap();
    assert!(matches!(
        handle(req, &state),
        Err(crate::errors::ServerError::BadRequest(_))
    ));
}

#[test]
fn reset_returns_whole_search_section_with_defaults() {
    let api = Arc::new(FakeApi::default());
    let state = test_state(api.clone());

    handle(get("/en?cityId=2&search=x").body(Body::empty()).unwrap(), &state)
        .expect("Handler failed");

    let resp = handle(
        get("/en/listings?reset=true").body(Body::empty()).unwrap(),
        &state,
    )
    .expect("Handler failed");

    assert_eq!(
        resp.headers().get("HX-Replace-Url").unwrap().to_str().unwrap(),
        "/en?pageNumber=1&pageSize=12"
    );
    let body = body_of(resp);
    assert!(body.contains(r#"id="search""#));
    assert!(!body.contains("hx-swap-oob"));
}

#[test]
fn backend_failure_is_shown_inline() {
    let api = Arc::new(FakeApi::default());
    api.fail_listings(ApiError::Network("connection refused".into()));
    let state = test_state(api);

    let resp = handle(get("/en").body(Body::empty()).unwrap(), &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert!(body_of(resp).contains("Failed to fetch listings"));
}

#[test]
fn expired_token_signs_the_browser_out() {
    let api = Arc::new(FakeApi::default());
    api.fail_listings(ApiError::Unauthorized);
    let state = test_state(api);

    let resp = handle(get("/ar").body(Body::empty()).unwrap(), &state).expect("Handler failed");

    assert_eq!(resp.status(), 302);
    assert_eq!(resp.headers().get("Location").unwrap(), "/ar/sign-in");
    assert_eq!(state.searches.len(), 0);
}

#[test]
fn arabic_page_is_rtl() {
    let state = test_state(Arc::new(FakeApi::default()));

    let resp = handle(get("/ar").body(Body::empty()).unwrap(), &state).expect("Handler failed");
    let body = body_of(resp);
    assert!(body.contains(r#"dir="rtl""#));
    assert!(body.contains(r#"href="/en?pageNumber=1&amp;pageSize=12""#));
}
