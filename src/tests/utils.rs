use crate::api::models::{
    AuthResponse, City, Listing, ListingCategory, ListingType, ListingsPage, Location, PriceType,
    SignInRequest, SortingValue,
};
use crate::api::{ApiError, ListingsApi};
use crate::config::AppConfig;
use crate::domain::filters::ListingFilter;
use crate::locale::Locale;
use crate::router::AppState;
use crate::search::shared::Shared;
use crate::session::Session;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

const HOLD_LIMIT: Duration = Duration::from_secs(10);

/// In-memory backend. Records every call and can hold responses back
/// so tests decide the order in which fetches complete.
pub struct FakeApi {
    state: Shared<FakeState>,
}

#[derive(Default)]
struct FakeState {
    listings: ListingsPage,
    listings_error: Option<ApiError>,
    listing_calls: Vec<ListingFilter>,
    hold_listings: bool,
    held_total: usize,
    released: HashMap<String, ListingsPage>,
    listings_finished: usize,

    cities: Vec<City>,
    city_calls: usize,
    locations: HashMap<i64, Vec<Location>>,
    location_calls: Vec<i64>,
    hold_locations: bool,
    locations_released: bool,
    location_returns: usize,

    types: Vec<ListingType>,
    categories: HashMap<i64, Vec<ListingCategory>>,
    category_calls: Vec<Option<i64>>,

    sign_in: Option<Result<AuthResponse, ApiError>>,
    sign_in_calls: Vec<(SignInRequest, Locale)>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            state: Shared::new(FakeState::default()),
        }
    }
}

impl FakeApi {
    pub fn set_listings(&self, page: ListingsPage) {
        self.state.update(|s| {
            s.listings = page;
            s.listings_error = None;
        });
    }

    pub fn fail_listings(&self, err: ApiError) {
        self.state.update(|s| s.listings_error = Some(err));
    }

    pub fn listing_calls(&self) -> Vec<ListingFilter> {
        self.state.lock().listing_calls.clone()
    }

    pub fn hold_listings(&self) {
        self.state.update(|s| s.hold_listings = true);
    }

    pub fn wait_for_held(&self, n: usize, timeout: Duration) -> bool {
        self.state.wait_until(timeout, |s| s.held_total >= n)
    }

    /// Let the held fetch whose `search` equals `search` complete with `page`.
    pub fn release_listings(&self, search: &str, page: ListingsPage) {
        self.state.update(|s| {
            s.released.insert(search.to_string(), page);
        });
    }

    pub fn wait_for_finished(&self, n: usize, timeout: Duration) -> bool {
        self.state.wait_until(timeout, |s| s.listings_finished >= n)
    }

    pub fn set_cities(&self, cities: Vec<City>) {
        self.state.update(|s| s.cities = cities);
    }

    pub fn city_calls(&self) -> usize {
        self.state.lock().city_calls
    }

    pub fn set_locations(&self, city_id: i64, locations: Vec<Location>) {
        self.state.update(|s| {
            s.locations.insert(city_id, locations);
        });
    }

    pub fn location_calls(&self) -> Vec<i64> {
        self.state.lock().location_calls.clone()
    }

    pub fn hold_locations(&self) {
        self.state.update(|s| s.hold_locations = true);
    }

    pub fn release_locations(&self) {
        self.state.update(|s| s.locations_released = true);
    }

    pub fn wait_for_location_returns(&self, n: usize, timeout: Duration) -> bool {
        self.state.wait_until(timeout, |s| s.location_returns >= n)
    }

    pub fn set_types(&self, types: Vec<ListingType>) {
        self.state.update(|s| s.types = types);
    }

    pub fn set_categories(&self, listing_type_id: i64, categories: Vec<ListingCategory>) {
        self.state.update(|s| {
            s.categories.insert(listing_type_id, categories);
        });
    }

    pub fn category_calls(&self) -> Vec<Option<i64>> {
        self.state.lock().category_calls.clone()
    }

    pub fn set_sign_in(&self, outcome: Result<AuthResponse, ApiError>) {
        self.state.update(|s| s.sign_in = Some(outcome));
    }

    pub fn sign_in_calls(&self) -> Vec<(SignInRequest, Locale)> {
        self.state.lock().sign_in_calls.clone()
    }
}

impl ListingsApi for FakeApi {
    fn get_listings(
        &self,
        _session: &Session,
        filters: &ListingFilter,
    ) -> Result<ListingsPage, ApiError> {
        let held = self.state.update(|s| {
            s.listing_calls.push(filters.clone());
            if s.hold_listings {
                s.held_total += 1;
            }
            s.hold_listings
        });

        let outcome = if held {
            let key = filters.search.clone().unwrap_or_default();
            self.state
                .wait_until(HOLD_LIMIT, |s| s.released.contains_key(&key));
            self.state
                .update(|s| s.released.remove(&key))
                .ok_or_else(|| ApiError::Network("held fetch never released".into()))
        } else {
            self.state.update(|s| match &s.listings_error {
                Some(err) => Err(err.clone()),
                None => Ok(s.listings.clone()),
            })
        };

        self.state.update(|s| s.listings_finished += 1);
        outcome
    }

    fn get_cities(
        &self,
        _session: &Session,
        _country_id: Option<i64>,
    ) -> Result<Vec<City>, ApiError> {
        self.state.update(|s| {
            s.city_calls += 1;
            Ok(s.cities.clone())
        })
    }

    fn get_locations(&self, _session: &Session, city_id: i64) -> Result<Vec<Location>, ApiError> {
        let held = self.state.update(|s| {
            s.location_calls.push(city_id);
            s.hold_locations
        });
        if held {
            self.state.wait_until(HOLD_LIMIT, |s| s.locations_released);
        }
        self.state.update(|s| {
            s.location_returns += 1;
            Ok(s.locations.get(&city_id).cloned().unwrap_or_default())
        })
    }

    fn get_listing_types(&self, _session: &Session) -> Result<Vec<ListingType>, ApiError> {
        Ok(self.state.lock().types.clone())
    }

    fn get_listing_categories(
        &self,
        _session: &Session,
        listing_type_id: Option<i64>,
    ) -> Result<Vec<ListingCategory>, ApiError> {
        self.state.update(|s| {
            s.category_calls.push(listing_type_id);
            Ok(listing_type_id
                .and_then(|id| s.categories.get(&id).cloned())
                .unwrap_or_default())
        })
    }

    fn sign_in(&self, request: &SignInRequest, locale: Locale) -> Result<AuthResponse, ApiError> {
        self.state.update(|s| {
            s.sign_in_calls.push((request.clone(), locale));
            s.sign_in
                .clone()
                .unwrap_or_else(|| Err(ApiError::Network("no sign-in configured".into())))
        })
    }
}

pub fn listing(id: i64, name: &str) -> Listing {
    Listing {
        id,
        name: name.to_string(),
        supplier_name: None,
        city_name: Some("Dubai".into()),
        location_name: Some("Dubai Marina".into()),
        listing_type_name: Some("Yachts".into()),
        listing_category_name: None,
        price: 2500.0,
        price_type: PriceType::Hour,
        price_discount_percentage: 0.0,
        is_featured: false,
        rating: 4.5,
        details: Vec::new(),
        attachments: Vec::new(),
    }
}

pub fn page_named(names: &[&str], total_records: u64) -> ListingsPage {
    ListingsPage {
        data: names
            .iter()
            .enumerate()
            .map(|(i, name)| listing(i as i64 + 1, name))
            .collect(),
        sorting_values: vec![SortingValue {
            display_name: "Price".into(),
            sort_key: "price".into(),
        }],
        total_records,
    }
}

pub fn location(id: i64, name: &str, city_id: i64) -> Location {
    Location {
        id,
        name: name.to_string(),
        city_id: Some(city_id),
    }
}

pub fn city(id: i64, name: &str) -> City {
    City {
        id,
        name: name.to_string(),
        country_id: Some(1),
    }
}

pub fn listing_type(id: i64, name: &str) -> ListingType {
    ListingType {
        id,
        name: name.to_string(),
        web_icon: None,
    }
}

pub fn category(id: i64, name: &str, listing_type_id: i64) -> ListingCategory {
    ListingCategory {
        id,
        name: name.to_string(),
        listing_type_id: Some(listing_type_id),
        web_icon: None,
    }
}

pub fn auth_ok(token: &str) -> AuthResponse {
    AuthResponse {
        is_authenticated: true,
        token: token.to_string(),
        email: "captain@example.com".into(),
        user_name: "captain".into(),
        expires_on: Some("2099-01-01T00:00:00Z".into()),
        roles: vec!["Customer".into()],
    }
}

/// App state over a fake backend, with short waits.
pub fn test_state(api: Arc<FakeApi>) -> AppState {
    let cfg = AppConfig {
        request_timeout: Duration::from_secs(5),
        ..AppConfig::default()
    };
    AppState::new(api, &cfg)
}
