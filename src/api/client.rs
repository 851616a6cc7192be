// client.rs
use crate::api::models::{
    AuthResponse, City, Envelope, ListingCategory, ListingType, ListingsPage, Location,
    SignInRequest,
};
use crate::api::ApiError;
use crate::domain::filters::ListingFilter;
use crate::locale::Locale;
use crate::session::Session;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT_LANGUAGE, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

const USER_AGENT: &str = concat!("marina_web/", env!("CARGO_PKG_VERSION"));

/// The listings backend. Every call is a pure function of its arguments;
/// nothing is read from ambient state.
pub trait ListingsApi: Send + Sync {
    fn get_listings(
        &self,
        session: &Session,
        filters: &ListingFilter,
    ) -> Result<ListingsPage, ApiError>;

    fn get_cities(&self, session: &Session, country_id: Option<i64>)
        -> Result<Vec<City>, ApiError>;

    fn get_locations(&self, session: &Session, city_id: i64) -> Result<Vec<Location>, ApiError>;

    fn get_listing_types(&self, session: &Session) -> Result<Vec<ListingType>, ApiError>;

    fn get_listing_categories(
        &self,
        session: &Session,
        listing_type_id: Option<i64>,
    ) -> Result<Vec<ListingCategory>, ApiError>;

    fn sign_in(&self, request: &SignInRequest, locale: Locale) -> Result<AuthResponse, ApiError>;
}

pub struct HttpListingsApi {
    client: Client,
    base_url: String,
}

impl HttpListingsApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_session(&self, builder: RequestBuilder, session: &Session) -> RequestBuilder {
        let builder = builder.header(ACCEPT_LANGUAGE, session.locale.code());
        match &session.token {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        }
    }

    fn get<T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, ApiError> {
        let builder = self.client.get(self.url(path)).query(query);
        self.send(self.with_session(builder, session), path)
    }

    fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        path: &str,
    ) -> Result<Option<T>, ApiError> {
        let start = Instant::now();

        let resp = builder
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        tracing::debug!(path, %status, elapsed = ?start.elapsed(), "backend call");

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let envelope: Envelope<T> = resp.json().map_err(|e| ApiError::Decode(e.to_string()))?;
        into_data(envelope)
    }
}

/// Unwrap the `{isSuccess, message, data, errors}` envelope.
pub fn into_data<T>(envelope: Envelope<T>) -> Result<Option<T>, ApiError> {
    if !envelope.is_success {
        if !envelope.errors.is_empty() {
            tracing::debug!(errors = ?envelope.errors, "backend rejected request");
        }
        return Err(ApiError::Rejected {
            message: envelope.message,
        });
    }
    Ok(envelope.data)
}

impl ListingsApi for HttpListingsApi {
    fn get_listings(
        &self,
        session: &Session,
        filters: &ListingFilter,
    ) -> Result<ListingsPage, ApiError> {
        let query = filters.to_query_pairs();
        Ok(self
            .get(session, "/api/listings/getAll", &query)?
            .unwrap_or_default())
    }

    fn get_cities(
        &self,
        session: &Session,
        country_id: Option<i64>,
    ) -> Result<Vec<City>, ApiError> {
        let query: Vec<(&str, String)> = country_id
            .map(|id| ("countryId", id.to_string()))
            .into_iter()
            .collect();
        Ok(self
            .get(session, "/api/cities/getAll", &query)?
            .unwrap_or_default())
    }

    fn get_locations(&self, session: &Session, city_id: i64) -> Result<Vec<Location>, ApiError> {
        let query = [("cityId", city_id.to_string())];
        Ok(self
            .get(session, "/api/listings/locations", &query)?
            .unwrap_or_default())
    }

    fn get_listing_types(&self, session: &Session) -> Result<Vec<ListingType>, ApiError> {
        Ok(self
            .get(session, "/api/listingTypes/getAll", &[])?
            .unwrap_or_default())
    }

    fn get_listing_categories(
        &self,
        session: &Session,
        listing_type_id: Option<i64>,
    ) -> Result<Vec<ListingCategory>, ApiError> {
        let query: Vec<(&str, String)> = listing_type_id
            .map(|id| ("listingTypeId", id.to_string()))
            .into_iter()
            .collect();
        Ok(self
            .get(session, "/api/listingCategories/getAll", &query)?
            .unwrap_or_default())
    }

    fn sign_in(&self, request: &SignInRequest, locale: Locale) -> Result<AuthResponse, ApiError> {
        let path = "/api/auth/token";
        let builder = self
            .client
            .post(self.url(path))
            .header(ACCEPT_LANGUAGE, locale.code())
            .json(request);

        self.send(builder, path)?
            .ok_or_else(|| ApiError::Decode("sign-in response carried no data".into()))
    }
}
