// src/search/url_sync.rs
use crate::domain::filters::ListingFilter;
use crate::locale::Locale;

/// htmx replaces the address bar with this value, without a new history entry.
pub const REPLACE_URL_HEADER: &str = "HX-Replace-Url";
/// htmx sends the browser's current address with every request.
pub const CURRENT_URL_HEADER: &str = "HX-Current-URL";

/// Mirrors a filter to the address bar and reads it back on first load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlSync {
    base_path: String,
}

impl UrlSync {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn for_locale(locale: Locale) -> Self {
        Self::new(format!("/{}", locale.code()))
    }

    pub fn initial_state(&self, query: &str) -> ListingFilter {
        ListingFilter::from_query(query)
    }

    /// The address that represents `filters`.
    pub fn address(&self, filters: &ListingFilter) -> String {
        format!("{}?{}", self.base_path, filters.to_query_string())
    }
}

/// Query part of an absolute or relative URL, without the `?`.
pub fn query_of(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(parsed) => parsed.query().unwrap_or_default().to_string(),
        Err(_) => raw
            .split_once('?')
            .map(|(_, q)| q.split('#').next().unwrap_or_default().to_string())
            .unwrap_or_default(),
    }
}
