// src/search/listings.rs
use crate::api::models::ListingsPage;
use crate::api::{ApiError, ListingsApi};
use crate::domain::filters::{FilterUpdate, ListingFilter};
use crate::search::shared::Shared;
use crate::search::url_sync::UrlSync;
use crate::session::Session;
use std::sync::Arc;
use std::time::Duration;

pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to fetch listings";

/// What the page renders from: the current filter, its address and the latest result.
#[derive(Debug, Clone)]
pub struct ListingsView {
    pub filters: ListingFilter,
    pub address: String,
    pub loading: bool,
    pub error: Option<String>,
    pub result: ListingsPage,
    /// The backend refused the session token on the latest fetch.
    pub unauthorized: bool,
}

struct ListingsState {
    filters: ListingFilter,
    address: String,
    loading: bool,
    error: Option<String>,
    result: ListingsPage,
    unauthorized: bool,
    /// Generation of the most recently initiated fetch.
    generation: u64,
    stale_discarded: u64,
    detached: bool,
}

/// Owns the filter for one search and keeps the result in step with it.
///
/// Each filter change starts exactly one fetch, tagged with a new generation.
/// A completion whose generation is no longer current is dropped, so the most
/// recently initiated fetch always wins regardless of completion order.
pub struct ListingsController {
    api: Arc<dyn ListingsApi>,
    session: Session,
    url: UrlSync,
    shared: Arc<Shared<ListingsState>>,
}

impl ListingsController {
    /// Build the starting filter from `query` and start the first fetch.
    pub fn mount(api: Arc<dyn ListingsApi>, session: Session, url: UrlSync, query: &str) -> Self {
        let filters = url.initial_state(query);
        let controller = Self {
            api,
            session,
            shared: Arc::new(Shared::new(ListingsState {
                address: url.address(&filters),
                filters: filters.clone(),
                loading: false,
                error: None,
                result: ListingsPage::default(),
                unauthorized: false,
                generation: 0,
                stale_discarded: 0,
                detached: false,
            })),
            url,
        };
        controller.replace_filters(|_| filters);
        controller
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Merge a partial change into the filter and refetch.
    pub fn update_filters(&self, update: &FilterUpdate) -> ListingFilter {
        self.replace_filters(|current| current.merge(update))
    }

    pub fn reset_filters(&self) -> ListingFilter {
        self.replace_filters(|_| ListingFilter::default())
    }

    /// Take the address bar as the source of truth again (full page load).
    pub fn load_from_url(&self, query: &str) -> ListingFilter {
        let next = self.url.initial_state(query);
        self.replace_filters(|_| next)
    }

    /// Derive the next filter from the current one and start its fetch.
    /// Reading, writing and the generation bump happen under one lock.
    fn replace_filters(&self, next: impl FnOnce(&ListingFilter) -> ListingFilter) -> ListingFilter {
        let url = &self.url;
        let (filters, generation) = self.shared.update(|st| {
            let filters = next(&st.filters);
            if st.detached {
                return (filters, None);
            }
            st.generation += 1;
            st.address = url.address(&filters);
            st.filters = filters.clone();
            st.loading = true;
            st.error = None;
            st.unauthorized = false;
            (filters, Some(st.generation))
        });

        let Some(generation) = generation else {
            tracing::debug!("filter change on a detached controller ignored");
            return filters;
        };

        tracing::debug!(generation, query = %filters.to_query_string(), "fetching listings");

        let api = Arc::clone(&self.api);
        let session = self.session.clone();
        let shared = Arc::clone(&self.shared);
        let requested = filters.clone();

        std::thread::spawn(move || {
            let outcome = api.get_listings(&session, &requested);
            complete(&shared, generation, outcome);
        });

        filters
    }

    pub fn snapshot(&self) -> ListingsView {
        let st = self.shared.lock();
        ListingsView {
            filters: st.filters.clone(),
            address: st.address.clone(),
            loading: st.loading,
            error: st.error.clone(),
            result: st.result.clone(),
            unauthorized: st.unauthorized,
        }
    }

    /// Wait for the latest fetch to finish, then snapshot.
    /// On timeout the snapshot still says `loading`.
    pub fn settle(&self, timeout: Duration) -> ListingsView {
        self.shared
            .wait_until(timeout, |st| !st.loading || st.detached);
        self.snapshot()
    }

    /// Stop applying results. In-flight fetches finish but their results are dropped.
    pub fn detach(&self) {
        self.shared.update(|st| {
            st.detached = true;
            st.loading = false;
        });
    }

    #[cfg(test)]
    pub(crate) fn stale_discarded(&self) -> u64 {
        self.shared.lock().stale_discarded
    }

    #[cfg(test)]
    pub(crate) fn wait_for_discards(&self, n: u64, timeout: Duration) -> bool {
        self.shared.wait_until(timeout, |st| st.stale_discarded >= n)
    }
}

impl Drop for ListingsController {
    fn drop(&mut self) {
        self.detach();
    }
}

fn complete(
    shared: &Shared<ListingsState>,
    generation: u64,
    outcome: Result<ListingsPage, ApiError>,
) {
    shared.update(|st| {
        if st.detached {
            tracing::debug!(generation, "listings result dropped after detach");
            return;
        }
        if generation != st.generation {
            st.stale_discarded += 1;
            tracing::warn!(
                generation,
                current = st.generation,
                discarded = st.stale_discarded,
                "stale listings response discarded"
            );
            return;
        }

        match outcome {
            Ok(page) => {
                st.result = page;
            }
            Err(err) => {
                tracing::warn!(error = %err, "listings fetch failed");
                st.unauthorized = err == ApiError::Unauthorized;
                st.error = Some(err.user_message(FETCH_FALLBACK_MESSAGE));
            }
        }
        st.loading = false;
    });
}
