// src/search/sessions.rs
use crate::api::models::{City, ListingCategory, ListingType, Location};
use crate::api::ListingsApi;
use crate::domain::filters::{FilterUpdate, ListingFilter};
use crate::locale::Locale;
use crate::search::listings::{ListingsController, ListingsView};
use crate::search::lookups::{CityLocations, LookupController, LookupView, TypeCategories};
use crate::search::url_sync::UrlSync;
use crate::session::Session;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// The listings controller and its two dependent lookups for one browser session.
pub struct SearchSession {
    /// Held across a filter write and the lookup keys that follow it.
    changes: Mutex<()>,
    listings: ListingsController,
    locations: LookupController<CityLocations>,
    categories: LookupController<TypeCategories>,
}

pub struct SearchView {
    pub listings: ListingsView,
    pub locations: LookupView<City, Location>,
    pub categories: LookupView<ListingType, ListingCategory>,
}

impl SearchSession {
    pub fn mount(api: Arc<dyn ListingsApi>, session: Session, query: &str) -> Self {
        let url = UrlSync::for_locale(session.locale);
        let search = Self {
            changes: Mutex::new(()),
            locations: LookupController::mount(
                CityLocations {
                    api: Arc::clone(&api),
                    country_id: None,
                },
                session.clone(),
            ),
            categories: LookupController::mount(
                TypeCategories {
                    api: Arc::clone(&api),
                },
                session.clone(),
            ),
            listings: ListingsController::mount(api, session, url, query),
        };
        let filters = search.listings.snapshot().filters;
        search.sync_lookups(&filters);
        search
    }

    pub fn update_filters(&self, update: &FilterUpdate) -> ListingFilter {
        let _order = self.changes.lock().unwrap_or_else(PoisonError::into_inner);
        let filters = self.listings.update_filters(update);
        self.sync_lookups(&filters);
        filters
    }

    pub fn reset_filters(&self) -> ListingFilter {
        let _order = self.changes.lock().unwrap_or_else(PoisonError::into_inner);
        let filters = self.listings.reset_filters();
        self.sync_lookups(&filters);
        filters
    }

    pub fn load_from_url(&self, query: &str) -> ListingFilter {
        let _order = self.changes.lock().unwrap_or_else(PoisonError::into_inner);
        let filters = self.listings.load_from_url(query);
        self.sync_lookups(&filters);
        filters
    }

    fn sync_lookups(&self, filters: &ListingFilter) {
        self.locations.set_key(filters.city_id);
        self.categories.set_key(filters.listing_type_id);
    }

    pub fn locale(&self) -> Locale {
        self.listings.session().locale
    }

    /// Wait (bounded by `timeout` overall) for everything in flight, then snapshot.
    pub fn settle(&self, timeout: Duration) -> SearchView {
        let deadline = Instant::now() + timeout;
        let listings = self.listings.settle(timeout);
        let left = deadline.saturating_duration_since(Instant::now());
        SearchView {
            listings,
            locations: self.locations.settle(left),
            categories: self
                .categories
                .settle(deadline.saturating_duration_since(Instant::now())),
        }
    }

    pub fn detach(&self) {
        self.listings.detach();
        self.locations.detach();
        self.categories.detach();
    }
}

struct Entry {
    search: Arc<SearchSession>,
    last_used: Instant,
}

/// Live searches keyed by session token, bounded in number.
/// The least recently used search is detached when the bound is exceeded.
pub struct SearchSessions {
    api: Arc<dyn ListingsApi>,
    capacity: usize,
    entries: Mutex<HashMap<String, Entry>>,
}

impl SearchSessions {
    pub fn new(api: Arc<dyn ListingsApi>, capacity: usize) -> Self {
        Self {
            api,
            capacity: capacity.max(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn key(session: &Session) -> String {
        session.token.clone().unwrap_or_default()
    }

    /// Full page load: the address is the source of truth.
    /// An existing search in the same locale is pointed at `query`.
    pub fn open(&self, session: &Session, query: &str) -> Arc<SearchSession> {
        if let Some(search) = self.touch(session) {
            search.load_from_url(query);
            return search;
        }
        self.insert(session, query)
    }

    /// Partial update: reuse the live search, or mount one from `fallback_query`
    /// (the browser's current address) if it is gone.
    pub fn get_or_mount(&self, session: &Session, fallback_query: &str) -> Arc<SearchSession> {
        self.touch(session)
            .unwrap_or_else(|| self.insert(session, fallback_query))
    }

    /// Detach and forget the search for `session`.
    pub fn close(&self, session: &Session) {
        let removed = self.lock().remove(&Self::key(session));
        if let Some(entry) = removed {
            entry.search.detach();
            tracing::debug!("search session closed");
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn touch(&self, session: &Session) -> Option<Arc<SearchSession>> {
        let mut entries = self.lock();
        let key = Self::key(session);

        let entry = entries.get_mut(&key)?;
        if entry.search.locale() != session.locale {
            // Results depend on Accept-Language; start over in the new locale.
            if let Some(old) = entries.remove(&key) {
                old.search.detach();
            }
            return None;
        }
        entry.last_used = Instant::now();
        Some(Arc::clone(&entry.search))
    }

    fn insert(&self, session: &Session, query: &str) -> Arc<SearchSession> {
        let search = Arc::new(SearchSession::mount(
            Arc::clone(&self.api),
            session.clone(),
            query,
        ));

        let mut entries = self.lock();
        while entries.len() >= self.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, e)| e.last_used)
                .map(|(k, _)| k.clone());
            match oldest.and_then(|k| entries.remove(&k)) {
                Some(evicted) => {
                    evicted.search.detach();
                    tracing::debug!("search session evicted");
                }
                None => break,
            }
        }

        if let Some(replaced) = entries.insert(
            Self::key(session),
            Entry {
                search: Arc::clone(&search),
                last_used: Instant::now(),
            },
        ) {
            replaced.search.detach();
        }

        search
    }
}
