// src/search/lookups.rs
use crate::api::models::{City, ListingCategory, ListingType, Location};
use crate::api::{ApiError, ListingsApi};
use crate::search::shared::Shared;
use crate::session::Session;
use std::sync::Arc;
use std::time::Duration;

/// A top-level reference list plus the list that depends on one of its ids.
pub trait LookupSource: Send + Sync + 'static {
    type Parent: Clone + Send + 'static;
    type Child: Clone + Send + 'static;

    /// Short name for logs.
    const NAME: &'static str;

    fn fetch_parents(&self, session: &Session) -> Result<Vec<Self::Parent>, ApiError>;
    fn fetch_children(&self, session: &Session, key: i64) -> Result<Vec<Self::Child>, ApiError>;
}

/// Cities, and the locations of the selected city.
pub struct CityLocations {
    pub api: Arc<dyn ListingsApi>,
    pub country_id: Option<i64>,
}

impl LookupSource for CityLocations {
    type Parent = City;
    type Child = Location;
    const NAME: &'static str = "locations";

    fn fetch_parents(&self, session: &Session) -> Result<Vec<City>, ApiError> {
        self.api.get_cities(session, self.country_id)
    }

    fn fetch_children(&self, session: &Session, city_id: i64) -> Result<Vec<Location>, ApiError> {
        self.api.get_locations(session, city_id)
    }
}

/// Listing types, and the categories of the selected type.
pub struct TypeCategories {
    pub api: Arc<dyn ListingsApi>,
}

impl LookupSource for TypeCategories {
    type Parent = ListingType;
    type Child = ListingCategory;
    const NAME: &'static str = "categories";

    fn fetch_parents(&self, session: &Session) -> Result<Vec<ListingType>, ApiError> {
        self.api.get_listing_types(session)
    }

    fn fetch_children(
        &self,
        session: &Session,
        listing_type_id: i64,
    ) -> Result<Vec<ListingCategory>, ApiError> {
        self.api.get_listing_categories(session, Some(listing_type_id))
    }
}

/// Dependent list state.
///
/// `Empty -> Loading -> Populated` on key-set, back to `Empty` on key-clear,
/// and `Populated -> Loading -> Populated` when the key changes.
#[derive(Debug, Clone, PartialEq)]
pub enum DependentList<C> {
    Empty,
    Loading,
    Populated(Vec<C>),
}

impl<C> DependentList<C> {
    pub fn items(&self) -> &[C] {
        match self {
            DependentList::Populated(items) => items,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DependentList::Loading)
    }
}

#[derive(Debug, Clone)]
pub struct LookupView<P, C> {
    pub parents: Vec<P>,
    pub parents_loading: bool,
    pub key: Option<i64>,
    pub children: DependentList<C>,
    pub error: Option<String>,
}

struct LookupState<P, C> {
    parents: Vec<P>,
    parents_loading: bool,
    key: Option<i64>,
    children: DependentList<C>,
    error: Option<String>,
    generation: u64,
    detached: bool,
}

pub struct LookupController<S: LookupSource> {
    source: Arc<S>,
    session: Session,
    shared: Arc<Shared<LookupState<S::Parent, S::Child>>>,
}

impl<S: LookupSource> LookupController<S> {
    /// Start with an empty dependent list and fetch the top-level list once.
    pub fn mount(source: S, session: Session) -> Self {
        let controller = Self {
            source: Arc::new(source),
            session,
            shared: Arc::new(Shared::new(LookupState {
                parents: Vec::new(),
                parents_loading: true,
                key: None,
                children: DependentList::Empty,
                error: None,
                generation: 0,
                detached: false,
            })),
        };

        let source = Arc::clone(&controller.source);
        let session = controller.session.clone();
        let shared = Arc::clone(&controller.shared);

        std::thread::spawn(move || {
            let outcome = source.fetch_parents(&session);
            shared.update(|st| {
                st.parents_loading = false;
                if st.detached {
                    return;
                }
                match outcome {
                    Ok(parents) => st.parents = parents,
                    Err(err) => {
                        tracing::warn!(lookup = S::NAME, error = %err, "top-level lookup failed");
                        st.parents = Vec::new();
                    }
                }
            });
        });

        controller
    }

    /// Follow the governing key.
    ///
    /// Setting a new key fetches and replaces the dependent list; clearing it
    /// empties the list without a request. An unchanged key does nothing.
    pub fn set_key(&self, key: Option<i64>) {
        let generation = self.shared.update(|st| {
            if st.detached || st.key == key {
                return None;
            }
            st.key = key;
            st.generation += 1;
            st.error = None;
            match key {
                None => {
                    st.children = DependentList::Empty;
                    None
                }
                Some(_) => {
                    st.children = DependentList::Loading;
                    Some(st.generation)
                }
            }
        });

        let (Some(generation), Some(key)) = (generation, key) else {
            return;
        };

        tracing::debug!(lookup = S::NAME, key, generation, "fetching dependent list");

        let source = Arc::clone(&self.source);
        let session = self.session.clone();
        let shared = Arc::clone(&self.shared);

        std::thread::spawn(move || {
            let outcome = source.fetch_children(&session, key);
            shared.update(|st| {
                if st.detached || st.generation != generation {
                    tracing::debug!(lookup = S::NAME, key, "stale dependent list dropped");
                    return;
                }
                match outcome {
                    Ok(children) => st.children = DependentList::Populated(children),
                    Err(err) => {
                        tracing::warn!(lookup = S::NAME, key, error = %err, "dependent lookup failed");
                        st.children = DependentList::Empty;
                        st.error = Some(err.user_message("Failed to load options"));
                    }
                }
            });
        });
    }

    pub fn snapshot(&self) -> LookupView<S::Parent, S::Child> {
        let st = self.shared.lock();
        LookupView {
            parents: st.parents.clone(),
            parents_loading: st.parents_loading,
            key: st.key,
            children: st.children.clone(),
            error: st.error.clone(),
        }
    }

    /// Wait until neither list is loading, then snapshot.
    pub fn settle(&self, timeout: Duration) -> LookupView<S::Parent, S::Child> {
        self.shared.wait_until(timeout, |st| {
            st.detached || (!st.parents_loading && !st.children.is_loading())
        });
        self.snapshot()
    }

    pub fn detach(&self) {
        self.shared.update(|st| st.detached = true);
    }
}

impl<S: LookupSource> Drop for LookupController<S> {
    fn drop(&mut self) {
        self.detach();
    }
}
