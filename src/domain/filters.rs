// src/domain/filters.rs
use url::form_urlencoded;

pub const DEFAULT_PAGE_NUMBER: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Everything currently being searched for. Absent fields mean "unconstrained".
///
/// Page number and page size always carry a value; both are at least 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingFilter {
    pub page_number: u32,
    pub page_size: u32,
    pub city_id: Option<i64>,
    pub location_id: Option<i64>,
    pub listing_type_id: Option<i64>,
    pub listing_category_id: Option<i64>,
    pub supplier_id: Option<i64>,
    pub currency_id: Option<i64>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub has_offer: Option<bool>,
    pub is_active: Option<bool>,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
            city_id: None,
            location_id: None,
            listing_type_id: None,
            listing_category_id: None,
            supplier_id: None,
            currency_id: None,
            search: None,
            sort_by: None,
            min_price: None,
            max_price: None,
            has_offer: None,
            is_active: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: &'static str, value: String },
}

/// What a partial update does to one field.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Keep,
    Clear,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Keep
    }
}

impl<T: Clone> Patch<T> {
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Set(v),
            None => Patch::Clear,
        }
    }

    fn apply(&self, slot: &mut Option<T>) {
        match self {
            Patch::Keep => {}
            Patch::Clear => *slot = None,
            Patch::Set(v) => *slot = Some(v.clone()),
        }
    }

    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }
}

/// A partial filter change. Fields left at `Patch::Keep` are untouched by `merge`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterUpdate {
    pub page_number: Patch<u32>,
    pub page_size: Patch<u32>,
    pub city_id: Patch<i64>,
    pub location_id: Patch<i64>,
    pub listing_type_id: Patch<i64>,
    pub listing_category_id: Patch<i64>,
    pub supplier_id: Patch<i64>,
    pub currency_id: Patch<i64>,
    pub search: Patch<String>,
    pub sort_by: Patch<String>,
    pub min_price: Patch<f64>,
    pub max_price: Patch<f64>,
    pub has_offer: Patch<bool>,
    pub is_active: Patch<bool>,
}

// Query keys, shared by the address bar and the backend request.
const PAGE_NUMBER: &str = "pageNumber";
const PAGE_NUMBER_LEGACY: &str = "page";
const PAGE_SIZE: &str = "pageSize";
const CITY_ID: &str = "cityId";
const LOCATION_ID: &str = "locationId";
const LISTING_TYPE_ID: &str = "listingTypeId";
const LISTING_CATEGORY_ID: &str = "listingCategoryId";
const SUPPLIER_ID: &str = "supplierId";
const CURRENCY_ID: &str = "currencyId";
const SEARCH: &str = "search";
const SORT_BY: &str = "sortBy";
const MIN_PRICE: &str = "minPrice";
const MAX_PRICE: &str = "maxPrice";
const HAS_OFFER: &str = "hasOffer";
const IS_ACTIVE: &str = "isActive";

impl ListingFilter {
    /// Merge `update` into a copy of `self`.
    ///
    /// The page number goes back to 1 unless the update sets it explicitly.
    /// An explicit page number or page size of 0 is clamped to 1.
    ///
    /// When the city or listing type changes, a location or category carried
    /// over unchanged from the previous parent is dropped. One the update picks
    /// anew is kept.
    pub fn merge(&self, update: &FilterUpdate) -> ListingFilter {
        let mut next = self.clone();

        update.city_id.apply(&mut next.city_id);
        update.location_id.apply(&mut next.location_id);
        update.listing_type_id.apply(&mut next.listing_type_id);
        update.listing_category_id.apply(&mut next.listing_category_id);
        update.supplier_id.apply(&mut next.supplier_id);
        update.currency_id.apply(&mut next.currency_id);
        update.search.apply(&mut next.search);
        update.sort_by.apply(&mut next.sort_by);
        update.min_price.apply(&mut next.min_price);
        update.max_price.apply(&mut next.max_price);
        update.has_offer.apply(&mut next.has_offer);
        update.is_active.apply(&mut next.is_active);

        if next.city_id != self.city_id && next.location_id == self.location_id {
            next.location_id = None;
        }
        if next.listing_type_id != self.listing_type_id
            && next.listing_category_id == self.listing_category_id
        {
            next.listing_category_id = None;
        }

        next.page_size = match update.page_size {
            Patch::Keep => next.page_size,
            Patch::Clear => DEFAULT_PAGE_SIZE,
            Patch::Set(n) => n.max(1),
        };

        next.page_number = match update.page_number {
            Patch::Set(n) => n.max(1),
            _ => DEFAULT_PAGE_NUMBER,
        };

        next
    }

    /// Every defined field as one `key=value` pair. Absent and empty values are skipped.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            (PAGE_NUMBER, self.page_number.to_string()),
            (PAGE_SIZE, self.page_size.to_string()),
        ];

        push_opt(&mut pairs, CITY_ID, self.city_id);
        push_opt(&mut pairs, LOCATION_ID, self.location_id);
        push_opt(&mut pairs, LISTING_TYPE_ID, self.listing_type_id);
        push_opt(&mut pairs, LISTING_CATEGORY_ID, self.listing_category_id);
        push_opt(&mut pairs, SUPPLIER_ID, self.supplier_id);
        push_opt(&mut pairs, CURRENCY_ID, self.currency_id);
        push_text(&mut pairs, SEARCH, self.search.as_deref());
        push_text(&mut pairs, SORT_BY, self.sort_by.as_deref());
        push_opt(&mut pairs, MIN_PRICE, self.min_price);
        push_opt(&mut pairs, MAX_PRICE, self.max_price);
        push_opt(&mut pairs, HAS_OFFER, self.has_offer);
        push_opt(&mut pairs, IS_ACTIVE, self.is_active);

        pairs
    }

    pub fn to_query_string(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        for (k, v) in self.to_query_pairs() {
            ser.append_pair(k, &v);
        }
        ser.finish()
    }

    /// Build the starting filter from an address-bar query string.
    ///
    /// Reading is lenient: missing, unparseable or non-positive page values fall
    /// back to the defaults, and unparseable criteria are treated as absent.
    /// Text values are taken as written.
    pub fn from_query(query: &str) -> ListingFilter {
        let mut filter = ListingFilter::default();
        let mut explicit_page = false;

        for (key, raw) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            let value = raw.trim();
            match &*key {
                PAGE_NUMBER => {
                    if let Some(n) = parse_positive(value) {
                        filter.page_number = n;
                        explicit_page = true;
                    }
                }
                PAGE_NUMBER_LEGACY if !explicit_page => {
                    if let Some(n) = parse_positive(value) {
                        filter.page_number = n;
                    }
                }
                PAGE_SIZE => {
                    if let Some(n) = parse_positive(value) {
                        filter.page_size = n;
                    }
                }
                CITY_ID => filter.city_id = parse_id(value),
                LOCATION_ID => filter.location_id = parse_id(value),
                LISTING_TYPE_ID => filter.listing_type_id = parse_id(value),
                LISTING_CATEGORY_ID => filter.listing_category_id = parse_id(value),
                SUPPLIER_ID => filter.supplier_id = parse_id(value),
                CURRENCY_ID => filter.currency_id = parse_id(value),
                SEARCH => filter.search = non_empty(&raw),
                SORT_BY => filter.sort_by = non_empty(&raw),
                MIN_PRICE => filter.min_price = parse_price(value),
                MAX_PRICE => filter.max_price = parse_price(value),
                HAS_OFFER => filter.has_offer = value.parse().ok(),
                IS_ACTIVE => filter.is_active = value.parse().ok(),
                _ => {}
            }
        }

        filter
    }
}

impl FilterUpdate {
    /// Build an update from submitted form fields.
    ///
    /// Keys that are absent stay untouched, keys with an empty value are
    /// cleared, and anything that does not parse is rejected.
    pub fn from_query(query: &str) -> Result<FilterUpdate, FilterError> {
        let mut update = FilterUpdate::default();

        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            let value = value.trim();
            match &*key {
                PAGE_NUMBER | PAGE_NUMBER_LEGACY => {
                    update.page_number = patch(PAGE_NUMBER, value, |v| v.parse().ok())?
                }
                PAGE_SIZE => update.page_size = patch(PAGE_SIZE, value, |v| v.parse().ok())?,
                CITY_ID => update.city_id = patch(CITY_ID, value, parse_id)?,
                LOCATION_ID => update.location_id = patch(LOCATION_ID, value, parse_id)?,
                LISTING_TYPE_ID => {
                    update.listing_type_id = patch(LISTING_TYPE_ID, value, parse_id)?
                }
                LISTING_CATEGORY_ID => {
                    update.listing_category_id = patch(LISTING_CATEGORY_ID, value, parse_id)?
                }
                SUPPLIER_ID => update.supplier_id = patch(SUPPLIER_ID, value, parse_id)?,
                CURRENCY_ID => update.currency_id = patch(CURRENCY_ID, value, parse_id)?,
                SEARCH => update.search = patch(SEARCH, value, non_empty)?,
                SORT_BY => update.sort_by = patch(SORT_BY, value, non_empty)?,
                MIN_PRICE => update.min_price = patch(MIN_PRICE, value, parse_price)?,
                MAX_PRICE => update.max_price = patch(MAX_PRICE, value, parse_price)?,
                HAS_OFFER => update.has_offer = patch(HAS_OFFER, value, |v| v.parse().ok())?,
                IS_ACTIVE => update.is_active = patch(IS_ACTIVE, value, |v| v.parse().ok())?,
                _ => {}
            }
        }

        Ok(update)
    }

    pub fn page(n: u32) -> Self {
        Self {
            page_number: Patch::Set(n),
            ..Self::default()
        }
    }

    pub fn city(id: Option<i64>) -> Self {
        Self {
            city_id: Patch::from_option(id),
            ..Self::default()
        }
    }

    pub fn listing_type(id: Option<i64>) -> Self {
        Self {
            listing_type_id: Patch::from_option(id),
            ..Self::default()
        }
    }

    pub fn search(text: Option<&str>) -> Self {
        Self {
            search: Patch::from_option(text.map(str::to_string)),
            ..Self::default()
        }
    }
}

fn push_opt<T: ToString>(pairs: &mut Vec<(&'static str, String)>, key: &'static str, v: Option<T>) {
    if let Some(v) = v {
        pairs.push((key, v.to_string()));
    }
}

fn push_text(pairs: &mut Vec<(&'static str, String)>, key: &'static str, v: Option<&str>) {
    if let Some(v) = v.filter(|v| !v.is_empty()) {
        pairs.push((key, v.to_string()));
    }
}

fn patch<T, F>(key: &'static str, value: &str, parse: F) -> Result<Patch<T>, FilterError>
where
    F: Fn(&str) -> Option<T>,
{
    if value.is_empty() {
        return Ok(Patch::Clear);
    }
    parse(value)
        .map(Patch::Set)
        .ok_or_else(|| FilterError::InvalidValue {
            key,
            value: value.to_string(),
        })
}

fn parse_positive(v: &str) -> Option<u32> {
    v.parse::<u32>().ok().filter(|n| *n > 0)
}

fn parse_id(v: &str) -> Option<i64> {
    v.parse::<i64>().ok().filter(|n| *n > 0)
}

fn parse_price(v: &str) -> Option<f64> {
    v.parse::<f64>().ok().filter(|p| p.is_finite() && *p >= 0.0)
}

fn non_empty(v: &str) -> Option<String> {
    (!v.is_empty()).then(|| v.to_string())
}
