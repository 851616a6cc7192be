use crate::api::models::{City, ListingCategory, ListingType, Location, SortingValue};
use crate::domain::filters::ListingFilter;
use crate::locale::Locale;
use crate::search::{LookupView, SearchView};
use crate::templates::components::error_box;
use maud::{html, Markup};

pub const LOCATION_FIELD_ID: &str = "location-field";
pub const CATEGORY_FIELD_ID: &str = "category-field";
pub const SORT_FIELD_ID: &str = "sort-field";

/// The search form. Every change submits the whole form to the listings partial;
/// an empty field clears that filter.
pub fn filter_bar(locale: Locale, view: &SearchView) -> Markup {
    let filters = &view.listings.filters;
    let partial = format!("/{}/listings", locale.code());

    html! {
        form
            id="filters"
            class="filters"
            method="get"
            action={ "/" (locale.code()) }
            hx-get=(partial)
            hx-trigger="change, submit"
            hx-target="#results"
            hx-swap="innerHTML show:none"
        {
            input type="hidden" name="pageSize" value=(filters.page_size);

            input
                type="search"
                name="search"
                value=[filters.search.as_deref()]
                placeholder=(locale.t("filters.search_placeholder"));

            (city_field(locale, &view.locations.parents, filters.city_id))
            (location_field(locale, &view.locations, filters.location_id, false))
            (type_field(locale, &view.categories.parents, filters.listing_type_id))
            (category_field(locale, &view.categories, filters.listing_category_id, false))

            input
                type="number"
                name="minPrice"
                min="0"
                value=[filters.min_price]
                placeholder=(locale.t("filters.min_price"));
            input
                type="number"
                name="maxPrice"
                min="0"
                value=[filters.max_price]
                placeholder=(locale.t("filters.max_price"));

            select name="hasOffer" {
                option value="" selected[filters.has_offer.is_none()] { (locale.t("filters.all_offers")) }
                option value="true" selected[filters.has_offer == Some(true)] {
                    (locale.t("filters.has_offer"))
                }
            }

            (sort_field(locale, &view.listings.result.sorting_values, filters, false))

            button type="submit" class="btn primary" { (locale.t("categories.search")) }
            button
                type="button"
                class="btn"
                hx-get={ (partial) "?reset=true" }
                hx-target="#search"
                hx-swap="outerHTML show:none"
            { (locale.t("filters.reset")) }
        }
    }
}

fn city_field(locale: Locale, cities: &[City], selected: Option<i64>) -> Markup {
    html! {
        select name="cityId" aria-label=(locale.t("filters.select_city")) {
            option value="" { (locale.t("filters.all_cities")) }
            @for city in cities {
                option value=(city.id) selected[selected == Some(city.id)] { (city.name) }
            }
        }
    }
}

fn type_field(locale: Locale, types: &[ListingType], selected: Option<i64>) -> Markup {
    html! {
        select name="listingTypeId" aria-label=(locale.t("filters.select_type")) {
            option value="" { (locale.t("filters.all_types")) }
            @for t in types {
                option value=(t.id) selected[selected == Some(t.id)] { (t.name) }
            }
        }
    }
}

/// Locations of the selected city. Disabled while no city is chosen.
pub fn location_field(
    locale: Locale,
    lookup: &LookupView<City, Location>,
    selected: Option<i64>,
    oob: bool,
) -> Markup {
    html! {
        div id=(LOCATION_FIELD_ID) class="field" hx-swap-oob=[oob.then_some("true")] {
            select
                name="locationId"
                aria-label=(locale.t("filters.select_location"))
                disabled[lookup.key.is_none()]
            {
                option value="" { (locale.t("filters.all_locations")) }
                @for loc in lookup.children.items() {
                    option value=(loc.id) selected[selected == Some(loc.id)] { (loc.name) }
                }
            }
            @if let Some(err) = &lookup.error {
                (error_box(err))
            }
        }
    }
}

/// Categories of the selected listing type.
pub fn category_field(
    locale: Locale,
    lookup: &LookupView<ListingType, ListingCategory>,
    selected: Option<i64>,
    oob: bool,
) -> Markup {
    html! {
        div id=(CATEGORY_FIELD_ID) class="field" hx-swap-oob=[oob.then_some("true")] {
            select
                name="listingCategoryId"
                aria-label=(locale.t("filters.select_category"))
                disabled[lookup.key.is_none()]
            {
                option value="" { (locale.t("filters.all_categories")) }
                @for cat in lookup.children.items() {
                    option value=(cat.id) selected[selected == Some(cat.id)] { (cat.name) }
                }
            }
            @if let Some(err) = &lookup.error {
                (error_box(err))
            }
        }
    }
}

/// Sort keys come from the latest result.
pub fn sort_field(
    locale: Locale,
    sorting: &[SortingValue],
    filters: &ListingFilter,
    oob: bool,
) -> Markup {
    let current = filters.sort_by.as_deref();

    html! {
        div id=(SORT_FIELD_ID) class="field" hx-swap-oob=[oob.then_some("true")] {
            select name="sortBy" aria-label=(locale.t("filters.sort_by")) {
                option value="" { (locale.t("filters.sort_by")) }
                @for s in sorting {
                    option value=(s.sort_key) selected[current == Some(s.sort_key.as_str())] {
                        (s.display_name)
                    }
                }
            }
        }
    }
}
