// templates/pages/listings.rs

use crate::api::models::ListingType;
use crate::domain::icon::Icon;
use crate::domain::listing::ListingCard;
use crate::domain::pagination::Pagination;
use crate::locale::Locale;
use crate::search::{ListingsView, SearchView};
use crate::templates::components::{
    category_field, error_box, filter_bar, listing_card, location_field, pagination, sort_field,
};
use crate::templates::layouts::desktop::{default_nav, desktop_layout, Chrome, NavItem};
use maud::{html, Markup};

pub fn listings_page(chrome: &Chrome, view: &SearchView) -> Markup {
    desktop_layout(chrome, search_section(chrome.locale, view))
}

/// Filter form plus results. Also the response to a reset.
pub fn search_section(locale: Locale, view: &SearchView) -> Markup {
    html! {
        section id="search" class="container" {
            (filter_bar(locale, view))
            hr;
            div id="results" {
                (results(locale, &view.listings))
            }
        }
    }
}

/// Partial for `#results`, with the dependent selects swapped out of band.
pub fn listings_partial(locale: Locale, view: &SearchView) -> Markup {
    let filters = &view.listings.filters;
    html! {
        (results(locale, &view.listings))
        (location_field(locale, &view.locations, filters.location_id, true))
        (category_field(locale, &view.categories, filters.listing_category_id, true))
        (sort_field(locale, &view.listings.result.sorting_values, filters, true))
    }
}

pub fn results(locale: Locale, view: &ListingsView) -> Markup {
    let page = &view.result;
    let paging = Pagination::new(
        page.total_records,
        view.filters.page_size,
        view.filters.page_number,
    );

    html! {
        @if let Some(err) = &view.error {
            (error_box(err))
        }
        @if view.loading {
            p class="loading" aria-busy="true" { (locale.t("listings.loading")) }
        }

        p class="total" { (page.total_records) " " (locale.t("listings.total")) }

        @if page.data.is_empty() {
            p class="empty" { (locale.t("listings.empty")) }
        } @else {
            div class="grid" {
                @for listing in &page.data {
                    (listing_card(&ListingCard::from_listing(listing), locale))
                }
            }
        }

        (pagination(&paging, locale))
    }
}

/// Header navigation from the backend's listing types; the fixed set until they arrive.
pub fn type_nav(locale: Locale, types: &[ListingType]) -> Vec<NavItem> {
    if types.is_empty() {
        return default_nav(locale);
    }
    types
        .iter()
        .map(|t| NavItem {
            label: t.name.clone(),
            href: format!("/{}?listingTypeId={}", locale.code(), t.id),
            icon: Icon::from_hint(t.web_icon.as_deref().or(Some(t.name.as_str()))),
        })
        .collect()
}
