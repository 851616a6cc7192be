// src/domain/listing.rs

use crate::api::models::{Listing, PriceType};

pub const MAIN_ATTACHMENT: &str = "Main";
pub const PLACEHOLDER_IMAGE: &str = "/static/yacht.png";

/// A ViewModel for one result card, flattened from the backend listing.
/// Missing details resolve to zero instead of failing the render.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingCard {
    // === Identity ===
    pub id: i64,
    pub name: String,
    pub image: String,
    pub location: Option<String>,

    // === Details ===
    pub guests: u32,
    pub cabins: u32,
    pub length: f64,

    // === Pricing ===
    pub price: f64,
    pub price_type: PriceType,
    pub discount_percentage: f64,
    pub rating: f64,
    pub is_featured: bool,
}

impl ListingCard {
    pub fn from_listing(listing: &Listing) -> Self {
        Self {
            id: listing.id,
            name: listing.name.clone(),
            image: main_image(listing).unwrap_or(PLACEHOLDER_IMAGE).to_string(),
            location: listing
                .location_name
                .clone()
                .or_else(|| listing.city_name.clone()),
            guests: detail_number(listing, "Guests") as u32,
            cabins: detail_number(listing, "Cabins") as u32,
            length: detail_number(listing, "Length"),
            price: listing.price,
            price_type: listing.price_type,
            discount_percentage: listing.price_discount_percentage,
            rating: listing.rating,
            is_featured: listing.is_featured,
        }
    }

    /// Label key for the price unit.
    pub fn price_unit_key(&self) -> &'static str {
        match self.price_type {
            PriceType::Person => "yacht.per_person",
            PriceType::Hour => "yacht.per_hour",
        }
    }
}

/// Numeric value of the named detail, or 0 when missing or not a number.
pub fn detail_number(listing: &Listing, name: &str) -> f64 {
    listing
        .details
        .iter()
        .find(|d| d.name.trim().eq_ignore_ascii_case(name))
        .and_then(|d| d.value.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite() && *n >= 0.0)
        .unwrap_or(0.0)
}

/// Path of the `Main` attachment. Only site-relative and http(s) paths are used.
pub fn main_image(listing: &Listing) -> Option<&str> {
    listing
        .attachments
        .iter()
        .find(|a| a.attachment_type.eq_ignore_ascii_case(MAIN_ATTACHMENT))
        .map(|a| a.attachment_path.trim())
        .filter(|p| is_safe_src(p))
}

fn is_safe_src(path: &str) -> bool {
    (path.starts_with('/') && !path.starts_with("//"))
        || path.starts_with("https://")
        || path.starts_with("http://")
}
