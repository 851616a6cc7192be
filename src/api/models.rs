use serde::{Deserialize, Serialize};

// Envelope
//  ├── isSuccess
//  ├── message
//  ├── data      (payload, may be null on failure)
//  └── errors[]

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub is_success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum PriceType {
    Person,
    Hour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum PropertyDataType {
    Number,
    String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetail {
    #[serde(rename = "listingCategoryDetailID")]
    pub id: i64,
    #[serde(rename = "listingCategoryDetailName")]
    pub name: String,
    #[serde(rename = "listingCategoryDetailValue")]
    pub value: String,
    pub property_data_type: PropertyDataType,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub attachment_type: String,
    pub attachment_path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub city_name: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub listing_type_name: Option<String>,
    #[serde(default)]
    pub listing_category_name: Option<String>,
    pub price: f64,
    pub price_type: PriceType,
    #[serde(default)]
    pub price_discount_percentage: f64,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub details: Vec<ListingDetail>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortingValue {
    pub display_name: String,
    pub sort_key: String,
}

/// One page of listings as returned by `/api/listings/getAll`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingsPage {
    #[serde(default)]
    pub data: Vec<Listing>,
    #[serde(default)]
    pub sorting_values: Vec<SortingValue>,
    #[serde(default)]
    pub total_records: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub country_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub city_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingType {
    pub id: i64,
    pub name: String,
    /// Backend icon hint. Only ever resolved through `Icon::from_hint`.
    #[serde(default)]
    pub web_icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingCategory {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub listing_type_id: Option<i64>,
    #[serde(default)]
    pub web_icon: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub user_name_or_email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub is_authenticated: bool,
    pub token: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub expires_on: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}
