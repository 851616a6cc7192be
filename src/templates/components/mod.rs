pub mod error;
pub mod filter_bar;
pub mod icon;
pub mod listing_card;
pub mod pagination;

pub use error::error_box;
pub use filter_bar::{category_field, filter_bar, location_field, sort_field};
pub use icon::icon_img;
pub use listing_card::listing_card;
pub use pagination::pagination;
