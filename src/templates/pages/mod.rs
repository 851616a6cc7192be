pub mod listings;
pub mod sign_in;

pub use listings::{listings_page, listings_partial, search_section, type_nav};
pub use sign_in::sign_in_page;
