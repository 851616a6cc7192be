pub mod filters;
pub mod icon;
pub mod listing;
pub mod pagination;
