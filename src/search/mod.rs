pub mod listings;
pub mod lookups;
pub mod sessions;
pub(crate) mod shared;
pub mod url_sync;

pub use listings::ListingsView;
pub use lookups::LookupView;
pub use sessions::{SearchSessions, SearchView};
