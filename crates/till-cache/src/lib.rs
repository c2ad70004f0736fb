pub mod error;
pub mod records;
pub mod store;

pub use error::{CacheError, Result};
pub use records::{CachedBranch, CachedCompany, CachedLogoUrl, CachedProfile};
pub use store::CacheStore;
