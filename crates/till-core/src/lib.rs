pub mod error;
pub mod models;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::branch::Branch;
pub use models::company::Company;
pub use models::logo_ref::LogoRef;
pub use models::profile::Profile;
pub use models::role::Role;
pub use models::role_set::RoleSet;
pub use models::session::Session;
pub use models::user_meta::UserMeta;

#[cfg(test)]
mod tests;
