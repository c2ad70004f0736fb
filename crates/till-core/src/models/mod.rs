pub mod branch;
pub mod company;
pub mod logo_ref;
pub mod profile;
pub mod role;
pub mod role_set;
pub mod session;
pub mod user_meta;
