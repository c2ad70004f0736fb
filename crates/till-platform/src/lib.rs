pub mod auth;
pub mod claims;
pub mod deadline;
pub mod error;
pub mod functions;
pub mod rest;
pub mod storage;

pub use auth::{AuthClient, AuthEvent};
pub use claims::TokenClaims;
pub use error::{PlatformError, Result};
pub use functions::{EdgeCaller, EmployeeUpdate, NewEmployee};
pub use rest::RestClient;
pub use storage::StorageClient;
