use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity metadata supplied by the auth service alongside a session.
/// Used to synthesize a placeholder profile when no row can be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMeta {
    pub id: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
}
