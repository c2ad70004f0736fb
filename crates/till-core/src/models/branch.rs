use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Branch id/name pair scoped to a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: Uuid,
    pub name: String,
}
