//! Company entity - branding and organizational context.

use crate::LogoRef;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub receipt_footer: Option<String>,
    /// Either an absolute URL or a private storage path
    pub logo: Option<String>,
}

impl Company {
    pub fn logo_ref(&self) -> Option<LogoRef> {
        self.logo.as_deref().map(LogoRef::parse)
    }
}
