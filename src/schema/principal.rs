use crate::types::{id::PrincipalId, Sensitive};

/// An identity that may log in. Provisioned out-of-band and read-only
/// for the rest of the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: PrincipalId,
    pub username: String,
    pub password_hash: Sensitive<String>,
    pub enabled: bool,
}

#[derive(Debug, Clone)]
pub struct NewPrincipal {
    pub username: String,
    pub password_hash: Sensitive<String>,
    pub enabled: bool,
}

impl NewPrincipal {
    #[must_use]
    pub fn into_principal(self, id: PrincipalId) -> Principal {
        Principal {
            id,
            username: self.username,
            password_hash: self.password_hash,
            enabled: self.enabled,
        }
    }
}
