//! Authentication gate.
//!
//! A session starts anonymous and becomes bound to a principal after
//! a successful credential check. Logout, idle expiry or a newer
//! login of the same principal return it to anonymous.
use serde::Serialize;

use crate::types::id::PrincipalId;

mod gate;
pub mod password;
pub mod seed;
mod session;

pub use gate::{AuthGate, Authenticated};
pub use session::{Session, SessionStore};

/// Username reported for requests without an authenticated session.
/// It is never treated as an authenticated identity.
pub const ANONYMOUS_USERNAME: &str = "anonymousUser";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
        }
    }
}

/// Every authenticated principal is granted this role set.
pub const DEFAULT_ROLES: &[Role] = &[Role::User];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub principal_id: PrincipalId,
    pub username: String,
    pub roles: Vec<Role>,
}

impl Identity {
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Who is performing a request. Passed explicitly into every service
/// call that needs authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    Anonymous,
    Principal(Identity),
}

impl Actor {
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Actor::Principal(identity) => Some(identity),
            Actor::Anonymous => None,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity().is_some()
    }

    /// Requires an authenticated actor holding `role`.
    pub fn require_role(&self, role: Role) -> crate::error::Result<&Identity> {
        #[derive(Debug, thiserror::Error)]
        #[error("Attempt to access principal-only operation")]
        struct NotAuthenticated;

        #[derive(Debug, thiserror::Error)]
        #[error("Principal lacks the {0} role")]
        struct MissingRole(&'static str);

        match self {
            Actor::Anonymous => Err(crate::error::Error::from_context(
                crate::types::Error::Unauthorized,
                NotAuthenticated,
            )),
            Actor::Principal(identity) if identity.has_role(role) => Ok(identity),
            Actor::Principal(..) => Err(crate::error::Error::from_context(
                crate::types::Error::Forbidden,
                MissingRole(role.as_str()),
            )),
        }
    }
}
