use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;

use super::{password, Actor, Identity, Session, SessionStore, ANONYMOUS_USERNAME, DEFAULT_ROLES};
use crate::error::{Error, Result};
use crate::store::PrincipalStore;
use crate::types::{form::LoginForm, validation::Validate, Sensitive};

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub identity: Identity,
    /// Session token to hand back to the client.
    pub token: Sensitive<String>,
}

#[derive(Debug, Error)]
enum LoginRejected {
    #[error("no principal with this username")]
    UnknownPrincipal,
    #[error("principal is disabled")]
    Disabled,
    #[error("password does not match")]
    WrongPassword,
}

impl LoginRejected {
    fn into_error(self) -> Error {
        Error::from_context(crate::types::Error::InvalidCredentials, self)
    }
}

#[derive(Debug, Clone)]
pub struct AuthGate {
    principals: Arc<dyn PrincipalStore>,
    sessions: Arc<SessionStore>,
    /// Compared against when no principal matches, so an unknown
    /// username costs as much as a wrong password.
    dummy_hash: Arc<OnceCell<String>>,
}

impl AuthGate {
    #[must_use]
    pub fn new(principals: Arc<dyn PrincipalStore>, sessions: Arc<SessionStore>) -> Self {
        Self {
            principals,
            sessions,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Checks the credentials and opens a session for the principal.
    ///
    /// Unknown usernames, disabled principals and wrong passwords all
    /// fail the same way.
    #[tracing::instrument(skip_all, fields(username = %form.username))]
    pub async fn authenticate(&self, form: &LoginForm) -> Result<Authenticated> {
        form.validate()?;

        let principal = if form.username.eq_ignore_ascii_case(ANONYMOUS_USERNAME) {
            None
        } else {
            self.principals.find_by_username(&form.username).await?
        };

        // the hash is checked on every path before any outcome is decided
        let hash = match &principal {
            Some(principal) => principal.password_hash.as_str().to_string(),
            None => self.dummy_hash().await?.to_string(),
        };
        let matched = password::verify_blocking(form.password.as_str().to_string(), hash)
            .await
            .map_err(|e| Error::from_report(crate::types::Error::Internal, e))?;

        let Some(principal) = principal else {
            return Err(LoginRejected::UnknownPrincipal.into_error());
        };

        if !matched {
            return Err(LoginRejected::WrongPassword.into_error());
        }

        if !principal.enabled {
            return Err(LoginRejected::Disabled.into_error());
        }

        let identity = Identity {
            principal_id: principal.id,
            username: principal.username,
            roles: DEFAULT_ROLES.to_vec(),
        };
        let token = self.sessions.open(identity.clone());
        tracing::info!("principal logged in");

        Ok(Authenticated { identity, token })
    }

    /// Resolves the session behind `token`. Missing, unknown, expired
    /// and invalidated sessions all yield [`Actor::Anonymous`].
    #[must_use]
    pub fn current_principal(&self, token: Option<&str>) -> Actor {
        match self.session(token) {
            Some(session) if session.identity.username != ANONYMOUS_USERNAME => {
                Actor::Principal(session.identity)
            }
            _ => Actor::Anonymous,
        }
    }

    async fn dummy_hash(&self) -> Result<&str> {
        const DUMMY_PASSWORD: &str = "boathub-no-such-principal";

        self.dummy_hash
            .get_or_try_init(|| password::hash_blocking(DUMMY_PASSWORD.to_string()))
            .await
            .map(String::as_str)
            .map_err(|e| Error::from_report(crate::types::Error::Internal, e))
    }

    #[must_use]
    pub fn session(&self, token: Option<&str>) -> Option<Session> {
        self.sessions.resolve(token?)
    }

    /// Always succeeds, also for sessions that are already gone.
    pub fn logout(&self, token: Option<&str>) {
        if let Some(token) = token {
            if self.sessions.close(token) {
                tracing::info!("session closed");
            }
        }
    }
}
