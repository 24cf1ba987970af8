use argon2::password_hash::rand_core::{OsRng, RngCore};
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::time::{Duration, Instant};

use super::Identity;
use crate::types::{id::PrincipalId, Sensitive};

const TOKEN_BYTES: usize = 32;

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Sessions are keyed by a digest of their token, raw tokens only
/// live in the client's cookie.
fn token_key(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone)]
pub struct Session {
    pub identity: Identity,
    pub csrf_token: Sensitive<String>,
    last_seen: Instant,
}

/// Server-side session state shared by every worker.
///
/// At most one session exists per principal. Opening a new one
/// invalidates the previous session of the same principal.
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    by_principal: DashMap<PrincipalId, String>,
    idle_timeout: Duration,
}

impl SessionStore {
    #[must_use]
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            by_principal: DashMap::new(),
            idle_timeout,
        }
    }

    /// Binds a fresh session to `identity` and returns its token.
    pub fn open(&self, identity: Identity) -> Sensitive<String> {
        let token = generate_token();
        let key = token_key(&token);
        let principal_id = identity.principal_id;

        self.sessions.insert(
            key.clone(),
            Session {
                identity,
                csrf_token: Sensitive::new(generate_token()),
                last_seen: Instant::now(),
            },
        );

        if let Some(previous) = self.by_principal.insert(principal_id, key) {
            if self.sessions.remove(&previous).is_some() {
                tracing::debug!("previous session of the principal is invalidated");
            }
        }

        Sensitive::new(token)
    }

    /// Looks up a live session and refreshes its idle timer. Expired
    /// sessions are dropped on the way.
    pub fn resolve(&self, token: &str) -> Option<Session> {
        let key = token_key(token);
        let now = Instant::now();

        {
            let mut session = self.sessions.get_mut(&key)?;
            if now.duration_since(session.last_seen) <= self.idle_timeout {
                session.last_seen = now;
                return Some(session.clone());
            }
        }

        tracing::debug!("session expired after being idle");
        self.close_key(&key);
        None
    }

    /// Invalidates the session behind `token`, returning whether
    /// there was one.
    pub fn close(&self, token: &str) -> bool {
        self.close_key(&token_key(token))
    }

    fn close_key(&self, key: &str) -> bool {
        let Some((key, session)) = self.sessions.remove(key) else {
            return false;
        };
        self.by_principal
            .remove_if(&session.identity.principal_id, |_, current| *current == key);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::DEFAULT_ROLES;

    fn identity(id: u64, username: &str) -> Identity {
        Identity {
            principal_id: PrincipalId::new(id),
            username: username.to_string(),
            roles: DEFAULT_ROLES.to_vec(),
        }
    }

    #[test]
    fn test_open_resolve_close() {
        let store = SessionStore::new(Duration::from_secs(60));
        let token = store.open(identity(1, "user"));

        let session = store.resolve(token.as_str()).unwrap();
        assert_eq!(session.identity.username, "user");
        assert_eq!(session.csrf_token.as_str().len(), TOKEN_BYTES * 2);

        assert!(store.close(token.as_str()));
        assert!(store.resolve(token.as_str()).is_none());
        assert!(!store.close(token.as_str()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_unknown_token() {
        let store = SessionStore::new(Duration::from_secs(60));
        assert!(store.resolve("nope").is_none());
    }

    #[test]
    fn test_single_session_per_principal() {
        let store = SessionStore::new(Duration::from_secs(60));
        let first = store.open(identity(1, "user"));
        let other = store.open(identity(2, "admin"));
        let second = store.open(identity(1, "user"));

        assert_ne!(first, second);
        assert!(store.resolve(first.as_str()).is_none());
        assert!(store.resolve(second.as_str()).is_some());
        assert!(store.resolve(other.as_str()).is_some());
        assert_eq!(store.len(), 2);

        // closing the stale token must not affect the live one
        assert!(!store.close(first.as_str()));
        assert!(store.resolve(second.as_str()).is_some());
    }

    #[test]
    fn test_idle_expiry() {
        let store = SessionStore::new(Duration::ZERO);
        let token = store.open(identity(1, "user"));
        std::thread::sleep(Duration::from_millis(5));

        assert!(store.resolve(token.as_str()).is_none());
        assert!(store.is_empty());
        assert!(store.by_principal.is_empty());
    }
}
