use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::{collections::HashSet, num::NonZeroU64, time::Duration};

use crate::auth::ANONYMOUS_USERNAME;
use crate::types::{
    validation::{Validate, ValidateError},
    Sensitive,
};

#[allow(clippy::unwrap_used)]
static USERNAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]{1,64}$").unwrap());

#[allow(clippy::unwrap_used)]
static COOKIE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_\-]+$").unwrap());

#[derive(Debug, Clone, Deserialize)]
pub struct Auth {
    /// Name of the cookie carrying the session token.
    ///
    /// **Environment variable**: `BOATHUB_AUTH_SESSION_COOKIE`
    #[serde(default = "Auth::default_session_cookie")]
    pub session_cookie: String,
    /// Sessions unused for this long are dropped.
    ///
    /// **Environment variable**: `BOATHUB_AUTH_SESSION_TTL_SECS`
    #[serde(default = "Auth::default_session_ttl_secs")]
    pub session_ttl_secs: NonZeroU64,
    /// Marks the session cookie `Secure`. Turn it on behind TLS.
    ///
    /// **Environment variable**: `BOATHUB_AUTH_SECURE_COOKIE`
    #[serde(default)]
    pub secure_cookie: bool,
    /// Requires the session's anti-forgery token on boat mutations.
    ///
    /// **Environment variable**: `BOATHUB_AUTH_CSRF_PROTECTION`
    #[serde(default = "Auth::default_csrf_protection")]
    pub csrf_protection: bool,
    /// Principals provisioned at startup if missing.
    #[serde(default)]
    pub seed: Vec<SeedPrincipal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedPrincipal {
    pub username: String,
    pub password: Sensitive<String>,
    #[serde(default = "SeedPrincipal::default_enabled")]
    pub enabled: bool,
}

impl SeedPrincipal {
    const fn default_enabled() -> bool {
        true
    }
}

impl Auth {
    const DEFAULT_SESSION_COOKIE: &'static str = "BOATHUB_SESSION";
    const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

    fn default_session_cookie() -> String {
        Self::DEFAULT_SESSION_COOKIE.into()
    }

    const fn default_session_ttl_secs() -> NonZeroU64 {
        match NonZeroU64::new(Self::DEFAULT_SESSION_TTL_SECS) {
            Some(n) => n,
            None => panic!("DEFAULT_SESSION_TTL_SECS is accidentally set to 0"),
        }
    }

    const fn default_csrf_protection() -> bool {
        true
    }

    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs.get())
    }
}

impl Default for Auth {
    fn default() -> Self {
        Self {
            session_cookie: Self::default_session_cookie(),
            session_ttl_secs: Self::default_session_ttl_secs(),
            secure_cookie: false,
            csrf_protection: Self::default_csrf_protection(),
            seed: Vec::new(),
        }
    }
}

impl Validate for Auth {
    fn validate(&self) -> Result<(), ValidateError> {
        let mut fields = ValidateError::field_builder();
        if !COOKIE_NAME.is_match(&self.session_cookie) {
            fields.insert_msg(
                "session_cookie",
                "Session cookie name may only contain letters, digits, '_' and '-'",
            );
        }

        let mut seeds = ValidateError::field_builder();
        let mut seen = HashSet::new();
        for (index, seed) in self.seed.iter().enumerate() {
            let mut seed_fields = ValidateError::field_builder();
            {
                let mut username = ValidateError::msg_builder();
                if !USERNAME.is_match(&seed.username) {
                    username.insert("Username must be 1-64 letters, digits, '_', '.' or '-'");
                }
                if seed.username.eq_ignore_ascii_case(ANONYMOUS_USERNAME) {
                    username.insert("Username is reserved");
                }
                if !seen.insert(seed.username.as_str()) {
                    username.insert("Username is seeded more than once");
                }
                seed_fields.insert("username", username.build());
            }
            if seed.password.as_str().is_empty() {
                seed_fields.insert_msg("password", "Password must not be empty");
            }
            seeds.insert(index.to_string(), seed_fields.build());
        }
        fields.insert("seed", seeds.build());

        fields.build().into_result()
    }
}
