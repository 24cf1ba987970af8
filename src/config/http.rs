use serde::Deserialize;
use std::num::NonZeroUsize;

use crate::types::validation::{Validate, ValidateError};

#[derive(Debug, Clone, Deserialize)]
pub struct Http {
    /// **Environment variable**: `BOATHUB_HTTP_HOST`
    #[serde(default = "Http::default_host")]
    pub host: String,
    /// **Environment variable**: `BOATHUB_HTTP_PORT`
    #[serde(default = "Http::default_port")]
    pub port: u16,
    /// Number of HTTP workers. Defaults to the number of CPUs.
    ///
    /// **Environment variable**: `BOATHUB_HTTP_WORKERS`
    #[serde(default)]
    pub workers: Option<NonZeroUsize>,
}

impl Http {
    const DEFAULT_PORT: u16 = 8080;

    fn default_host() -> String {
        "127.0.0.1".into()
    }

    const fn default_port() -> u16 {
        Self::DEFAULT_PORT
    }
}

impl Default for Http {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::DEFAULT_PORT,
            workers: None,
        }
    }
}

impl Validate for Http {
    fn validate(&self) -> Result<(), ValidateError> {
        let mut fields = ValidateError::field_builder();
        if self.host.trim().is_empty() {
            fields.insert_msg("host", "HTTP host must not be empty");
        }
        fields.build().into_result()
    }
}
