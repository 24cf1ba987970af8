use error_stack::{Report, Result, ResultExt};
use serde::Deserialize;

use super::ParseError;
use crate::types::validation::{Validate, ValidateError};
use crate::util::{figment::FigmentErrorAttachable, validator::IntoValidatorReport};

#[derive(Debug, Default, Deserialize)]
pub struct Server {
    #[serde(default)]
    pub http: super::Http,
    /// Boats and principals are kept in memory if this is not set.
    #[serde(default)]
    pub db: Option<super::Database>,
    #[serde(default)]
    pub auth: super::Auth,
    #[serde(default)]
    pub logging: super::Logging,
}

impl Server {
    pub fn load() -> Result<Self, ParseError> {
        dotenvy::dotenv().ok();

        let config = Self::figment()
            .extract::<Self>()
            .map_err(|e| Report::new(ParseError).attach_figment_error(e))?;

        config
            .validate()
            .into_validator_report()
            .change_context(ParseError)?;

        Ok(config)
    }
}

impl Validate for Server {
    fn validate(&self) -> std::result::Result<(), ValidateError> {
        let mut fields = ValidateError::field_builder();
        fields.insert("http", self.http.validate().err().unwrap_or_else(empty));
        if let Some(db) = &self.db {
            fields.insert("db", db.validate().err().unwrap_or_else(empty));
        }
        fields.insert("auth", self.auth.validate().err().unwrap_or_else(empty));
        fields.build().into_result()
    }
}

fn empty() -> ValidateError {
    ValidateError::field_builder().build()
}

impl Server {
    const CONFIG_FILE_VAR: &'static str = "BOATHUB_CONFIG";
    const DEFAULT_CONFIG_FILE: &'static str = "boathub.toml";

    /// Creates a default [`Figment`] object to load server
    /// configuration. This function is there for implementing
    /// [`Server::load`] and testing.
    ///
    /// [`Figment`]: figment::Figment
    pub(crate) fn figment() -> figment::Figment {
        use figment::{
            providers::{Env, Format, Toml},
            Figment,
        };

        let file = std::env::var(Self::CONFIG_FILE_VAR)
            .unwrap_or_else(|_| Self::DEFAULT_CONFIG_FILE.to_string());

        Figment::new()
            .merge(Toml::file(file))
            // Environment variable aliases
            .merge(Env::raw().only(&["DATABASE_URL"]).map(|_| "db.url".into()))
            // Fields with underscores in them need explicit mapping,
            // every other underscore separates sections.
            .merge(
                Env::prefixed("BOATHUB_")
                    .ignore(&["CONFIG"])
                    .map(|v| match v.as_str().to_ascii_uppercase().as_str() {
                        "DB_POOL_SIZE" => "db.pool_size".into(),
                        "DB_MIN_IDLE" => "db.min_idle".into(),
                        "DB_TIMEOUT_SECS" => "db.timeout_secs".into(),
                        "DB_ENFORCE_TLS" => "db.enforce_tls".into(),

                        "AUTH_SESSION_COOKIE" => "auth.session_cookie".into(),
                        "AUTH_SESSION_TTL_SECS" => "auth.session_ttl_secs".into(),
                        "AUTH_SECURE_COOKIE" => "auth.secure_cookie".into(),
                        "AUTH_CSRF_PROTECTION" => "auth.csrf_protection".into(),

                        _ => v.as_str().replace('_', ".").into(),
                    }),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use std::num::{NonZeroU32, NonZeroU64};

    #[test]
    fn defaults() {
        Jail::expect_with(|_| {
            let config: Server = Server::figment().extract()?;
            assert!(config.db.is_none());
            assert_eq!(config.http.port, 8080);
            assert_eq!(config.auth.session_cookie, "BOATHUB_SESSION");
            assert_eq!(config.auth.session_ttl_secs, NonZeroU64::new(1800).unwrap());
            assert!(config.auth.csrf_protection);
            assert!(!config.auth.secure_cookie);
            assert!(config.validate().is_ok());
            Ok(())
        });
    }

    #[test]
    fn env_aliases() {
        Jail::expect_with(|jail| {
            jail.set_env("DATABASE_URL", "postgres://localhost/boathub");

            jail.set_env("BOATHUB_HTTP_PORT", "9000");
            jail.set_env("BOATHUB_DB_MIN_IDLE", "2");
            jail.set_env("BOATHUB_DB_POOL_SIZE", "100");
            jail.set_env("BOATHUB_DB_ENFORCE_TLS", "false");
            jail.set_env("BOATHUB_DB_TIMEOUT_SECS", "3030");

            jail.set_env("BOATHUB_AUTH_SESSION_TTL_SECS", "60");
            jail.set_env("BOATHUB_AUTH_CSRF_PROTECTION", "false");
            jail.set_env("BOATHUB_LOGGING_STYLE", "pretty");

            let config: Server = Server::figment().extract()?;
            let db = config.db.as_ref().unwrap();
            assert_eq!(db.url.as_str(), "postgres://localhost/boathub");
            assert_eq!(db.min_idle.unwrap(), NonZeroU32::new(2).unwrap());
            assert_eq!(db.pool_size, NonZeroU32::new(100).unwrap());
            assert!(!db.enforce_tls);
            assert_eq!(db.timeout_secs, NonZeroU64::new(3030).unwrap());

            assert_eq!(config.http.port, 9000);
            assert_eq!(config.auth.session_ttl_secs, NonZeroU64::new(60).unwrap());
            assert!(!config.auth.csrf_protection);
            assert_eq!(config.logging.style, crate::config::LoggingStyle::Pretty);

            Ok(())
        });
    }

    #[test]
    fn prefixed_url_wins_over_alias() {
        Jail::expect_with(|jail| {
            jail.set_env("DATABASE_URL", "postgres://alias/boathub");
            jail.set_env("BOATHUB_DB_URL", "postgres://prefixed/boathub");

            let config: Server = Server::figment().extract()?;
            assert_eq!(
                config.db.unwrap().url.as_str(),
                "postgres://prefixed/boathub"
            );
            Ok(())
        });
    }

    #[test]
    fn config_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "boathub.toml",
                r#"
                [http]
                host = "0.0.0.0"
                workers = 2

                [[auth.seed]]
                username = "admin"
                password = "admin"

                [[auth.seed]]
                username = "owt"
                password = "owt"
                enabled = false
                "#,
            )?;

            let config: Server = Server::figment().extract()?;
            assert_eq!(config.http.host, "0.0.0.0");
            assert_eq!(config.http.workers.map(|v| v.get()), Some(2));
            assert_eq!(config.auth.seed.len(), 2);
            assert!(config.auth.seed[0].enabled);
            assert!(!config.auth.seed[1].enabled);
            assert!(config.validate().is_ok());
            Ok(())
        });
    }

    #[test]
    fn validation_collects_nested_errors() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "boathub.toml",
                r#"
                [db]
                url = "mysql://localhost/boathub"

                [[auth.seed]]
                username = "anonymousUser"
                password = ""
                "#,
            )?;

            let config: Server = Server::figment().extract()?;
            let error = config.validate().unwrap_err();
            let lines = error.flatten();
            assert!(lines.iter().any(|v| v.starts_with("db.url:")), "{lines:?}");
            assert!(lines.iter().any(|v| v.starts_with("auth.seed.0.username:")), "{lines:?}");
            assert!(lines.iter().any(|v| v.starts_with("auth.seed.0.password:")), "{lines:?}");
            Ok(())
        });
    }
}
