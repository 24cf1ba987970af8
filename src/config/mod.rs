use thiserror::Error;

mod auth;
mod database;
mod http;
mod logging;
mod server;

pub use auth::{Auth, SeedPrincipal};
pub use database::Database;
pub use http::Http;
pub use logging::{Logging, LoggingStyle};
pub use server::Server;

#[derive(Debug, Error)]
#[error("Failed to load configuration")]
pub struct ParseError;
