//! HTTP adapter: maps routes onto [`BoatService`] and [`AuthGate`]
//! calls and their results onto responses.
//!
//! [`BoatService`]: crate::services::BoatService
//! [`AuthGate`]: crate::auth::AuthGate
use actix_web::{web, HttpServer};
use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing_actix_web::TracingLogger;

use crate::types::validation::ValidateError;
use crate::App;

mod actor;
pub mod controllers;
mod csrf;

pub use actor::SessionToken;
pub use csrf::{CsrfChecked, CSRF_HEADER, CSRF_PARAMETER};

#[derive(Debug, Error)]
#[error("Failed to run HTTP server")]
pub struct ServerError;

/// Registers body/query error handlers and every route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        crate::error::Error::from(ValidateError::field("_body", err.to_string())).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        crate::error::Error::from(ValidateError::field("_query", err.to_string())).into()
    }))
    .configure(controllers::configure);
}

/// Serves `app` until the server is stopped.
pub async fn run(app: App) -> Result<(), ServerError> {
    let http = app.config.http.clone();
    let data = web::Data::new(app);

    let mut server = HttpServer::new(move || {
        actix_web::App::new()
            .app_data(data.clone())
            .wrap(TracingLogger::default())
            .configure(configure)
    });

    if let Some(workers) = http.workers {
        server = server.workers(workers.get());
    }

    tracing::info!("listening on {}:{}", http.host, http.port);
    server
        .bind((http.host.as_str(), http.port))
        .change_context(ServerError)
        .attach_printable_lazy(|| format!("could not bind to {}:{}", http.host, http.port))?
        .run()
        .await
        .change_context(ServerError)
}
