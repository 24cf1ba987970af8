use boathub::{config::Server as Config, App};
use clap::Parser;
use error_stack::{Result, ResultExt};
use std::num::NonZeroUsize;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Could not start the server")]
pub struct StartServerError;

/// Expose the boat catalog over HTTP
#[derive(Debug, Parser)]
pub struct ServerCommand {
    #[clap(long)]
    pub host: Option<String>,
    #[clap(long)]
    pub port: Option<u16>,
    #[clap(long)]
    pub workers: Option<NonZeroUsize>,
}

pub fn run(args: ServerCommand) -> Result<(), StartServerError> {
    let mut config = Config::load().change_context(StartServerError)?;
    args.override_config(&mut config);

    boathub::logging::init(&config.logging).change_context(StartServerError)?;
    actix_web::rt::System::new().block_on(async move {
        let app = App::new(config).await.change_context(StartServerError)?;
        boathub::http::run(app).await.change_context(StartServerError)
    })
}

impl ServerCommand {
    fn override_config(&self, config: &mut Config) {
        // override server configurations if set by the cli
        if let Some(host) = &self.host {
            config.http.host = host.clone();
        }

        if let Some(port) = self.port {
            config.http.port = port;
        }

        if let Some(workers) = self.workers {
            config.http.workers = Some(workers);
        }
    }
}
