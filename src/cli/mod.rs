use clap::Parser;
use error_stack::{Result, ResultExt};
use thiserror::Error;

mod hash_password;
mod server;

#[derive(Debug, Error)]
#[error("Command failed")]
pub struct CliError;

/// Command line options for boathub.
#[derive(Debug, Parser)]
#[command(about = "Boat catalog service", version, author, long_about)]
pub struct Cli {
    #[clap(subcommand)]
    pub subcommand: Subcommand,
}

impl Cli {
    pub fn run(self) -> Result<(), CliError> {
        match self.subcommand {
            Subcommand::Server(args) => self::server::run(args).change_context(CliError),
            Subcommand::HashPassword(args) => {
                self::hash_password::run(args).change_context(CliError)
            }
        }
    }
}

#[derive(Debug, Parser)]
pub enum Subcommand {
    Server(self::server::ServerCommand),
    HashPassword(self::hash_password::HashPasswordCommand),
}
