use boathub::auth::password::{self, HashPasswordError};
use clap::Parser;
use error_stack::{Result, ResultExt};
use std::io::BufRead;

/// Print an Argon2id hash for provisioning a principal by hand.
///
/// The password is read from standard input when not given.
#[derive(Debug, Parser)]
pub struct HashPasswordCommand {
    pub password: Option<String>,
}

pub fn run(args: HashPasswordCommand) -> Result<(), HashPasswordError> {
    let password = match args.password {
        Some(password) => password,
        None => {
            let mut line = String::new();
            std::io::stdin()
                .lock()
                .read_line(&mut line)
                .change_context(HashPasswordError)
                .attach_printable("could not read password from stdin")?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    if password.is_empty() {
        return Err(error_stack::Report::new(HashPasswordError)
            .attach_printable("password must not be empty"));
    }

    println!("{}", password::hash(password)?);
    Ok(())
}
