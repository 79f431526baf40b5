//! The `auth` command: store the AI credential for later runs.

use crate::config::{self, Config};

/// Save an API key to the user-level config file.
///
/// Existing settings are preserved; only the credential is replaced. The
/// file is written with owner-only permissions on Unix.
pub fn auth_command(key: &str) {
    let Some(path) = config::default_path() else {
        eprintln!("cannot locate a home directory to store the Falcon config in");
        std::process::exit(1);
    };

    let mut config = match Config::load(&path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    config.api_key = Some(key.to_string());

    match config.save(&path) {
        Ok(()) => println!("credential saved to {}", path.display()),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
