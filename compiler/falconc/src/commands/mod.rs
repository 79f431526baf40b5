//! Command handlers for the Falcon CLI.
//!
//! Each submodule implements a specific CLI command (run, auth, lex,
//! parse). Shared utilities like `read_file` live here in the module
//! root.

mod auth;
mod debug;
mod run;

// Internal re-exports for use by the CLI binary via falconc::commands::*
pub use auth::auth_command;
pub use debug::{lex_file, parse_file};
pub use run::run_file;

/// Render a diagnostic against its source file and exit.
///
/// This is the single exit path for lex, parse, and runtime failures, so
/// every command reports errors in the same `error[Kind]` shape.
pub(super) fn report_and_exit(diag: falcon_diagnostic::Diagnostic, source: &str, path: &str) -> ! {
    eprintln!("{}", diag.locate(source, path).render());
    std::process::exit(1);
}

/// Read a file from disk, exiting with a user-friendly error message on failure.
pub(super) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}
