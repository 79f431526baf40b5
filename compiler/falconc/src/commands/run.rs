//! The `run` command: tokenize, parse, and evaluate a Falcon source file.

use std::path::Path;

use falcon_eval::Interpreter;
use falcon_lexer::tokenize;
use falcon_parse::parse;

use crate::config::{self, Config};
use crate::providers::{HttpAiProvider, UreqSender};

use super::{read_file, report_and_exit};

/// Run a Falcon source file: tokenize, parse, and evaluate it.
///
/// The interpreter is sandboxed to the script's own directory, so `file.*`
/// builtins and `import` both resolve relative to the script. AI queries go
/// over HTTP only when a credential is configured; otherwise they degrade to
/// a catchable `AiUnavailable` value inside the script.
pub fn run_file(path: &str) {
    let source = read_file(path);

    let tokens = match tokenize(&source) {
        Ok(tokens) => tokens,
        Err(diag) => report_and_exit(diag, &source, path),
    };
    let program = match parse(&tokens) {
        Ok(program) => program,
        Err(diag) => report_and_exit(diag, &source, path),
    };

    // Scripts read, write, and import relative to where they live, not
    // relative to wherever the CLI was invoked from.
    let script_dir = Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let config = match config::default_path().map(|config_path| Config::load(&config_path)) {
        Some(Ok(config)) => config,
        Some(Err(err)) => {
            tracing::warn!(%err, "ignoring unreadable config");
            Config::default()
        }
        None => Config::default(),
    };

    let mut builder = Interpreter::builder()
        .sandbox_root(script_dir)
        .module_root(script_dir)
        .network(UreqSender::new());
    if let Some(key) = config.api_key {
        builder = builder.ai_provider(HttpAiProvider::new(key));
    }
    let mut interpreter = builder.build();

    if let Err(diag) = interpreter.run(&program) {
        report_and_exit(diag, &source, path);
    }
}
