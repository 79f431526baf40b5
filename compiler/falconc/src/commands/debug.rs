//! Debug commands: `parse` and `lex` for inspecting interpreter input.

use falcon_ir::StmtKind;
use falcon_lexer::tokenize;
use falcon_parse::parse;

use super::{read_file, report_and_exit};

/// Parse a file and display AST information.
pub fn parse_file(path: &str) {
    let source = read_file(path);
    let tokens = match tokenize(&source) {
        Ok(tokens) => tokens,
        Err(diag) => report_and_exit(diag, &source, path),
    };
    let program = match parse(&tokens) {
        Ok(program) => program,
        Err(diag) => report_and_exit(diag, &source, path),
    };

    let functions: Vec<_> = program
        .stmts
        .iter()
        .filter_map(|stmt| match &stmt.kind {
            StmtKind::FnDef { name, params, .. } => Some((name, params)),
            _ => None,
        })
        .collect();

    println!("Parse result for '{path}':");
    println!("  Statements: {}", program.stmts.len());
    println!("  Functions: {}", functions.len());

    if !functions.is_empty() {
        println!();
        println!("Functions:");
        for (name, params) in functions {
            println!("  {} ({})", name, params.join(", "));
        }
    }
}

/// Lex a file and display the token stream.
pub fn lex_file(path: &str) {
    let source = read_file(path);
    let toks = match tokenize(&source) {
        Ok(tokens) => tokens,
        Err(diag) => report_and_exit(diag, &source, path),
    };

    println!("Tokens for '{}' ({} tokens):", path, toks.len());
    for tok in &toks {
        println!("  {:?} @ {}", tok.kind, tok.span);
    }
}
