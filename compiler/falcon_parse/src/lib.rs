//! Recursive descent parser for Falcon.
//!
//! Turns the token stream from `falcon_lexer` into the tree AST defined in
//! `falcon_ir`. Parsing is fail-fast: the first malformed construct aborts
//! with a `Diagnostic` carrying the offending span.

mod cursor;
mod grammar;

pub use cursor::Cursor;
pub use grammar::parse;
