//! Falcon IR - core data types for the Falcon pipeline.
//!
//! This crate contains the shared data structures the rest of the
//! interpreter is built on:
//! - Spans for source locations
//! - Tokens and `TokenKind` for lexer output
//! - AST nodes (`Program`, `Stmt`, `Expr`, ...)
//!
//! It deliberately has no dependencies: everything downstream (lexer,
//! parser, evaluator, driver) speaks these types.

mod ast;
mod span;
mod token;

pub use ast::{
    BinOp, Builtin, CatchClause, CmpOp, Cond, Expr, ExprKind, IfArm, Program, Stmt, StmtKind,
};
pub use span::{Span, SpanError};
pub use token::{Token, TokenKind};
