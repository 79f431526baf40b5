#![deny(clippy::arithmetic_side_effects)]
//! Falcon Eval - the tree-walking interpreter for Falcon programs.
//!
//! The evaluator walks the AST from `falcon_ir` directly; there is no
//! lowering step. Its moving parts:
//! - [`Interpreter`]: statement execution, function calls, imports
//! - [`Environment`]: parent-linked scopes with const/secured markings
//! - [`evaluate_binary`] / [`evaluate_compare`]: operator dispatch
//! - [`SecuredValue`]: armored at-rest encoding for `secure` bindings
//! - [`SandboxedFs`], [`AiProvider`], [`NetworkSender`], [`PrintHandler`]:
//!   capability seams, injected through [`InterpreterBuilder`]
//!
//! Control flow (`return`, `break`, `continue`) travels as
//! [`Signal`] values, never as errors, so `try`/`catch` only ever
//! observes real failures.

mod ai;
mod crypto;
mod environment;
pub mod errors;
mod fs;
mod interpreter;
mod net;
mod operators;
mod print_handler;
mod secured;
mod value;

pub use ai::{AiProvider, AiRole, NullProvider};
pub use environment::{Environment, LocalScope, Scope};
pub use fs::SandboxedFs;
pub use interpreter::{Interpreter, InterpreterBuilder, Signal, MAX_CALL_DEPTH};
pub use net::{NetworkSender, NoNetwork};
pub use operators::{evaluate_binary, evaluate_compare};
pub use print_handler::PrintHandler;
pub use secured::{SecuredValue, ARMOR_PREFIX};
pub use value::Value;
