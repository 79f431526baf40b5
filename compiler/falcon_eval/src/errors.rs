//! Centralized error constructors for the evaluator.
//!
//! Every fault the interpreter can raise is built here, so message
//! wording lives in one place. The constructors return span-less
//! diagnostics; callers attach the offending span.

use falcon_diagnostic::{Diagnostic, ErrorKind};

// Name and function errors

#[cold]
pub fn undefined_variable(name: &str) -> Diagnostic {
    Diagnostic::new(ErrorKind::Name, format!("undefined variable '{name}'"))
}

#[cold]
pub fn undefined_function(name: &str) -> Diagnostic {
    Diagnostic::new(ErrorKind::Name, format!("undefined function '{name}'"))
}

#[cold]
pub fn duplicate_function(name: &str) -> Diagnostic {
    Diagnostic::new(
        ErrorKind::Func,
        format!("function '{name}' is already defined"),
    )
}

#[cold]
pub fn call_depth_exceeded(name: &str, limit: usize) -> Diagnostic {
    Diagnostic::new(
        ErrorKind::Func,
        format!("call depth limit of {limit} exceeded in '{name}'"),
    )
}

#[cold]
pub fn const_rebinding(name: &str) -> Diagnostic {
    Diagnostic::new(
        ErrorKind::Const,
        format!("cannot rebind constant '{name}'"),
    )
}

// Arithmetic and comparison errors

#[cold]
pub fn division_by_zero() -> Diagnostic {
    Diagnostic::new(ErrorKind::Math, "division by zero")
}

#[cold]
pub fn integer_overflow(op: &str) -> Diagnostic {
    Diagnostic::new(ErrorKind::Math, format!("integer overflow in '{op}'"))
}

#[cold]
pub fn binary_type_mismatch(op: &str, lhs: &str, rhs: &str) -> Diagnostic {
    Diagnostic::new(
        ErrorKind::Type,
        format!("cannot apply '{op}' to {lhs} and {rhs}"),
    )
}

#[cold]
pub fn compare_type_mismatch(op: &str, lhs: &str, rhs: &str) -> Diagnostic {
    Diagnostic::new(
        ErrorKind::Type,
        format!("cannot compare {lhs} and {rhs} with '{op}'"),
    )
}

// Call-shape errors

#[cold]
pub fn wrong_arg_count(name: &str, expected: usize, got: usize) -> Diagnostic {
    let noun = if expected == 1 { "argument" } else { "arguments" };
    Diagnostic::new(
        ErrorKind::Type,
        format!("'{name}' expects {expected} {noun}, got {got}"),
    )
}

#[cold]
pub fn wrong_arg_type(what: &str, expected: &str, got: &str) -> Diagnostic {
    Diagnostic::new(
        ErrorKind::Type,
        format!("{what} must be {expected}, got {got}"),
    )
}

// Crypto errors

#[cold]
pub fn empty_cipher_key() -> Diagnostic {
    Diagnostic::new(ErrorKind::Type, "cipher key must be a non-empty string")
}

#[cold]
pub fn invalid_random_range(min: i64, max: i64) -> Diagnostic {
    Diagnostic::new(
        ErrorKind::Type,
        format!("random range is empty: {min} > {max}"),
    )
}

#[cold]
pub fn invalid_ciphertext() -> Diagnostic {
    Diagnostic::new(ErrorKind::Type, "ciphertext is not valid hex")
}

#[cold]
pub fn undecodable_plaintext() -> Diagnostic {
    Diagnostic::new(
        ErrorKind::Type,
        "decrypted bytes are not valid UTF-8 text",
    )
}

#[cold]
pub fn negative_wait(got: i64) -> Diagnostic {
    Diagnostic::new(
        ErrorKind::Type,
        format!("wait duration must be non-negative, got {got}"),
    )
}

// Sandbox and secured-storage errors

#[cold]
pub fn sandbox_escape(path: &str) -> Diagnostic {
    Diagnostic::new(
        ErrorKind::Security,
        format!("path '{path}' escapes the sandbox root"),
    )
}

#[cold]
pub fn corrupted_secured_payload() -> Diagnostic {
    Diagnostic::new(ErrorKind::Security, "secured payload is corrupted")
}

// Module errors

#[cold]
pub fn module_load_failed(module: &str, reason: &str) -> Diagnostic {
    Diagnostic::new(
        ErrorKind::Import,
        format!("cannot load module '{module}': {reason}"),
    )
}

#[cold]
pub fn circular_import(module: &str) -> Diagnostic {
    Diagnostic::new(ErrorKind::Import, format!("circular import of '{module}'"))
}

// I/O and AI bridge errors

#[cold]
pub fn io_failure(what: &str, reason: &str) -> Diagnostic {
    Diagnostic::new(ErrorKind::Io, format!("{what}: {reason}"))
}

#[cold]
pub fn ai_unavailable() -> Diagnostic {
    Diagnostic::new(ErrorKind::AiUnavailable, "no AI credential is configured")
}

#[cold]
pub fn ai_transport(reason: &str) -> Diagnostic {
    Diagnostic::new(ErrorKind::Ai, reason)
}
