//! AI bridge capability for the `ai.*` built-ins.
//!
//! The interpreter never talks to a model itself. It wraps the prompt in
//! a role template and hands it to whatever [`AiProvider`] it was
//! constructed with; the CLI supplies an HTTP-backed provider, tests
//! supply scripted ones. With no provider configured, every query fails
//! with `AiUnavailable`, which the interpreter degrades to an
//! error-describing string value, since AI output is best-effort.

use falcon_diagnostic::Diagnostic;

use crate::errors::ai_unavailable;

/// One role per `ai.*` built-in head.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiRole {
    Ask,
    GenerateCode,
    Explain,
    Refactor,
}

impl AiRole {
    /// Wrap a raw prompt in this role's instruction template.
    pub fn wrap(self, prompt: &str) -> String {
        match self {
            AiRole::Ask => format!("Act as a helpful assistant. {prompt}"),
            AiRole::GenerateCode => {
                format!("Act as an expert programmer. Write code for: {prompt}")
            }
            AiRole::Explain => format!("Act as a patient teacher. Explain: {prompt}"),
            AiRole::Refactor => {
                format!("Act as a code reviewer. Refactor and improve: {prompt}")
            }
        }
    }
}

/// External AI capability: one blocking query, bounded by the
/// implementation's own timeout.
pub trait AiProvider {
    /// Send one wrapped prompt and return the model's text.
    ///
    /// # Errors
    /// `AiUnavailable` when no credential is configured, `AiError` on
    /// transport failure.
    fn ask(&self, prompt: &str) -> Result<String, Diagnostic>;
}

/// Provider used when no credential is configured. Always unavailable.
#[derive(Debug, Default)]
pub struct NullProvider;

impl AiProvider for NullProvider {
    fn ask(&self, _prompt: &str) -> Result<String, Diagnostic> {
        Err(ai_unavailable())
    }
}
