//! Network capability for the `network.send` built-in.
//!
//! Like the AI bridge, the interpreter only sees a trait. Failures are
//! `IoError` and therefore catchable in Falcon code.

use falcon_diagnostic::Diagnostic;

use crate::errors::io_failure;

/// Outbound one-shot send: POST `body` to `url`, blocking, bounded by
/// the implementation's timeout.
pub trait NetworkSender {
    /// # Errors
    /// `IoError` on any transport failure.
    fn send(&self, url: &str, body: &str) -> Result<(), Diagnostic>;
}

/// Sender used when no network capability is configured.
#[derive(Debug, Default)]
pub struct NoNetwork;

impl NetworkSender for NoNetwork {
    fn send(&self, url: &str, _body: &str) -> Result<(), Diagnostic> {
        Err(io_failure(
            &format!("cannot send to '{url}'"),
            "no network capability is configured",
        ))
    }
}
