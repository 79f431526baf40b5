//! HTTP-backed capabilities for the CLI.
//!
//! [`HttpAiProvider`] answers `ai.*` queries through the hosted model
//! endpoint; [`UreqSender`] carries `network.send`. Both block with a
//! short timeout so a script can never hang on a dead connection.

use std::time::Duration;

use falcon_diagnostic::Diagnostic;
use falcon_eval::errors::{ai_transport, io_failure};
use falcon_eval::{AiProvider, NetworkSender};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// AI provider backed by the Gemini `generateContent` endpoint.
///
/// Constructed only when a credential is configured; the no-credential
/// case stays on the interpreter's default provider.
pub struct HttpAiProvider {
    agent: ureq::Agent,
    api_key: String,
    model: String,
}

impl HttpAiProvider {
    pub fn new(api_key: impl Into<String>) -> HttpAiProvider {
        HttpAiProvider {
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl AiProvider for HttpAiProvider {
    fn ask(&self, prompt: &str) -> Result<String, Diagnostic> {
        let url = format!("{API_BASE}/{}:generateContent", self.model);
        // The credential travels in a header, never in the URL, so it
        // cannot leak through error messages or logs.
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });
        let response = self
            .agent
            .post(&url)
            .set("x-goog-api-key", &self.api_key)
            .set("Content-Type", "application/json")
            .send_string(&body.to_string())
            .map_err(|err| ai_transport(&err.to_string()))?;
        let raw = response
            .into_string()
            .map_err(|err| ai_transport(&err.to_string()))?;
        extract_answer(&raw).ok_or_else(|| ai_transport("response carried no generated text"))
    }
}

/// Pull the first candidate's text out of a `generateContent` response.
fn extract_answer(raw: &str) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(raw).ok()?;
    parsed
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

/// Network sender that POSTs the rendered body to the target URL.
pub struct UreqSender {
    agent: ureq::Agent,
}

impl UreqSender {
    pub fn new() -> UreqSender {
        UreqSender {
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
        }
    }
}

impl Default for UreqSender {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkSender for UreqSender {
    fn send(&self, url: &str, body: &str) -> Result<(), Diagnostic> {
        self.agent
            .post(url)
            .send_string(body)
            .map_err(|err| io_failure(&format!("cannot send to '{url}'"), &err.to_string()))?;
        Ok(())
    }
}
