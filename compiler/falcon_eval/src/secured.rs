//! Encoded-at-rest storage for secured bindings.
//!
//! A `secure let` / `secure const` declaration never stores its value in
//! plaintext. The value is serialized together with a type tag, base64
//! armored, and prefixed so a secured blob is recognizable on sight:
//!
//! ```text
//! FALCON_SECURE_eyJ0YWciOiJpbnQiLCJ2YWx1ZSI6NDJ9
//! ```
//!
//! The armor is an at-rest encoding, not a cipher: it exists so plaintext
//! never sits in the symbol store, and it is only decodable through
//! [`SecuredValue::reveal`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use falcon_diagnostic::Diagnostic;

use crate::errors::corrupted_secured_payload;
use crate::value::Value;

/// Marker prefix carried by every armored blob.
pub const ARMOR_PREFIX: &str = "FALCON_SECURE_";

/// An armored value as stored in the symbol store.
#[derive(Clone, Debug, PartialEq)]
pub struct SecuredValue {
    armored: String,
}

impl SecuredValue {
    /// Encode a value for secured storage. Sealing an already-secured
    /// value is the identity: blobs are never armored twice.
    pub fn seal(value: &Value) -> SecuredValue {
        if let Value::Secured(sec) = value {
            return sec.clone();
        }
        let payload = serde_json::json!({
            "tag": value.tag_name(),
            "value": value.to_json(),
        });
        let encoded = STANDARD.encode(payload.to_string());
        SecuredValue {
            armored: format!("{ARMOR_PREFIX}{encoded}"),
        }
    }

    /// Reconstruct a `SecuredValue` from armored text, if it carries the
    /// armor prefix.
    pub fn from_armored(text: &str) -> Option<SecuredValue> {
        text.starts_with(ARMOR_PREFIX).then(|| SecuredValue {
            armored: text.to_string(),
        })
    }

    /// The armored blob, exactly as stored.
    pub fn armored(&self) -> &str {
        &self.armored
    }

    /// Decode the armored blob back into the original value.
    ///
    /// Any deviation from the sealed shape (missing prefix, broken
    /// base64, malformed payload, tag mismatch) is a `SecurityError`.
    pub fn reveal(&self) -> Result<Value, Diagnostic> {
        let encoded = self
            .armored
            .strip_prefix(ARMOR_PREFIX)
            .ok_or_else(corrupted_secured_payload)?;
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|_| corrupted_secured_payload())?;
        let text = String::from_utf8(bytes).map_err(|_| corrupted_secured_payload())?;
        let payload: serde_json::Value =
            serde_json::from_str(&text).map_err(|_| corrupted_secured_payload())?;
        let tag = payload
            .get("tag")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(corrupted_secured_payload)?;
        let value = payload
            .get("value")
            .and_then(Value::from_json)
            .ok_or_else(corrupted_secured_payload)?;
        if value.tag_name() != tag {
            return Err(corrupted_secured_payload());
        }
        Ok(value)
    }
}
