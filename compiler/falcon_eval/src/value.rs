//! Runtime values for the Falcon interpreter.

use std::collections::BTreeMap;
use std::fmt;

use crate::secured::SecuredValue;

/// A runtime value. The variant is fixed by literal syntax at parse time
/// and never re-inferred from string content afterwards.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Absent value: a function body that finishes without `return`.
    Unit,
    Int(i64),
    Str(String),
    List(Vec<Value>),
    /// Map keys are sorted, so rendering is deterministic.
    Map(BTreeMap<String, Value>),
    /// Encoded-at-rest binding created by `secure let` / `secure const`.
    Secured(SecuredValue),
}

impl Value {
    /// Human-readable type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Int(_) => "integer",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Secured(_) => "secured value",
        }
    }

    /// Render for `print`/`say`/`log`: strings are written raw, secured
    /// values show their armored form, the absent value shows nothing.
    pub fn render(&self) -> String {
        match self {
            Value::Unit => String::new(),
            Value::Str(s) => s.clone(),
            Value::Secured(sec) => sec.armored().to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_secured(&self) -> bool {
        matches!(self, Value::Secured(_))
    }

    /// Encode as JSON for the secured-storage payload.
    pub(crate) fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Unit => serde_json::Value::Null,
            Value::Int(n) => serde_json::Value::from(*n),
            Value::Str(s) => serde_json::Value::from(s.as_str()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            // A nested secured value stays opaque: it round-trips as its
            // armored text.
            Value::Secured(sec) => serde_json::Value::from(sec.armored()),
        }
    }

    /// Decode from the secured-storage payload. Returns `None` for JSON
    /// shapes no Falcon value produces (floats, booleans).
    pub(crate) fn from_json(json: &serde_json::Value) -> Option<Value> {
        match json {
            serde_json::Value::Null => Some(Value::Unit),
            serde_json::Value::Number(n) => n.as_i64().map(Value::Int),
            serde_json::Value::String(s) => Some(Value::Str(s.clone())),
            serde_json::Value::Array(items) => items
                .iter()
                .map(Value::from_json)
                .collect::<Option<Vec<_>>>()
                .map(Value::List),
            serde_json::Value::Object(entries) => entries
                .iter()
                .map(|(k, v)| Value::from_json(v).map(|v| (k.clone(), v)))
                .collect::<Option<BTreeMap<_, _>>>()
                .map(Value::Map),
            serde_json::Value::Bool(_) => None,
        }
    }

    /// Type tag recorded alongside the secured encoding.
    pub(crate) fn tag_name(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Int(_) => "int",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Secured(_) => "secured",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "()"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "\"{s}\""),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{k}\": {v}")?;
                }
                write!(f, "}}")
            }
            Value::Secured(sec) => write!(f, "{}", sec.armored()),
        }
    }
}
