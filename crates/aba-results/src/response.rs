//! Solver response schema.
//!
//! Expected shape:
//!
//! ```json
//! { "arguments":    [{"id": 0, "conclusion": "p", "assumptions": ["a"]}],
//!   "attacks":      [{"attacker": 0, "target": 1, "kind": "normal", "witness": "b"}],
//!   "attacks_sets": [{"X": ["a"], "Y": ["b"], "kind": "both", "witness": "b"}],
//!   "options":      {"use_preferences": true} }
//! ```
//!
//! The schema is checked once, here. Every list is optional: absent, `null`
//! or non-array values read as empty, and individual entries that do not fit
//! are skipped with a warning. The solver also echoes the framework it solved
//! (`literals`, `assumptions`, ...); those fields are optional as well.

use std::collections::BTreeMap;

use aba_dsl::framework::Rule;
use aba_dsl::set_key::set_literal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Opaque argument key. Assumed unique within one response, never validated
/// for density or contiguity.
pub type ArgumentId = u64;

#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("solver response is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SolverResponse {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub arguments: Vec<Argument>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub attacks: Vec<Attack>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub attacks_sets: Vec<AttackSet>,
    #[serde(default, deserialize_with = "lenient")]
    pub options: ResponseOptions,

    // Framework echo.
    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Vec::is_empty")]
    pub literals: Vec<String>,
    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Vec::is_empty")]
    pub assumptions: Vec<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "BTreeMap::is_empty")]
    pub contraries: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "lenient_seq", skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Value>,
}

impl SolverResponse {
    pub fn from_json_str(text: &str) -> Result<Self, ResponseError> {
        let value: Value = serde_json::from_str(text).map_err(ResponseError::Json)?;
        Ok(Self::from_value(value))
    }

    /// Read a response from an already-parsed JSON value. Never fails.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            tracing::warn!(
                found = value_kind(&value),
                "solver response is not a JSON object; treating as empty"
            );
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "unreadable solver response; treating as empty");
            Self::default()
        })
    }
}

/// Options echoed by the solver. Unknown keys are preserved for debugging.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResponseOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_preferences: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub do_non_circular: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub do_atomic: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Argument {
    pub id: ArgumentId,
    #[serde(default)]
    pub conclusion: String,
    /// Support set as reported, in the solver's order.
    #[serde(default)]
    pub assumptions: Vec<String>,
}

impl Argument {
    pub fn label(&self) -> String {
        argument_label(self.id)
    }

    pub fn support(&self) -> String {
        set_literal(&self.assumptions)
    }

    /// `a1: {a, b} ⊢ p`
    pub fn full_label(&self) -> String {
        format!("{}: {} ⊢ {}", self.label(), self.support(), self.conclusion)
    }
}

/// Display label for an argument id (`0` → `a1`).
pub fn argument_label(id: ArgumentId) -> String {
    format!("a{}", u128::from(id) + 1)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackKind {
    #[default]
    Normal,
    Reverse,
    /// A normal and a reverse defeat coexist between the same endpoints.
    Both,
}

impl AttackKind {
    /// Case-insensitive. Unknown kinds read as `Normal`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "reverse" => Self::Reverse,
            "both" => Self::Both,
            _ => Self::Normal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Reverse => "reverse",
            Self::Both => "both",
        }
    }
}

impl<'de> Deserialize<'de> for AttackKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse).unwrap_or_default())
    }
}

/// Pairwise attack between two arguments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attack {
    pub attacker: ArgumentId,
    pub target: ArgumentId,
    #[serde(default)]
    pub kind: AttackKind,
    /// Assumption of the target that the attack hits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub witness: Option<String>,
}

/// Set-level attack between two assumption sets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttackSet {
    #[serde(rename = "X", default)]
    pub x: Vec<String>,
    #[serde(rename = "Y", default)]
    pub y: Vec<String>,
    #[serde(default)]
    pub kind: AttackKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub witness: Option<String>,
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        if !value.is_null() {
            tracing::warn!(
                found = value_kind(&value),
                "expected an array in solver response; treating as empty"
            );
        }
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<T>(item) {
            Ok(v) => Some(v),
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping malformed solver response entry");
                None
            }
        })
        .collect())
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "malformed solver response field; using default");
        T::default()
    }))
}
