//! Canonical ABA framework model and the solver request envelope.
//!
//! The JSON shape is the solver's input contract:
//!
//! ```json
//! { "literals": ["a"], "assumptions": ["a"], "contraries": {"a": "r"},
//!   "rules": [{"head": "p", "body": ["a"]}], "preferences": "a > b" }
//! ```
//!
//! Every field is optional on input. `preferences` is either an opaque string
//! expression or an arbitrary object; it is never interpreted client-side.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub type Literal = String;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Framework {
    #[serde(default)]
    pub literals: Vec<Literal>,
    #[serde(default)]
    pub assumptions: Vec<Literal>,
    #[serde(default)]
    pub contraries: BTreeMap<Literal, Literal>,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default, deserialize_with = "preferences_or_empty")]
    pub preferences: Preferences,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rule {
    pub head: Literal,
    /// Body literals in declaration order. Empty for facts.
    #[serde(default)]
    pub body: Vec<Literal>,
}

impl Rule {
    pub fn is_fact(&self) -> bool {
        self.body.is_empty()
    }
}

/// Preference payload, passed through to the solver untouched.
///
/// The expression grammar (`a > b`, `a,b > c > d`, ...) belongs to the solver;
/// the client keeps it as free text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Preferences {
    Expression(String),
    Structured(Map<String, Value>),
}

impl Default for Preferences {
    fn default() -> Self {
        Self::Structured(Map::new())
    }
}

impl Preferences {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Expression(s) => s.trim().is_empty(),
            Self::Structured(m) => m.is_empty(),
        }
    }

    pub fn as_expression(&self) -> Option<&str> {
        match self {
            Self::Expression(s) => Some(s.as_str()),
            Self::Structured(_) => None,
        }
    }
}

fn preferences_or_empty<'de, D>(deserializer: D) -> Result<Preferences, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Preferences>::deserialize(deserializer)?.unwrap_or_default())
}

/// Per-run solver switches. Sent next to the framework, never merged into it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunOptions {
    /// Ask the solver to rewrite the framework into a non-circular one first.
    #[serde(default)]
    pub do_non_circular: bool,
    /// Ask the solver to restrict to atomic (assumption-sensitive) frameworks.
    #[serde(default)]
    pub do_atomic: bool,
    /// Apply preferences when computing defeat.
    #[serde(default = "default_use_preferences")]
    pub use_preferences: bool,
}

fn default_use_preferences() -> bool {
    true
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            do_non_circular: false,
            do_atomic: false,
            use_preferences: default_use_preferences(),
        }
    }
}

/// Request body for the solver: the framework fields plus `__options`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SolveRequest {
    #[serde(flatten)]
    pub framework: Framework,
    #[serde(rename = "__options")]
    pub options: RunOptions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_default_to_empty() {
        let fw: Framework = serde_json::from_value(json!({})).expect("deserialize");
        assert!(fw.literals.is_empty());
        assert!(fw.rules.is_empty());
        assert_eq!(fw.preferences, Preferences::default());
    }

    #[test]
    fn null_preferences_become_empty_object() {
        let fw: Framework =
            serde_json::from_value(json!({ "preferences": null })).expect("deserialize");
        assert!(fw.preferences.is_empty());
        assert_eq!(serde_json::to_value(&fw.preferences).unwrap(), json!({}));
    }

    #[test]
    fn string_preferences_stay_opaque() {
        let fw: Framework =
            serde_json::from_value(json!({ "preferences": "a,b > c" })).expect("deserialize");
        assert_eq!(fw.preferences.as_expression(), Some("a,b > c"));
    }

    #[test]
    fn request_flattens_framework_and_nests_options() {
        let request = SolveRequest {
            framework: Framework {
                literals: vec!["a".to_string()],
                assumptions: vec!["a".to_string()],
                ..Framework::default()
            },
            options: RunOptions {
                do_non_circular: true,
                do_atomic: false,
                use_preferences: false,
            },
        };
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(value["literals"], json!(["a"]));
        assert_eq!(value["preferences"], json!({}));
        assert_eq!(
            value["__options"],
            json!({ "do_non_circular": true, "do_atomic": false, "use_preferences": false })
        );
        assert!(value.get("options").is_none());
    }

    #[test]
    fn options_default_applies_preferences() {
        let options: RunOptions = serde_json::from_value(json!({})).expect("deserialize");
        assert_eq!(options, RunOptions::default());
        assert!(options.use_preferences);
    }
}
