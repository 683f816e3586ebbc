//! One-line-per-field summary of a framework (`L`, `A`, contraries, preferences).

use std::collections::BTreeMap;

use aba_dsl::framework::{Framework, Preferences};
use serde::Serialize;
use serde_json::Value;

use crate::response::SolverResponse;

const MISSING: &str = "—";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FrameworkSummary {
    pub literals: String,
    pub assumptions: String,
    pub contraries: String,
    pub preferences: String,
}

impl FrameworkSummary {
    pub fn from_framework(framework: &Framework) -> Self {
        let preferences = match &framework.preferences {
            Preferences::Expression(s) => Value::String(s.clone()),
            Preferences::Structured(m) => Value::Object(m.clone()),
        };
        Self {
            literals: framework.literals.join(", "),
            assumptions: framework.assumptions.join(", "),
            contraries: format_contraries(&framework.contraries),
            preferences: format_preferences(Some(&preferences)),
        }
    }

    /// Summary of the framework echoed back by the solver.
    pub fn from_response(response: &SolverResponse) -> Self {
        Self {
            literals: response.literals.join(", "),
            assumptions: response.assumptions.join(", "),
            contraries: format_contraries(&response.contraries),
            preferences: format_preferences(response.preferences.as_ref()),
        }
    }

    pub fn rows(&self) -> [(&'static str, &str); 4] {
        [
            ("Literals (L)", self.literals.as_str()),
            ("Assumptions (A)", self.assumptions.as_str()),
            ("Contraries", self.contraries.as_str()),
            ("Preferences", self.preferences.as_str()),
        ]
    }
}

fn format_contraries(contraries: &BTreeMap<String, String>) -> String {
    contraries
        .iter()
        .map(|(a, c)| format!("C({a})={c}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_preferences(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING.to_string(),
        Some(Value::String(s)) if s.is_empty() => MISSING.to_string(),
        Some(v) => v.to_string(),
    }
}
