//! Raw user input → solver request.
//!
//! Routing rule: if the first non-whitespace character is `{` or `[` the text
//! is JSON and is parsed as such, with no fallback. Anything else goes through
//! the notation parser. A consequence worth knowing: notation that *starts*
//! with a rule line (`[r1]: ...`) is routed to JSON and rejected.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::framework::{Framework, RunOptions, SolveRequest};
use crate::notation::{parse_notation, NotationError};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid input: input is empty")]
    InvalidInput,
    #[error("{0}")]
    Parse(#[source] serde_json::Error),
}

impl From<NotationError> for InputError {
    fn from(err: NotationError) -> Self {
        match err {
            NotationError::EmptyInput => Self::InvalidInput,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Json,
    Notation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInput {
    pub framework: Framework,
    pub options: RunOptions,
    pub source: InputSource,
}

impl NormalizedInput {
    pub fn into_request(self) -> SolveRequest {
        SolveRequest {
            framework: self.framework,
            options: self.options,
        }
    }
}

/// Detect the input form of `text` without parsing it.
pub fn detect_source(text: &str) -> Option<InputSource> {
    match text.trim_start().chars().next()? {
        '{' | '[' => Some(InputSource::Json),
        _ => Some(InputSource::Notation),
    }
}

/// Only a JSON object is a framework. Serde would otherwise also accept a
/// top-level array as a positional struct.
fn parse_json_framework(text: &str) -> Result<Framework, serde_json::Error> {
    let object: Map<String, Value> = serde_json::from_str(text.trim())?;
    serde_json::from_value(Value::Object(object))
}

pub fn normalize_input(text: &str, options: RunOptions) -> Result<NormalizedInput, InputError> {
    let source = detect_source(text).ok_or(InputError::InvalidInput)?;
    let framework = match source {
        InputSource::Json => parse_json_framework(text).map_err(InputError::Parse)?,
        InputSource::Notation => parse_notation(text)?,
    };

    tracing::debug!(
        ?source,
        literals = framework.literals.len(),
        assumptions = framework.assumptions.len(),
        rules = framework.rules.len(),
        "normalized framework input"
    );

    Ok(NormalizedInput {
        framework,
        options,
        source,
    })
}
