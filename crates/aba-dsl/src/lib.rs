//! ABA framework input layer
//!
//! This crate owns everything that happens *before* a framework is handed to the
//! external solver:
//! - the canonical `Framework` model and the request envelope (`framework`),
//! - the compact line-oriented text notation (`notation`),
//! - the JSON-vs-notation routing that turns raw user input into a request (`input`),
//! - canonical keys for unordered assumption sets (`set_key`).
//!
//! Nothing here validates referential consistency (a rule may mention a literal
//! that is never declared). That is the solver's job.

pub mod framework;
pub mod input;
pub mod notation;
pub mod set_key;

pub use framework::{Framework, Preferences, Rule, RunOptions, SolveRequest};
pub use input::{normalize_input, InputError, InputSource, NormalizedInput};
pub use notation::{format_notation, parse_notation, Directive, NotationError};
pub use set_key::{canonical_key, set_literal};
