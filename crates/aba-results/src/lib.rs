//! ABA solver results → render-ready view models
//!
//! The solver returns arguments, pairwise attacks and set-level (preference)
//! attacks. This crate:
//! - reads that response through an explicit, forgiving schema (`response`),
//! - resolves argument identity by assumption-set equality and builds
//!   deduplicated, addressable rows (`view_model`),
//! - derives secondary views: a framework summary (`summary`) and an argument
//!   graph with DOT output (`graph`),
//! - keeps the last request/result in a caller-owned `Session` (`session`).
//!
//! Nothing here computes arguments or defeat. That stays with the solver.

pub mod graph;
pub mod response;
pub mod session;
pub mod summary;
pub mod view_model;

pub use response::{
    Argument, ArgumentId, Attack, AttackKind, AttackSet, ResponseError, SolverResponse,
};
pub use session::{PendingRun, RunOutcome, RunTicket, Session};
pub use view_model::{build_view_model, AttackView, DisplayKind, ViewModel};
