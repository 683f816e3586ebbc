//! Caller-owned run state.
//!
//! A `Session` remembers the last request sent and the last response applied,
//! so debug views can be shown again without rebuilding anything.
//!
//! Runs are ticketed. Only the response to the most recently issued ticket is
//! applied; a response to an older run arriving late is reported as `Stale`
//! and dropped, whatever order the responses arrive in.

use aba_dsl::framework::{RunOptions, SolveRequest};
use aba_dsl::input::NormalizedInput;
use serde::Serialize;

use crate::response::SolverResponse;
use crate::view_model::{build_view_model, ViewModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RunTicket(u64);

impl RunTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// A run that has been started but not completed.
#[derive(Debug, Clone)]
pub struct PendingRun {
    pub ticket: RunTicket,
    pub request: SolveRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Applied,
    Stale { latest: RunTicket },
}

#[derive(Debug, Default)]
pub struct Session {
    issued: u64,
    options: RunOptions,
    last_request: Option<SolveRequest>,
    last_response: Option<SolverResponse>,
    view: Option<ViewModel>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_ticket(&mut self) -> RunTicket {
        self.issued += 1;
        RunTicket(self.issued)
    }

    /// Start a run: issue a ticket and remember the request for previews.
    pub fn begin_run(&mut self, input: NormalizedInput) -> PendingRun {
        let ticket = self.next_ticket();
        let request = input.into_request();
        self.options = request.options;
        self.last_request = Some(request.clone());
        tracing::debug!(ticket = ticket.sequence(), "began solver run");
        PendingRun { ticket, request }
    }

    /// Apply a solver response if it belongs to the latest run.
    pub fn complete_run(&mut self, ticket: RunTicket, response: SolverResponse) -> RunOutcome {
        let latest = RunTicket(self.issued);
        if ticket != latest {
            tracing::debug!(
                ticket = ticket.sequence(),
                latest = latest.sequence(),
                "dropping response from superseded run"
            );
            return RunOutcome::Stale { latest };
        }

        self.view = Some(build_view_model(&response, &self.options));
        self.last_response = Some(response);
        RunOutcome::Applied
    }

    /// Drop results and previews. Runs still in flight become stale.
    pub fn clear(&mut self) {
        self.next_ticket();
        self.last_request = None;
        self.last_response = None;
        self.view = None;
    }

    pub fn view(&self) -> Option<&ViewModel> {
        self.view.as_ref()
    }

    pub fn last_request(&self) -> Option<&SolveRequest> {
        self.last_request.as_ref()
    }

    pub fn last_response(&self) -> Option<&SolverResponse> {
        self.last_response.as_ref()
    }
}
