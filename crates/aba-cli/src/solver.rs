//! HTTP collaborator for the external ABA solver.

use anyhow::{anyhow, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;

use aba_dsl::framework::SolveRequest;
use aba_results::SolverResponse;

use crate::config::SolverConfig;

pub struct SolverClient {
    config: SolverConfig,
    client: Client,
}

impl SolverClient {
    pub fn new(config: SolverConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| anyhow!("failed to build http client: {e}"))?;
        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// `GET /health`; any 2xx counts as healthy.
    pub fn health(&self) -> Result<String> {
        let url = self.config.health_url();
        let resp = self.client.get(&url).send().map_err(|e| {
            anyhow!("failed to reach solver at {url} ({e}). Set ABA_SOLVER_URL or pass `--url`")
        })?;
        let status = resp.status();
        let text = resp.text().unwrap_or_default();
        if !status.is_success() {
            return Err(http_error(status, &text));
        }
        Ok(text)
    }

    /// Best-effort ping so a sleeping hosted solver starts waking up before
    /// the real request. Failures are only logged.
    pub fn warm_up(&self) {
        match self.health() {
            Ok(_) => tracing::debug!(url = %self.config.base_url, "solver warm-up ok"),
            Err(e) => tracing::warn!("solver warm-up failed: {e}"),
        }
    }

    /// `POST /api/aba/run`.
    pub fn solve(&self, request: &SolveRequest) -> Result<SolverResponse> {
        let url = self.config.run_url();
        tracing::debug!(%url, "posting framework to solver");
        let resp = self.client.post(&url).json(request).send().map_err(|e| {
            anyhow!("failed to reach solver at {url} ({e}). Set ABA_SOLVER_URL or pass `--url`")
        })?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| anyhow!("failed to read solver response: {e}"))?;
        if !status.is_success() {
            return Err(http_error(status, &text));
        }

        SolverResponse::from_json_str(&text)
            .map_err(|e| anyhow!("solver returned invalid JSON: {e}"))
    }
}

/// Surface the solver's `detail` field when it sends one, else the raw body.
fn http_error(status: StatusCode, body: &str) -> anyhow::Error {
    anyhow!("solver http error {status}: {}", error_detail(body))
}

fn error_detail(body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").cloned());
    match detail {
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
        None => body.trim().to_string(),
    }
}
