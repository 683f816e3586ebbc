//! Solver connection settings.
//!
//! Precedence for every setting:
//! 1) command-line flag
//! 2) environment variable
//! 3) built-in default

use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Args;

pub(crate) const ABA_SOLVER_URL_ENV: &str = "ABA_SOLVER_URL";
pub(crate) const ABA_SOLVER_TIMEOUT_SECS_ENV: &str = "ABA_SOLVER_TIMEOUT_SECS";

const DEFAULT_SOLVER_URL: &str = "http://127.0.0.1:8000";
// Hosted solvers may cold-start; keep the default generous.
const DEFAULT_SOLVER_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Default, Args)]
pub struct SolverArgs {
    /// Solver base URL (default: $ABA_SOLVER_URL or http://127.0.0.1:8000).
    #[arg(long)]
    pub url: Option<String>,

    /// Per-request timeout in seconds (default: $ABA_SOLVER_TIMEOUT_SECS or 60).
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl SolverConfig {
    pub fn resolve(args: &SolverArgs) -> Result<Self> {
        let env_url = read_env(ABA_SOLVER_URL_ENV)?;
        let env_timeout = read_env(ABA_SOLVER_TIMEOUT_SECS_ENV)?;
        Self::from_sources(args, env_url.as_deref(), env_timeout.as_deref())
    }

    fn from_sources(
        args: &SolverArgs,
        env_url: Option<&str>,
        env_timeout: Option<&str>,
    ) -> Result<Self> {
        let base_url = normalize_base_url(
            args.url
                .as_deref()
                .or(env_url)
                .unwrap_or(DEFAULT_SOLVER_URL),
        );

        let timeout_secs = match (args.timeout_secs, env_timeout.map(str::trim)) {
            (Some(secs), _) => secs,
            (None, Some(v)) if !v.is_empty() => v.parse::<u64>().map_err(|_| {
                anyhow!("invalid {ABA_SOLVER_TIMEOUT_SECS_ENV}={v:?} (expected integer seconds, e.g. 60)")
            })?,
            (None, _) => DEFAULT_SOLVER_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs.max(1)),
        })
    }

    pub fn run_url(&self) -> String {
        format!("{}/api/aba/run", self.base_url)
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }
}

fn read_env(name: &str) -> Result<Option<String>> {
    match std::env::var(name) {
        Ok(v) => Ok(Some(v)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(anyhow!("failed to read {name}: {e}")),
    }
}

fn normalize_base_url(url: &str) -> String {
    let mut url = url.trim().to_string();
    if url.is_empty() {
        url = DEFAULT_SOLVER_URL.to_string();
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        url = format!("http://{url}");
    }
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_env_beats_default() {
        let args = SolverArgs {
            url: Some("https://solver.example/".to_string()),
            timeout_secs: Some(5),
        };
        let cfg = SolverConfig::from_sources(&args, Some("http://env:1"), Some("9")).unwrap();
        assert_eq!(cfg.base_url, "https://solver.example");
        assert_eq!(cfg.timeout, Duration::from_secs(5));

        let cfg =
            SolverConfig::from_sources(&SolverArgs::default(), Some("env:1"), Some(" 9 ")).unwrap();
        assert_eq!(cfg.base_url, "http://env:1");
        assert_eq!(cfg.timeout, Duration::from_secs(9));

        let cfg = SolverConfig::from_sources(&SolverArgs::default(), None, None).unwrap();
        assert_eq!(cfg.base_url, DEFAULT_SOLVER_URL);
        assert_eq!(cfg.timeout, Duration::from_secs(DEFAULT_SOLVER_TIMEOUT_SECS));
    }

    #[test]
    fn bad_timeout_env_is_reported() {
        let err = SolverConfig::from_sources(&SolverArgs::default(), None, Some("soon"))
            .unwrap_err()
            .to_string();
        assert!(err.contains(ABA_SOLVER_TIMEOUT_SECS_ENV), "err={err}");
    }

    #[test]
    fn endpoint_urls_hang_off_base() {
        let cfg = SolverConfig::from_sources(&SolverArgs::default(), Some("localhost:9000/"), None)
            .unwrap();
        assert_eq!(cfg.run_url(), "http://localhost:9000/api/aba/run");
        assert_eq!(cfg.health_url(), "http://localhost:9000/health");
    }
}
