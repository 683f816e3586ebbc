//! ABA solver client
//!
//! Command-line front end for an external Assumption-Based Argumentation solver:
//! - Parse notation or JSON frameworks into the solver request (`parse`)
//! - Send a framework to the solver and show arguments and attacks (`run`)
//! - Rebuild the same tables from a saved solver response, offline (`render`)
//! - Probe the solver (`health`) and print a starter framework (`sample`)

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use aba_dsl::framework::RunOptions;
use aba_dsl::input::{normalize_input, NormalizedInput};
use aba_dsl::notation::{format_notation, SAMPLE_NOTATION};
use aba_results::graph::{render_dot, ArgumentGraph};
use aba_results::summary::FrameworkSummary;
use aba_results::view_model::ViewModel;
use aba_results::{build_view_model, RunOutcome, Session, SolverResponse};

mod config;
mod render;
mod solver;

use config::{SolverArgs, SolverConfig};
use solver::SolverClient;

#[derive(Parser)]
#[command(name = "aba")]
#[command(author, version, about = "Client for an Assumption-Based Argumentation solver")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a framework and print the request that would be sent.
    Parse {
        /// Framework file (notation or JSON), or `-` for stdin.
        input: String,
        #[arg(long, value_enum, default_value_t = ParseFormat::Json)]
        format: ParseFormat,
        #[command(flatten)]
        options: RunFlags,
    },

    /// Send a framework to the solver and print arguments and attacks.
    Run {
        /// Framework file (notation or JSON), or `-` for stdin.
        input: String,
        #[command(flatten)]
        options: RunFlags,
        #[command(flatten)]
        solver: SolverArgs,
        #[command(flatten)]
        output: OutputArgs,
        /// Write the solver response as JSON.
        #[arg(long)]
        save_response: Option<PathBuf>,
        /// Skip the health ping sent before the run.
        #[arg(long)]
        no_warm_up: bool,
    },

    /// Build the tables from a saved solver response, without contacting the solver.
    ///
    /// `options.use_preferences` in the response wins over `--no-preferences`.
    Render {
        /// Solver response JSON (as written by `run --save-response`), or `-` for stdin.
        response: String,
        #[command(flatten)]
        options: RunFlags,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Check that the solver is reachable.
    Health {
        #[command(flatten)]
        solver: SolverArgs,
    },

    /// Print a sample framework in text notation.
    Sample,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ParseFormat {
    Json,
    Notation,
}

#[derive(Debug, Clone, Copy, Args)]
struct RunFlags {
    /// Ask the solver to transform the framework into a non-circular one.
    #[arg(long)]
    non_circular: bool,
    /// Ask the solver to transform the framework into an atomic one.
    #[arg(long)]
    atomic: bool,
    /// Show pairwise attacks even when preference-aware attacks are available.
    #[arg(long)]
    no_preferences: bool,
}

impl RunFlags {
    fn to_options(self) -> RunOptions {
        RunOptions {
            do_non_circular: self.non_circular,
            do_atomic: self.atomic,
            use_preferences: !self.no_preferences,
        }
    }
}

#[derive(Debug, Clone, Args)]
struct OutputArgs {
    /// Print the view model as JSON instead of tables.
    #[arg(long)]
    json: bool,
    /// Write the argument graph as Graphviz DOT.
    #[arg(long)]
    dot: Option<PathBuf>,
}

#[derive(Serialize)]
struct ViewOutput<'a> {
    summary: &'a FrameworkSummary,
    view: &'a ViewModel,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run_command(cli.command) {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Parse {
            input,
            format,
            options,
        } => cmd_parse(&input, format, options.to_options()),
        Commands::Run {
            input,
            options,
            solver,
            output,
            save_response,
            no_warm_up,
        } => cmd_run(
            &input,
            options.to_options(),
            &solver,
            &output,
            save_response.as_deref(),
            !no_warm_up,
        ),
        Commands::Render {
            response,
            options,
            output,
        } => cmd_render(&response, options.to_options(), &output),
        Commands::Health { solver } => cmd_health(&solver),
        Commands::Sample => {
            println!("{SAMPLE_NOTATION}");
            Ok(())
        }
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }
    fs::read_to_string(input).with_context(|| format!("failed to read {input}"))
}

fn load_framework(input: &str, options: RunOptions) -> Result<NormalizedInput> {
    let text = read_input(input)?;
    normalize_input(&text, options).with_context(|| format!("failed to parse {input}"))
}

fn cmd_parse(input: &str, format: ParseFormat, options: RunOptions) -> Result<()> {
    let normalized = load_framework(input, options)?;
    match format {
        ParseFormat::Json => {
            let request = normalized.into_request();
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
        ParseFormat::Notation => println!("{}", format_notation(&normalized.framework)),
    }
    Ok(())
}

fn cmd_run(
    input: &str,
    options: RunOptions,
    solver: &SolverArgs,
    output: &OutputArgs,
    save_response: Option<&Path>,
    warm_up: bool,
) -> Result<()> {
    let normalized = load_framework(input, options)?;
    let request_summary = FrameworkSummary::from_framework(&normalized.framework);

    let client = SolverClient::new(SolverConfig::resolve(solver)?)?;
    let mut session = Session::new();
    let pending = session.begin_run(normalized);

    if warm_up {
        client.warm_up();
    }
    if !output.json {
        eprintln!("{} {}", "Solving".green().bold(), client.base_url());
    }
    let response = client.solve(&pending.request)?;

    if let Some(path) = save_response {
        fs::write(path, serde_json::to_string_pretty(&response)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("{} {}", "wrote".green().bold(), path.display().to_string().bold());
    }

    match session.complete_run(pending.ticket, response) {
        RunOutcome::Applied => {}
        RunOutcome::Stale { latest } => {
            return Err(anyhow!(
                "solver response belongs to a superseded run (latest run #{})",
                latest.sequence()
            ));
        }
    }

    let view = session
        .view()
        .ok_or_else(|| anyhow!("no result view after a completed run"))?;
    // Prefer the framework the solver actually solved (it may have been transformed).
    let summary = match session.last_response() {
        Some(resp) if !resp.literals.is_empty() || !resp.assumptions.is_empty() => {
            FrameworkSummary::from_response(resp)
        }
        _ => request_summary,
    };
    emit_view(&summary, view, output)
}

fn cmd_render(path: &str, flags: RunOptions, output: &OutputArgs) -> Result<()> {
    let text = read_input(path)?;
    let response = SolverResponse::from_json_str(&text)
        .with_context(|| format!("failed to read solver response {path}"))?;

    let options = RunOptions {
        use_preferences: response
            .options
            .use_preferences
            .unwrap_or(flags.use_preferences),
        ..flags
    };
    let view = build_view_model(&response, &options);
    let summary = FrameworkSummary::from_response(&response);
    emit_view(&summary, &view, output)
}

fn emit_view(summary: &FrameworkSummary, view: &ViewModel, output: &OutputArgs) -> Result<()> {
    if let Some(path) = &output.dot {
        let dot = render_dot(&ArgumentGraph::from_view(view));
        fs::write(path, dot).with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("{} {}", "wrote".green().bold(), path.display().to_string().bold());
    }

    if output.json {
        let out = ViewOutput { summary, view };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        render::print_view(summary, view);
    }
    Ok(())
}

fn cmd_health(solver: &SolverArgs) -> Result<()> {
    let client = SolverClient::new(SolverConfig::resolve(solver)?)?;
    let body = client.health()?;
    println!("{} {}", "ok".green().bold(), client.base_url());
    if !body.trim().is_empty() {
        println!("  {}", body.trim());
    }
    Ok(())
}
