//! EGF advisor CLI
//!
//! Evaluates automated decisions against the six-rule ethics framework.
//!
//! ## Usage
//!
//! ```bash
//! # Run the built-in demonstration scenarios
//! egf-advisor demo
//!
//! # Evaluate one action (JSON or TOML table of the eleven attributes)
//! egf-advisor evaluate --action action.json --format json
//!
//! # Print the rule table
//! egf-advisor rules
//! ```
//!
//! ## Exit Codes
//!
//! - 0: success
//! - 1: a scenario contradicted its prediction, or `--fail-on-violation` and the action is impermissible
//! - 2: error (bad input, config, or I/O)

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use contracts::{Action, EvaluationResult};
use egf_core::report::{self, ReportFormat};
use egf_core::services::decision_for;
use egf_core::{Advisor, AdvisorConfig, Decision, ScenarioOutcome, ScenarioPack};

#[derive(Parser)]
#[command(name = "egf-advisor", version)]
#[command(about = "Check automated decisions against the EGF ethics rules", long_about = None)]
struct Cli {
    /// Config file (defaults to ./egf.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Evaluate the demonstration scenarios and compare against their predictions
    Demo {
        /// Only run the scenario with this key (e.g. A, B, C)
        #[arg(long)]
        scenario: Option<String>,
        /// Scenario pack to use instead of the configured or embedded one
        #[arg(long)]
        scenarios: Option<PathBuf>,
        #[arg(short, long)]
        format: Option<ReportFormat>,
        /// Fixed RFC 3339 timestamp for JSON output
        #[arg(long, value_parser = parse_datetime)]
        evaluated_at: Option<DateTime<Utc>>,
    },
    /// Evaluate a single action file (reads JSON from stdin if no file is given)
    Evaluate {
        #[arg(short, long)]
        action: Option<PathBuf>,
        #[arg(short, long)]
        format: Option<ReportFormat>,
        /// Exit with status 1 when the action is impermissible
        #[arg(long)]
        fail_on_violation: bool,
        #[arg(long, value_parser = parse_datetime)]
        evaluated_at: Option<DateTime<Utc>>,
    },
    /// List the violation rules and their formulas
    Rules {
        #[arg(short, long)]
        format: Option<ReportFormat>,
    },
    /// Write the embedded scenario pack into a directory for editing
    Init {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp: {e}"))
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let cfg = AdvisorConfig::load(cli.config.as_deref())?;
    init_logging(&cfg.logging.filter);
    cfg.log_source();

    match cli.cmd {
        Cmd::Demo {
            scenario,
            scenarios,
            format,
            evaluated_at,
        } => demo(
            cfg,
            scenario.as_deref(),
            scenarios.as_deref(),
            format,
            evaluated_at,
        ),
        Cmd::Evaluate {
            action,
            format,
            fail_on_violation,
            evaluated_at,
        } => evaluate(cfg, action.as_deref(), format, fail_on_violation, evaluated_at),
        Cmd::Rules { format } => rules(format.unwrap_or(cfg.report.format)),
        Cmd::Init { dir } => init(&dir),
    }
}

#[derive(Serialize)]
struct DemoReport<'a> {
    evaluated_at: String,
    total: usize,
    matched: usize,
    outcomes: &'a [ScenarioOutcome],
}

fn demo(
    cfg: AdvisorConfig,
    only: Option<&str>,
    pack_path: Option<&Path>,
    format: Option<ReportFormat>,
    evaluated_at: Option<DateTime<Utc>>,
) -> Result<ExitCode> {
    let pack_path = pack_path.or(cfg.scenarios.path.as_deref());
    let mut pack = ScenarioPack::load_or_embedded(pack_path).context("loading scenario pack")?;
    if let Some(key) = only {
        let s = pack
            .get(key)
            .cloned()
            .ok_or_else(|| anyhow!("no scenario with key {key:?}"))?;
        pack.scenarios = vec![s];
    }

    let format = format.unwrap_or(cfg.report.format);
    let advisor = Advisor::new(cfg);
    let outcomes = advisor.run_pack(&pack);
    let matched = outcomes.iter().filter(|o| o.matches_prediction).count();

    match format {
        ReportFormat::Text => {
            for o in &outcomes {
                print!("{}", report::render_outcome_text(o, &advisor.config().report));
            }
            println!(
                "{matched}/{} scenarios matched their predicted outcome.",
                outcomes.len()
            );
        }
        ReportFormat::Json => {
            let doc = DemoReport {
                evaluated_at: evaluated_at.unwrap_or_else(Utc::now).to_rfc3339(),
                total: outcomes.len(),
                matched,
                outcomes: &outcomes,
            };
            println!("{}", report::render_json(&doc)?);
        }
    }

    Ok(if matched == outcomes.len() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

#[derive(Serialize)]
struct EvaluationReport<'a> {
    evaluated_at: String,
    decision: Decision,
    action: &'a Action,
    result: &'a EvaluationResult,
}

fn read_action(path: Option<&Path>) -> Result<Action> {
    match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)
                .with_context(|| format!("reading action file {}", p.display()))?;
            let is_toml = p.extension().map(|e| e == "toml").unwrap_or(false);
            let parsed = if is_toml {
                Action::from_toml_str(&text)
            } else {
                Action::from_json_str(&text)
            };
            parsed.with_context(|| format!("invalid action in {}", p.display()))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("reading action from stdin")?;
            Action::from_json_str(&buffer).context("invalid action on stdin")
        }
    }
}

fn evaluate(
    cfg: AdvisorConfig,
    path: Option<&Path>,
    format: Option<ReportFormat>,
    fail_on_violation: bool,
    evaluated_at: Option<DateTime<Utc>>,
) -> Result<ExitCode> {
    let action = read_action(path)?;
    let format = format.unwrap_or(cfg.report.format);
    let result = Advisor::new(cfg).assess(&action);

    match format {
        ReportFormat::Text => print!("{}", report::render_result_text(&result)),
        ReportFormat::Json => {
            let doc = EvaluationReport {
                evaluated_at: evaluated_at.unwrap_or_else(Utc::now).to_rfc3339(),
                decision: decision_for(&result),
                action: &action,
                result: &result,
            };
            println!("{}", report::render_json(&doc)?);
        }
    }

    Ok(if fail_on_violation && !result.is_permissible() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn rules(format: ReportFormat) -> Result<ExitCode> {
    match format {
        ReportFormat::Text => print!("{}", report::render_rules_text()),
        ReportFormat::Json => println!("{}", report::render_json(&report::rule_summaries())?),
    }
    Ok(ExitCode::SUCCESS)
}

fn init(dir: &Path) -> Result<ExitCode> {
    match contracts::write_default_scenarios(dir)? {
        Some(path) => println!("wrote {}", path.display()),
        None => println!("scenario pack already present in {}", dir.display()),
    }
    Ok(ExitCode::SUCCESS)
}
