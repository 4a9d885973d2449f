use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use stackttl_core::{FixedClock, SystemClock};
use stackttl_runner::{parse_instant, Config, Report, Runner};

#[derive(Parser)]
#[command(name = "stackttl", version)]
struct Cli {
    /// Path to stackttl.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default stackttl.toml
    Init {
        #[arg(long)]
        force: bool,
    },

    /// Print the names of stacks past their time to live
    Evaluate {
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// Evaluate as of this RFC 3339 instant instead of the system clock
        #[arg(long)]
        now: Option<String>,
        #[arg(long)]
        json: bool,
    },

    /// Print every stack's verdict
    Explain {
        #[arg(long)]
        snapshot: Option<PathBuf>,
        #[arg(long)]
        now: Option<String>,
    },

    /// Print the Slack webhook body summarizing the evaluation
    Slack {
        #[arg(long)]
        snapshot: Option<PathBuf>,
        #[arg(long)]
        now: Option<String>,
    },

    /// Print the Slack webhook body for a custom event (details.text)
    EventPayload {
        #[arg(long)]
        event: PathBuf,
    },
}

fn run_evaluation(runner: &Runner, snapshot: Option<&Path>, now: Option<&str>) -> Result<Report> {
    let path = runner.resolve_snapshot_path(snapshot)?;
    match now {
        Some(s) => runner.evaluate(&path, FixedClock(parse_instant(s)?)),
        None => runner.evaluate(&path, SystemClock),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg_path = cli.config.unwrap_or_else(Config::default_path);

    match cli.cmd {
        Command::Init { force } => {
            Runner::init(&cfg_path, force)?;
            println!("Wrote {}", cfg_path.display());
        }
        Command::Evaluate { snapshot, now, json } => {
            let r = Runner::open(&cfg_path)?;
            let report = run_evaluation(&r, snapshot.as_deref(), now.as_deref())?;
            if json {
                println!("{}", serde_json::to_string(&report.stacks_to_delete())?);
            } else {
                for name in report.stacks_to_delete() {
                    println!("{}", name);
                }
            }
        }
        Command::Explain { snapshot, now } => {
            let r = Runner::open(&cfg_path)?;
            let report = run_evaluation(&r, snapshot.as_deref(), now.as_deref())?;
            println!("Evaluation {} at {}", report.evaluation.id, report.evaluation.now.to_rfc3339());
            for v in &report.evaluation.verdicts {
                println!("- {} [{}] {:?}", v.stack, v.routine, v.verdict);
            }
            for s in &report.skipped {
                println!("- record #{} skipped: {}", s.index, s.reason);
            }
            println!("To delete: {}", report.evaluation.stacks_to_delete.len());
        }
        Command::Slack { snapshot, now } => {
            let r = Runner::open(&cfg_path)?;
            let report = run_evaluation(&r, snapshot.as_deref(), now.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&r.slack_payload(&report))?);
        }
        Command::EventPayload { event } => {
            let s = std::fs::read_to_string(&event).with_context(|| format!("read {}", event.display()))?;
            let v: serde_json::Value = serde_json::from_str(&s).with_context(|| "parse event json")?;
            let payload = stackttl_notify::payload_from_event(&v)?;
            info!(event = %event.display(), "built slack payload");
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}
