use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::Serialize;
use serde_json::Value;
use stackttl_core::{Clock, Evaluation, Evaluator, EvaluatorConfig};
use stackttl_snapshot::{load_snapshot, LoadedSnapshot, SkippedRecord};
use tracing::info;

use crate::Config;

/// Outcome of one evaluation run, including records the loader had to drop.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub evaluation: Evaluation,
    pub skipped: Vec<SkippedRecord>,
}

impl Report {
    pub fn stacks_to_delete(&self) -> Vec<String> {
        self.evaluation.stacks_to_delete.iter().cloned().collect()
    }
}

pub struct Runner {
    pub cfg: Config,
    evaluator_config: EvaluatorConfig,
}

impl Runner {
    /// Load `cfg_path`, falling back to defaults when it does not exist.
    pub fn open(cfg_path: &Path) -> Result<Self> {
        let cfg = if cfg_path.exists() {
            Config::load_from(cfg_path)?
        } else {
            info!(path = %cfg_path.display(), "no config file; using defaults");
            Config::default()
        };
        Self::new(cfg)
    }

    pub fn new(cfg: Config) -> Result<Self> {
        let evaluator_config = cfg.evaluator_config()?;
        Ok(Self { cfg, evaluator_config })
    }

    pub fn init(cfg_path: &Path, force: bool) -> Result<()> {
        if cfg_path.exists() && !force {
            return Err(anyhow!("{} already exists; pass --force to overwrite", cfg_path.display()));
        }
        Config::default().save_to(cfg_path)
    }

    /// Explicit path wins over the configured one.
    pub fn resolve_snapshot_path(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.cfg.snapshot_path())
            .ok_or_else(|| anyhow!("no snapshot given; pass --snapshot or set snapshot.path in the config"))
    }

    pub fn evaluate(&self, snapshot_path: &Path, clock: impl Clock + 'static) -> Result<Report> {
        let snapshot = load_snapshot(snapshot_path)?;
        Ok(self.evaluate_snapshot(snapshot, clock))
    }

    pub fn evaluate_snapshot(&self, snapshot: LoadedSnapshot, clock: impl Clock + 'static) -> Report {
        let evaluator = Evaluator::new(self.evaluator_config.clone(), clock);
        let evaluation = evaluator.evaluate(&snapshot.stacks);
        Report { evaluation, skipped: snapshot.skipped }
    }

    pub fn slack_payload(&self, report: &Report) -> Value {
        let text = stackttl_notify::format_deletion_summary(&report.evaluation, self.cfg.notify.channel_label.as_deref());
        stackttl_notify::slack_payload(&text)
    }
}
