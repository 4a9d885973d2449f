use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use stackttl_core::{EvaluatorConfig, TERMINAL_STATUSES, TIME_TO_LIVE_HOURS_TAG};

use crate::util::expand_path;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub evaluator: EvaluatorSection,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorSection {
    #[serde(default = "default_tag_key")]
    pub tag_key: String,
    #[serde(default = "default_allowed_statuses")]
    pub allowed_statuses: Vec<String>,
}

impl Default for EvaluatorSection {
    fn default() -> Self {
        Self {
            tag_key: default_tag_key(),
            allowed_statuses: default_allowed_statuses(),
        }
    }
}

fn default_tag_key() -> String {
    TIME_TO_LIVE_HOURS_TAG.to_string()
}

fn default_allowed_statuses() -> Vec<String> {
    TERMINAL_STATUSES.iter().map(|s| s.to_string()).collect()
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// DescribeStacks dump to read when no `--snapshot` is given. `~` is expanded.
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default)]
    pub channel_label: Option<String>,
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: Config = toml::from_str(&s).with_context(|| "parse stackttl.toml")?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let s = toml::to_string_pretty(self).with_context(|| "serialize toml")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    pub fn evaluator_config(&self) -> Result<EvaluatorConfig> {
        if self.evaluator.tag_key.trim().is_empty() {
            return Err(anyhow!("evaluator.tag_key must not be empty"));
        }
        if self.evaluator.allowed_statuses.is_empty() {
            return Err(anyhow!("evaluator.allowed_statuses must list at least one status"));
        }
        Ok(EvaluatorConfig::with_statuses(self.evaluator.allowed_statuses.iter().cloned())
            .with_tag_key(self.evaluator.tag_key.clone()))
    }

    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.snapshot.path.as_deref().map(expand_path)
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from("stackttl.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_means_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.evaluator_config().unwrap(), EvaluatorConfig::canonical());
    }

    #[test]
    fn partial_sections_fill_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [evaluator]
            allowed_statuses = ["CREATE_COMPLETE"]

            [notify]
            channel_label = "ops"
            "#,
        )
        .unwrap();
        let ec = cfg.evaluator_config().unwrap();
        assert_eq!(ec.tag_key, "time-to-live-hours");
        assert!(ec.allows_status("CREATE_COMPLETE"));
        assert!(!ec.allows_status("UPDATE_COMPLETE"));
        assert_eq!(cfg.notify.channel_label.as_deref(), Some("ops"));
    }

    #[test]
    fn rejects_empty_allow_list() {
        let cfg: Config = toml::from_str("[evaluator]\nallowed_statuses = []\n").unwrap();
        assert!(cfg.evaluator_config().is_err());
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("stackttl.toml");
        let mut cfg = Config::default();
        cfg.snapshot.path = Some("stacks.json".into());
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }
}
