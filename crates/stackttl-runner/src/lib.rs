pub mod config;
pub mod runner;
pub mod util;

pub use config::*;
pub use runner::*;
pub use util::*;

#[cfg(test)]
mod runner_tests {
    use super::*;
    use stackttl_core::{FixedClock, Verdict};
    use std::path::Path;

    const SNAPSHOT: &str = r#"{"Stacks": [
        {"StackName": "A", "StackStatus": "CREATE_COMPLETE", "CreationTime": "2024-01-01T10:00:00Z",
         "Tags": [{"Key": "time-to-live-hours", "Value": "1"}]},
        {"StackName": "B", "StackStatus": "CREATE_COMPLETE", "CreationTime": "2024-01-01T11:30:00Z",
         "Tags": [{"Key": "time-to-live-hours", "Value": "1"}]},
        {"StackName": "C", "StackStatus": "CREATE_IN_PROGRESS", "CreationTime": "2024-01-01T07:00:00Z",
         "Tags": [{"Key": "time-to-live-hours", "Value": "1"}]},
        {"StackName": "D", "StackStatus": "DELETE_COMPLETE", "CreationTime": "2024-01-01T07:00:00Z",
         "Tags": [{"Key": "time-to-live-hours", "Value": "1"}]},
        {"StackName": "E", "StackStatus": "CREATE_COMPLETE"}
    ]}"#;

    fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let p = dir.join(name);
        std::fs::write(&p, body).unwrap();
        p
    }

    fn noon() -> FixedClock {
        FixedClock(parse_instant("2024-01-01T12:00:00Z").unwrap())
    }

    #[test]
    fn evaluates_snapshot_with_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let snap = write(dir.path(), "stacks.json", SNAPSHOT);
        let runner = Runner::open(&dir.path().join("missing.toml")).unwrap();

        let report = runner.evaluate(&snap, noon()).unwrap();
        assert_eq!(report.stacks_to_delete(), vec!["A".to_string(), "D".to_string()]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].index, 4);
    }

    #[test]
    fn legacy_allow_list_from_config_skips_delete_complete() {
        let dir = tempfile::tempdir().unwrap();
        let snap = write(dir.path(), "stacks.json", SNAPSHOT);
        let legacy: Vec<String> = stackttl_core::EvaluatorConfig::legacy_without_delete_complete()
            .allowed_statuses
            .into_iter()
            .collect();
        let mut cfg = Config::default();
        cfg.evaluator.allowed_statuses = legacy;
        cfg.snapshot.path = Some(snap.to_string_lossy().into_owned());
        let cfg_path = dir.path().join("stackttl.toml");
        cfg.save_to(&cfg_path).unwrap();

        let runner = Runner::open(&cfg_path).unwrap();
        let path = runner.resolve_snapshot_path(None).unwrap();
        let report = runner.evaluate(&path, noon()).unwrap();
        assert_eq!(report.stacks_to_delete(), vec!["A".to_string()]);
        assert!(report.evaluation.verdicts.iter().any(|v| v.stack == "D"
            && v.verdict == Verdict::StatusNotEligible { status: "DELETE_COMPLETE".into() }));
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join("stackttl.toml");
        Runner::init(&cfg_path, false).unwrap();
        assert!(Runner::init(&cfg_path, false).is_err());
        Runner::init(&cfg_path, true).unwrap();
    }

    #[test]
    fn missing_snapshot_path_is_an_error() {
        let runner = Runner::new(Config::default()).unwrap();
        assert!(runner.resolve_snapshot_path(None).is_err());
        assert_eq!(
            runner.resolve_snapshot_path(Some(Path::new("x.json"))).unwrap(),
            Path::new("x.json")
        );
    }

    #[test]
    fn slack_payload_lists_selected_stacks() {
        let dir = tempfile::tempdir().unwrap();
        let snap = write(dir.path(), "stacks.json", SNAPSHOT);
        let mut cfg = Config::default();
        cfg.notify.channel_label = Some("ops".into());
        let runner = Runner::new(cfg).unwrap();

        let report = runner.evaluate(&snap, noon()).unwrap();
        let payload = runner.slack_payload(&report);
        let text = payload["text"].as_str().unwrap();
        assert!(text.starts_with("[ops] *Stack cleanup*"));
        assert!(text.contains("- `A`\n- `D`\n"));
    }
}
