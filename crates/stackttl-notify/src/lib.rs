use serde_json::{json, Value};
use stackttl_core::Evaluation;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotifyError {
    #[error("event has no string at details.text")]
    MissingText,
}

/// Slack-markdown summary of an evaluation.
pub fn format_deletion_summary(evaluation: &Evaluation, channel_label: Option<&str>) -> String {
    let mut s = String::new();
    if let Some(label) = channel_label {
        s.push_str(&format!("[{}] ", label));
    }
    s.push_str(&format!("*Stack cleanup* `{}` at {}\n", evaluation.id.as_str(), evaluation.now.to_rfc3339()));
    if evaluation.is_empty() {
        s.push_str("Nothing to delete.\n");
        return s;
    }
    s.push_str(&format!("{} stack(s) past their time to live:\n", evaluation.stacks_to_delete.len()));
    for name in &evaluation.stacks_to_delete {
        s.push_str(&format!("- `{}`\n", name));
    }
    s
}

/// Body accepted by a Slack incoming webhook.
pub fn slack_payload(text: &str) -> Value {
    json!({ "text": text })
}

/// Build a webhook body from a custom event carrying `details.text`.
pub fn payload_from_event(event: &Value) -> Result<Value, NotifyError> {
    let text = event
        .get("details")
        .and_then(|d| d.get("text"))
        .and_then(Value::as_str)
        .ok_or(NotifyError::MissingText)?;
    Ok(slack_payload(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use stackttl_core::EvaluationId;
    use std::collections::BTreeSet;

    fn evaluation(names: &[&str]) -> Evaluation {
        Evaluation {
            id: EvaluationId::from_str("eval1"),
            now: Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap(),
            verdicts: vec![],
            stacks_to_delete: names.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
        }
    }

    #[test]
    fn test_format_deletion_summary() {
        let expected = "[ops] *Stack cleanup* `eval1` at 2024-02-03T04:05:06+00:00\n2 stack(s) past their time to live:\n- `alpha`\n- `beta`\n";
        assert_eq!(format_deletion_summary(&evaluation(&["beta", "alpha"]), Some("ops")), expected);
    }

    #[test]
    fn test_format_empty_summary() {
        let s = format_deletion_summary(&evaluation(&[]), None);
        assert!(s.starts_with("*Stack cleanup*"));
        assert!(s.ends_with("Nothing to delete.\n"));
    }

    #[test]
    fn test_payload_from_event() {
        let event = json!({ "source": "custom", "details": { "text": "deploy finished" } });
        assert_eq!(payload_from_event(&event), Ok(json!({ "text": "deploy finished" })));
    }

    #[test]
    fn test_payload_from_event_without_text() {
        assert_eq!(payload_from_event(&json!({ "details": {} })), Err(NotifyError::MissingText));
        assert_eq!(payload_from_event(&json!({ "details": { "text": 3 } })), Err(NotifyError::MissingText));
    }
}
