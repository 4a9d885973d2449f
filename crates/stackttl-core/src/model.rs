use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// Tag key a stack carries to opt into time-to-live cleanup.
pub const TIME_TO_LIVE_HOURS_TAG: &str = "time-to-live-hours";

pub const SECONDS_PER_HOUR: i64 = 3600;

/// Statuses with no CloudFormation operation in flight.
pub const TERMINAL_STATUSES: &[&str] = &[
    "CREATE_FAILED",
    "CREATE_COMPLETE",
    "ROLLBACK_FAILED",
    "ROLLBACK_COMPLETE",
    "DELETE_FAILED",
    "DELETE_COMPLETE",
    "UPDATE_COMPLETE",
    "UPDATE_FAILED",
    "UPDATE_ROLLBACK_FAILED",
    "UPDATE_ROLLBACK_COMPLETE",
    "IMPORT_COMPLETE",
    "IMPORT_ROLLBACK_FAILED",
    "IMPORT_ROLLBACK_COMPLETE",
];

/// Snapshot of one CloudFormation stack as handed to the evaluator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackDescriptor {
    pub name: String,
    pub status: String,
    pub creation_time: DateTime<Utc>,
    pub tags: BTreeMap<String, String>,
}

impl StackDescriptor {
    pub fn new(name: impl Into<String>, status: impl Into<String>, creation_time: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
            creation_time,
            tags: BTreeMap::new(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}
