use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use serde_json::Value;
use stackttl_core::StackDescriptor;
use tracing::warn;

use crate::wire::RawStack;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => SnapshotFormat::Yaml,
            _ => SnapshotFormat::Json,
        }
    }
}

/// A record the loader could not turn into a descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: String,
}

#[derive(Clone, Debug, Default)]
pub struct LoadedSnapshot {
    pub stacks: Vec<StackDescriptor>,
    pub skipped: Vec<SkippedRecord>,
}

pub fn load_snapshot(path: &Path) -> Result<LoadedSnapshot> {
    let s = std::fs::read_to_string(path).with_context(|| format!("read snapshot: {}", path.display()))?;
    parse_snapshot(&s, SnapshotFormat::from_path(path)).with_context(|| format!("load snapshot {}", path.display()))
}

/// Accepts a bare list of stacks, one `{"Stacks": [...]}` page, or a list of such pages.
pub fn parse_snapshot(text: &str, format: SnapshotFormat) -> Result<LoadedSnapshot> {
    let doc: Value = match format {
        SnapshotFormat::Json => serde_json::from_str(text).with_context(|| "parse snapshot json")?,
        SnapshotFormat::Yaml => serde_yaml::from_str(text).with_context(|| "parse snapshot yaml")?,
    };

    let records = flatten_records(doc)?;
    let mut out = LoadedSnapshot::default();
    for (index, record) in records.into_iter().enumerate() {
        match to_descriptor(record) {
            Ok(d) => out.stacks.push(d),
            Err(reason) => {
                warn!(index, %reason, "skipping stack record");
                out.skipped.push(SkippedRecord { index, reason });
            }
        }
    }
    Ok(out)
}

fn flatten_records(doc: Value) -> Result<Vec<Value>> {
    match doc {
        Value::Array(items) => {
            let mut records = Vec::new();
            for item in items {
                match item {
                    Value::Object(mut page) if page.contains_key("Stacks") => {
                        records.extend(stacks_of_page(page.remove("Stacks"))?);
                    }
                    other => records.push(other),
                }
            }
            Ok(records)
        }
        Value::Object(mut page) if page.contains_key("Stacks") => stacks_of_page(page.remove("Stacks")),
        Value::Null => Ok(vec![]),
        _ => Err(anyhow!("snapshot must be a list of stacks or DescribeStacks pages")),
    }
}

fn stacks_of_page(stacks: Option<Value>) -> Result<Vec<Value>> {
    match stacks {
        Some(Value::Array(items)) => Ok(items),
        Some(Value::Null) | None => Ok(vec![]),
        Some(_) => Err(anyhow!("DescribeStacks page has a non-list Stacks field")),
    }
}

fn to_descriptor(record: Value) -> std::result::Result<StackDescriptor, String> {
    let raw: RawStack = serde_json::from_value(record).map_err(|e| e.to_string())?;
    if raw.stack_name.trim().is_empty() {
        return Err("empty StackName".to_string());
    }
    Ok(raw.into_descriptor())
}
