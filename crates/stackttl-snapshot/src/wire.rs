use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use stackttl_core::StackDescriptor;
use tracing::warn;

/// One entry of a `DescribeStacks` response, keeping only the fields the evaluator reads.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawStack {
    pub stack_name: String,
    #[serde(default)]
    pub stack_status: Option<String>,
    pub creation_time: DateTime<Utc>,
    /// Kept untyped so one odd tag never costs the whole stack.
    #[serde(default)]
    pub tags: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawTag {
    pub key: String,
    pub value: String,
}

impl RawTag {
    /// Reads `{Key, Value}`, turning scalar values into strings. `None` for anything else.
    pub fn from_value(v: &Value) -> Option<Self> {
        let key = scalar_to_string(v.get("Key")?)?;
        let value = scalar_to_string(v.get("Value")?)?;
        Some(Self { key, value })
    }
}

fn scalar_to_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl RawStack {
    pub fn into_descriptor(self) -> StackDescriptor {
        let raw_tags = match self.tags {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => vec![],
            Some(other) => {
                warn!(stack = %self.stack_name, tags = %other, "Tags is not a list; treating as untagged");
                vec![]
            }
        };

        let mut tags = BTreeMap::new();
        for item in &raw_tags {
            let Some(tag) = RawTag::from_value(item) else {
                warn!(stack = %self.stack_name, tag = %item, "dropping malformed tag");
                continue;
            };
            // first occurrence wins, same as a linear lookup would
            tags.entry(tag.key).or_insert(tag.value);
        }
        StackDescriptor {
            name: self.stack_name,
            status: self.stack_status.unwrap_or_default(),
            creation_time: self.creation_time,
            tags,
        }
    }
}
