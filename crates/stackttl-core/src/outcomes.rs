use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::EvaluationId;

/// Why a routine did or did not nominate a stack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    Expired { hours_alive: i64, time_to_live_hours: i64 },
    NotExpired { hours_alive: i64, time_to_live_hours: i64 },
    StatusNotEligible { status: String },
    NoTimeToLiveTag,
    MalformedTimeToLive { value: String },
}

impl Verdict {
    pub fn selects_for_deletion(&self) -> bool {
        matches!(self, Verdict::Expired { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineVerdict {
    pub routine: String,
    pub stack: String,
    pub verdict: Verdict,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: EvaluationId,
    pub now: DateTime<Utc>,
    pub verdicts: Vec<RoutineVerdict>,
    pub stacks_to_delete: BTreeSet<String>,
}

impl Evaluation {
    pub fn is_empty(&self) -> bool {
        self.stacks_to_delete.is_empty()
    }
}
