use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::{
    hours_alive, parse_time_to_live_hours, time_to_live_exceeded, EvaluationId, EvaluatorConfig, StackDescriptor,
    Verdict,
};

/// Shared inputs for every routine in one evaluation.
pub struct EvaluationContext<'a> {
    pub id: &'a EvaluationId,
    pub now: DateTime<Utc>,
    pub config: &'a EvaluatorConfig,
}

/// A strategy that nominates stacks for deletion.
///
/// Routines see the whole snapshot and return one verdict per stack they looked at.
/// The evaluator concatenates the nominated names of all routines and dedups them once.
pub trait DiscoveryRoutine: Send + Sync {
    fn id(&self) -> &str;
    fn discover(&self, ctx: &EvaluationContext<'_>, stacks: &[StackDescriptor]) -> Vec<(String, Verdict)>;
}

/// Nominates stacks whose age has reached their `time-to-live-hours` tag.
pub struct TimeToLiveRoutine;

impl TimeToLiveRoutine {
    fn judge(&self, ctx: &EvaluationContext<'_>, stack: &StackDescriptor) -> Verdict {
        if !ctx.config.allows_status(&stack.status) {
            return Verdict::StatusNotEligible { status: stack.status.clone() };
        }

        let Some(raw) = stack.tag(&ctx.config.tag_key) else {
            return Verdict::NoTimeToLiveTag;
        };

        let time_to_live_hours = match parse_time_to_live_hours(raw) {
            Ok(v) => v,
            Err(e) => {
                warn!(evaluation_id = %ctx.id, stack = %stack.name, "{e}; not deleting");
                return Verdict::MalformedTimeToLive { value: raw.to_string() };
            }
        };

        let hours_alive = hours_alive(ctx.now, stack.creation_time);
        debug!(
            evaluation_id = %ctx.id,
            stack = %stack.name,
            creation_time = %stack.creation_time,
            now = %ctx.now,
            time_to_live_hours,
            hours_alive,
            "checking time to live"
        );

        if time_to_live_exceeded(hours_alive, time_to_live_hours) {
            Verdict::Expired { hours_alive, time_to_live_hours }
        } else {
            Verdict::NotExpired { hours_alive, time_to_live_hours }
        }
    }
}

impl DiscoveryRoutine for TimeToLiveRoutine {
    fn id(&self) -> &str {
        "time_to_live"
    }

    fn discover(&self, ctx: &EvaluationContext<'_>, stacks: &[StackDescriptor]) -> Vec<(String, Verdict)> {
        stacks.iter().map(|s| (s.name.clone(), self.judge(ctx, s))).collect()
    }
}
