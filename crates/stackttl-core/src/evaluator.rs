use std::collections::BTreeSet;

use tracing::info;

use crate::{
    Clock, DiscoveryRoutine, Evaluation, EvaluationContext, EvaluationId, RoutineVerdict, StackDescriptor,
    SystemClock, TimeToLiveRoutine, TERMINAL_STATUSES, TIME_TO_LIVE_HOURS_TAG,
};

/// Immutable settings owned by an [`Evaluator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluatorConfig {
    pub allowed_statuses: BTreeSet<String>,
    pub tag_key: String,
}

impl EvaluatorConfig {
    /// All thirteen terminal statuses, `DELETE_COMPLETE` included.
    pub fn canonical() -> Self {
        Self::with_statuses(TERMINAL_STATUSES.iter().copied())
    }

    /// The allow-list the cleanup lambda shipped with, which lacks `DELETE_COMPLETE`.
    pub fn legacy_without_delete_complete() -> Self {
        Self::with_statuses(TERMINAL_STATUSES.iter().copied().filter(|s| *s != "DELETE_COMPLETE"))
    }

    pub fn with_statuses<I, S>(statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_statuses: statuses.into_iter().map(Into::into).collect(),
            tag_key: TIME_TO_LIVE_HOURS_TAG.to_string(),
        }
    }

    pub fn with_tag_key(mut self, tag_key: impl Into<String>) -> Self {
        self.tag_key = tag_key.into();
        self
    }

    pub fn allows_status(&self, status: &str) -> bool {
        self.allowed_statuses.contains(status)
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self::canonical()
    }
}

/// Runs discovery routines over a stack snapshot and collects the names to delete.
pub struct Evaluator {
    config: EvaluatorConfig,
    clock: Box<dyn Clock>,
    routines: Vec<Box<dyn DiscoveryRoutine>>,
}

impl Evaluator {
    /// Evaluator with the time-to-live routine installed.
    pub fn new(config: EvaluatorConfig, clock: impl Clock + 'static) -> Self {
        Self {
            config,
            clock: Box::new(clock),
            routines: vec![Box::new(TimeToLiveRoutine)],
        }
    }

    pub fn with_routine(mut self, routine: impl DiscoveryRoutine + 'static) -> Self {
        self.routines.push(Box::new(routine));
        self
    }

    pub fn evaluate(&self, stacks: &[StackDescriptor]) -> Evaluation {
        let id = EvaluationId::new();
        let now = self.clock.now();
        let ctx = EvaluationContext { id: &id, now, config: &self.config };

        let mut verdicts = Vec::with_capacity(stacks.len() * self.routines.len());
        for routine in &self.routines {
            for (stack, verdict) in routine.discover(&ctx, stacks) {
                verdicts.push(RoutineVerdict {
                    routine: routine.id().to_string(),
                    stack,
                    verdict,
                });
            }
        }

        let stacks_to_delete: BTreeSet<String> = verdicts
            .iter()
            .filter(|v| v.verdict.selects_for_deletion())
            .map(|v| v.stack.clone())
            .collect();

        info!(
            evaluation_id = %id,
            scanned = stacks.len(),
            selected = stacks_to_delete.len(),
            "stacks to delete: {:?}",
            stacks_to_delete
        );

        Evaluation { id, now, verdicts, stacks_to_delete }
    }

    pub fn select_stacks_to_delete(&self, stacks: &[StackDescriptor]) -> BTreeSet<String> {
        self.evaluate(stacks).stacks_to_delete
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EvaluatorConfig::canonical(), SystemClock)
    }
}

/// Names of stacks eligible for deletion, judged against the system clock and canonical settings.
pub fn select_stacks_to_delete(stacks: &[StackDescriptor]) -> BTreeSet<String> {
    Evaluator::default().select_stacks_to_delete(stacks)
}
