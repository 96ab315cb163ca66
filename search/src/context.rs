//! Per-run search context.
//!
//! A [`SearchContext`] is created for one run and passed by `&mut` into every
//! pass of the chosen strategy. It owns the only mutable state shared across
//! passes: the counters, the budget clock and the pass log.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tracing::warn;

use crate::error::{AbortReasonV1, SearchError};
use crate::metrics::{InstrumentationV1, Metrics, METRIC_NODES_EXPANDED};
use crate::policy::SearchPolicyV1;
use crate::search::OutcomeKindV1;

/// Shared cancellation signal, checked before every expansion.
///
/// Clones share the same flag, so a handle kept by another thread (or a
/// timer) can stop a run in progress.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// A lowered flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether the flag has been raised.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// One depth-limited pass of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassRecordV1 {
    /// The depth bound of this pass.
    pub depth_limit: u32,
    /// Expansions performed by this pass alone.
    pub nodes_expanded: u64,
    /// How the pass ended.
    pub outcome: OutcomeKindV1,
}

impl PassRecordV1 {
    /// JSON form for run reports.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "depth_limit": self.depth_limit,
            "nodes_expanded": self.nodes_expanded,
            "outcome": self.outcome.as_str(),
        })
    }
}

/// Counters, budgets and pass log for one run.
#[derive(Debug)]
pub struct SearchContext {
    policy: SearchPolicyV1,
    metrics: Metrics,
    cancel: CancelFlag,
    started: Instant,
    passes: Vec<PassRecordV1>,
}

impl SearchContext {
    /// A fresh context with zeroed counters. The deadline clock starts now.
    #[must_use]
    pub fn new(policy: SearchPolicyV1) -> Self {
        Self {
            policy,
            metrics: Metrics::new(),
            cancel: CancelFlag::new(),
            started: Instant::now(),
            passes: Vec::new(),
        }
    }

    /// Attach an external cancel flag.
    #[must_use]
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// The run's policy.
    #[must_use]
    pub fn policy(&self) -> &SearchPolicyV1 {
        &self.policy
    }

    /// The live counters.
    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub(crate) fn metrics_mut(&mut self) -> &mut Metrics {
        &mut self.metrics
    }

    /// Passes completed so far, in execution order.
    #[must_use]
    pub fn passes(&self) -> &[PassRecordV1] {
        &self.passes
    }

    pub(crate) fn record_pass(&mut self, pass: PassRecordV1) {
        self.passes.push(pass);
    }

    /// Check every budget, then count one expansion.
    ///
    /// Called once per action-generator invocation, before the generator runs.
    pub(crate) fn begin_expansion(&mut self) -> Result<(), SearchError> {
        if let Err(reason) = self.check_budget() {
            warn!(
                reason = reason.as_str(),
                nodes_expanded = self.metrics.nodes_expanded(),
                "search aborted"
            );
            return Err(SearchError::Aborted(reason));
        }
        self.metrics.increment(METRIC_NODES_EXPANDED);
        Ok(())
    }

    fn check_budget(&self) -> Result<(), AbortReasonV1> {
        if self.cancel.is_cancelled() {
            return Err(AbortReasonV1::Cancelled);
        }
        if let Some(max_expansions) = self.policy.max_expansions {
            if self.metrics.nodes_expanded() >= max_expansions {
                return Err(AbortReasonV1::ExpansionBudgetExceeded { max_expansions });
            }
        }
        if let Some(deadline) = self.policy.deadline {
            if self.started.elapsed() >= deadline {
                return Err(AbortReasonV1::DeadlineExceeded {
                    deadline_ms: self.policy.deadline_ms().unwrap_or(u64::MAX),
                });
            }
        }
        Ok(())
    }

    /// End the run, freezing the counters.
    #[must_use]
    pub fn finish(self) -> (InstrumentationV1, Vec<PassRecordV1>) {
        (self.metrics.freeze(), self.passes)
    }
}
