//! Search agent: drives a problem through a strategy and surfaces the plan.
//!
//! # Pipeline
//!
//! ```text
//! policy.validate() → fresh SearchContext (zeroed counters)
//!   → strategy.search(problem, ctx) → ctx.finish() (counters frozen)
//!   → Solution: AgentRunV1 | Failure / Cutoff / abort / panic: AgentError
//! ```
//!
//! The agent owns no search logic. Every run gets its own context, so runs are
//! independent: nothing from a previous run leaks into the next one's counters.

use fathom_search::{
    AbortReasonV1, ActionV1, CallbackStageV1, CancelFlag, InstrumentationV1, PassRecordV1,
    SearchContext, SearchError, SearchOutcome, SearchPolicyV1, SearchProblem, Strategy,
};
use thiserror::Error;
use tracing::{info, warn};

/// Counters and pass log of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunStatsV1 {
    /// Frozen counters (`nodesExpanded`, …).
    pub instrumentation: InstrumentationV1,
    /// Completed depth-limited passes, in order.
    pub passes: Vec<PassRecordV1>,
}

/// A successful run: the plan plus its stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRunV1<A> {
    /// Actions from the initial state to a goal, in order.
    pub actions: Vec<A>,
    /// Counters and pass log.
    pub stats: RunStatsV1,
}

impl<A: ActionV1> AgentRunV1<A> {
    /// The frozen counters.
    #[must_use]
    pub fn instrumentation(&self) -> &InstrumentationV1 {
        &self.stats.instrumentation
    }

    /// Canonical text of each action, in plan order.
    #[must_use]
    pub fn rendered_actions(&self) -> Vec<String> {
        self.actions.iter().map(ToString::to_string).collect()
    }
}

/// Why a run produced no plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    /// The strategy exhausted the space: no solution exists.
    #[error("no solution exists")]
    NoSolution { stats: RunStatsV1 },
    /// A single depth-limited pass was cut off: a solution may exist deeper.
    #[error("no solution within depth limit {depth_limit}")]
    CutoffReached { depth_limit: u32, stats: RunStatsV1 },
    /// Cancellation or a budget stopped the run before a verdict.
    #[error("search aborted: {reason}")]
    Aborted {
        reason: AbortReasonV1,
        stats: RunStatsV1,
    },
    /// A problem callback panicked. `stats` covers the run up to the panic.
    #[error("problem callback panicked during {stage}")]
    ProblemPanicked {
        stage: CallbackStageV1,
        stats: RunStatsV1,
    },
    /// The policy was rejected before the run started.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },
}

impl AgentError {
    /// Stats of the run, when it got far enough to have any.
    #[must_use]
    pub fn stats(&self) -> Option<&RunStatsV1> {
        match self {
            Self::NoSolution { stats }
            | Self::CutoffReached { stats, .. }
            | Self::Aborted { stats, .. }
            | Self::ProblemPanicked { stats, .. } => Some(stats),
            Self::InvalidPolicy { .. } => None,
        }
    }
}

/// Runs problems under a fixed policy.
#[derive(Debug, Clone, Default)]
pub struct SearchAgent {
    policy: SearchPolicyV1,
    cancel: CancelFlag,
}

impl SearchAgent {
    /// An agent applying `policy` to every run.
    #[must_use]
    pub fn new(policy: SearchPolicyV1) -> Self {
        Self {
            policy,
            cancel: CancelFlag::new(),
        }
    }

    /// Use `cancel` as the external cancellation signal for every run.
    #[must_use]
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// The agent's policy.
    #[must_use]
    pub fn policy(&self) -> &SearchPolicyV1 {
        &self.policy
    }

    /// A handle to the agent's cancel flag.
    #[must_use]
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Search `problem` with `strategy` and return the plan.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NoSolution`] when the space is exhausted,
    /// [`AgentError::CutoffReached`] when a plain depth-limited strategy is cut
    /// off, [`AgentError::Aborted`] on cancellation or budget exhaustion,
    /// [`AgentError::ProblemPanicked`] if a callback panics, and
    /// [`AgentError::InvalidPolicy`] if the policy fails validation.
    pub fn run<P: SearchProblem + ?Sized>(
        &self,
        problem: &P,
        strategy: &Strategy,
    ) -> Result<AgentRunV1<P::Action>, AgentError> {
        self.policy
            .validate()
            .map_err(|e| AgentError::InvalidPolicy {
                detail: e.to_string(),
            })?;

        info!(
            problem = problem.problem_id(),
            strategy = strategy.name(),
            "search run started"
        );

        let mut ctx = SearchContext::new(self.policy.clone()).with_cancel_flag(self.cancel.clone());
        let result = strategy.search(problem, &mut ctx);
        let (instrumentation, passes) = ctx.finish();
        let stats = RunStatsV1 {
            instrumentation,
            passes,
        };

        match result {
            Ok(SearchOutcome::Solution(actions)) => {
                info!(
                    problem = problem.problem_id(),
                    plan_length = actions.len(),
                    nodes_expanded = stats.instrumentation.nodes_expanded(),
                    "search run found a plan"
                );
                Ok(AgentRunV1 { actions, stats })
            }
            Ok(SearchOutcome::Failure) => {
                info!(
                    problem = problem.problem_id(),
                    nodes_expanded = stats.instrumentation.nodes_expanded(),
                    "search space exhausted without a solution"
                );
                Err(AgentError::NoSolution { stats })
            }
            Ok(SearchOutcome::Cutoff) => {
                let depth_limit = stats.passes.last().map_or(0, |p| p.depth_limit);
                info!(
                    problem = problem.problem_id(),
                    depth_limit,
                    "search cut off at depth limit"
                );
                Err(AgentError::CutoffReached { depth_limit, stats })
            }
            Err(SearchError::Aborted(reason)) => Err(AgentError::Aborted { reason, stats }),
            Err(SearchError::ProblemPanicked { stage }) => {
                warn!(
                    problem = problem.problem_id(),
                    stage = stage.as_str(),
                    "problem callback panicked"
                );
                Err(AgentError::ProblemPanicked { stage, stats })
            }
            Err(SearchError::InvalidPolicy { detail }) => Err(AgentError::InvalidPolicy { detail }),
        }
    }
}
