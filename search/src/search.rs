//! Search outcomes and strategy dispatch.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::context::SearchContext;
use crate::contract::SearchProblem;
use crate::depth_limited::DepthLimitedSearch;
use crate::error::{CallbackStageV1, SearchError};
use crate::iterative_deepening::IterativeDeepeningSearch;

/// Result of a search pass or strategy.
///
/// Exactly one variant per depth-limited pass. `Cutoff` and `Failure` are
/// ordinary control values, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<A> {
    /// Actions leading from the initial state to a goal, in order.
    Solution(Vec<A>),
    /// The space below the root is exhausted within the bound: no solution
    /// exists at any depth.
    Failure,
    /// Some branch reached the depth bound. A solution may exist deeper.
    Cutoff,
}

impl<A> SearchOutcome<A> {
    /// The variant without its payload.
    #[must_use]
    pub fn kind(&self) -> OutcomeKindV1 {
        match self {
            Self::Solution(_) => OutcomeKindV1::Solution,
            Self::Failure => OutcomeKindV1::Failure,
            Self::Cutoff => OutcomeKindV1::Cutoff,
        }
    }

    /// Whether this is a solution.
    #[must_use]
    pub fn is_solution(&self) -> bool {
        matches!(self, Self::Solution(_))
    }
}

/// How a pass ended: a [`SearchOutcome`] tag, or the exceptional endings
/// recorded in the pass log when a pass is interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKindV1 {
    Solution,
    Failure,
    Cutoff,
    /// Stopped by cancellation or a budget before a verdict.
    Aborted,
    /// Stopped by a panicking problem callback.
    Panicked,
}

impl OutcomeKindV1 {
    /// Stable snake-case tag for reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solution => "solution",
            Self::Failure => "failure",
            Self::Cutoff => "cutoff",
            Self::Aborted => "aborted",
            Self::Panicked => "panicked",
        }
    }
}

/// The available search strategies.
///
/// A closed set behind one `search` capability: the agent and the problem
/// contract are unaware of which variant runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// A single depth-limited pass.
    DepthLimited(DepthLimitedSearch),
    /// Depth-limited passes at limits 0, 1, 2, …
    IterativeDeepening(IterativeDeepeningSearch),
}

impl Strategy {
    /// Iterative deepening (the usual choice).
    #[must_use]
    pub fn iterative_deepening() -> Self {
        Self::IterativeDeepening(IterativeDeepeningSearch)
    }

    /// A single depth-limited pass at `limit`.
    #[must_use]
    pub fn depth_limited(limit: u32) -> Self {
        Self::DepthLimited(DepthLimitedSearch::new(limit))
    }

    /// Run the strategy against `problem`, accumulating into `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Aborted`] on cancellation or budget exhaustion
    /// and [`SearchError::ProblemPanicked`] if a problem callback panics.
    pub fn search<P: SearchProblem + ?Sized>(
        &self,
        problem: &P,
        ctx: &mut SearchContext,
    ) -> Result<SearchOutcome<P::Action>, SearchError> {
        match self {
            Self::DepthLimited(dls) => dls.search(problem, ctx),
            Self::IterativeDeepening(ids) => ids.search(problem, ctx),
        }
    }

    /// Stable snake-case name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::DepthLimited(_) => "depth_limited",
            Self::IterativeDeepening(_) => "iterative_deepening",
        }
    }

    /// JSON descriptor for run reports.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Self::DepthLimited(dls) => {
                serde_json::json!({"limit": dls.limit(), "type": self.name()})
            }
            Self::IterativeDeepening(_) => serde_json::json!({"type": self.name()}),
        }
    }
}

/// Invoke a problem callback, containing any panic at the callback boundary.
pub(crate) fn guarded<T>(
    stage: CallbackStageV1,
    callback: impl FnOnce() -> T,
) -> Result<T, SearchError> {
    catch_unwind(AssertUnwindSafe(callback)).map_err(|_| SearchError::ProblemPanicked { stage })
}
