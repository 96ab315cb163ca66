//! Typed search errors.
//!
//! Cutoff and failure are ordinary outcomes ([`crate::SearchOutcome`]) and
//! never appear here. `SearchError` carries only the exceptional channel:
//! cancellation, contained collaborator panics, and pre-flight policy errors.

use std::fmt;

use thiserror::Error;

/// Exceptional search termination.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The run was cancelled or a budget ran out before the search concluded.
    #[error("search aborted: {0}")]
    Aborted(AbortReasonV1),
    /// A problem callback panicked. The panic was contained at the callback boundary.
    #[error("problem callback panicked during {stage}")]
    ProblemPanicked { stage: CallbackStageV1 },
    /// The policy failed pre-flight validation. No expansion took place.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },
}

/// Why a run was aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReasonV1 {
    /// `max_expansions` expansions were already performed.
    ExpansionBudgetExceeded { max_expansions: u64 },
    /// Iterative deepening passed the `max_depth` ceiling while still cut off.
    DepthCeilingReached { max_depth: u32 },
    /// The wall-clock deadline passed.
    DeadlineExceeded { deadline_ms: u64 },
    /// The external cancel flag was raised.
    Cancelled,
}

impl AbortReasonV1 {
    /// Stable snake-case tag for reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExpansionBudgetExceeded { .. } => "expansion_budget_exceeded",
            Self::DepthCeilingReached { .. } => "depth_ceiling_reached",
            Self::DeadlineExceeded { .. } => "deadline_exceeded",
            Self::Cancelled => "cancelled",
        }
    }

    /// JSON form for run reports.
    #[must_use]
    pub fn to_json_value(self) -> serde_json::Value {
        match self {
            Self::ExpansionBudgetExceeded { max_expansions } => {
                serde_json::json!({"max_expansions": max_expansions, "type": self.as_str()})
            }
            Self::DepthCeilingReached { max_depth } => {
                serde_json::json!({"max_depth": max_depth, "type": self.as_str()})
            }
            Self::DeadlineExceeded { deadline_ms } => {
                serde_json::json!({"deadline_ms": deadline_ms, "type": self.as_str()})
            }
            Self::Cancelled => serde_json::json!({"type": self.as_str()}),
        }
    }
}

impl fmt::Display for AbortReasonV1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpansionBudgetExceeded { max_expansions } => {
                write!(f, "expansion budget of {max_expansions} exhausted")
            }
            Self::DepthCeilingReached { max_depth } => {
                write!(f, "depth ceiling {max_depth} reached without a verdict")
            }
            Self::DeadlineExceeded { deadline_ms } => {
                write!(f, "deadline of {deadline_ms}ms exceeded")
            }
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// The problem callback in which a panic was caught.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackStageV1 {
    /// `SearchProblem::initial_state()`.
    InitialState,
    /// `SearchProblem::actions()`.
    Actions,
    /// `SearchProblem::result()`.
    Result,
    /// `SearchProblem::is_goal()`.
    IsGoal,
}

impl CallbackStageV1 {
    /// Stable snake-case tag for reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InitialState => "initial_state",
            Self::Actions => "actions",
            Self::Result => "result",
            Self::IsGoal => "is_goal",
        }
    }
}

impl fmt::Display for CallbackStageV1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
