//! Search policy: budgets and cycle handling for one run.

use std::time::Duration;

use fathom_kernel::proof::canon::{canonical_json_bytes, CanonError};
use fathom_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::error::SearchError;

/// Per-run search configuration.
///
/// Every budget is optional. With the default policy the search is unbounded:
/// iterative deepening over an infinite space with no goal never returns, so
/// callers that need a hard stop set a budget or raise a
/// [`crate::CancelFlag`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPolicyV1 {
    /// Hard cap on node expansions across all passes of a run.
    pub max_expansions: Option<u64>,
    /// Largest depth limit iterative deepening will try.
    pub max_depth: Option<u32>,
    /// Wall-clock budget measured from the start of the run.
    pub deadline: Option<Duration>,
    /// How revisited states on the current path are treated.
    pub cycle_check: CycleCheckV1,
}

impl SearchPolicyV1 {
    /// Validate budgets before a run starts.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for a zero expansion budget, or
    /// for a deadline that is not a positive whole number of milliseconds.
    /// Reports record the deadline in milliseconds, so a finer deadline would
    /// be reported inexactly and share a digest with other policies.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        if let Some(deadline) = self.deadline {
            if deadline < Duration::from_millis(1) {
                return Err(SearchError::InvalidPolicy {
                    detail: format!("deadline must be at least 1ms, got {deadline:?}"),
                });
            }
            if deadline.subsec_nanos() % 1_000_000 != 0 {
                return Err(SearchError::InvalidPolicy {
                    detail: format!("deadline must be whole milliseconds, got {deadline:?}"),
                });
            }
        }
        Ok(())
    }

    /// The deadline in whole milliseconds, saturating at `u64::MAX`.
    #[must_use]
    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    /// JSON snapshot for run reports. Integers only, so it canonicalizes.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "cycle_check": self.cycle_check.as_str(),
            "deadline_ms": self.deadline_ms(),
            "max_depth": self.max_depth,
            "max_expansions": self.max_expansions,
            "schema_version": "search_policy.v1",
        })
    }

    /// Digest of the canonical JSON snapshot under `HashDomain::SearchPolicy`.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if the snapshot fails canonicalization.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(HashDomain::SearchPolicy, &bytes))
    }
}

/// Treatment of a successor whose state already lies on the current path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleCheckV1 {
    /// Pure tree search: every successor is explored.
    #[default]
    None,
    /// A successor equal to any ancestor on the current path is pruned and
    /// counts as a failed branch. Finite cyclic spaces then terminate with
    /// failure instead of cutting off forever.
    AncestorPath,
}

impl CycleCheckV1 {
    /// Stable snake-case tag for reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::AncestorPath => "ancestor_path",
        }
    }
}
