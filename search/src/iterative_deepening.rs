//! Iterative deepening search.

use tracing::{debug, warn};

use crate::context::SearchContext;
use crate::contract::SearchProblem;
use crate::depth_limited::DepthLimitedSearch;
use crate::error::{AbortReasonV1, SearchError};
use crate::search::SearchOutcome;

/// Depth-limited passes at limits 0, 1, 2, … until a verdict.
///
/// Each pass is a fresh traversal; only the context's counters and pass log
/// carry over. A solution is therefore a shortest one, and `Failure` means the
/// whole space is exhausted. The search has no intrinsic depth bound: bound it
/// with `max_depth`, another budget, or a cancel flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IterativeDeepeningSearch;

impl IterativeDeepeningSearch {
    /// Run passes until one returns a solution or failure.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Aborted`] with
    /// [`AbortReasonV1::DepthCeilingReached`] if the pass at `max_depth` still
    /// cuts off, or with the reason raised by any pass; and
    /// [`SearchError::ProblemPanicked`] if a problem callback panics.
    pub fn search<P: SearchProblem + ?Sized>(
        &self,
        problem: &P,
        ctx: &mut SearchContext,
    ) -> Result<SearchOutcome<P::Action>, SearchError> {
        let max_depth = ctx.policy().max_depth;
        let mut limit: u32 = 0;
        loop {
            match DepthLimitedSearch::new(limit).search(problem, ctx)? {
                SearchOutcome::Cutoff => {}
                outcome => {
                    debug!(
                        problem = problem.problem_id(),
                        limit,
                        outcome = outcome.kind().as_str(),
                        "iterative deepening reached a verdict"
                    );
                    return Ok(outcome);
                }
            }

            let ceiling = max_depth.unwrap_or(u32::MAX);
            if limit >= ceiling {
                warn!(
                    problem = problem.problem_id(),
                    max_depth = ceiling,
                    "depth ceiling reached while still cut off"
                );
                return Err(SearchError::Aborted(AbortReasonV1::DepthCeilingReached {
                    max_depth: ceiling,
                }));
            }
            limit += 1;
        }
    }
}
