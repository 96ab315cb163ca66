//! Depth-limited depth-first search.
//!
//! # Algorithm
//!
//! From the root, depth-first, in generator order:
//!
//! 1. Goal-test the node. A goal ends the pass with the path to it.
//! 2. A node at `depth == limit` is not expanded; its branch reports cutoff.
//! 3. Otherwise the node is expanded (one count in `nodesExpanded`) and each
//!    successor is explored in turn. A solution short-circuits the remaining
//!    siblings.
//! 4. Once all successors are tried, the node reports cutoff if any child
//!    did, failure otherwise.
//!
//! The traversal uses an explicit frame stack instead of native recursion, so
//! large limits cannot overflow the thread stack.

use std::vec;

use tracing::{debug, trace};

use crate::context::{PassRecordV1, SearchContext};
use crate::contract::SearchProblem;
use crate::error::{CallbackStageV1, SearchError};
use crate::metrics::{METRIC_DEPTH_ITERATIONS, METRIC_PATH_COST};
use crate::node::SearchNodeV1;
use crate::policy::CycleCheckV1;
use crate::search::{guarded, OutcomeKindV1, SearchOutcome};

/// A single depth-first pass bounded at `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthLimitedSearch {
    limit: u32,
}

/// An expanded node whose successors are being explored.
struct Frame<S, A> {
    node: SearchNodeV1<S>,
    pending: vec::IntoIter<A>,
    cutoff_occurred: bool,
}

impl DepthLimitedSearch {
    /// A pass that never expands nodes at depth `limit` or deeper.
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self { limit }
    }

    /// The depth bound.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Run one pass against `problem`.
    ///
    /// Expansions are added to `ctx`'s counters (never reset here), and the
    /// pass is appended to `ctx`'s pass log however it ends. The log therefore
    /// always holds one record per `depthIterations` and its expansions sum to
    /// `nodesExpanded`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Aborted`] if a budget runs out or the cancel
    /// flag is raised, and [`SearchError::ProblemPanicked`] if a problem
    /// callback panics. The interrupted pass is logged as
    /// [`OutcomeKindV1::Aborted`] or [`OutcomeKindV1::Panicked`] with the
    /// expansions it performed.
    pub fn search<P: SearchProblem + ?Sized>(
        &self,
        problem: &P,
        ctx: &mut SearchContext,
    ) -> Result<SearchOutcome<P::Action>, SearchError> {
        let before = ctx.metrics().nodes_expanded();
        ctx.metrics_mut().increment(METRIC_DEPTH_ITERATIONS);

        let outcome = match self.traverse(problem, ctx) {
            Ok(outcome) => outcome,
            Err(err) => {
                let outcome = match err {
                    SearchError::ProblemPanicked { .. } => OutcomeKindV1::Panicked,
                    SearchError::Aborted(_) | SearchError::InvalidPolicy { .. } => {
                        OutcomeKindV1::Aborted
                    }
                };
                ctx.record_pass(PassRecordV1 {
                    depth_limit: self.limit,
                    nodes_expanded: ctx.metrics().nodes_expanded() - before,
                    outcome,
                });
                return Err(err);
            }
        };

        let nodes_expanded = ctx.metrics().nodes_expanded() - before;
        if let SearchOutcome::Solution(path) = &outcome {
            ctx.metrics_mut().set(METRIC_PATH_COST, path.len() as u64);
        }
        ctx.record_pass(PassRecordV1 {
            depth_limit: self.limit,
            nodes_expanded,
            outcome: outcome.kind(),
        });
        debug!(
            problem = problem.problem_id(),
            limit = self.limit,
            nodes_expanded,
            total_expanded = ctx.metrics().nodes_expanded(),
            outcome = outcome.kind().as_str(),
            "depth-limited pass finished"
        );
        Ok(outcome)
    }

    fn traverse<P: SearchProblem + ?Sized>(
        &self,
        problem: &P,
        ctx: &mut SearchContext,
    ) -> Result<SearchOutcome<P::Action>, SearchError> {
        let cycle_check = ctx.policy().cycle_check;

        let root_state = guarded(CallbackStageV1::InitialState, || problem.initial_state())?;
        let root = SearchNodeV1::root(root_state);
        if guarded(CallbackStageV1::IsGoal, || problem.is_goal(&root.state))? {
            return Ok(SearchOutcome::Solution(Vec::new()));
        }
        if self.limit == 0 {
            return Ok(SearchOutcome::Cutoff);
        }

        // Invariant: path.len() == stack.len() - 1 while the stack is non-empty;
        // path[i] produced stack[i + 1] from stack[i].
        let mut path: Vec<P::Action> = Vec::new();
        let mut stack = vec![expand(problem, ctx, root)?];

        while let Some(top) = stack.last_mut() {
            let Some(action) = top.pending.next() else {
                let cutoff_occurred = top.cutoff_occurred;
                stack.pop();
                let Some(parent) = stack.last_mut() else {
                    return Ok(if cutoff_occurred {
                        SearchOutcome::Cutoff
                    } else {
                        SearchOutcome::Failure
                    });
                };
                path.pop();
                parent.cutoff_occurred |= cutoff_occurred;
                continue;
            };

            let child_state =
                guarded(CallbackStageV1::Result, || problem.result(&top.node.state, &action))?;
            let child = top.node.child(child_state);

            if cycle_check == CycleCheckV1::AncestorPath
                && stack.iter().any(|frame| frame.node.state == child.state)
            {
                trace!(depth = child.depth, "successor repeats an ancestor; branch pruned");
                continue;
            }

            path.push(action);
            if guarded(CallbackStageV1::IsGoal, || problem.is_goal(&child.state))? {
                return Ok(SearchOutcome::Solution(path));
            }

            if child.depth >= self.limit {
                path.pop();
                if let Some(parent) = stack.last_mut() {
                    parent.cutoff_occurred = true;
                }
                continue;
            }

            stack.push(expand(problem, ctx, child)?);
        }

        // The root frame's exhaustion returns from inside the loop.
        Ok(SearchOutcome::Failure)
    }
}

/// Count an expansion and generate the node's successors.
fn expand<P: SearchProblem + ?Sized>(
    problem: &P,
    ctx: &mut SearchContext,
    node: SearchNodeV1<P::State>,
) -> Result<Frame<P::State, P::Action>, SearchError> {
    ctx.begin_expansion()?;
    let actions = guarded(CallbackStageV1::Actions, || problem.actions(&node.state))?;
    trace!(depth = node.depth, successors = actions.len(), "expanded");
    Ok(Frame {
        node,
        pending: actions.into_iter(),
        cutoff_occurred: false,
    })
}
