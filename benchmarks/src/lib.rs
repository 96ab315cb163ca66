//! Shared helpers for fathom benchmark suites.

use fathom_harness::worlds::branching_tree::BranchingTree;
use fathom_harness::worlds::n_queens::NQueens;
use fathom_search::{SearchContext, SearchPolicyV1, SearchProblem, Strategy};

/// Run `strategy` on `problem` with the default policy and return
/// `nodesExpanded`, bypassing the agent and report layers.
///
/// # Panics
///
/// Panics if the search aborts or a callback panics. Benchmark setup failures
/// are fatal.
pub fn run_search_only<P: SearchProblem + ?Sized>(problem: &P, strategy: &Strategy) -> u64 {
    let mut ctx = SearchContext::new(SearchPolicyV1::default());
    strategy
        .search(problem, &mut ctx)
        .expect("benchmark search must not abort");
    ctx.metrics().nodes_expanded()
}

/// Board sizes benchmarked with iterative deepening.
pub const QUEENS_SIZES: &[usize] = &[6, 8, 10];

#[must_use]
pub fn queens(size: usize) -> NQueens {
    NQueens::new(size)
}

/// A goal-free tree: every pass down to `depth` exhausts it completely.
#[must_use]
pub fn exhaustive_tree(branching: u32, depth: u32) -> BranchingTree {
    BranchingTree::new(branching, depth)
}
