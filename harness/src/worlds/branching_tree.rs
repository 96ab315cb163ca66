//! `BranchingTree`: a uniform tree of fixed branching factor and height.
//!
//! A state is the path of child indices from the root. Every node above
//! `depth` has children `0..branching`; nodes at `depth` are leaves. With no
//! goal path set the space has no solution, which makes the tree a convenient
//! fixture for exact expansion counts.

use std::fmt;

use fathom_search::{ActionV1, SearchProblem};

/// Descend into child `child`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BranchAction {
    pub child: u32,
}

impl ActionV1 for BranchAction {
    fn name(&self) -> &str {
        "branch"
    }
}

impl fmt::Display for BranchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Action[name==branch, child=={}]", self.child)
    }
}

#[derive(Debug, Clone)]
pub struct BranchingTree {
    branching: u32,
    depth: u32,
    goal: Option<Vec<u32>>,
    problem_id: String,
}

impl BranchingTree {
    #[must_use]
    pub fn new(branching: u32, depth: u32) -> Self {
        Self {
            branching,
            depth,
            goal: None,
            problem_id: format!("branching_tree_b{branching}_d{depth}"),
        }
    }

    /// Make the node at `path` the single goal.
    #[must_use]
    pub fn with_goal(mut self, path: Vec<u32>) -> Self {
        self.goal = Some(path);
        self
    }
}

impl SearchProblem for BranchingTree {
    type State = Vec<u32>;
    type Action = BranchAction;

    fn problem_id(&self) -> &str {
        &self.problem_id
    }

    fn initial_state(&self) -> Vec<u32> {
        Vec::new()
    }

    fn actions(&self, path: &Vec<u32>) -> Vec<BranchAction> {
        if path.len() >= self.depth as usize {
            return Vec::new();
        }
        (0..self.branching).map(|child| BranchAction { child }).collect()
    }

    fn result(&self, path: &Vec<u32>, action: &BranchAction) -> Vec<u32> {
        let mut next = path.clone();
        next.push(action.child);
        next
    }

    fn is_goal(&self, path: &Vec<u32>) -> bool {
        self.goal.as_ref() == Some(path)
    }
}
