//! Problem definitions run by the harness.

pub mod branching_tree;
pub mod n_queens;
