//! Search tree nodes.

/// A node of the depth-first search tree.
///
/// The action path from the root is not stored per node: a depth-first pass
/// keeps exactly one root-to-node path alive at a time, so the traversal owns
/// it as a single stack that grows on descent and shrinks on backtrack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNodeV1<S> {
    /// The state at this node.
    pub state: S,
    /// Tree depth (root = 0), equal to the length of the path to this node.
    pub depth: u32,
}

impl<S> SearchNodeV1<S> {
    /// The root node for `state`.
    #[must_use]
    pub fn root(state: S) -> Self {
        Self { state, depth: 0 }
    }

    /// A successor of this node holding `state`, one level deeper.
    #[must_use]
    pub fn child(&self, state: S) -> Self {
        Self {
            state,
            depth: self.depth + 1,
        }
    }
}
