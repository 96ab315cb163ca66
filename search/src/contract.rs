//! Search problem contract.

use std::fmt;

use crate::action::ActionV1;

/// A state-space search problem.
///
/// # Contract
///
/// - All four callbacks must be deterministic and side-effect free: the same
///   state (and action) must always yield the same actions, result and goal
///   verdict. Node counts are only reproducible under this contract. A problem
///   that violates it is malformed; the search layer does not detect this and
///   its results are unspecified.
/// - `actions` order is authoritative. The search never reorders or dedups
///   actions, so the order decides which solution is found first and how many
///   nodes are expanded before it.
/// - `result` must return a new state; the search layer never mutates states.
pub trait SearchProblem {
    /// Opaque, comparable state representation.
    type State: Clone + Eq + fmt::Debug;
    /// Discrete, named action.
    type Action: ActionV1;

    /// Stable identifier used in logs and run reports.
    fn problem_id(&self) -> &str;

    /// The initial state.
    fn initial_state(&self) -> Self::State;

    /// Enumerate the actions applicable in `state`, in traversal order.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// The state produced by applying `action` in `state`.
    fn result(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// Whether `state` satisfies the goal.
    fn is_goal(&self, state: &Self::State) -> bool;
}

type ActionsFn<S, A> = Box<dyn Fn(&S) -> Vec<A>>;
type ResultFn<S, A> = Box<dyn Fn(&S, &A) -> S>;
type GoalFn<S> = Box<dyn Fn(&S) -> bool>;

/// A problem assembled from an initial state and three functions.
///
/// Useful when a problem has no natural home type, e.g. in tests.
pub struct FnProblem<S, A> {
    problem_id: String,
    initial_state: S,
    actions_fn: ActionsFn<S, A>,
    result_fn: ResultFn<S, A>,
    goal_fn: GoalFn<S>,
}

impl<S, A> FnProblem<S, A> {
    /// Bundle an initial state with its action, result and goal functions.
    pub fn new(
        problem_id: impl Into<String>,
        initial_state: S,
        actions: impl Fn(&S) -> Vec<A> + 'static,
        result: impl Fn(&S, &A) -> S + 'static,
        is_goal: impl Fn(&S) -> bool + 'static,
    ) -> Self {
        Self {
            problem_id: problem_id.into(),
            initial_state,
            actions_fn: Box::new(actions),
            result_fn: Box::new(result),
            goal_fn: Box::new(is_goal),
        }
    }
}

impl<S, A> fmt::Debug for FnProblem<S, A>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnProblem")
            .field("problem_id", &self.problem_id)
            .field("initial_state", &self.initial_state)
            .finish_non_exhaustive()
    }
}

impl<S, A> SearchProblem for FnProblem<S, A>
where
    S: Clone + Eq + fmt::Debug,
    A: ActionV1,
{
    type State = S;
    type Action = A;

    fn problem_id(&self) -> &str {
        &self.problem_id
    }

    fn initial_state(&self) -> S {
        self.initial_state.clone()
    }

    fn actions(&self, state: &S) -> Vec<A> {
        (self.actions_fn)(state)
    }

    fn result(&self, state: &S, action: &A) -> S {
        (self.result_fn)(state, action)
    }

    fn is_goal(&self, state: &S) -> bool {
        (self.goal_fn)(state)
    }
}
