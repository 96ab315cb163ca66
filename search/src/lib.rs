//! Fathom Search: deterministic uninformed depth-bounded search.
//!
//! This crate provides the search layer. It depends only on `fathom_kernel`;
//! it does NOT depend on `fathom_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! fathom_kernel  ←  fathom_search  ←  fathom_harness
//! (canon, hash)     (DLS, IDS, metrics)  (agent, worlds, reports)
//! ```
//!
//! # Key types
//!
//! - [`SearchProblem`] -- the problem contract (initial state, actions, result, goal)
//! - [`DepthLimitedSearch`] -- bounded depth-first pass returning solution, failure or cutoff
//! - [`IterativeDeepeningSearch`] -- depth-limited passes at limits 0, 1, 2, …
//! - [`Strategy`] -- closed set of strategies behind one `search` capability
//! - [`SearchContext`] -- per-run counters, policy, cancellation, pass log
//! - [`InstrumentationV1`] -- frozen string-keyed counters (`nodesExpanded`, …)

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod action;
pub mod context;
pub mod contract;
pub mod depth_limited;
pub mod error;
pub mod iterative_deepening;
pub mod metrics;
pub mod node;
pub mod policy;
pub mod search;

pub use action::{ActionV1, NamedActionV1};
pub use context::{CancelFlag, PassRecordV1, SearchContext};
pub use contract::{FnProblem, SearchProblem};
pub use depth_limited::DepthLimitedSearch;
pub use error::{AbortReasonV1, CallbackStageV1, SearchError};
pub use iterative_deepening::IterativeDeepeningSearch;
pub use metrics::{InstrumentationV1, Metrics};
pub use policy::{CycleCheckV1, SearchPolicyV1};
pub use search::{OutcomeKindV1, SearchOutcome, Strategy};
