//! String-keyed search counters.
//!
//! [`Metrics`] is the live counter set threaded through a run by `&mut`.
//! [`InstrumentationV1`] is the frozen snapshot handed to callers once the run
//! is over; it has no mutators.

use std::collections::BTreeMap;

/// Number of states whose action generator was invoked. Cumulative across
/// every pass of a run.
pub const METRIC_NODES_EXPANDED: &str = "nodesExpanded";
/// Length of the returned solution (unit step cost).
pub const METRIC_PATH_COST: &str = "pathCost";
/// Number of depth-limited passes run.
pub const METRIC_DEPTH_ITERATIONS: &str = "depthIterations";

/// Live counters for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metrics {
    counters: BTreeMap<String, u64>,
}

impl Metrics {
    /// Zeroed counters. `nodesExpanded` is always present.
    #[must_use]
    pub fn new() -> Self {
        let mut counters = BTreeMap::new();
        counters.insert(METRIC_NODES_EXPANDED.to_string(), 0);
        Self { counters }
    }

    /// Add one to `name`, returning the new value.
    pub fn increment(&mut self, name: &str) -> u64 {
        if let Some(value) = self.counters.get_mut(name) {
            *value = value.saturating_add(1);
            *value
        } else {
            self.counters.insert(name.to_string(), 1);
            1
        }
    }

    /// Overwrite `name`.
    pub fn set(&mut self, name: &str, value: u64) {
        self.counters.insert(name.to_string(), value);
    }

    /// Current value of `name` (0 if never touched).
    #[must_use]
    pub fn get(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// Shorthand for `get(METRIC_NODES_EXPANDED)`.
    #[must_use]
    pub fn nodes_expanded(&self) -> u64 {
        self.get(METRIC_NODES_EXPANDED)
    }

    /// End the run: the counters become read-only.
    #[must_use]
    pub fn freeze(self) -> InstrumentationV1 {
        InstrumentationV1 {
            counters: self.counters,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only counters of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstrumentationV1 {
    counters: BTreeMap<String, u64>,
}

impl InstrumentationV1 {
    /// Value of `name`, if it was recorded.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<u64> {
        self.counters.get(name).copied()
    }

    /// Value of `name` rendered as a decimal string.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<String> {
        self.get(name).map(|v| v.to_string())
    }

    /// Total nodes expanded during the run.
    #[must_use]
    pub fn nodes_expanded(&self) -> u64 {
        self.get(METRIC_NODES_EXPANDED).unwrap_or(0)
    }

    /// Counters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counters.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// JSON object of all counters.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .counters
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::from(*v)))
            .collect();
        serde_json::Value::Object(map)
    }
}
