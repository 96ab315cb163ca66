//! Run report: a self-contained, digest-bound record of one agent run.
//!
//! # Shape (`run_report.v1`)
//!
//! ```text
//! {
//!   "instrumentation": {"depthIterations": .., "nodesExpanded": .., ..},
//!   "outcome":         {"type": "solution" | "failure" | "cutoff" | "aborted" | .., ..},
//!   "passes":          [{"depth_limit", "nodes_expanded", "outcome"}, ..],
//!   "plan":            ["Action[name==.., ..]", ..],
//!   "plan_digest":     "sha256:..",
//!   "policy":          {.. search_policy.v1 ..},
//!   "policy_digest":   "sha256:..",
//!   "problem_id":      "..",
//!   "schema_version":  "run_report.v1",
//!   "strategy":        {"type": .., ..}
//! }
//! ```
//!
//! The report is stored as canonical JSON bytes. Its digest is
//! `canonical_hash(HashDomain::RunReport, bytes)`, so two runs of the same
//! problem under the same strategy and policy yield the same digest. Wall-clock
//! time never enters the report.

use fathom_kernel::proof::canon::{canonical_json_bytes, is_canonical, CanonError};
use fathom_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use fathom_search::{ActionV1, SearchPolicyV1, Strategy};
use thiserror::Error;

use crate::agent::{AgentError, AgentRunV1};

/// Schema tag written into every report.
pub const RUN_REPORT_SCHEMA_VERSION: &str = "run_report.v1";

/// Error building or loading a run report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// A report value could not be canonicalized.
    #[error("canonical JSON error: {0}")]
    Canon(#[from] CanonError),
    /// Report bytes are not valid JSON.
    #[error("report is not valid JSON: {detail}")]
    Parse { detail: String },
    /// Report bytes are valid JSON but not in canonical form.
    #[error("report bytes are not canonical JSON")]
    NotCanonical,
    /// `schema_version` is missing or unknown.
    #[error("unsupported report schema version: {found:?}")]
    SchemaMismatch { found: String },
}

/// Canonical report bytes plus their digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReportV1 {
    bytes: Vec<u8>,
    digest: ContentHash,
}

impl RunReportV1 {
    /// Adopt already-serialized report bytes, recomputing the digest.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Parse`] for invalid JSON,
    /// [`ReportError::NotCanonical`] if the bytes are not canonical, and
    /// [`ReportError::SchemaMismatch`] for an unknown `schema_version`.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ReportError> {
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| ReportError::Parse {
                detail: e.to_string(),
            })?;
        if !is_canonical(&bytes) {
            return Err(ReportError::NotCanonical);
        }
        let found = value["schema_version"].as_str().unwrap_or("");
        if found != RUN_REPORT_SCHEMA_VERSION {
            return Err(ReportError::SchemaMismatch {
                found: found.to_string(),
            });
        }
        let digest = canonical_hash(HashDomain::RunReport, &bytes);
        Ok(Self { bytes, digest })
    }

    /// Canonical JSON bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn digest(&self) -> &ContentHash {
        &self.digest
    }

    /// The report parsed back into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Parse`] if the stored bytes are not valid JSON,
    /// which cannot happen for a report built by this module.
    pub fn to_value(&self) -> Result<serde_json::Value, ReportError> {
        serde_json::from_slice(&self.bytes).map_err(|e| ReportError::Parse {
            detail: e.to_string(),
        })
    }
}

/// Build the report of one agent run.
///
/// `result` is the value returned by [`crate::agent::SearchAgent::run`]; every
/// variant, including errors, produces a report.
///
/// # Errors
///
/// Returns [`ReportError::Canon`] if a component fails canonicalization.
pub fn build_report<A: ActionV1>(
    problem_id: &str,
    strategy: &Strategy,
    policy: &SearchPolicyV1,
    result: &Result<AgentRunV1<A>, AgentError>,
) -> Result<RunReportV1, ReportError> {
    let policy_digest = policy.digest()?;

    let plan: Vec<String> = match result {
        Ok(run) => run.rendered_actions(),
        Err(_) => Vec::new(),
    };
    let plan_json = serde_json::Value::from(plan);
    let plan_digest = canonical_hash(HashDomain::Plan, &canonical_json_bytes(&plan_json)?);

    let stats = match result {
        Ok(run) => Some(&run.stats),
        Err(e) => e.stats(),
    };
    let instrumentation = stats.map_or_else(
        || serde_json::json!({}),
        |s| s.instrumentation.to_json_value(),
    );
    let passes: Vec<serde_json::Value> = stats
        .map(|s| s.passes.iter().map(|p| p.to_json_value()).collect())
        .unwrap_or_default();

    let report = serde_json::json!({
        "instrumentation": instrumentation,
        "outcome": outcome_json(result),
        "passes": passes,
        "plan": plan_json,
        "plan_digest": plan_digest.as_str(),
        "policy": policy.to_json_value(),
        "policy_digest": policy_digest.as_str(),
        "problem_id": problem_id,
        "schema_version": RUN_REPORT_SCHEMA_VERSION,
        "strategy": strategy.to_json_value(),
    });

    let bytes = canonical_json_bytes(&report)?;
    let digest = canonical_hash(HashDomain::RunReport, &bytes);
    Ok(RunReportV1 { bytes, digest })
}

fn outcome_json<A>(result: &Result<AgentRunV1<A>, AgentError>) -> serde_json::Value {
    match result {
        Ok(run) => serde_json::json!({"plan_length": run.actions.len(), "type": "solution"}),
        Err(AgentError::NoSolution { .. }) => serde_json::json!({"type": "failure"}),
        Err(AgentError::CutoffReached { depth_limit, .. }) => {
            serde_json::json!({"depth_limit": depth_limit, "type": "cutoff"})
        }
        Err(AgentError::Aborted { reason, .. }) => {
            serde_json::json!({"reason": reason.to_json_value(), "type": "aborted"})
        }
        Err(AgentError::ProblemPanicked { stage, .. }) => {
            serde_json::json!({"stage": stage.as_str(), "type": "problem_panicked"})
        }
        Err(AgentError::InvalidPolicy { detail }) => {
            serde_json::json!({"detail": detail, "type": "invalid_policy"})
        }
    }
}
