//! Fathom Harness: problem-level orchestration for the search layer.
//!
//! The harness runs a problem through a search strategy
//! (`SearchAgent::run` → `Strategy::search` → depth-limited passes)
//! and packages the result as a self-contained, digest-bound run report.
//!
//! The harness does NOT implement search logic; it delegates to
//! `fathom_search`. Worlds provide problem definitions only; the harness owns
//! orchestration, reporting and persistence.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod agent;
pub mod report;
pub mod report_dir;
pub mod worlds;
