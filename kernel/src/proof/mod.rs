//! Proof module: canonical JSON and content hashing.
//!
//! `hash` depends on nothing; `canon` depends on nothing. Callers compose them.

pub mod canon;
pub mod hash;
