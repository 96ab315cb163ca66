//! Fathom Kernel: deterministic serialization and hashing primitives.
//!
//! # API Surface
//!
//! - [`proof::canon::canonical_json_bytes`] -- the single canonical JSON writer
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 content hashing
//!
//! The kernel knows nothing about search. Everything above it (run reports,
//! report directories, fixture digests) routes serialization-for-hashing
//! through these two functions so that byte identity means run identity.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod proof;
