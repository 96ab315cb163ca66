//! Content hashing with domain separation.
//!
//! Algorithm: SHA-256. Every digest is `SHA-256(domain_prefix || data)` and is
//! rendered as `"sha256:<lowercase hex>"`. Domain prefixes are null-terminated
//! so that no prefix is a prefix of another.

use sha2::{Digest, Sha256};

/// A content-addressed hash with algorithm identifier.
///
/// Format: `"algorithm:hex_digest"` (e.g., `"sha256:abcdef..."`).
///
/// Invariant: exactly one `:` separator with non-empty text on both sides
/// (enforced by [`ContentHash::parse`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    ///
    /// Returns `None` if the separator is missing, or either side is empty,
    /// or the digest itself contains a second `:`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 || s[colon + 1..].contains(':') {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    /// The algorithm portion (e.g., `"sha256"`).
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    /// The hex digest portion.
    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    /// The full `"algorithm:hex_digest"` string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// Hash domains used across the workspace.
///
/// Adding a domain is additive; changing an existing prefix changes every
/// digest produced under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashDomain {
    /// Canonical JSON of a `RunReportV1`.
    RunReport,
    /// Canonical JSON of a `SearchPolicyV1` snapshot.
    SearchPolicy,
    /// Ordered list of rendered plan actions.
    Plan,
}

impl HashDomain {
    /// The null-terminated byte prefix for this domain.
    #[must_use]
    pub fn prefix(self) -> &'static [u8] {
        match self {
            Self::RunReport => b"FATHOM::RUN_REPORT::V1\0",
            Self::SearchPolicy => b"FATHOM::SEARCH_POLICY::V1\0",
            Self::Plan => b"FATHOM::PLAN::V1\0",
        }
    }
}

/// Compute the canonical hash of `data` under `domain`.
#[must_use]
pub fn canonical_hash(domain: HashDomain, data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain.prefix());
    hasher.update(data);
    let hex_digest = hex::encode(hasher.finalize());
    let full = format!("sha256:{hex_digest}");
    ContentHash {
        colon: "sha256".len(),
        full,
    }
}
