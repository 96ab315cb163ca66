//! Canonical JSON bytes: the one serialization-for-hashing path.
//!
//! # Canonicalization rules
//!
//! 1. Object keys are written in lexicographic byte order, regardless of how
//!    the `serde_json::Map` backing store orders them.
//! 2. Compact form, no whitespace (`{"a":1,"b":[2,3]}`).
//! 3. Strings are escaped by `serde_json`'s string serializer.
//! 4. Numbers must be integers (`i64` or `u64`). Floats are rejected so that
//!    float formatting never leaks into a digest.

use std::io::Write;

use thiserror::Error;

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanonError {
    /// A JSON number was not an integer.
    #[error("non-integer number in canonical JSON: {raw}")]
    NonIntegerNumber { raw: String },
}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any number in `value` is not
/// representable as `i64` or `u64`.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, CanonError> {
    let mut buf = Vec::new();
    write_value(&mut buf, value)?;
    Ok(buf)
}

/// Returns `true` if `bytes` are exactly the canonical form of the JSON they encode.
///
/// Invalid JSON and JSON containing floats are never canonical.
#[must_use]
pub fn is_canonical(bytes: &[u8]) -> bool {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(bytes) else {
        return false;
    };
    canonical_json_bytes(&value).is_ok_and(|canon| canon == bytes)
}

fn write_value(buf: &mut Vec<u8>, value: &serde_json::Value) -> Result<(), CanonError> {
    match value {
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                let _ = write!(buf, "{i}");
            } else if let Some(u) = n.as_u64() {
                let _ = write!(buf, "{u}");
            } else {
                return Err(CanonError::NonIntegerNumber { raw: n.to_string() });
            }
        }
        serde_json::Value::Array(items) => {
            buf.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                write_value(buf, item)?;
            }
            buf.push(b']');
        }
        serde_json::Value::Object(map) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

            buf.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                write_scalar(buf, &serde_json::Value::String(key.clone()));
                buf.push(b':');
                write_value(buf, item)?;
            }
            buf.push(b'}');
        }
        scalar => write_scalar(buf, scalar),
    }
    Ok(())
}

/// Null, booleans and strings have exactly one compact encoding in `serde_json`.
fn write_scalar(buf: &mut Vec<u8>, value: &serde_json::Value) {
    // Writing into a Vec cannot fail, and these variants cannot hit a
    // serializer error (no maps with non-string keys).
    let _ = serde_json::to_writer(&mut *buf, value);
}
