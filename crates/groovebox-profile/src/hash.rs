//! Stable canonicalization and the groove integrity hash.
//!
//! The determinism policy for groove profiles:
//!
//! ```text
//! groove_hash = hex(SHA-256(stable_stringify(profile_json)))
//! ```
//!
//! `stable_stringify` sorts object keys lexicographically at every depth and
//! preserves array order. String escaping and number text are byte-identical
//! to serde_json's own serializer, so the canonical number form is the host
//! serializer's shortest round-trip decimal.

use std::fmt::Write as _;

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::ProfileError;
use crate::profile::GrooveProfile;

/// Computes the canonical SHA-256 hash of a groove profile.
///
/// # Returns
/// A 64-character lowercase hexadecimal string.
///
/// # Example
/// ```
/// use groovebox_profile::{compute_groove_hash, GrooveProfile};
///
/// let hash = compute_groove_hash(&GrooveProfile::default()).unwrap();
/// assert_eq!(hash.len(), 64);
/// ```
pub fn compute_groove_hash(profile: &GrooveProfile) -> Result<String, ProfileError> {
    let value = serde_json::to_value(profile)?;
    Ok(compute_value_hash(&value))
}

/// Computes the canonical SHA-256 hash of any JSON value.
pub fn compute_value_hash(value: &Value) -> String {
    sha256_hex(stable_stringify(value).as_bytes())
}

/// Serializes a JSON value into its canonical textual form.
///
/// - `null`, booleans, numbers, and strings serialize as serde_json would
/// - arrays preserve element order
/// - object keys are sorted lexicographically at every level
/// - no whitespace between tokens
pub fn stable_stringify(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        // serde_json::Number's Display is its serialized form (itoa/ryu
        // shortest round-trip), which is the canonical number contract.
        Value::Number(n) => {
            let _ = write!(out, "{}", n);
        }
        Value::String(s) => write_escaped(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_escaped(key, out);
                out.push(':');
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
    }
}

/// Writes a string with the same escaping serde_json emits: short escapes
/// for `"` `\` and the common control characters, `\u00xx` (lowercase hex)
/// for the rest of the C0 range, everything else verbatim.
fn write_escaped(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\u{20}' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Lowercase hexadecimal SHA-256 digest of arbitrary bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    let mut out = String::with_capacity(64);
    for byte in digest {
        let _ = write!(out, "{:02x}", byte);
    }
    out
}
