//! Error and warning types for profile import/export.

use thiserror::Error;

/// Fatal errors raised by the profile crate's public surface.
///
/// Only beat-kernel import can fail; every other condition degrades to a
/// warning value or in-band identity behavior.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Malformed JSON on import or unserializable value on canonicalization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The envelope's schema marker does not match this build.
    #[error("schema marker mismatch: expected {expected:?}, found {found:?}")]
    SchemaMarker {
        expected: &'static str,
        found: String,
    },
}

/// Non-blocking conditions surfaced during envelope import/export.
///
/// Warnings are values, not log lines; the caller decides how to present
/// them. An import that produces warnings still succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeWarning {
    /// The stored groove hash does not match the recomputed one. The
    /// imported data is used as-is.
    HashMismatch { stored: String, computed: String },
    /// The hash could not be computed; the operation proceeded without one.
    HashUnavailable { reason: String },
}

impl std::fmt::Display for EnvelopeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvelopeWarning::HashMismatch { stored, computed } => write!(
                f,
                "groove hash mismatch: stored {}, computed {}",
                stored, computed
            ),
            EnvelopeWarning::HashUnavailable { reason } => {
                write!(f, "groove hash unavailable: {}", reason)
            }
        }
    }
}
