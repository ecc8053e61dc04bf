//! Beat-kernel envelope: the on-disk container for a groove profile.
//!
//! A beat kernel bundles the groove profile with the rest of a project
//! (metadata, transport, drums, instruments, master FX, arrangement). Those
//! outer sections belong to external collaborators and are carried as
//! opaque JSON; this crate only interprets the schema marker, the groove
//! profile, and the integrity hash pair.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EnvelopeWarning, ProfileError};
use crate::hash::compute_groove_hash;
use crate::profile::GrooveProfile;

/// Fixed schema marker; a mismatch is a fatal import error.
pub const SCHEMA_MARKER: &str = "groovebox/beat-kernel@1";

/// The beat-kernel envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatKernel {
    /// Schema marker; must equal [`SCHEMA_MARKER`].
    pub schema: String,
    /// Mirror of `groove.randomization_seed`, kept at the top level so
    /// hosts can re-seed without parsing the profile.
    #[serde(default)]
    pub randomization_seed: u32,
    /// Integrity hash of the groove profile, set on export.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groove_hash: Option<String>,
    #[serde(default)]
    pub groove: GrooveProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drums: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruments: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_fx: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrangement: Option<Value>,
    /// Unknown fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl BeatKernel {
    /// Creates an envelope around a profile with no outer sections.
    pub fn new(groove: GrooveProfile) -> Self {
        Self {
            schema: SCHEMA_MARKER.to_string(),
            randomization_seed: groove.randomization_seed,
            groove_hash: None,
            groove,
            metadata: None,
            transport: None,
            drums: None,
            instruments: None,
            master_fx: None,
            arrangement: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// Serialized envelope JSON with the hash embedded (when computable).
    pub json: String,
    pub warnings: Vec<EnvelopeWarning>,
}

/// Result of a successful import.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub kernel: BeatKernel,
    pub warnings: Vec<EnvelopeWarning>,
}

/// Serializes a beat kernel, embedding the recomputed groove hash and the
/// seed mirror.
///
/// Hash computation failure degrades to a [`EnvelopeWarning::HashUnavailable`]
/// and the envelope is exported without a hash.
pub fn export_beat_kernel(kernel: &BeatKernel) -> Result<ExportOutcome, ProfileError> {
    let mut kernel = kernel.clone();
    let mut warnings = Vec::new();

    kernel.randomization_seed = kernel.groove.randomization_seed;
    kernel.groove_hash = match compute_groove_hash(&kernel.groove) {
        Ok(hash) => Some(hash),
        Err(err) => {
            warnings.push(EnvelopeWarning::HashUnavailable {
                reason: err.to_string(),
            });
            None
        }
    };

    let json = serde_json::to_string(&kernel)?;
    Ok(ExportOutcome { json, warnings })
}

/// Parses a beat kernel from JSON.
///
/// Fatal only on malformed JSON or a schema-marker mismatch; a missing or
/// mismatched groove hash is surfaced as a warning and the import succeeds
/// with the imported data.
pub fn import_beat_kernel(json: &str) -> Result<ImportOutcome, ProfileError> {
    let kernel: BeatKernel = serde_json::from_str(json)?;
    if kernel.schema != SCHEMA_MARKER {
        return Err(ProfileError::SchemaMarker {
            expected: SCHEMA_MARKER,
            found: kernel.schema,
        });
    }

    let mut warnings = Vec::new();
    if let Some(stored) = kernel.groove_hash.clone() {
        match compute_groove_hash(&kernel.groove) {
            Ok(computed) if computed != stored => {
                warnings.push(EnvelopeWarning::HashMismatch { stored, computed });
            }
            Ok(_) => {}
            Err(err) => warnings.push(EnvelopeWarning::HashUnavailable {
                reason: err.to_string(),
            }),
        }
    }

    Ok(ImportOutcome { kernel, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn export_then_import_round_trips_clean() {
        let mut profile = GrooveProfile::default();
        profile.randomization_seed = 99;
        let kernel = BeatKernel::new(profile);

        let exported = export_beat_kernel(&kernel).unwrap();
        assert!(exported.warnings.is_empty());

        let imported = import_beat_kernel(&exported.json).unwrap();
        assert!(imported.warnings.is_empty());
        assert_eq!(imported.kernel.randomization_seed, 99);
        assert_eq!(imported.kernel.groove, kernel.groove);
        assert!(imported.kernel.groove_hash.is_some());
    }

    #[test]
    fn tampered_profile_surfaces_hash_mismatch_but_imports() {
        let exported = export_beat_kernel(&BeatKernel::new(GrooveProfile::default())).unwrap();

        // Tamper with the profile after export, leaving the stored hash.
        let mut value: Value = serde_json::from_str(&exported.json).unwrap();
        value["groove"]["bpm"] = serde_json::json!(174.0);
        let tampered = serde_json::to_string(&value).unwrap();

        let imported = import_beat_kernel(&tampered).unwrap();
        assert_eq!(imported.kernel.groove.bpm, 174.0);
        assert_eq!(imported.warnings.len(), 1);
        assert!(matches!(
            imported.warnings[0],
            EnvelopeWarning::HashMismatch { .. }
        ));
    }

    #[test]
    fn missing_hash_imports_without_warning() {
        let json = format!(r#"{{"schema": "{}", "groove": {{"bpm": 100.0}}}}"#, SCHEMA_MARKER);
        let imported = import_beat_kernel(&json).unwrap();
        assert!(imported.warnings.is_empty());
        assert_eq!(imported.kernel.groove.bpm, 100.0);
    }

    #[test]
    fn schema_marker_mismatch_is_fatal() {
        let err = import_beat_kernel(r#"{"schema": "groovebox/beat-kernel@2"}"#).unwrap_err();
        assert!(matches!(err, ProfileError::SchemaMarker { .. }));
    }

    #[test]
    fn malformed_json_is_fatal() {
        assert!(matches!(
            import_beat_kernel("{not json"),
            Err(ProfileError::Json(_))
        ));
    }

    #[test]
    fn outer_sections_and_unknown_fields_round_trip() {
        let json = format!(
            r#"{{"schema": "{}", "drums": {{"kick": [0, 4, 8, 12]}}, "lyrics": "la la"}}"#,
            SCHEMA_MARKER
        );
        let imported = import_beat_kernel(&json).unwrap();
        let exported = export_beat_kernel(&imported.kernel).unwrap();
        let back: Value = serde_json::from_str(&exported.json).unwrap();

        assert_eq!(back["drums"]["kick"][3], 12);
        assert_eq!(back["lyrics"], "la la");
    }
}
