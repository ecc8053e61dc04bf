//! Groovebox Profile Library
//!
//! Declarative groove-profile types, validation, integrity hashing, and the
//! beat-kernel envelope that carries a profile on disk.
//!
//! A groove profile describes a *feel*: tempo, push/drag limits,
//! per-channel offsets, and the coefficient sources the engine turns into
//! per-event displacements. Profiles are plain data: the same profile plus
//! the same seed always produces the same event stream, which is why every
//! profile carries a canonical SHA-256 integrity hash.
//!
//! # Example
//!
//! ```
//! use groovebox_profile::{
//!     compute_groove_hash, export_beat_kernel, import_beat_kernel, BeatKernel, GrooveProfile,
//! };
//!
//! let mut profile = GrooveProfile::default();
//! profile.bpm = 92.0;
//! profile.randomization_seed = 42;
//!
//! let hash = compute_groove_hash(&profile).unwrap();
//! assert_eq!(hash.len(), 64);
//!
//! let exported = export_beat_kernel(&BeatKernel::new(profile)).unwrap();
//! let imported = import_beat_kernel(&exported.json).unwrap();
//! assert!(imported.warnings.is_empty());
//! ```
//!
//! # Modules
//!
//! - [`profile`]: the groove profile and its sub-structures
//! - [`envelope`]: beat-kernel envelope import/export
//! - [`hash`]: stable canonicalization and the SHA-256 integrity hash
//! - [`validation`]: profile validation with typed errors and warnings
//! - [`error`]: fatal errors and non-blocking warnings

pub mod envelope;
pub mod error;
pub mod hash;
pub mod profile;
pub mod validation;

pub use envelope::{
    export_beat_kernel, import_beat_kernel, BeatKernel, ExportOutcome, ImportOutcome,
    SCHEMA_MARKER,
};
pub use error::{EnvelopeWarning, ProfileError};
pub use hash::{compute_groove_hash, compute_value_hash, sha256_hex, stable_stringify};
pub use profile::{
    AntiAliasFilter, AntiAliasType, ChannelFeel, CouplingDirection, DacSaturation, DragCurve,
    DriftMode, DriftWaveform, EmotionVector, FeelBias, GrooveProfile, HardwareEmulation,
    HarmonicGravity, MacroDrift, PhraseConstraints, ResetMode, SaturationCurve, TemporalCoupling,
    TemporalState, VELOCITY_CENTER,
};
pub use validation::{validate_profile, ValidationError, ValidationResult, ValidationWarning};
