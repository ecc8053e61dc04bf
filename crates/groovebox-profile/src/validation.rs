//! Profile validation.
//!
//! Validation reports issues as typed values with stable codes. The engine
//! clamps out-of-band values on read regardless, so most findings are
//! warnings; only invariants the engine cannot repair in-band (non-positive
//! tempo or grid) are errors.

use crate::profile::GrooveProfile;

/// Error codes for profile validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// GP001: bpm must be positive
    NonPositiveBpm,
    /// GP002: steps_per_bar must be positive
    NonPositiveStepsPerBar,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "GP001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::NonPositiveBpm => "GP001",
            ErrorCode::NonPositiveStepsPerBar => "GP002",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for profile validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// GW001: groove_amount outside [0,1]
    GrooveAmountOutOfRange,
    /// GW002: harmonic gravity entry below 1.0
    GravityBelowUnity,
    /// GW003: ghost note attenuation is not negative
    NonNegativeGhostAttenuation,
    /// GW004: emotion component outside [0,1]
    EmotionOutOfRange,
    /// GW005: ghost note probability outside [0,1]
    GhostProbabilityOutOfRange,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "GW001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::GrooveAmountOutOfRange => "GW001",
            WarningCode::GravityBelowUnity => "GW002",
            WarningCode::NonNegativeGhostAttenuation => "GW003",
            WarningCode::EmotionOutOfRange => "GW004",
            WarningCode::GhostProbabilityOutOfRange => "GW005",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub code: ErrorCode,
    pub message: String,
    pub path: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} (at {})", self.code, self.message, self.path)
    }
}

/// A validation warning with code, message, and JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub code: WarningCode,
    pub message: String,
    pub path: String,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} (at {})", self.code, self.message, self.path)
    }
}

/// Result of profile validation.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// True when there are no errors (warnings permitted).
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, code: ErrorCode, message: impl Into<String>, path: impl Into<String>) {
        self.errors.push(ValidationError {
            code,
            message: message.into(),
            path: path.into(),
        });
    }

    fn warn(&mut self, code: WarningCode, message: impl Into<String>, path: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            code,
            message: message.into(),
            path: path.into(),
        });
    }
}

/// Validates a groove profile against its invariants.
pub fn validate_profile(profile: &GrooveProfile) -> ValidationResult {
    let mut result = ValidationResult::default();

    if !(profile.bpm > 0.0) {
        result.error(
            ErrorCode::NonPositiveBpm,
            format!("bpm must be positive, got {}", profile.bpm),
            "bpm",
        );
    }
    if profile.steps_per_bar == 0 {
        result.error(
            ErrorCode::NonPositiveStepsPerBar,
            "steps_per_bar must be positive",
            "steps_per_bar",
        );
    }

    if !(0.0..=1.0).contains(&profile.groove_amount) {
        result.warn(
            WarningCode::GrooveAmountOutOfRange,
            format!("groove_amount {} will be clamped to [0,1]", profile.groove_amount),
            "groove_amount",
        );
    }

    for (mode, gravity) in &profile.harmonic_gravity.gravity_by_mode {
        if *gravity < 1.0 {
            result.warn(
                WarningCode::GravityBelowUnity,
                format!("gravity {} will be floored to 1.0", gravity),
                format!("harmonic_gravity.gravity_by_mode.{}", mode),
            );
        }
    }

    for (channel, feel) in &profile.channel_offsets {
        if feel.ghost_note_probability > 0.0 && feel.ghost_note_attenuation_db >= 0.0 {
            result.warn(
                WarningCode::NonNegativeGhostAttenuation,
                format!(
                    "ghost_note_attenuation_db {} does not attenuate",
                    feel.ghost_note_attenuation_db
                ),
                format!("channel_offsets.{}.ghost_note_attenuation_db", channel),
            );
        }
        if !(0.0..=1.0).contains(&feel.ghost_note_probability) {
            result.warn(
                WarningCode::GhostProbabilityOutOfRange,
                format!(
                    "ghost_note_probability {} will be clamped to [0,1]",
                    feel.ghost_note_probability
                ),
                format!("channel_offsets.{}.ghost_note_probability", channel),
            );
        }
    }

    let names = ["loneliness", "tension", "admiration", "defiance", "calm"];
    let raw = [
        profile.emotion_vector.loneliness,
        profile.emotion_vector.tension,
        profile.emotion_vector.admiration,
        profile.emotion_vector.defiance,
        profile.emotion_vector.calm,
    ];
    for (name, component) in names.iter().zip(raw) {
        if !(0.0..=1.0).contains(&component) {
            result.warn(
                WarningCode::EmotionOutOfRange,
                format!("emotion component {} will be clamped to [0,1]", component),
                format!("emotion_vector.{}", name),
            );
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ChannelFeel;

    #[test]
    fn default_profile_is_valid() {
        let result = validate_profile(&GrooveProfile::default());
        assert!(result.is_ok());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn non_positive_bpm_is_an_error() {
        let mut profile = GrooveProfile::default();
        profile.bpm = 0.0;
        let result = validate_profile(&profile);
        assert!(!result.is_ok());
        assert_eq!(result.errors[0].code, ErrorCode::NonPositiveBpm);
    }

    #[test]
    fn clampable_fields_are_warnings_not_errors() {
        let mut profile = GrooveProfile::default();
        profile.groove_amount = 1.5;
        profile.emotion_vector.calm = -0.2;
        profile
            .harmonic_gravity
            .gravity_by_mode
            .insert("minor".into(), 0.5);
        profile.channel_offsets.insert(
            "snare".into(),
            ChannelFeel {
                ghost_note_probability: 0.3,
                ghost_note_attenuation_db: 6.0,
                ..ChannelFeel::default()
            },
        );

        let result = validate_profile(&profile);
        assert!(result.is_ok());
        let codes: Vec<_> = result.warnings.iter().map(|w| w.code).collect();
        assert!(codes.contains(&WarningCode::GrooveAmountOutOfRange));
        assert!(codes.contains(&WarningCode::EmotionOutOfRange));
        assert!(codes.contains(&WarningCode::GravityBelowUnity));
        assert!(codes.contains(&WarningCode::NonNegativeGhostAttenuation));
    }

    #[test]
    fn error_display_includes_code_and_path() {
        let mut profile = GrooveProfile::default();
        profile.bpm = -10.0;
        let result = validate_profile(&profile);
        let rendered = result.errors[0].to_string();
        assert!(rendered.starts_with("GP001:"));
        assert!(rendered.ends_with("(at bpm)"));
    }
}
