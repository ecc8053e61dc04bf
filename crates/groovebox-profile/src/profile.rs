//! Groove profile types.
//!
//! A [`GrooveProfile`] is the complete declarative description of a feel:
//! tempo, global groove amount, per-channel offsets, and the coefficient
//! sources (drag curve, velocity coupling, harmonic gravity, macro drift,
//! phrase constraints, tension state, hardware emulation, emotion vector)
//! that the engine assembles into a kernel context per event.
//!
//! Profiles are configuration: immutable in principle, copied on edit.
//! Unknown top-level fields survive a deserialize/serialize round-trip so
//! that newer profiles stay loadable by older builds.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Velocity center for velocity-phase coupling. Hits above this push or
/// drag depending on coupling direction; hits below pull the other way.
pub const VELOCITY_CENTER: f64 = 0.7;

/// Feel bias selects the hard push/drag displacement limits in ms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeelBias {
    /// Dead on the grid; symmetric tight limits.
    #[default]
    OnTop,
    /// Behind the beat; generous drag headroom.
    LaidBack,
    /// In front of the beat; generous push headroom.
    Ahead,
    /// Extreme drag pocket, almost no push.
    DeepPocket,
}

impl FeelBias {
    /// Returns `(max_push_ms, max_drag_ms)`. Push is negative (earlier),
    /// drag is positive (later), both pre-tempo-scaling.
    pub fn limits(&self) -> (f64, f64) {
        match self {
            FeelBias::OnTop => (-8.0, 8.0),
            FeelBias::LaidBack => (-5.0, 25.0),
            FeelBias::Ahead => (-20.0, 5.0),
            FeelBias::DeepPocket => (-3.0, 35.0),
        }
    }

    /// Returns the feel bias as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeelBias::OnTop => "on_top",
            FeelBias::LaidBack => "laid_back",
            FeelBias::Ahead => "ahead",
            FeelBias::DeepPocket => "deep_pocket",
        }
    }
}

impl std::str::FromStr for FeelBias {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on_top" => Ok(FeelBias::OnTop),
            "laid_back" => Ok(FeelBias::LaidBack),
            "ahead" => Ok(FeelBias::Ahead),
            "deep_pocket" => Ok(FeelBias::DeepPocket),
            _ => Err(format!("unknown feel bias: {}", s)),
        }
    }
}

/// Drag curve shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftMode {
    /// Power curve `D * (n/N)^alpha`.
    #[default]
    Power,
    /// Logarithmic curve, fast early drift that flattens out.
    Log,
    /// Straight ramp; the power curve with exponent 1.
    Linear,
}

/// Velocity-phase coupling direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouplingDirection {
    /// Harder hits land later, softer hits earlier.
    #[default]
    Natural,
    /// Harder hits land earlier.
    Inverted,
    /// Coupling disabled regardless of ratio.
    None,
}

/// Macro-drift oscillation waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftWaveform {
    #[default]
    Sine,
    Triangle,
}

/// Phrase boundary reset behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetMode {
    /// Accumulated state snaps back at the phrase boundary.
    #[default]
    Hard,
    /// Accumulated state decays across the boundary.
    Soft,
}

/// DAC saturation transfer curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaturationCurve {
    #[default]
    Tanh,
    SoftClip,
    HardClip,
}

/// Anti-alias filter topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AntiAliasType {
    #[default]
    OnePole,
    Butterworth,
    Chebyshev,
}

/// Per-channel feel configuration, keyed by canonical channel name.
///
/// All fields default to zero; an unknown channel resolves to this default,
/// which is the identity for every feature it gates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelFeel {
    /// Constant timing offset in ms (negative pushes, positive drags).
    pub timing_offset_ms: f64,
    /// Gaussian velocity humanization width; 0 disables.
    pub velocity_variance: f64,
    /// Gaussian timing jitter width in ms; 0 disables.
    pub jitter_ms: f64,
    /// Probability in [0,1] that a hit becomes a ghost note; 0 disables.
    pub ghost_note_probability: f64,
    /// Ghost note attenuation in dB, negative (e.g. -12.0).
    pub ghost_note_attenuation_db: f64,
}

/// Cumulative in-bar drag configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragCurve {
    pub enabled: bool,
    pub drift_mode: DriftMode,
    /// Drag at the end of the bar, in ms.
    pub max_drag_ms: f64,
    /// Power-curve exponent; > 1 back-loads the drag.
    pub drag_exponent: f64,
    /// Log-curve steepness; non-positive values are treated as 1.
    pub log_k: f64,
    /// Per-channel drag multiplier, keyed by canonical channel name.
    pub per_channel_scaling: BTreeMap<String, f64>,
}

impl Default for DragCurve {
    fn default() -> Self {
        Self {
            enabled: false,
            drift_mode: DriftMode::Power,
            max_drag_ms: 0.0,
            drag_exponent: 1.0,
            log_k: 1.0,
            per_channel_scaling: BTreeMap::new(),
        }
    }
}

impl DragCurve {
    /// Drag multiplier for a canonical channel, 1.0 when unconfigured.
    pub fn channel_scale(&self, channel: &str) -> f64 {
        self.per_channel_scaling.get(channel).copied().unwrap_or(1.0)
    }
}

/// Velocity-phase coupling configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalCoupling {
    pub enabled: bool,
    /// Coupling strength; displacement is `sign * (v - 0.7) * ratio * 10` ms.
    pub velocity_phase_ratio: f64,
    pub direction: CouplingDirection,
}

impl Default for TemporalCoupling {
    fn default() -> Self {
        Self {
            enabled: false,
            velocity_phase_ratio: 0.5,
            direction: CouplingDirection::Natural,
        }
    }
}

/// Harmonic gravity: scale-mode-dependent amplification of the elastic field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmonicGravity {
    pub enabled: bool,
    /// Amplification factor per scale-mode name; values below 1.0 are
    /// floored to 1.0 on read.
    pub gravity_by_mode: BTreeMap<String, f64>,
}

impl HarmonicGravity {
    /// Gravity for a scale mode: 1.0 when disabled or unconfigured, never
    /// below 1.0.
    pub fn gravity_for(&self, mode: &str) -> f64 {
        if !self.enabled {
            return 1.0;
        }
        self.gravity_by_mode
            .get(mode)
            .copied()
            .map(|g| g.max(1.0))
            .unwrap_or(1.0)
    }
}

/// Slow bar-scale drift oscillation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroDrift {
    pub enabled: bool,
    pub amplitude_ms: f64,
    pub period_bars: f64,
    pub waveform: DriftWaveform,
}

impl Default for MacroDrift {
    fn default() -> Self {
        Self {
            enabled: false,
            amplitude_ms: 0.0,
            period_bars: 4.0,
            waveform: DriftWaveform::Sine,
        }
    }
}

/// Phrase-level constraints on accumulated displacement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhraseConstraints {
    pub phrase_length_bars: u32,
    pub reset_mode: ResetMode,
    /// Extra symmetric clamp on total displacement in ms; 0 disables.
    pub max_accumulated_phase_error_ms: f64,
}

impl Default for PhraseConstraints {
    fn default() -> Self {
        Self {
            phrase_length_bars: 4,
            reset_mode: ResetMode::Hard,
            max_accumulated_phase_error_ms: 0.0,
        }
    }
}

/// Per-phrase tension accumulation that steepens the drag curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalState {
    pub enabled: bool,
    /// Tension gained per bar within a phrase.
    pub tension_increment: f64,
    /// How strongly full tension amplifies the drag exponent.
    pub elasticity_amplification: f64,
    pub reset_period_bars: u32,
}

impl Default for TemporalState {
    fn default() -> Self {
        Self {
            enabled: false,
            tension_increment: 0.0,
            elasticity_amplification: 0.0,
            reset_period_bars: 4,
        }
    }
}

/// DAC saturation stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DacSaturation {
    pub enabled: bool,
    pub curve: SaturationCurve,
    pub gain: f64,
}

impl Default for DacSaturation {
    fn default() -> Self {
        Self {
            enabled: false,
            curve: SaturationCurve::Tanh,
            gain: 1.0,
        }
    }
}

/// Anti-alias filter stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntiAliasFilter {
    #[serde(rename = "type")]
    pub filter_type: AntiAliasType,
    /// Cutoff in Hz; 0 tracks the target Nyquist frequency.
    pub cutoff_hz: f64,
    pub ripple_db: f64,
}

impl Default for AntiAliasFilter {
    fn default() -> Self {
        Self {
            filter_type: AntiAliasType::OnePole,
            cutoff_hz: 0.0,
            ripple_db: 0.0,
        }
    }
}

/// Vintage sampler emulation: time-domain PPQN quantization plus the
/// declarative half of the audio signal chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareEmulation {
    /// Pulses per quarter note for event-time quantization; 0 disables.
    pub ppqn: u32,
    /// Emulated converter sample rate in Hz.
    pub sample_rate: f64,
    /// Emulated converter bit depth.
    pub bit_depth: u32,
    pub dac_saturation: DacSaturation,
    pub anti_alias_filter: AntiAliasFilter,
}

impl Default for HardwareEmulation {
    fn default() -> Self {
        Self {
            ppqn: 0,
            sample_rate: 44100.0,
            bit_depth: 16,
            dac_saturation: DacSaturation::default(),
            anti_alias_filter: AntiAliasFilter::default(),
        }
    }
}

/// Five-dimensional emotional field, each component in [0,1].
///
/// The component order (loneliness, tension, admiration, defiance, calm) is
/// the fixed basis order the bias table is indexed by.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionVector {
    pub loneliness: f64,
    pub tension: f64,
    pub admiration: f64,
    pub defiance: f64,
    pub calm: f64,
}

impl EmotionVector {
    /// Number of basis dimensions.
    pub const DIMENSIONS: usize = 5;

    /// Components in basis order, clamped to [0,1] on read.
    pub fn components(&self) -> [f64; Self::DIMENSIONS] {
        [
            self.loneliness.clamp(0.0, 1.0),
            self.tension.clamp(0.0, 1.0),
            self.admiration.clamp(0.0, 1.0),
            self.defiance.clamp(0.0, 1.0),
            self.calm.clamp(0.0, 1.0),
        ]
    }

    /// True when every clamped component is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.components().iter().all(|c| *c == 0.0)
    }
}

/// The complete declarative description of a feel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrooveProfile {
    /// Tempo in beats per minute; must be positive.
    pub bpm: f64,
    /// Global displacement scalar in [0,1]; 0 bypasses the engine.
    pub groove_amount: f64,
    pub feel_bias: FeelBias,
    /// Grid resolution per bar, conventionally 16.
    pub steps_per_bar: u32,
    /// Initial seed for the event-path RNG.
    pub randomization_seed: u32,
    /// Per-channel feel, keyed by canonical channel name.
    pub channel_offsets: BTreeMap<String, ChannelFeel>,
    pub drag_curve: DragCurve,
    pub temporal_coupling: TemporalCoupling,
    pub harmonic_gravity: HarmonicGravity,
    pub macro_drift: MacroDrift,
    pub phrase_constraints: PhraseConstraints,
    pub temporal_state: TemporalState,
    pub hardware_emulation: HardwareEmulation,
    pub emotion_vector: EmotionVector,
    /// Unknown fields, preserved verbatim for forward compatibility.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for GrooveProfile {
    fn default() -> Self {
        Self {
            bpm: 90.0,
            groove_amount: 1.0,
            feel_bias: FeelBias::OnTop,
            steps_per_bar: 16,
            randomization_seed: 0,
            channel_offsets: BTreeMap::new(),
            drag_curve: DragCurve::default(),
            temporal_coupling: TemporalCoupling::default(),
            harmonic_gravity: HarmonicGravity::default(),
            macro_drift: MacroDrift::default(),
            phrase_constraints: PhraseConstraints::default(),
            temporal_state: TemporalState::default(),
            hardware_emulation: HardwareEmulation::default(),
            emotion_vector: EmotionVector::default(),
            extra: serde_json::Map::new(),
        }
    }
}

impl GrooveProfile {
    /// Feel for a canonical channel; all-zero when unconfigured.
    pub fn channel_feel(&self, channel: &str) -> ChannelFeel {
        self.channel_offsets.get(channel).copied().unwrap_or_default()
    }
}
