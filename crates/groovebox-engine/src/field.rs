//! Groove field basis functions.
//!
//! Pure numeric helpers the context assembly samples per event. Each
//! returns an unscaled displacement in milliseconds (or a dimensionless
//! multiplier where noted) and takes an explicit `bpm_scale`; the current
//! pipeline passes 1.0 so that tempo scaling happens exactly once, inside
//! the kernel. Degenerate arguments produce 0 (or the identity multiplier),
//! never a NaN or a panic.

use groovebox_profile::{CouplingDirection, DriftWaveform, VELOCITY_CENTER};

/// Power-curve drag: `D * (n/N)^alpha * s`.
///
/// Rises monotonically from 0 at step 0 to `D * s` at step N.
pub fn drag_power(
    step: f64,
    steps_per_bar: f64,
    max_drag_ms: f64,
    exponent: f64,
    channel_scale: f64,
    bpm_scale: f64,
) -> f64 {
    if steps_per_bar <= 0.0 || exponent <= 0.0 {
        return 0.0;
    }
    let progress = (step / steps_per_bar).max(0.0);
    max_drag_ms * progress.powf(exponent) * channel_scale * bpm_scale
}

/// Logarithmic drag: `D * ln(1 + (n/N)*k) / ln(1 + k) * s`.
///
/// Fast early drift that flattens toward `D * s` at the end of the bar.
/// Non-positive `k` is treated as 1.
pub fn drag_log(
    step: f64,
    steps_per_bar: f64,
    max_drag_ms: f64,
    k: f64,
    channel_scale: f64,
    bpm_scale: f64,
) -> f64 {
    if steps_per_bar <= 0.0 {
        return 0.0;
    }
    let k = if k <= 0.0 { 1.0 } else { k };
    let progress = (step / steps_per_bar).max(0.0);
    max_drag_ms * (1.0 + progress * k).ln() / (1.0 + k).ln() * channel_scale * bpm_scale
}

/// Velocity-phase coupling: `sign * (v - 0.7) * ratio * 10`.
///
/// Hits above the velocity center displace one way, hits below the other;
/// the direction picks the sign and `None` silences the field.
pub fn velocity_phase(
    velocity: f64,
    ratio: f64,
    direction: CouplingDirection,
    bpm_scale: f64,
) -> f64 {
    let sign = match direction {
        CouplingDirection::Natural => 1.0,
        CouplingDirection::Inverted => -1.0,
        CouplingDirection::None => 0.0,
    };
    sign * (velocity - VELOCITY_CENTER) * ratio * 10.0 * bpm_scale
}

/// Slow bar-scale drift oscillation.
///
/// Sine starts at 0 and peaks at +A a quarter period in; triangle starts at
/// -A, reaches +A at half period, and falls back.
pub fn macro_drift(
    enabled: bool,
    amplitude_ms: f64,
    period_bars: f64,
    waveform: DriftWaveform,
    bar: f64,
    bpm_scale: f64,
) -> f64 {
    if !enabled || period_bars <= 0.0 {
        return 0.0;
    }
    let phase = (bar / period_bars).rem_euclid(1.0);
    let wave = match waveform {
        DriftWaveform::Sine => (2.0 * std::f64::consts::PI * phase).sin(),
        DriftWaveform::Triangle => 1.0 - 2.0 * (2.0 * phase - 1.0).abs(),
    };
    amplitude_ms * wave * bpm_scale
}

/// Tension multiplier: `1 + tau * amplification`, dimensionless.
///
/// Tension `tau` accumulates per bar within a phrase, saturates at 1, and
/// snaps back at the reset period. Applied to the drag exponent.
pub fn tension_multiplier(
    increment: f64,
    amplification: f64,
    reset_period_bars: f64,
    bar: f64,
) -> f64 {
    if reset_period_bars <= 0.0 {
        return 1.0;
    }
    let bar_in_phrase = bar.rem_euclid(reset_period_bars);
    let tau = (bar_in_phrase * increment).clamp(0.0, 1.0);
    1.0 + tau * amplification
}
