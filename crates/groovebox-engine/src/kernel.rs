//! The unified displacement kernel.
//!
//! One closed-form equation turns an assembled coefficient context into a
//! signed displacement in milliseconds. Twelve genres' worth of feel come
//! out of this single expression; nothing in here inspects what kind of
//! groove is playing, only the numbers in the context.

/// Per-event coefficient context.
///
/// Every displacement-like field is in unscaled milliseconds; the kernel
/// applies the tempo scalar `90 / bpm` exactly once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientContext {
    pub bpm: f64,
    pub groove_amount: f64,
    /// Constant per-channel offset.
    pub linear_offset: f64,
    /// In-bar drag curve sample.
    pub curvature: f64,
    /// Velocity-phase coupling sample.
    pub phase_coupling: f64,
    /// Elastic-field amplifier, always >= 1.
    pub harmonic_gravity: f64,
    /// Bar-scale drift oscillation sample.
    pub macro_drift: f64,
    /// Gaussian timing jitter sample.
    pub jitter: f64,
    /// Feel-bias push limit (negative).
    pub max_push_ms: f64,
    /// Feel-bias drag limit (positive).
    pub max_drag_ms: f64,
    /// Phrase clamp in ms; 0 disables.
    pub max_phase_error_ms: f64,
}

impl CoefficientContext {
    /// A context that displaces nothing, handy as a test baseline.
    pub fn neutral(bpm: f64) -> Self {
        Self {
            bpm,
            groove_amount: 1.0,
            linear_offset: 0.0,
            curvature: 0.0,
            phase_coupling: 0.0,
            harmonic_gravity: 1.0,
            macro_drift: 0.0,
            jitter: 0.0,
            max_push_ms: -8.0,
            max_drag_ms: 8.0,
            max_phase_error_ms: 0.0,
        }
    }
}

/// Evaluates the displacement equation, returning total displacement in ms.
///
/// The elastic field (curvature plus coupling) is amplified by harmonic
/// gravity only when it drags; pushes are left alone. The tempo scalar is
/// applied once, then the optional phrase clamp, then the feel-bias clamp,
/// then the global groove amount.
pub fn displace(ctx: &CoefficientContext) -> f64 {
    let beta = if ctx.bpm > 0.0 { 90.0 / ctx.bpm } else { 0.0 };

    let elastic_raw = ctx.curvature + ctx.phase_coupling;
    let elastic = if elastic_raw > 0.0 {
        ctx.harmonic_gravity * elastic_raw
    } else {
        elastic_raw
    };

    let raw = beta * (ctx.linear_offset + elastic + ctx.macro_drift + ctx.jitter);

    let phrase_clamped = if ctx.max_phase_error_ms > 0.0 {
        raw.max(-ctx.max_phase_error_ms * beta)
            .min(ctx.max_phase_error_ms * beta)
    } else {
        raw
    };

    let bounded = phrase_clamped
        .max(ctx.max_push_ms * beta)
        .min(ctx.max_drag_ms * beta);

    bounded * ctx.groove_amount
}
