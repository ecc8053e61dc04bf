//! Context assembly and the per-event scheduler hook.
//!
//! [`apply_groove`] is the single entry point the outer sequencer calls for
//! every scheduled hit. It assembles the coefficient context from the
//! profile and musical state, runs it through the emotional bias and the
//! kernel, then applies the side-effectful post-processing (velocity
//! humanization, ghost notes, PPQN rounding).
//!
//! Feature activation is purely coefficient-gated: each field turns on from
//! its own enable flag or non-zero magnitude, never from a genre tag. The
//! per-event order is fixed (assemble, bias, kernel, velocity humanize,
//! ghost note, add to grid time, PPQN round, clamp to zero) and so is the
//! RNG consumption order (jitter Gaussian, velocity Gaussian, ghost
//! uniform); reordering either breaks bit-identity with stored profiles.

use groovebox_dsp::round_to_ppqn;
use groovebox_profile::{DriftMode, GrooveProfile};

use crate::channel::canonical_channel;
use crate::emotion::apply_emotional_bias;
use crate::field;
use crate::kernel::{displace, CoefficientContext};
use crate::rng::Mulberry32;

/// Velocity floor after humanization.
const HUMANIZE_VELOCITY_FLOOR: f64 = 0.05;

/// A scheduled, humanized event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledEvent {
    pub time_seconds: f64,
    /// Final velocity in [0,1].
    pub velocity: f64,
    /// Ghost notes stay true: they sound, quietly. The field exists so a
    /// future profile format can skip hits without an API change.
    pub should_play: bool,
}

impl ScheduledEvent {
    fn passthrough(time_seconds: f64, velocity: f64) -> Self {
        Self {
            time_seconds,
            velocity,
            should_play: true,
        }
    }
}

/// Computes the humanized time and velocity for one grid event.
///
/// With no profile, a zero groove amount, or no RNG, the affected features
/// degrade to identity; the call never fails.
#[allow(clippy::too_many_arguments)]
pub fn apply_groove(
    grid_time_seconds: f64,
    step_index: u32,
    channel_id: &str,
    profile: Option<&GrooveProfile>,
    bar_index: u32,
    mut rng: Option<&mut Mulberry32>,
    scale_mode: &str,
    base_velocity: Option<f64>,
) -> ScheduledEvent {
    let velocity = base_velocity.unwrap_or(1.0);
    let Some(profile) = profile else {
        return ScheduledEvent::passthrough(grid_time_seconds, velocity);
    };
    let groove_amount = profile.groove_amount.clamp(0.0, 1.0);
    if groove_amount == 0.0 {
        return ScheduledEvent::passthrough(grid_time_seconds, velocity);
    }

    let channel = canonical_channel(channel_id);
    let feel = profile.channel_feel(channel);

    let curvature = if profile.drag_curve.enabled {
        let curve = &profile.drag_curve;
        let scale = curve.channel_scale(channel);
        let tension = if profile.temporal_state.enabled {
            let state = &profile.temporal_state;
            field::tension_multiplier(
                state.tension_increment,
                state.elasticity_amplification,
                state.reset_period_bars as f64,
                bar_index as f64,
            )
        } else {
            1.0
        };
        let steps = profile.steps_per_bar as f64;
        match curve.drift_mode {
            DriftMode::Power => field::drag_power(
                step_index as f64,
                steps,
                curve.max_drag_ms,
                curve.drag_exponent * tension,
                scale,
                1.0,
            ),
            DriftMode::Linear => field::drag_power(
                step_index as f64,
                steps,
                curve.max_drag_ms,
                tension,
                scale,
                1.0,
            ),
            DriftMode::Log => field::drag_log(
                step_index as f64,
                steps,
                curve.max_drag_ms,
                curve.log_k,
                scale,
                1.0,
            ),
        }
    } else {
        0.0
    };

    let phase_coupling = match (profile.temporal_coupling.enabled, base_velocity) {
        (true, Some(v)) => field::velocity_phase(
            v,
            profile.temporal_coupling.velocity_phase_ratio,
            profile.temporal_coupling.direction,
            1.0,
        ),
        _ => 0.0,
    };

    let jitter = if feel.jitter_ms > 0.0 {
        match rng.as_deref_mut() {
            Some(rng) => feel.jitter_ms * rng.gaussian(),
            None => 0.0,
        }
    } else {
        0.0
    };

    let drift = &profile.macro_drift;
    let (max_push_ms, max_drag_ms) = profile.feel_bias.limits();
    let ctx = CoefficientContext {
        bpm: profile.bpm,
        groove_amount,
        linear_offset: feel.timing_offset_ms,
        curvature,
        phase_coupling,
        harmonic_gravity: profile.harmonic_gravity.gravity_for(scale_mode),
        macro_drift: field::macro_drift(
            drift.enabled,
            drift.amplitude_ms,
            drift.period_bars,
            drift.waveform,
            bar_index as f64,
            1.0,
        ),
        jitter,
        max_push_ms,
        max_drag_ms,
        max_phase_error_ms: profile.phrase_constraints.max_accumulated_phase_error_ms,
    };

    let ctx = apply_emotional_bias(ctx, Some(&profile.emotion_vector));
    let displacement_ms = displace(&ctx);

    let mut velocity = velocity;
    if feel.velocity_variance > 0.0 {
        if let Some(rng) = rng.as_deref_mut() {
            velocity = (velocity + feel.velocity_variance * rng.gaussian())
                .clamp(HUMANIZE_VELOCITY_FLOOR, 1.0);
        }
    }

    let ghost_probability = feel.ghost_note_probability.clamp(0.0, 1.0);
    if ghost_probability > 0.0 {
        if let Some(rng) = rng.as_deref_mut() {
            if rng.next_f64() < ghost_probability {
                velocity = base_velocity.unwrap_or(1.0)
                    * 10f64.powf(feel.ghost_note_attenuation_db / 20.0);
            }
        }
    }

    let mut time_seconds = grid_time_seconds + displacement_ms / 1000.0;
    if profile.hardware_emulation.ppqn > 0 {
        time_seconds = round_to_ppqn(time_seconds, profile.bpm, profile.hardware_emulation.ppqn);
    }
    time_seconds = time_seconds.max(0.0);

    ScheduledEvent {
        time_seconds,
        velocity: velocity.clamp(0.0, 1.0),
        should_play: true,
    }
}

/// The stateful scheduler: owns the profile, the event-path RNG, and the
/// bar cursor.
///
/// The RNG is reset to the profile's seed at every transport start (and at
/// the start of every offline render), which is what makes two renders of
/// the same profile bit-identical.
#[derive(Debug, Clone)]
pub struct GrooveEngine {
    profile: GrooveProfile,
    rng: Mulberry32,
    bar_index: u32,
    last_step: Option<u32>,
}

impl GrooveEngine {
    pub fn new(profile: GrooveProfile) -> Self {
        let seed = profile.randomization_seed;
        Self {
            profile,
            rng: Mulberry32::new(seed),
            bar_index: 0,
            last_step: None,
        }
    }

    pub fn profile(&self) -> &GrooveProfile {
        &self.profile
    }

    /// Rewinds to the top: RNG back to the seed, bar cursor to zero.
    pub fn transport_start(&mut self) {
        self.rng.reset(self.profile.randomization_seed);
        self.bar_index = 0;
        self.last_step = None;
    }

    /// Current bar index, advanced when the step index wraps to 0.
    pub fn bar_index(&self) -> u32 {
        self.bar_index
    }

    /// Schedules one event, advancing the bar cursor on step wrap.
    ///
    /// Multiple channels on the same step are fine: the bar advances once
    /// per wrap, not once per event.
    pub fn schedule(
        &mut self,
        grid_time_seconds: f64,
        step_index: u32,
        channel_id: &str,
        scale_mode: &str,
        base_velocity: Option<f64>,
    ) -> ScheduledEvent {
        if step_index == 0 && self.last_step.is_some_and(|last| last != 0) {
            self.bar_index += 1;
        }
        self.last_step = Some(step_index);

        apply_groove(
            grid_time_seconds,
            step_index,
            channel_id,
            Some(&self.profile),
            self.bar_index,
            Some(&mut self.rng),
            scale_mode,
            base_velocity,
        )
    }
}
