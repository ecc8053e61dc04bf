//! Emotional field bias.
//!
//! A five-dimensional coefficient-bias layer injected exactly once, between
//! context assembly and kernel evaluation. Each basis dimension contributes
//! a fixed set of deltas, weighted by the clamped component value; the
//! biased context is a pure function of the input context and the vector.
//! There is no per-emotion code path, only the frozen table below.

use groovebox_profile::EmotionVector;

use crate::kernel::CoefficientContext;

/// Per-dimension coefficient deltas.
///
/// `linear_ms` and `gravity` are additive; the `*_scale` fields are
/// multiplicative deltas applied as `1 + sum`; `amount` is additive to the
/// groove amount.
#[derive(Debug, Clone, Copy)]
pub struct EmotionDeltas {
    pub linear_ms: f64,
    pub curvature_scale: f64,
    pub coupling_scale: f64,
    pub gravity: f64,
    pub drift_scale: f64,
    pub jitter_scale: f64,
    pub amount: f64,
}

/// The frozen bias table, indexed in basis order: loneliness, tension,
/// admiration, defiance, calm.
///
/// Column sums keep every multiplicative factor inside (0, 3]: positive
/// sums stay at or below 2 and negative sums at or above -1 per column.
pub const BIAS_TABLE: [EmotionDeltas; EmotionVector::DIMENSIONS] = [
    // loneliness: everything slows and loosens
    EmotionDeltas {
        linear_ms: 3.0,
        curvature_scale: 0.35,
        coupling_scale: 0.10,
        gravity: 0.05,
        drift_scale: 0.25,
        jitter_scale: 0.15,
        amount: 0.05,
    },
    // tension: pushes forward, couples harder, shakes more
    EmotionDeltas {
        linear_ms: -1.5,
        curvature_scale: -0.20,
        coupling_scale: 0.30,
        gravity: 0.10,
        drift_scale: -0.15,
        jitter_scale: 0.40,
        amount: 0.10,
    },
    // admiration: leans into the harmony
    EmotionDeltas {
        linear_ms: 0.5,
        curvature_scale: 0.10,
        coupling_scale: 0.25,
        gravity: 0.20,
        drift_scale: 0.10,
        jitter_scale: -0.10,
        amount: 0.0,
    },
    // defiance: early, flat, aggressive
    EmotionDeltas {
        linear_ms: -2.5,
        curvature_scale: -0.25,
        coupling_scale: -0.20,
        gravity: 0.0,
        drift_scale: 0.20,
        jitter_scale: 0.25,
        amount: 0.08,
    },
    // calm: settles everything down
    EmotionDeltas {
        linear_ms: 1.0,
        curvature_scale: 0.15,
        coupling_scale: -0.25,
        gravity: 0.05,
        drift_scale: -0.20,
        jitter_scale: -0.50,
        amount: -0.12,
    },
];

/// Applies the emotional bias to a context.
///
/// `None` returns the context unchanged; an all-zero vector produces a
/// context numerically equal to the input. Output bounds: gravity stays at
/// or above 1, jitter at or above 0, groove amount inside [0,1].
pub fn apply_emotional_bias(
    ctx: CoefficientContext,
    vector: Option<&EmotionVector>,
) -> CoefficientContext {
    let Some(vector) = vector else {
        return ctx;
    };
    let weights = vector.components();

    let mut linear = 0.0;
    let mut curvature = 0.0;
    let mut coupling = 0.0;
    let mut gravity = 0.0;
    let mut drift = 0.0;
    let mut jitter = 0.0;
    let mut amount = 0.0;
    for (weight, deltas) in weights.iter().zip(BIAS_TABLE.iter()) {
        linear += weight * deltas.linear_ms;
        curvature += weight * deltas.curvature_scale;
        coupling += weight * deltas.coupling_scale;
        gravity += weight * deltas.gravity;
        drift += weight * deltas.drift_scale;
        jitter += weight * deltas.jitter_scale;
        amount += weight * deltas.amount;
    }

    CoefficientContext {
        linear_offset: ctx.linear_offset + linear,
        curvature: ctx.curvature * (1.0 + curvature),
        phase_coupling: ctx.phase_coupling * (1.0 + coupling),
        harmonic_gravity: (ctx.harmonic_gravity + gravity).max(1.0),
        macro_drift: ctx.macro_drift * (1.0 + drift),
        jitter: ctx.jitter * (1.0 + jitter).max(0.0),
        groove_amount: (ctx.groove_amount + amount).clamp(0.0, 1.0),
        ..ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::displace;
    use pretty_assertions::assert_eq;

    fn busy_context() -> CoefficientContext {
        CoefficientContext {
            linear_offset: 2.0,
            curvature: 4.0,
            phase_coupling: -0.5,
            harmonic_gravity: 1.2,
            macro_drift: 1.5,
            jitter: 0.8,
            ..CoefficientContext::neutral(90.0)
        }
    }

    #[test]
    fn absent_vector_is_identity() {
        let ctx = busy_context();
        assert_eq!(apply_emotional_bias(ctx, None), ctx);
    }

    #[test]
    fn zero_vector_is_numerically_identical() {
        let ctx = busy_context();
        let biased = apply_emotional_bias(ctx, Some(&EmotionVector::default()));
        assert_eq!(biased, ctx);
        assert_eq!(displace(&biased), displace(&ctx));
    }

    #[test]
    fn bias_is_deterministic() {
        let vector = EmotionVector {
            loneliness: 0.6,
            tension: 0.3,
            admiration: 0.1,
            defiance: 0.9,
            calm: 0.2,
        };
        let a = apply_emotional_bias(busy_context(), Some(&vector));
        let b = apply_emotional_bias(busy_context(), Some(&vector));
        assert_eq!(a, b);
    }

    #[test]
    fn loneliness_adds_three_ms_of_linear_offset() {
        let vector = EmotionVector {
            loneliness: 1.0,
            ..EmotionVector::default()
        };
        let biased = apply_emotional_bias(busy_context(), Some(&vector));
        assert_eq!(biased.linear_offset, busy_context().linear_offset + 3.0);
    }

    #[test]
    fn gravity_never_drops_below_unity() {
        // calm at full with a unity-gravity context: +0.05, still >= 1.
        // A saturated negative sum cannot exist in the frozen table, but the
        // floor is asserted over the whole basis anyway.
        for i in 0..EmotionVector::DIMENSIONS {
            let mut vector = EmotionVector::default();
            match i {
                0 => vector.loneliness = 1.0,
                1 => vector.tension = 1.0,
                2 => vector.admiration = 1.0,
                3 => vector.defiance = 1.0,
                _ => vector.calm = 1.0,
            }
            let biased = apply_emotional_bias(busy_context(), Some(&vector));
            assert!(biased.harmonic_gravity >= 1.0);
        }
    }

    #[test]
    fn jitter_never_goes_negative() {
        let vector = EmotionVector {
            calm: 1.0,
            ..EmotionVector::default()
        };
        let mut ctx = busy_context();
        ctx.jitter = 0.1;
        let biased = apply_emotional_bias(ctx, Some(&vector));
        assert!(biased.jitter >= 0.0);
    }

    #[test]
    fn groove_amount_stays_in_unit_interval() {
        let all_up = EmotionVector {
            loneliness: 1.0,
            tension: 1.0,
            admiration: 1.0,
            defiance: 1.0,
            calm: 0.0,
        };
        let biased = apply_emotional_bias(busy_context(), Some(&all_up));
        assert!(biased.groove_amount <= 1.0);

        let calm_only = EmotionVector {
            calm: 1.0,
            ..EmotionVector::default()
        };
        let mut quiet = busy_context();
        quiet.groove_amount = 0.05;
        let biased = apply_emotional_bias(quiet, Some(&calm_only));
        assert!(biased.groove_amount >= 0.0);
    }

    #[test]
    fn multiplicative_factors_stay_in_band() {
        // Worst-case positive and negative column sums over the table.
        let columns: [fn(&EmotionDeltas) -> f64; 4] = [
            |d| d.curvature_scale,
            |d| d.coupling_scale,
            |d| d.drift_scale,
            |d| d.jitter_scale,
        ];
        for column in columns {
            let positive: f64 = BIAS_TABLE.iter().map(column).filter(|v| *v > 0.0).sum();
            let negative: f64 = BIAS_TABLE.iter().map(column).filter(|v| *v < 0.0).sum();
            assert!(1.0 + positive <= 3.0);
            assert!(1.0 + negative >= 0.0);
        }
    }

    #[test]
    fn components_above_one_are_clamped_before_weighting() {
        let hot = EmotionVector {
            loneliness: 5.0,
            ..EmotionVector::default()
        };
        let unit = EmotionVector {
            loneliness: 1.0,
            ..EmotionVector::default()
        };
        assert_eq!(
            apply_emotional_bias(busy_context(), Some(&hot)),
            apply_emotional_bias(busy_context(), Some(&unit))
        );
    }
}
