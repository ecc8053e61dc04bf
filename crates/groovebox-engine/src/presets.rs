//! Factory groove profiles for the twelve genre feels.
//!
//! A preset is nothing but data: the kernel never learns which genre it is
//! playing. Each profile picks its feel bias, drag curve, per-channel
//! pockets, and hardware character, and the one displacement equation does
//! the rest.

use std::collections::BTreeMap;

use groovebox_profile::{
    ChannelFeel, CouplingDirection, DriftMode, DriftWaveform, FeelBias, GrooveProfile,
};

/// The twelve factory genres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    BoomBap,
    Trap,
    House,
    Techno,
    DrumAndBass,
    Dub,
    Funk,
    Swing,
    NeoSoul,
    Afrobeat,
    LoFi,
    Rock,
}

impl Genre {
    /// Returns the genre as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::BoomBap => "boom_bap",
            Genre::Trap => "trap",
            Genre::House => "house",
            Genre::Techno => "techno",
            Genre::DrumAndBass => "drum_and_bass",
            Genre::Dub => "dub",
            Genre::Funk => "funk",
            Genre::Swing => "swing",
            Genre::NeoSoul => "neo_soul",
            Genre::Afrobeat => "afrobeat",
            Genre::LoFi => "lo_fi",
            Genre::Rock => "rock",
        }
    }

    /// Returns all genres.
    pub fn all() -> &'static [Genre] {
        &[
            Genre::BoomBap,
            Genre::Trap,
            Genre::House,
            Genre::Techno,
            Genre::DrumAndBass,
            Genre::Dub,
            Genre::Funk,
            Genre::Swing,
            Genre::NeoSoul,
            Genre::Afrobeat,
            Genre::LoFi,
            Genre::Rock,
        ]
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Genre {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::all()
            .iter()
            .copied()
            .find(|genre| genre.as_str() == s)
            .ok_or_else(|| format!("unknown genre: {}", s))
    }
}

fn feel(
    timing_offset_ms: f64,
    velocity_variance: f64,
    jitter_ms: f64,
    ghost_note_probability: f64,
    ghost_note_attenuation_db: f64,
) -> ChannelFeel {
    ChannelFeel {
        timing_offset_ms,
        velocity_variance,
        jitter_ms,
        ghost_note_probability,
        ghost_note_attenuation_db,
    }
}

fn channels(entries: &[(&str, ChannelFeel)]) -> BTreeMap<String, ChannelFeel> {
    entries
        .iter()
        .map(|(name, feel)| (name.to_string(), *feel))
        .collect()
}

fn scaling(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(name, scale)| (name.to_string(), *scale))
        .collect()
}

/// Builds the factory profile for a genre.
pub fn preset(genre: Genre) -> GrooveProfile {
    let mut profile = GrooveProfile::default();
    match genre {
        Genre::BoomBap => {
            profile.bpm = 92.0;
            profile.feel_bias = FeelBias::LaidBack;
            profile.randomization_seed = 0x6b00;
            profile.channel_offsets = channels(&[
                ("kick", feel(0.0, 0.04, 1.0, 0.0, 0.0)),
                ("snare", feel(8.0, 0.06, 1.5, 0.0, 0.0)),
                ("hihat", feel(3.0, 0.08, 2.0, 0.12, -14.0)),
                ("bass", feel(5.0, 0.03, 0.0, 0.0, 0.0)),
            ]);
            profile.drag_curve.enabled = true;
            profile.drag_curve.drift_mode = DriftMode::Power;
            profile.drag_curve.max_drag_ms = 14.0;
            profile.drag_curve.drag_exponent = 1.25;
            profile.drag_curve.per_channel_scaling =
                scaling(&[("snare", 1.0), ("hihat", 0.7), ("kick", 0.4)]);
        }
        Genre::Trap => {
            profile.bpm = 140.0;
            profile.feel_bias = FeelBias::OnTop;
            profile.randomization_seed = 0x7a40;
            profile.channel_offsets = channels(&[
                ("kick", feel(0.0, 0.02, 0.0, 0.0, 0.0)),
                ("snare", feel(1.0, 0.03, 0.5, 0.0, 0.0)),
                ("hihat", feel(0.0, 0.12, 1.2, 0.2, -10.0)),
            ]);
            profile.temporal_coupling.enabled = true;
            profile.temporal_coupling.velocity_phase_ratio = 0.3;
            profile.temporal_coupling.direction = CouplingDirection::Inverted;
        }
        Genre::House => {
            profile.bpm = 124.0;
            profile.feel_bias = FeelBias::OnTop;
            profile.randomization_seed = 0x405e;
            profile.channel_offsets = channels(&[
                ("kick", feel(0.0, 0.0, 0.0, 0.0, 0.0)),
                ("hihat", feel(2.0, 0.05, 0.8, 0.0, 0.0)),
                ("bass", feel(-1.0, 0.03, 0.0, 0.0, 0.0)),
            ]);
            profile.hardware_emulation.ppqn = 96;
        }
        Genre::Techno => {
            profile.bpm = 132.0;
            profile.feel_bias = FeelBias::Ahead;
            profile.randomization_seed = 0x7ec0;
            profile.channel_offsets = channels(&[
                ("kick", feel(0.0, 0.0, 0.0, 0.0, 0.0)),
                ("hihat", feel(-2.0, 0.02, 0.0, 0.0, 0.0)),
            ]);
            profile.hardware_emulation.ppqn = 96;
            profile.macro_drift.enabled = true;
            profile.macro_drift.amplitude_ms = 2.0;
            profile.macro_drift.period_bars = 16.0;
            profile.macro_drift.waveform = DriftWaveform::Sine;
        }
        Genre::DrumAndBass => {
            profile.bpm = 174.0;
            profile.feel_bias = FeelBias::Ahead;
            profile.randomization_seed = 0xdab5;
            profile.channel_offsets = channels(&[
                ("kick", feel(-2.0, 0.03, 0.5, 0.0, 0.0)),
                ("snare", feel(-3.0, 0.04, 0.5, 0.0, 0.0)),
                ("bass", feel(0.0, 0.02, 0.0, 0.0, 0.0)),
            ]);
            profile.temporal_coupling.enabled = true;
            profile.temporal_coupling.velocity_phase_ratio = 0.4;
            profile.temporal_coupling.direction = CouplingDirection::Inverted;
        }
        Genre::Dub => {
            profile.bpm = 75.0;
            profile.feel_bias = FeelBias::DeepPocket;
            profile.randomization_seed = 0xd0b0;
            profile.channel_offsets = channels(&[
                ("kick", feel(4.0, 0.04, 1.0, 0.0, 0.0)),
                ("snare", feel(12.0, 0.05, 2.0, 0.0, 0.0)),
                ("hihat", feel(6.0, 0.06, 2.5, 0.1, -16.0)),
                ("bass", feel(10.0, 0.03, 0.0, 0.0, 0.0)),
            ]);
            profile.drag_curve.enabled = true;
            profile.drag_curve.drift_mode = DriftMode::Log;
            profile.drag_curve.max_drag_ms = 20.0;
            profile.drag_curve.log_k = 4.0;
            profile.macro_drift.enabled = true;
            profile.macro_drift.amplitude_ms = 6.0;
            profile.macro_drift.period_bars = 8.0;
            profile.macro_drift.waveform = DriftWaveform::Sine;
        }
        Genre::Funk => {
            profile.bpm = 105.0;
            profile.feel_bias = FeelBias::OnTop;
            profile.randomization_seed = 0xf01c;
            profile.channel_offsets = channels(&[
                ("kick", feel(-1.0, 0.05, 0.5, 0.0, 0.0)),
                ("snare", feel(0.0, 0.08, 1.0, 0.35, -12.0)),
                ("hihat", feel(1.0, 0.1, 1.0, 0.15, -10.0)),
                ("bass", feel(-2.0, 0.04, 0.0, 0.0, 0.0)),
            ]);
            profile.temporal_coupling.enabled = true;
            profile.temporal_coupling.velocity_phase_ratio = 0.6;
            profile.temporal_coupling.direction = CouplingDirection::Natural;
        }
        Genre::Swing => {
            profile.bpm = 120.0;
            profile.feel_bias = FeelBias::LaidBack;
            profile.randomization_seed = 0x5717;
            profile.channel_offsets = channels(&[
                ("kick", feel(2.0, 0.06, 1.5, 0.0, 0.0)),
                ("snare", feel(6.0, 0.09, 2.0, 0.25, -15.0)),
                ("hihat", feel(4.0, 0.08, 2.0, 0.0, 0.0)),
                ("keys", feel(3.0, 0.07, 2.5, 0.0, 0.0)),
            ]);
            profile.drag_curve.enabled = true;
            profile.drag_curve.drift_mode = DriftMode::Log;
            profile.drag_curve.max_drag_ms = 12.0;
            profile.drag_curve.log_k = 3.0;
            profile.harmonic_gravity.enabled = true;
            profile.harmonic_gravity.gravity_by_mode = [
                ("dorian".to_string(), 1.3),
                ("mixolydian".to_string(), 1.2),
                ("minor".to_string(), 1.15),
            ]
            .into_iter()
            .collect();
        }
        Genre::NeoSoul => {
            profile.bpm = 72.0;
            profile.feel_bias = FeelBias::DeepPocket;
            profile.randomization_seed = 0x5001;
            profile.channel_offsets = channels(&[
                ("kick", feel(3.0, 0.05, 1.0, 0.0, 0.0)),
                ("snare", feel(14.0, 0.07, 2.0, 0.3, -13.0)),
                ("hihat", feel(7.0, 0.09, 3.0, 0.2, -11.0)),
                ("bass", feel(9.0, 0.04, 0.5, 0.0, 0.0)),
                ("keys", feel(11.0, 0.06, 2.0, 0.0, 0.0)),
            ]);
            profile.drag_curve.enabled = true;
            profile.drag_curve.drift_mode = DriftMode::Power;
            profile.drag_curve.max_drag_ms = 22.0;
            profile.drag_curve.drag_exponent = 1.6;
            profile.drag_curve.per_channel_scaling =
                scaling(&[("snare", 1.0), ("hihat", 0.8), ("keys", 0.9), ("kick", 0.3)]);
            profile.temporal_state.enabled = true;
            profile.temporal_state.tension_increment = 0.2;
            profile.temporal_state.elasticity_amplification = 0.5;
            profile.temporal_state.reset_period_bars = 4;
            profile.harmonic_gravity.enabled = true;
            profile.harmonic_gravity.gravity_by_mode =
                [("minor".to_string(), 1.25), ("dorian".to_string(), 1.2)]
                    .into_iter()
                    .collect();
        }
        Genre::Afrobeat => {
            profile.bpm = 110.0;
            profile.feel_bias = FeelBias::OnTop;
            profile.randomization_seed = 0xafb7;
            profile.channel_offsets = channels(&[
                ("kick", feel(0.0, 0.05, 1.0, 0.0, 0.0)),
                ("snare", feel(-1.0, 0.07, 1.5, 0.2, -12.0)),
                ("hihat", feel(1.0, 0.08, 1.5, 0.0, 0.0)),
                ("bass", feel(-2.0, 0.04, 0.5, 0.0, 0.0)),
                ("keys", feel(2.0, 0.06, 1.0, 0.0, 0.0)),
            ]);
            profile.temporal_coupling.enabled = true;
            profile.temporal_coupling.velocity_phase_ratio = 0.5;
            profile.temporal_coupling.direction = CouplingDirection::Natural;
            profile.macro_drift.enabled = true;
            profile.macro_drift.amplitude_ms = 3.0;
            profile.macro_drift.period_bars = 4.0;
            profile.macro_drift.waveform = DriftWaveform::Triangle;
        }
        Genre::LoFi => {
            profile.bpm = 82.0;
            profile.feel_bias = FeelBias::LaidBack;
            profile.randomization_seed = 0x10f1;
            profile.channel_offsets = channels(&[
                ("kick", feel(2.0, 0.06, 2.0, 0.0, 0.0)),
                ("snare", feel(9.0, 0.08, 3.0, 0.15, -14.0)),
                ("hihat", feel(5.0, 0.1, 3.5, 0.1, -12.0)),
                ("keys", feel(6.0, 0.07, 2.5, 0.0, 0.0)),
            ]);
            profile.drag_curve.enabled = true;
            profile.drag_curve.drift_mode = DriftMode::Power;
            profile.drag_curve.max_drag_ms = 16.0;
            profile.drag_curve.drag_exponent = 1.1;
            profile.hardware_emulation.ppqn = 24;
            profile.hardware_emulation.sample_rate = 26040.0;
            profile.hardware_emulation.bit_depth = 12;
            profile.hardware_emulation.dac_saturation.enabled = true;
            profile.hardware_emulation.dac_saturation.gain = 1.4;
        }
        Genre::Rock => {
            profile.bpm = 120.0;
            profile.feel_bias = FeelBias::OnTop;
            profile.randomization_seed = 0x40c6;
            profile.channel_offsets = channels(&[
                ("kick", feel(-1.0, 0.05, 1.0, 0.0, 0.0)),
                ("snare", feel(2.0, 0.07, 1.5, 0.0, 0.0)),
                ("hihat", feel(0.0, 0.08, 1.5, 0.0, 0.0)),
                ("bass", feel(-1.0, 0.04, 0.5, 0.0, 0.0)),
            ]);
            profile.temporal_state.enabled = true;
            profile.temporal_state.tension_increment = 0.15;
            profile.temporal_state.elasticity_amplification = 0.3;
            profile.temporal_state.reset_period_bars = 8;
            profile.drag_curve.enabled = true;
            profile.drag_curve.drift_mode = DriftMode::Linear;
            profile.drag_curve.max_drag_ms = 4.0;
        }
    }
    profile
}

#[cfg(test)]
mod tests {
    use super::*;
    use groovebox_profile::validate_profile;

    #[test]
    fn there_are_twelve_genres() {
        assert_eq!(Genre::all().len(), 12);
    }

    #[test]
    fn genre_round_trips_as_string() {
        for genre in Genre::all() {
            let parsed: Genre = genre.as_str().parse().unwrap();
            assert_eq!(parsed, *genre);
        }
        assert!("vaporwave".parse::<Genre>().is_err());
    }

    #[test]
    fn every_preset_validates_clean() {
        for genre in Genre::all() {
            let profile = preset(*genre);
            let result = validate_profile(&profile);
            assert!(result.is_ok(), "{} has errors: {:?}", genre, result.errors);
            assert!(
                result.warnings.is_empty(),
                "{} has warnings: {:?}",
                genre,
                result.warnings
            );
        }
    }

    #[test]
    fn presets_have_distinct_seeds() {
        let mut seeds: Vec<u32> = Genre::all()
            .iter()
            .map(|genre| preset(*genre).randomization_seed)
            .collect();
        seeds.sort_unstable();
        seeds.dedup();
        assert_eq!(seeds.len(), 12);
    }

    #[test]
    fn presets_differ_in_feel_not_in_code_path() {
        use crate::apply_groove;

        // The same event through two presets produces different times purely
        // from coefficients.
        let dub = preset(Genre::Dub);
        let techno = preset(Genre::Techno);

        let dub_event = apply_groove(1.0, 12, "snare", Some(&dub), 0, None, "minor", Some(0.8));
        let techno_event =
            apply_groove(1.0, 12, "snare", Some(&techno), 0, None, "minor", Some(0.8));

        assert!(dub_event.time_seconds > 1.0, "dub drags behind the grid");
        assert!(
            techno_event.time_seconds <= 1.0,
            "techno never falls behind"
        );
    }

    #[test]
    fn ghost_attenuations_are_negative_where_used() {
        for genre in Genre::all() {
            let profile = preset(*genre);
            for (name, feel) in &profile.channel_offsets {
                if feel.ghost_note_probability > 0.0 {
                    assert!(
                        feel.ghost_note_attenuation_db < 0.0,
                        "{}/{} ghost attenuation must be negative",
                        genre,
                        name
                    );
                }
            }
        }
    }
}
