//! Vintage sampler signal chain.
//!
//! Replicates the sound of a low-rate sampler's output stage in the order
//! the hardware imposes: analog saturation before the converter, anti-alias
//! filtering and sample-and-hold at the converter rate, then bit-depth
//! quantization, with optional media crackle and a dry/wet mix. The stage
//! order is a binding contract.
//!
//! The processor runs inside the host's real-time audio callback: it owns
//! per-channel state, never allocates in [`SignalChain::process_block`], and
//! processes one block per call.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f64::consts::PI;

/// Fixed seed for the crackle noise source, so two processors built from
/// the same parameters produce bit-identical output.
const CRACKLE_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Per-sample probability scale for crackle events at full amount.
const CRACKLE_RATE: f64 = 0.002;

/// Crackle amplitude scale at full amount.
const CRACKLE_LEVEL: f64 = 0.15;

/// Flat k-rate parameter block.
///
/// Enable flags are 0/1 floats so the whole block can travel as one numeric
/// array between the UI thread and the audio callback. Parameter changes
/// are abrupt; the processor does not smooth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainParams {
    pub enabled: f64,
    pub saturation_enabled: f64,
    /// Pre-saturation gain into the tanh stage.
    pub saturation_gain: f64,
    /// Emulated converter rate in Hz.
    pub target_sample_rate: f64,
    /// Emulated converter bit depth.
    pub bit_depth: f64,
    pub downsample_enabled: f64,
    /// Media crackle amount in [0,1]; 0 disables.
    pub crackle_amount: f64,
    /// Dry/wet mix in [0,1]; 1 is fully processed.
    pub dry_wet: f64,
}

impl Default for ChainParams {
    fn default() -> Self {
        Self {
            enabled: 0.0,
            saturation_enabled: 0.0,
            saturation_gain: 1.0,
            target_sample_rate: 44100.0,
            bit_depth: 16.0,
            downsample_enabled: 0.0,
            crackle_amount: 0.0,
            dry_wet: 1.0,
        }
    }
}

fn flag(value: f64) -> bool {
    value >= 0.5
}

/// Persistent per-channel converter state.
#[derive(Debug, Clone, Copy, Default)]
struct ChannelState {
    /// One-pole anti-alias filter memory.
    lpf: f64,
    /// Current sample-and-hold output.
    hold: f64,
    /// Samples since the hold last captured.
    hold_count: u32,
}

/// The signal-chain block processor.
pub struct SignalChain {
    params: ChainParams,
    host_sample_rate: f64,
    channels: Vec<ChannelState>,
    crackle_rng: Pcg32,
}

impl SignalChain {
    /// Creates a processor for `num_channels` channels at the host rate.
    pub fn new(params: ChainParams, host_sample_rate: f64, num_channels: usize) -> Self {
        Self {
            params,
            host_sample_rate,
            channels: vec![ChannelState::default(); num_channels],
            crackle_rng: Pcg32::seed_from_u64(CRACKLE_SEED),
        }
    }

    /// Replaces the parameter block. Takes effect on the next block; channel
    /// state (filter memory, hold) is left untouched, including across
    /// enable transitions.
    pub fn set_params(&mut self, params: ChainParams) {
        self.params = params;
    }

    pub fn params(&self) -> &ChainParams {
        &self.params
    }

    /// Processes one block of samples in place for the given channel.
    ///
    /// With `enabled` off, or for an out-of-range channel index, the block
    /// passes through unchanged sample-for-sample.
    pub fn process_block(&mut self, channel: usize, block: &mut [f64]) {
        let params = self.params;
        if !flag(params.enabled) {
            return;
        }
        if channel >= self.channels.len() {
            return;
        }
        let state = &mut self.channels[channel];
        let rng = &mut self.crackle_rng;

        let saturate = flag(params.saturation_enabled);
        let gain = params.saturation_gain;

        let ratio = (self.host_sample_rate / params.target_sample_rate).floor().max(1.0) as u32;
        let downsample = flag(params.downsample_enabled);
        let hold_active = downsample && ratio > 1;
        let alpha = (PI * params.target_sample_rate / self.host_sample_rate).min(1.0);

        let bits = (params.bit_depth as i32).clamp(1, 32);
        let levels = (1u64 << (bits - 1)) as f64;

        let crackle = params.crackle_amount.clamp(0.0, 1.0);
        let wet = params.dry_wet.clamp(0.0, 1.0);
        let dry_mix = 1.0 - wet;

        for sample in block.iter_mut() {
            let dry = *sample;
            let mut x = dry;

            // 1. Analog-domain saturation ahead of the converter.
            if saturate {
                x = (gain * x).tanh();
            }

            // 2. Anti-alias filter and sample-and-hold at the target rate.
            if hold_active {
                state.lpf += alpha * (x - state.lpf);
                x = state.lpf;

                state.hold_count += 1;
                if state.hold_count >= ratio {
                    state.hold_count = 0;
                    state.hold = x;
                }
                x = state.hold;
            }

            // 3. Bit-depth quantization.
            if downsample {
                x = (x * levels).round() / levels;
            }

            // 4. Media crackle.
            if crackle > 0.0 {
                let gate: f64 = rng.gen();
                if gate < crackle * CRACKLE_RATE {
                    let amplitude: f64 = rng.gen();
                    x += (amplitude - 0.5) * crackle * CRACKLE_LEVEL;
                }
            }

            // 5. Dry/wet mix against the captured dry value.
            *sample = dry * dry_mix + x * wet;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize) -> Vec<f64> {
        (0..len).map(|i| (i as f64 / len as f64) * 2.0 - 1.0).collect()
    }

    fn active_params() -> ChainParams {
        ChainParams {
            enabled: 1.0,
            saturation_enabled: 1.0,
            saturation_gain: 3.0,
            target_sample_rate: 11025.0,
            bit_depth: 8.0,
            downsample_enabled: 1.0,
            crackle_amount: 0.5,
            dry_wet: 1.0,
        }
    }

    #[test]
    fn disabled_chain_passes_through() {
        let mut chain = SignalChain::new(ChainParams::default(), 44100.0, 2);
        let original = ramp(512);
        let mut block = original.clone();
        chain.process_block(0, &mut block);
        assert_eq!(block, original);
    }

    #[test]
    fn processing_is_deterministic() {
        let mut chain1 = SignalChain::new(active_params(), 44100.0, 1);
        let mut chain2 = SignalChain::new(active_params(), 44100.0, 1);

        let mut block1 = ramp(2048);
        let mut block2 = ramp(2048);
        chain1.process_block(0, &mut block1);
        chain2.process_block(0, &mut block2);

        assert_eq!(block1, block2);
    }

    #[test]
    fn saturation_bounds_output() {
        let params = ChainParams {
            enabled: 1.0,
            saturation_enabled: 1.0,
            saturation_gain: 10.0,
            ..ChainParams::default()
        };
        let mut chain = SignalChain::new(params, 44100.0, 1);
        let mut block = vec![4.0; 64];
        chain.process_block(0, &mut block);
        assert!(block.iter().all(|x| x.abs() <= 1.0));
    }

    #[test]
    fn bit_quantization_lands_on_levels() {
        let params = ChainParams {
            enabled: 1.0,
            downsample_enabled: 1.0,
            // Same rate as the host, so only the quantizer acts.
            target_sample_rate: 44100.0,
            bit_depth: 4.0,
            ..ChainParams::default()
        };
        let mut chain = SignalChain::new(params, 44100.0, 1);
        let mut block = ramp(256);
        chain.process_block(0, &mut block);

        let levels = (1u64 << 3) as f64;
        for x in block {
            let scaled = x * levels;
            assert!((scaled - scaled.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn sample_and_hold_repeats_values() {
        let params = ChainParams {
            enabled: 1.0,
            downsample_enabled: 1.0,
            target_sample_rate: 11025.0, // ratio 4 at 44.1k
            bit_depth: 16.0,
            ..ChainParams::default()
        };
        let mut chain = SignalChain::new(params, 44100.0, 1);
        let mut block = ramp(64);
        chain.process_block(0, &mut block);

        // The hold recaptures every 4th sample, so the output may only
        // change at capture points.
        for i in 1..block.len() {
            if block[i] != block[i - 1] {
                assert_eq!((i + 1) % 4, 0, "hold changed mid-window at {}", i);
            }
        }
    }

    #[test]
    fn state_persists_across_blocks() {
        let params = ChainParams {
            enabled: 1.0,
            downsample_enabled: 1.0,
            target_sample_rate: 11025.0,
            bit_depth: 16.0,
            ..ChainParams::default()
        };

        // One long block versus the same samples split in two.
        let mut whole = SignalChain::new(params, 44100.0, 1);
        let mut long_block = ramp(128);
        whole.process_block(0, &mut long_block);

        let mut split = SignalChain::new(params, 44100.0, 1);
        let source = ramp(128);
        let mut first = source[..64].to_vec();
        let mut second = source[64..].to_vec();
        split.process_block(0, &mut first);
        split.process_block(0, &mut second);

        first.extend_from_slice(&second);
        assert_eq!(long_block, first);
    }

    #[test]
    fn channels_have_independent_state() {
        let params = ChainParams {
            enabled: 1.0,
            downsample_enabled: 1.0,
            target_sample_rate: 11025.0,
            bit_depth: 16.0,
            ..ChainParams::default()
        };
        let mut chain = SignalChain::new(params, 44100.0, 2);

        let mut left = vec![0.8; 64];
        chain.process_block(0, &mut left);

        // Channel 1 starts from a zero hold regardless of channel 0.
        let mut right = vec![0.8; 64];
        chain.process_block(1, &mut right);
        assert_eq!(right[0], 0.0);
    }

    #[test]
    fn dry_wet_half_blends_both_paths() {
        let params = ChainParams {
            enabled: 1.0,
            saturation_enabled: 1.0,
            saturation_gain: 5.0,
            dry_wet: 0.5,
            ..ChainParams::default()
        };
        let mut chain = SignalChain::new(params, 44100.0, 1);
        let mut block = vec![0.5; 16];
        chain.process_block(0, &mut block);

        let expected = 0.5 * 0.5 + (5.0f64 * 0.5).tanh() * 0.5;
        for x in block {
            assert!((x - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn enable_toggle_leaves_state_untouched() {
        let mut params = active_params();
        params.crackle_amount = 0.0;
        let mut chain = SignalChain::new(params, 44100.0, 1);

        let mut warmup = vec![0.9; 64];
        chain.process_block(0, &mut warmup);
        let resume_reference = warmup[63];

        params.enabled = 0.0;
        chain.set_params(params);
        let mut bypassed = vec![0.9; 64];
        chain.process_block(0, &mut bypassed);
        assert_eq!(bypassed, vec![0.9; 64]);

        params.enabled = 1.0;
        chain.set_params(params);
        let mut resumed = vec![0.9; 64];
        chain.process_block(0, &mut resumed);
        // The hold resumes from the pre-bypass state, not from zero.
        assert_eq!(resumed[0], resume_reference);
    }

    #[test]
    fn out_of_range_channel_is_a_no_op() {
        let mut chain = SignalChain::new(active_params(), 44100.0, 1);
        let original = ramp(32);
        let mut block = original.clone();
        chain.process_block(5, &mut block);
        assert_eq!(block, original);
    }
}
