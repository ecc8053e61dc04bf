//! Groovebox Hardware Emulation
//!
//! The audio-rate half of the vintage sampler emulation: a time-domain PPQN
//! quantizer for event scheduling and a real-time signal-chain block
//! processor (saturation, anti-alias filtering, sample-and-hold
//! downsampling, bit-depth quantization, crackle, dry/wet mix).
//!
//! Everything here is deterministic: the crackle noise source is a
//! fixed-seed PCG32 stream, so two processors fed identical blocks produce
//! bit-identical output.
//!
//! # Modules
//!
//! - [`quantize`]: PPQN event-time rounding
//! - [`chain`]: the signal-chain block processor

pub mod chain;
pub mod quantize;

pub use chain::{ChainParams, SignalChain};
pub use quantize::round_to_ppqn;
