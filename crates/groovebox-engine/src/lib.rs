//! Groovebox Groove Physics Engine
//!
//! A deterministic temporal-topology engine: it turns a quantized
//! step-sequencer grid into a humanized event stream by computing, per hit,
//! a signed time displacement and a possibly-modified velocity. One
//! closed-form kernel reproduces the feel of every factory genre; presets
//! differ only in coefficients, never in code path.
//!
//! The pipeline per event is fixed: assemble the coefficient context from
//! the profile and musical state, apply the emotional bias, evaluate the
//! kernel, humanize velocity, roll for a ghost note, add the displacement
//! to the grid time, round to the hardware PPQN grid, clamp to zero.
//!
//! # Example
//!
//! ```
//! use groovebox_engine::{preset, Genre, GrooveEngine};
//!
//! let mut engine = GrooveEngine::new(preset(Genre::NeoSoul));
//! engine.transport_start();
//!
//! let event = engine.schedule(0.5, 4, "snare", "minor", Some(0.9));
//! assert!(event.should_play);
//! assert!(event.velocity <= 1.0);
//! ```
//!
//! Determinism: the engine owns a Mulberry32 RNG seeded from the profile's
//! `randomization_seed` and resets it at every transport start, so equal
//! profiles and event streams produce bit-identical output.
//!
//! # Modules
//!
//! - [`rng`]: Mulberry32 with a Box-Muller Gaussian
//! - [`field`]: groove field basis functions
//! - [`kernel`]: the displacement kernel and its coefficient context
//! - [`emotion`]: the emotional-field bias layer
//! - [`channel`]: canonical channel resolution
//! - [`engine`]: context assembly, `apply_groove`, and the stateful scheduler
//! - [`presets`]: the twelve factory genre profiles

pub mod channel;
pub mod emotion;
pub mod engine;
pub mod field;
pub mod kernel;
pub mod presets;
pub mod rng;

pub use channel::canonical_channel;
pub use emotion::{apply_emotional_bias, EmotionDeltas, BIAS_TABLE};
pub use engine::{apply_groove, GrooveEngine, ScheduledEvent};
pub use kernel::{displace, CoefficientContext};
pub use presets::{preset, Genre};
pub use rng::Mulberry32;
