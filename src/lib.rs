//! # lyre
//!
//! Pythagorean chord sequences to frequencies and pitch-bent MIDI.
//!
//! ## Pipeline
//! 1. `parser` - chord lines (`C4: 1,3,5, duration=2`) into [`ParsedChord`] values
//! 2. `tuning` - fundamentals and interval symbols into Pythagorean and tempered frequencies
//! 3. `midi` - frequencies into Standard MIDI Files, one pitch-bent, one equal-tempered
//!
//! `session` holds immutable orchestrator state on top of this pipeline.

pub mod api;
pub mod chord;
pub mod error;
pub mod midi;
pub mod parser;
pub mod session;
pub mod tuning;

pub use api::*;
pub use chord::*;
pub use error::*;
pub use parser::{parse_sequence, validate_chord};
pub use tuning::{cents_difference, interval_ratio, note_name_to_frequency, ChordResult};
