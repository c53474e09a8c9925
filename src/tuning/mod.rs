//! # Tuning Module
//!
//! Pure frequency calculus for Pythagorean (3-limit) chords.
//!
//! ## Purpose
//! Turns a fundamental plus a list of interval symbols into concrete
//! frequencies, twice:
//! 1. **Pythagorean** - ratios built from stacked 3:2 fifths (`81/64`, `729/512`, ...)
//! 2. **Equal temperament** - `2^(semitones/12)`, used only as a reference
//!
//! ## Sub-modules
//! - `notes` - Note names (`C#3`) and fundamental tokens to Hz
//! - `intervals` - Interval symbols (`b7`, `#11`) to ratios and semitones
//! - `types` - ChordResult, PythagoreanNote, TemperedNote
//!
//! ## Example
//! ```rust
//! use lyre::tuning::{chord_frequencies, cents_difference};
//!
//! let intervals = vec!["1".to_string(), "3".to_string(), "5".to_string()];
//! let chord = chord_frequencies("A4", &intervals).unwrap();
//!
//! assert_eq!(chord.fundamental_freq, 440.0);
//! assert_eq!(chord.pythagorean_notes[2].frequency, 660.0);
//!
//! // The Pythagorean major third is about 7.8 cents sharp of the tempered one
//! let third = &chord.pythagorean_notes[1];
//! let tempered = &chord.equal_temperament_notes[1];
//! assert!((cents_difference(third.frequency, tempered.frequency) - 7.82).abs() < 0.01);
//! ```
//!
//! ## Numeric Semantics
//! All values are `f64`. Each base ratio is a single division of two small
//! integers; compound intervals multiply by an exact power of two.

mod intervals;
mod notes;
mod types;


pub use intervals::{
    equal_temperament_ratio, equal_temperament_semitones, interval_ratio, Degree, Interval,
};
pub use notes::{note_name_to_frequency, pitch_class, resolve_fundamental, A4_FREQUENCY};
pub use types::{ChordResult, PythagoreanNote, TemperedNote};

use log::debug;

use crate::error::LyreError;

/// Frequency of `interval` above `fundamental` in equal temperament.
///
/// `fundamental` is a note name or a frequency in Hz, as in [`chord_frequencies`].
pub fn equal_temperament_frequency(fundamental: &str, interval: &str) -> Result<f64, LyreError> {
    let base = resolve_fundamental(fundamental)?;
    Ok(base * equal_temperament_ratio(interval)?)
}

/// Multiply a fundamental frequency by a ratio.
pub fn ratio_to_frequency(fundamental_freq: f64, ratio: f64) -> f64 {
    fundamental_freq * ratio
}

/// Signed pitch difference in cents: positive when `freq_a` is sharp of `freq_b`.
pub fn cents_difference(freq_a: f64, freq_b: f64) -> f64 {
    1200.0 * (freq_a / freq_b).log2()
}

/// Expand a chord into Pythagorean and equal-temperament notes.
///
/// Fails on the first interval that can't be resolved; no partial result is returned.
pub fn chord_frequencies<S: AsRef<str>>(
    fundamental: &str,
    intervals: &[S],
) -> Result<ChordResult, LyreError> {
    let fundamental_freq = resolve_fundamental(fundamental)?;

    let mut pythagorean_notes = Vec::with_capacity(intervals.len());
    let mut equal_temperament_notes = Vec::with_capacity(intervals.len());

    for symbol in intervals {
        let symbol = symbol.as_ref();
        let interval = Interval::parse(symbol)?;
        let ratio = interval.ratio();

        pythagorean_notes.push(PythagoreanNote {
            interval: symbol.to_string(),
            frequency: ratio_to_frequency(fundamental_freq, ratio),
            ratio,
        });
        equal_temperament_notes.push(TemperedNote {
            interval: symbol.to_string(),
            frequency: ratio_to_frequency(
                fundamental_freq,
                2.0_f64.powf(interval.semitones() as f64 / 12.0),
            ),
        });
    }

    debug!(
        "Resolved {} ({:.3} Hz) with {} intervals",
        fundamental,
        fundamental_freq,
        pythagorean_notes.len()
    );

    Ok(ChordResult {
        fundamental_freq,
        pythagorean_notes,
        equal_temperament_notes,
    })
}
