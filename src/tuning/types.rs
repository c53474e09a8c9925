//! Tuning result types
//!
//! These are the values the orchestrator renders and the MIDI encoder consumes.

use serde::Serialize;

use super::cents_difference;

/// One interval of a chord tuned in Pythagorean intonation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PythagoreanNote {
    pub interval: String,
    pub frequency: f64,
    pub ratio: f64,
}

/// The same interval in 12-tone equal temperament, kept for comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperedNote {
    pub interval: String,
    pub frequency: f64,
}

/// A chord expanded against its fundamental.
///
/// Both note lists follow the input interval order, so index `i` of one list
/// is the same interval as index `i` of the other.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordResult {
    pub fundamental_freq: f64,
    pub pythagorean_notes: Vec<PythagoreanNote>,
    pub equal_temperament_notes: Vec<TemperedNote>,
}

impl ChordResult {
    pub fn pythagorean_frequencies(&self) -> Vec<f64> {
        self.pythagorean_notes.iter().map(|n| n.frequency).collect()
    }

    pub fn equal_temperament_frequencies(&self) -> Vec<f64> {
        self.equal_temperament_notes.iter().map(|n| n.frequency).collect()
    }

    /// Cents of each Pythagorean note relative to its tempered counterpart.
    ///
    /// Positive values mean the Pythagorean note is sharp.
    pub fn deviations(&self) -> Vec<f64> {
        self.pythagorean_notes
            .iter()
            .zip(&self.equal_temperament_notes)
            .map(|(p, e)| cents_difference(p.frequency, e.frequency))
            .collect()
    }
}
