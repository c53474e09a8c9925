//! # Chord Sequence Types
//!
//! Plain value types produced by the parser and consumed by the tuning engine.
//!
//! ```text
//! Sequence
//!   ├── Metadata (title, tempo, base duration) from optional front matter
//!   └── Vec<ParsedChord>
//!         ├── fundamental: raw token ("C4", "261.63")
//!         ├── intervals: Vec<String> ("1", "b3", "#11"), written order
//!         └── duration: multiplier of the base duration
//! ```
//!
//! ## Related Modules
//! - `parser` - Creates these types from text
//! - `tuning` - Resolves them to frequencies
//! - `session` - Builds `ParsedChord` values from keyboard selections

use serde::{Deserialize, Serialize};

/// One chord as written in the source (or assembled programmatically).
///
/// Intervals are kept in written order; duplicates are preserved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedChord {
    pub fundamental: String,
    pub intervals: Vec<String>,
    pub duration: f64,
}

impl ParsedChord {
    pub fn new(fundamental: impl Into<String>, intervals: Vec<String>, duration: f64) -> Self {
        Self {
            fundamental: fundamental.into(),
            intervals,
            duration,
        }
    }
}

/// Render settings read from the front matter block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub title: Option<String>,
    /// Beats per minute.
    pub tempo: Option<f64>,
    /// Seconds per duration unit.
    pub base_duration: Option<f64>,
}

/// Raw metadata for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RawMetadata {
    pub title: Option<String>,
    pub tempo: Option<f64>,
    pub base_duration: Option<f64>,
}

/// A parsed chord sequence with its front matter.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sequence {
    pub metadata: Metadata,
    pub chords: Vec<ParsedChord>,
}
