//! # Public API
//!
//! Entry points the orchestrator (UI, CLI, playback) calls.
//!
//! ## Core Functions
//!
//! - [`parse_chord_sequence()`] - Text to parsed chords
//! - [`chord_frequencies()`] - One chord to Pythagorean and tempered frequencies
//! - [`equal_temperament_frequency()`] - Tempered reference for a single interval
//! - [`generate_pythagorean_midi()`] - Chords to a pitch-bent MIDI file
//! - [`generate_equal_temperament_midi()`] - Chords to a plain MIDI file
//!
//! ## Pipeline Functions
//!
//! - [`analyze()`] - Parse and tune a whole sequence
//! - [`render()`] - Parse, tune and encode both MIDI files
//!
//! ## Typical Usage
//!
//! ```rust
//! use lyre::{render, RenderOptions};
//!
//! let source = r#"---
//! tempo: 90
//! ---
//! C4: 1,3,5, duration=2
//! F4: 1,3,5, duration=2
//! "#;
//!
//! let rendering = render(source, &RenderOptions::default())?;
//! assert_eq!(rendering.settings.tempo, 90.0);
//! assert_eq!(&rendering.pythagorean[..4], b"MThd");
//! # Ok::<(), lyre::LyreError>(())
//! ```

use serde::Serialize;

use crate::chord::{Metadata, ParsedChord};
use crate::error::LyreError;
use crate::midi::MidiChord;
use crate::parser::parse_sequence;
use crate::tuning::ChordResult;

pub use crate::midi::{generate_equal_temperament_midi, generate_pythagorean_midi};
pub use crate::parser::parse_chord_sequence;
pub use crate::tuning::{chord_frequencies, equal_temperament_frequency};

/// Tempo used when neither the caller nor the front matter sets one.
pub const DEFAULT_TEMPO: f64 = 120.0;

/// Seconds per duration unit when neither the caller nor the front matter sets one.
pub const DEFAULT_BASE_DURATION: f64 = 1.0;

/// A parsed chord together with its tuning.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedChord {
    pub chord: ParsedChord,
    pub result: ChordResult,
}

/// Everything computed for one parse action.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub metadata: Metadata,
    pub chords: Vec<AnalyzedChord>,
}

impl Analysis {
    /// Per-chord frequency lists for the Pythagorean encoder.
    pub fn pythagorean_chords(&self) -> Vec<MidiChord> {
        self.chords
            .iter()
            .map(|c| MidiChord::pythagorean(&c.result, c.chord.duration))
            .collect()
    }

    /// Per-chord frequency lists for the equal-temperament encoder.
    pub fn equal_temperament_chords(&self) -> Vec<MidiChord> {
        self.chords
            .iter()
            .map(|c| MidiChord::equal_temperament(&c.result, c.chord.duration))
            .collect()
    }
}

/// Tune already-parsed chords, failing on the first unresolvable chord.
pub fn analyze_chords(chords: Vec<ParsedChord>) -> Result<Vec<AnalyzedChord>, LyreError> {
    chords
        .into_iter()
        .map(|chord| {
            let result = chord_frequencies(&chord.fundamental, &chord.intervals)?;
            Ok(AnalyzedChord { chord, result })
        })
        .collect()
}

/// Parse a sequence and tune every chord.
///
/// # Example
/// ```rust
/// use lyre::analyze;
///
/// let analysis = analyze("A3: 1,b3,5, duration=1.5")?;
/// assert_eq!(analysis.chords[0].result.fundamental_freq, 220.0);
/// assert_eq!(analysis.chords[0].result.pythagorean_notes[2].frequency, 330.0);
/// # Ok::<(), lyre::LyreError>(())
/// ```
pub fn analyze(source: &str) -> Result<Analysis, LyreError> {
    let sequence = parse_sequence(source)?;
    Ok(Analysis {
        metadata: sequence.metadata,
        chords: analyze_chords(sequence.chords)?,
    })
}

/// Caller overrides for render settings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderOptions {
    pub tempo: Option<f64>,
    pub base_duration: Option<f64>,
}

/// Settings a rendering actually used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSettings {
    pub tempo: f64,
    pub base_duration: f64,
}

impl RenderSettings {
    /// Caller override, then front matter, then default.
    pub fn resolve(options: &RenderOptions, metadata: &Metadata) -> Self {
        Self {
            tempo: options.tempo.or(metadata.tempo).unwrap_or(DEFAULT_TEMPO),
            base_duration: options
                .base_duration
                .or(metadata.base_duration)
                .unwrap_or(DEFAULT_BASE_DURATION),
        }
    }
}

/// Both MIDI renderings of a sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendering {
    pub analysis: Analysis,
    pub settings: RenderSettings,
    pub pythagorean: Vec<u8>,
    pub equal_temperament: Vec<u8>,
}

/// Parse, tune and encode a sequence.
pub fn render(source: &str, options: &RenderOptions) -> Result<Rendering, LyreError> {
    let analysis = analyze(source)?;
    let settings = RenderSettings::resolve(options, &analysis.metadata);

    let pythagorean = generate_pythagorean_midi(
        &analysis.pythagorean_chords(),
        settings.base_duration,
        settings.tempo,
    );
    let equal_temperament = generate_equal_temperament_midi(
        &analysis.equal_temperament_chords(),
        settings.base_duration,
        settings.tempo,
    );

    Ok(Rendering {
        analysis,
        settings,
        pythagorean,
        equal_temperament,
    })
}
