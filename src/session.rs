//! # Session State
//!
//! Immutable orchestrator state with reducer-style transitions.
//!
//! A UI keeps one [`Session`] and replaces it with the result of
//! [`Session::apply`] on every user action. Nothing is mutated in place, so a
//! failed action leaves the previous session untouched.
//!
//! ## Actions
//! - `Parse` - re-parse the text area; results are replaced wholesale
//! - `SelectFundamental` / `ToggleInterval` / `SetDuration` - keyboard chord builder
//! - `CommitBuilder` - validate the built chord and append it to the results
//! - `ClearBuilder` - reset the builder
//! - `SetPlaying` - playback flag, owned by the playback collaborator
//!
//! ## Example
//! ```rust
//! use lyre::session::{Action, Session};
//!
//! let session = Session::default()
//!     .apply(Action::SelectFundamental("A3".to_string()))?
//!     .apply(Action::ToggleInterval("1".to_string()))?
//!     .apply(Action::ToggleInterval("5".to_string()))?
//!     .apply(Action::CommitBuilder)?;
//!
//! assert_eq!(session.results().len(), 1);
//! assert_eq!(session.results()[0].result.pythagorean_notes[1].frequency, 330.0);
//! # Ok::<(), lyre::LyreError>(())
//! ```

use crate::api::{analyze, analyze_chords, AnalyzedChord};
use crate::chord::{Metadata, ParsedChord};
use crate::error::LyreError;
use crate::parser::{validate_chord, DEFAULT_DURATION};

/// Chord being assembled from keyboard selections.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordBuilder {
    pub fundamental: Option<String>,
    pub intervals: Vec<String>,
    pub duration: f64,
}

impl Default for ChordBuilder {
    fn default() -> Self {
        Self {
            fundamental: None,
            intervals: Vec::new(),
            duration: DEFAULT_DURATION,
        }
    }
}

impl ChordBuilder {
    /// The chord this builder describes, validated.
    pub fn build(&self) -> Result<ParsedChord, LyreError> {
        let chord = ParsedChord::new(
            self.fundamental.clone().unwrap_or_default(),
            self.intervals.clone(),
            self.duration,
        );
        validate_chord(&chord)?;
        Ok(chord)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Parse(String),
    SelectFundamental(String),
    /// Add the interval if absent, remove it if present.
    ToggleInterval(String),
    SetDuration(f64),
    CommitBuilder,
    ClearBuilder,
    SetPlaying(bool),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    metadata: Metadata,
    results: Vec<AnalyzedChord>,
    builder: ChordBuilder,
    playing: bool,
}

impl Session {
    pub fn results(&self) -> &[AnalyzedChord] {
        &self.results
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn builder(&self) -> &ChordBuilder {
        &self.builder
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Compute the next session. `self` is never modified.
    pub fn apply(&self, action: Action) -> Result<Session, LyreError> {
        let mut next = self.clone();
        match action {
            Action::Parse(source) => {
                let analysis = analyze(&source)?;
                next.metadata = analysis.metadata;
                next.results = analysis.chords;
            }
            Action::SelectFundamental(fundamental) => {
                next.builder.fundamental = Some(fundamental);
            }
            Action::ToggleInterval(interval) => {
                match next.builder.intervals.iter().position(|i| *i == interval) {
                    Some(idx) => {
                        next.builder.intervals.remove(idx);
                    }
                    None => next.builder.intervals.push(interval),
                }
            }
            Action::SetDuration(duration) => {
                next.builder.duration = duration;
            }
            Action::CommitBuilder => {
                let chord = self.builder.build()?;
                next.results.extend(analyze_chords(vec![chord])?);
            }
            Action::ClearBuilder => {
                next.builder = ChordBuilder::default();
            }
            Action::SetPlaying(playing) => {
                next.playing = playing;
            }
        }
        Ok(next)
    }
}
