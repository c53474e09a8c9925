//! # Error Types
//!
//! This module defines all error types for the lyre library.
//!
//! Parse errors carry the 1-based source line so the orchestrator can show the
//! message verbatim. Nothing here is recoverable mid-operation: the parser and
//! tuning engine fail on the first bad line or symbol.
//!
//! ## Error Categories
//! - `Format` - malformed chord line or programmatically built chord
//! - `UnknownSymbol` - unrecognized note name, interval, or fundamental
//! - `EmptyInput` - a sequence that produced no chords
//! - `Metadata` - invalid YAML front matter
//!
//! ## Usage
//! ```rust
//! use lyre::{parse_chord_sequence, ErrorCategory, LyreError};
//!
//! match parse_chord_sequence("C4 1,3,5") {
//!     Ok(chords) => println!("{} chords", chords.len()),
//!     Err(e @ LyreError::Parse { .. }) => {
//!         assert_eq!(e.category(), ErrorCategory::Format);
//!         eprintln!("{}", e);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Problems with the shape of a chord line or chord record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatErrorKind {
    #[error("missing ':' between fundamental and intervals")]
    MissingColon,

    #[error("missing fundamental before ':'")]
    EmptyFundamental,

    #[error("invalid duration format '{0}' (expected duration=<number>)")]
    InvalidDurationFormat(String),

    #[error("invalid duration value '{0}' (must be a positive number)")]
    InvalidDurationValue(String),

    #[error("no intervals specified")]
    NoIntervalsSpecified,
}

/// Tokens the tuning engine could not resolve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SymbolErrorKind {
    #[error("invalid note format '{0}' (expected e.g. C4, F#3, Bb-1)")]
    InvalidFormat(String),

    #[error("invalid note name '{0}'")]
    InvalidNoteName(String),

    #[error("unknown interval '{0}'")]
    UnknownInterval(String),

    #[error("invalid fundamental '{0}' (expected a note name or a frequency in Hz)")]
    InvalidFundamental(String),
}

/// Coarse error taxonomy used by callers that only care about the class of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Format,
    UnknownSymbol,
    EmptyInput,
    Metadata,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LyreError {
    /// A chord line that doesn't follow the `<fundamental>: <parts>` grammar.
    ///
    /// # Example
    /// ```
    /// # use lyre::{LyreError, FormatErrorKind};
    /// let err = LyreError::Parse {
    ///     line: 3,
    ///     kind: FormatErrorKind::MissingColon,
    /// };
    /// assert_eq!(err.to_string(), "Line 3: missing ':' between fundamental and intervals");
    /// ```
    #[error("Line {line}: {kind}")]
    Parse { line: usize, kind: FormatErrorKind },

    /// A chord record that fails validation outside of the line parser.
    #[error("Invalid chord: {0}")]
    InvalidChord(FormatErrorKind),

    /// An unresolvable note name, interval, or fundamental.
    ///
    /// # Example
    /// ```
    /// # use lyre::{LyreError, SymbolErrorKind};
    /// let err = LyreError::Symbol(SymbolErrorKind::UnknownInterval("#5".to_string()));
    /// assert_eq!(err.to_string(), "unknown interval '#5'");
    /// ```
    #[error(transparent)]
    Symbol(#[from] SymbolErrorKind),

    #[error("No chords found in sequence")]
    EmptySequence,

    /// Invalid front matter.
    ///
    /// # Example
    /// ```
    /// # use lyre::LyreError;
    /// let err = LyreError::MetadataError("tempo must be positive".to_string());
    /// assert_eq!(err.to_string(), "Invalid metadata: tempo must be positive");
    /// ```
    #[error("Invalid metadata: {0}")]
    MetadataError(String),
}

impl LyreError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LyreError::Parse { .. } | LyreError::InvalidChord(_) => ErrorCategory::Format,
            LyreError::Symbol(_) => ErrorCategory::UnknownSymbol,
            LyreError::EmptySequence => ErrorCategory::EmptyInput,
            LyreError::MetadataError(_) => ErrorCategory::Metadata,
        }
    }

    /// The 1-based source line, for errors raised by the line parser.
    pub fn line(&self) -> Option<usize> {
        match self {
            LyreError::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let parse = LyreError::Parse {
            line: 1,
            kind: FormatErrorKind::NoIntervalsSpecified,
        };
        assert_eq!(parse.category(), ErrorCategory::Format);
        assert_eq!(parse.line(), Some(1));

        let symbol: LyreError = SymbolErrorKind::InvalidNoteName("E#4".to_string()).into();
        assert_eq!(symbol.category(), ErrorCategory::UnknownSymbol);
        assert_eq!(symbol.line(), None);

        assert_eq!(LyreError::EmptySequence.category(), ErrorCategory::EmptyInput);
    }

    #[test]
    fn test_duration_messages() {
        let err = LyreError::Parse {
            line: 7,
            kind: FormatErrorKind::InvalidDurationValue("0".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Line 7: invalid duration value '0' (must be a positive number)"
        );
    }
}
