//! # Chord Sequence Parser
//!
//! Turns multi-line text into an ordered list of [`ParsedChord`] values.
//!
//! ## Grammar
//! One chord per line:
//! ```text
//! <fundamental> ":" <part> ("," <part>)*
//! part := <interval> | "duration" "=" <positive number>
//! ```
//! - The `duration` keyword is case-insensitive and may appear anywhere among the parts
//! - Everything else is an interval, kept in written order (no dedup)
//! - Blank lines and lines starting with `#` or `//` are comments
//! - Duration defaults to `1`
//!
//! ## Front Matter
//! An optional YAML block delimited by `---` lines may open the file:
//! ```text
//! ---
//! title: Cadence
//! tempo: 90
//! base-duration: 0.5
//! ---
//! C4: 1,3,5, duration=2
//! ```
//! Line numbers in errors always refer to the original text.
//!
//! ## Errors
//! Parsing stops at the first bad line. A sequence with no chords at all
//! fails with `EmptySequence`.

use log::debug;

use crate::chord::{Metadata, ParsedChord, RawMetadata, Sequence};
use crate::error::{FormatErrorKind, LyreError};

const DURATION_KEYWORD: &str = "duration";

/// Default duration multiplier for chords without a `duration=` part.
pub const DEFAULT_DURATION: f64 = 1.0;

fn is_comment(line: &str) -> bool {
    line.is_empty() || line.starts_with('#') || line.starts_with("//")
}

/// If `part` is a duration setting, return the text after the keyword.
///
/// The keyword must stand alone: `durations` or `duration2` are interval tokens.
fn duration_setting(part: &str) -> Option<&str> {
    let keyword = part.get(..DURATION_KEYWORD.len())?;
    if !keyword.eq_ignore_ascii_case(DURATION_KEYWORD) {
        return None;
    }
    let rest = &part[DURATION_KEYWORD.len()..];
    match rest.chars().next() {
        Some(c) if c.is_alphanumeric() || c == '_' => None,
        _ => Some(rest),
    }
}

fn parse_duration(part: &str, setting: &str, line_number: usize) -> Result<f64, LyreError> {
    let format_error = || LyreError::Parse {
        line: line_number,
        kind: FormatErrorKind::InvalidDurationFormat(part.to_string()),
    };

    let value = setting
        .trim_start()
        .strip_prefix('=')
        .ok_or_else(format_error)?
        .trim();
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(format_error());
    }

    match value.parse::<f64>() {
        Ok(duration) if duration.is_finite() && duration > 0.0 => Ok(duration),
        _ => Err(LyreError::Parse {
            line: line_number,
            kind: FormatErrorKind::InvalidDurationValue(value.to_string()),
        }),
    }
}

/// Parse a single line.
///
/// Returns `Ok(None)` for blank and comment lines.
///
/// # Examples
/// ```
/// use lyre::parser::parse_chord_line;
///
/// let chord = parse_chord_line("A3: 1,b3,5, duration=1.5", 1).unwrap().unwrap();
/// assert_eq!(chord.fundamental, "A3");
/// assert_eq!(chord.intervals, vec!["1", "b3", "5"]);
/// assert_eq!(chord.duration, 1.5);
///
/// assert!(parse_chord_line("// comment", 2).unwrap().is_none());
/// ```
pub fn parse_chord_line(line: &str, line_number: usize) -> Result<Option<ParsedChord>, LyreError> {
    let line = line.trim();
    if is_comment(line) {
        return Ok(None);
    }

    let error = |kind| LyreError::Parse {
        line: line_number,
        kind,
    };

    let (fundamental, parts) = line
        .split_once(':')
        .ok_or_else(|| error(FormatErrorKind::MissingColon))?;
    let fundamental = fundamental.trim();
    if fundamental.is_empty() {
        return Err(error(FormatErrorKind::EmptyFundamental));
    }

    let mut intervals = Vec::new();
    let mut duration = DEFAULT_DURATION;

    for part in parts.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match duration_setting(part) {
            Some(setting) => duration = parse_duration(part, setting, line_number)?,
            None => intervals.push(part.to_string()),
        }
    }

    if intervals.is_empty() {
        return Err(error(FormatErrorKind::NoIntervalsSpecified));
    }

    Ok(Some(ParsedChord {
        fundamental: fundamental.to_string(),
        intervals,
        duration,
    }))
}

/// Check a chord record regardless of where it came from.
///
/// The line parser already guarantees these properties; this is for chords
/// assembled in code, e.g. from keyboard selections.
pub fn validate_chord(chord: &ParsedChord) -> Result<(), LyreError> {
    if chord.fundamental.trim().is_empty() {
        return Err(LyreError::InvalidChord(FormatErrorKind::EmptyFundamental));
    }
    if chord.intervals.iter().all(|i| i.trim().is_empty()) {
        return Err(LyreError::InvalidChord(FormatErrorKind::NoIntervalsSpecified));
    }
    if !chord.duration.is_finite() || chord.duration <= 0.0 {
        return Err(LyreError::InvalidChord(FormatErrorKind::InvalidDurationValue(
            chord.duration.to_string(),
        )));
    }
    Ok(())
}

/// Locate a front matter block opening the source.
///
/// Returns the 0-based indices of the opening and closing `---` lines.
pub(crate) fn find_front_matter(lines: &[&str]) -> Result<Option<(usize, usize)>, LyreError> {
    let start = match lines.iter().position(|l| !l.trim().is_empty()) {
        Some(idx) if lines[idx].trim() == "---" => idx,
        _ => return Ok(None),
    };
    let end = lines[start + 1..]
        .iter()
        .position(|l| l.trim() == "---")
        .map(|offset| start + 1 + offset)
        .ok_or_else(|| LyreError::MetadataError("front matter is missing its closing ---".to_string()))?;
    Ok(Some((start, end)))
}

fn positive(name: &str, value: Option<f64>) -> Result<Option<f64>, LyreError> {
    match value {
        Some(v) if !v.is_finite() || v <= 0.0 => Err(LyreError::MetadataError(format!(
            "{} must be a positive number (got {})",
            name, v
        ))),
        other => Ok(other),
    }
}

/// Parse YAML front matter content into validated metadata.
pub fn parse_metadata(content: &str) -> Result<Metadata, LyreError> {
    if content.trim().is_empty() {
        return Ok(Metadata::default());
    }

    let raw: RawMetadata =
        serde_yaml::from_str(content).map_err(|e| LyreError::MetadataError(e.to_string()))?;

    Ok(Metadata {
        title: raw.title,
        tempo: positive("tempo", raw.tempo)?,
        base_duration: positive("base-duration", raw.base_duration)?,
    })
}

/// Parse a full sequence, front matter included.
///
/// # Examples
/// ```
/// use lyre::parser::parse_sequence;
///
/// let source = "---\ntempo: 90\n---\nC4: 1,3,5\nG3: 1,3,5,b7";
/// let sequence = parse_sequence(source).unwrap();
/// assert_eq!(sequence.metadata.tempo, Some(90.0));
/// assert_eq!(sequence.chords.len(), 2);
/// ```
pub fn parse_sequence(source: &str) -> Result<Sequence, LyreError> {
    let lines: Vec<&str> = source.lines().collect();

    let (metadata, body_start) = match find_front_matter(&lines)? {
        Some((start, end)) => (parse_metadata(&lines[start + 1..end].join("\n"))?, end + 1),
        None => (Metadata::default(), 0),
    };

    let mut chords = Vec::new();
    for (idx, line) in lines.iter().enumerate().skip(body_start) {
        if let Some(chord) = parse_chord_line(line, idx + 1)? {
            debug!(
                "Line {}: {} with {} intervals, duration {}",
                idx + 1,
                chord.fundamental,
                chord.intervals.len(),
                chord.duration
            );
            chords.push(chord);
        }
    }

    if chords.is_empty() {
        return Err(LyreError::EmptySequence);
    }

    Ok(Sequence { metadata, chords })
}

/// Parse a sequence into chords, discarding any front matter.
///
/// # Examples
/// ```
/// use lyre::parse_chord_sequence;
///
/// let chords = parse_chord_sequence("C4: 1,3,5, duration=2\nF4: 1,3,5, duration=2").unwrap();
/// assert_eq!(chords.len(), 2);
/// assert_eq!(chords[1].fundamental, "F4");
/// ```
pub fn parse_chord_sequence(source: &str) -> Result<Vec<ParsedChord>, LyreError> {
    Ok(parse_sequence(source)?.chords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    fn parse_one(line: &str) -> ParsedChord {
        parse_chord_line(line, 1).unwrap().unwrap()
    }

    fn kind_of(result: Result<Option<ParsedChord>, LyreError>) -> FormatErrorKind {
        match result {
            Err(LyreError::Parse { kind, .. }) => kind,
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_simple_chord() {
        let chord = parse_one("C4: 1,3,5, duration=2");
        assert_eq!(
            chord,
            ParsedChord::new(
                "C4",
                vec!["1".to_string(), "3".to_string(), "5".to_string()],
                2.0
            )
        );
    }

    #[test]
    fn test_default_duration() {
        let chord = parse_one("G3: 1, 3, 5, b7");
        assert_eq!(chord.duration, 1.0);
        assert_eq!(chord.intervals, vec!["1", "3", "5", "b7"]);
    }

    #[test]
    fn test_duration_anywhere_and_case_insensitive() {
        let chord = parse_one("D4: DURATION = 0.5, 1, 5");
        assert_eq!(chord.duration, 0.5);
        assert_eq!(chord.intervals, vec!["1", "5"]);

        let chord = parse_one("D4: 1, Duration=3, 5");
        assert_eq!(chord.duration, 3.0);
        assert_eq!(chord.intervals, vec!["1", "5"]);
    }

    #[test]
    fn test_frequency_fundamental_and_duplicates() {
        let chord = parse_one("  261.63 : 5, 1, 5,, ");
        assert_eq!(chord.fundamental, "261.63");
        assert_eq!(chord.intervals, vec!["5", "1", "5"]);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        for line in ["", "   ", "# comment", "// comment", "  # indented: 1,3,5"] {
            assert_eq!(parse_chord_line(line, 1).unwrap(), None, "{:?}", line);
        }
    }

    #[test]
    fn test_missing_colon() {
        let err = parse_chord_line("C4 1,3,5", 4).unwrap_err();
        assert_eq!(
            err,
            LyreError::Parse {
                line: 4,
                kind: FormatErrorKind::MissingColon
            }
        );
        assert_eq!(err.category(), ErrorCategory::Format);
        assert!(err.to_string().contains("missing ':'"));
    }

    #[test]
    fn test_empty_fundamental() {
        assert_eq!(
            kind_of(parse_chord_line(": 1,3,5", 1)),
            FormatErrorKind::EmptyFundamental
        );
    }

    #[test]
    fn test_invalid_duration_format() {
        for line in [
            "C4: 1, duration=fast",
            "C4: 1, duration=-2",
            "C4: 1, duration=",
            "C4: 1, duration 2",
            "C4: 1, duration=1e3",
        ] {
            assert!(
                matches!(
                    kind_of(parse_chord_line(line, 1)),
                    FormatErrorKind::InvalidDurationFormat(_)
                ),
                "{}",
                line
            );
        }
    }

    #[test]
    fn test_invalid_duration_value() {
        for line in ["C4: 1, duration=0", "C4: 1, duration=0.0", "C4: 1, duration=1.2.3", "C4: 1, duration=."] {
            assert!(
                matches!(
                    kind_of(parse_chord_line(line, 1)),
                    FormatErrorKind::InvalidDurationValue(_)
                ),
                "{}",
                line
            );
        }
    }

    #[test]
    fn test_duration_keyword_needs_word_boundary() {
        let chord = parse_one("C4: 1, durations, duration2, duration=2");
        assert_eq!(chord.intervals, vec!["1", "durations", "duration2"]);
        assert_eq!(chord.duration, 2.0);
    }

    #[test]
    fn test_no_intervals() {
        assert_eq!(
            kind_of(parse_chord_line("C4:", 1)),
            FormatErrorKind::NoIntervalsSpecified
        );
        assert_eq!(
            kind_of(parse_chord_line("C4: duration=2", 1)),
            FormatErrorKind::NoIntervalsSpecified
        );
    }

    #[test]
    fn test_sequence_reports_original_line_numbers() {
        let source = "# progression\nC4: 1,3,5\n\nF4 1,3,5\nG4: 1,3,5";
        assert_eq!(
            parse_chord_sequence(source).unwrap_err(),
            LyreError::Parse {
                line: 4,
                kind: FormatErrorKind::MissingColon
            }
        );
    }

    #[test]
    fn test_empty_sequence() {
        for source in ["", "# comment", "// comment", "\n\n# a\n// b\n"] {
            let err = parse_chord_sequence(source).unwrap_err();
            assert_eq!(err, LyreError::EmptySequence);
            assert_eq!(err.category(), ErrorCategory::EmptyInput);
        }
    }

    #[test]
    fn test_with_front_matter() {
        let source = r#"---
title: Plagal
tempo: 72
base-duration: 0.5
---
F4: 1,3,5
C4: 1,3,5, duration=2"#;
        let sequence = parse_sequence(source).unwrap();
        assert_eq!(sequence.metadata.title, Some("Plagal".to_string()));
        assert_eq!(sequence.metadata.tempo, Some(72.0));
        assert_eq!(sequence.metadata.base_duration, Some(0.5));
        assert_eq!(sequence.chords.len(), 2);
        assert_eq!(sequence.chords[1].duration, 2.0);
    }

    #[test]
    fn test_front_matter_keeps_line_numbers() {
        let source = "---\ntempo: 90\n---\nC4: 1,3,5\nC4: 1,#5";
        let chords = parse_chord_sequence(source).unwrap();
        assert_eq!(chords.len(), 2);

        let source = "---\ntempo: 90\n---\nC4: 1,3,5\nC4 1,5";
        assert_eq!(parse_chord_sequence(source).unwrap_err().line(), Some(5));
    }

    #[test]
    fn test_front_matter_errors() {
        let unterminated = "---\ntempo: 90\nC4: 1,3,5";
        assert!(matches!(
            parse_sequence(unterminated).unwrap_err(),
            LyreError::MetadataError(_)
        ));

        let negative = "---\ntempo: -5\n---\nC4: 1,3,5";
        assert!(matches!(
            parse_sequence(negative).unwrap_err(),
            LyreError::MetadataError(_)
        ));

        let not_a_number = "---\ntempo: fast\n---\nC4: 1,3,5";
        assert!(matches!(
            parse_sequence(not_a_number).unwrap_err(),
            LyreError::MetadataError(_)
        ));
    }

    #[test]
    fn test_front_matter_without_chords() {
        assert_eq!(
            parse_sequence("---\ntitle: Nothing\n---\n# only comments").unwrap_err(),
            LyreError::EmptySequence
        );
    }

    #[test]
    fn test_validate_chord() {
        let good = ParsedChord::new("C4", vec!["1".to_string()], 1.0);
        assert!(validate_chord(&good).is_ok());

        let no_fundamental = ParsedChord::new(" ", vec!["1".to_string()], 1.0);
        assert_eq!(
            validate_chord(&no_fundamental).unwrap_err(),
            LyreError::InvalidChord(FormatErrorKind::EmptyFundamental)
        );

        let no_intervals = ParsedChord::new("C4", vec![], 1.0);
        assert_eq!(
            validate_chord(&no_intervals).unwrap_err(),
            LyreError::InvalidChord(FormatErrorKind::NoIntervalsSpecified)
        );

        for duration in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let chord = ParsedChord::new("C4", vec!["1".to_string()], duration);
            assert!(matches!(
                validate_chord(&chord).unwrap_err(),
                LyreError::InvalidChord(FormatErrorKind::InvalidDurationValue(_))
            ));
        }
    }
}
