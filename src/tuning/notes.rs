//! Note names and fundamentals.
//!
//! Note names follow scientific pitch notation (`C4`, `F#3`, `Bb-1`) and are
//! resolved in 12-tone equal temperament against A4 = 440 Hz.

use crate::error::{LyreError, SymbolErrorKind};

/// Concert pitch reference.
pub const A4_FREQUENCY: f64 = 440.0;

const A_PITCH_CLASS: i64 = 9;

/// Canonical spellings, indexed by semitone above C.
const PITCH_CLASSES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Map flat spellings onto their canonical sharp spelling.
fn canonical_spelling(name: &str) -> &str {
    match name {
        "Db" => "C#",
        "Eb" => "D#",
        "Gb" => "F#",
        "Ab" => "G#",
        "Bb" => "A#",
        other => other,
    }
}

/// Semitone above C for a letter plus optional accidental, if the spelling is known.
pub fn pitch_class(name: &str) -> Option<u8> {
    let canonical = canonical_spelling(name);
    PITCH_CLASSES
        .iter()
        .position(|&p| p == canonical)
        .map(|idx| idx as u8)
}

/// Split a note token into (letter+accidental, octave) when it matches
/// `[A-G][#b]?-?\d+`.
fn split_note(note: &str) -> Option<(&str, &str)> {
    let bytes = note.as_bytes();
    if !matches!(bytes.first(), Some(b'A'..=b'G')) {
        return None;
    }
    let name_len = if matches!(bytes.get(1), Some(b'#') | Some(b'b')) { 2 } else { 1 };
    let (name, octave) = note.split_at(name_len);
    let digits = octave.strip_prefix('-').unwrap_or(octave);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((name, octave))
}

/// Frequency of a note name in equal temperament.
///
/// # Examples
/// ```
/// use lyre::tuning::note_name_to_frequency;
///
/// assert_eq!(note_name_to_frequency("A4").unwrap(), 440.0);
/// assert!((note_name_to_frequency("C4").unwrap() - 261.6256).abs() < 0.01);
/// assert_eq!(
///     note_name_to_frequency("C#3").unwrap(),
///     note_name_to_frequency("Db3").unwrap()
/// );
/// ```
///
/// # Errors
/// - `InvalidFormat` when the token isn't `[A-G][#b]?-?\d+`
/// - `InvalidNoteName` for spellings outside the 12-entry table (`E#`, `Cb`, ...)
pub fn note_name_to_frequency(note: &str) -> Result<f64, LyreError> {
    let (name, octave) = split_note(note)
        .ok_or_else(|| SymbolErrorKind::InvalidFormat(note.to_string()))?;
    let pc = pitch_class(name).ok_or_else(|| SymbolErrorKind::InvalidNoteName(note.to_string()))?;
    let octave: i64 = octave
        .parse()
        .map_err(|_| SymbolErrorKind::InvalidFormat(note.to_string()))?;

    let semitones = octave
        .checked_sub(4)
        .and_then(|o| o.checked_mul(12))
        .and_then(|s| s.checked_add(pc as i64 - A_PITCH_CLASS))
        .ok_or_else(|| SymbolErrorKind::InvalidFormat(note.to_string()))?;
    Ok(A4_FREQUENCY * 2.0_f64.powf(semitones as f64 / 12.0))
}

/// Resolve a fundamental token: a note name first, then a literal frequency in Hz.
///
/// # Examples
/// ```
/// use lyre::tuning::resolve_fundamental;
///
/// assert_eq!(resolve_fundamental("A4").unwrap(), 440.0);
/// assert_eq!(resolve_fundamental("256").unwrap(), 256.0);
/// assert!(resolve_fundamental("H2").is_err());
/// ```
pub fn resolve_fundamental(token: &str) -> Result<f64, LyreError> {
    let token = token.trim();
    if let Ok(freq) = note_name_to_frequency(token) {
        return Ok(freq);
    }
    match token.parse::<f64>() {
        Ok(freq) if freq.is_finite() && freq > 0.0 => Ok(freq),
        _ => Err(SymbolErrorKind::InvalidFundamental(token.to_string()).into()),
    }
}
