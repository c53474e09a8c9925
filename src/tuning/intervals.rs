//! Interval symbols: Pythagorean ratios and equal-temperament semitone counts.
//!
//! Symbols are scale-degree names with an optional accidental (`b7`, `#11`,
//! `13`). Degrees 1-8 must match the base table exactly. Larger degrees are
//! compound intervals: the base degree `((d-1) mod 7)+1` raised by
//! `floor((d-1)/7)` octaves.

use crate::error::{LyreError, SymbolErrorKind};

/// Canonical scale degree within one octave.
///
/// Enharmonic spellings (`#4` and `b5`) are aliases of one variant, so both
/// spellings always share a ratio and a semitone count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degree {
    Unison,
    MinorSecond,
    MajorSecond,
    MinorThird,
    MajorThird,
    Fourth,
    Tritone,
    Fifth,
    MinorSixth,
    MajorSixth,
    MinorSeventh,
    MajorSeventh,
    Octave,
}

impl Degree {
    pub const ALL: [Degree; 13] = [
        Degree::Unison,
        Degree::MinorSecond,
        Degree::MajorSecond,
        Degree::MinorThird,
        Degree::MajorThird,
        Degree::Fourth,
        Degree::Tritone,
        Degree::Fifth,
        Degree::MinorSixth,
        Degree::MajorSixth,
        Degree::MinorSeventh,
        Degree::MajorSeventh,
        Degree::Octave,
    ];

    /// Look up a base symbol, resolving enharmonic aliases.
    pub fn from_symbol(symbol: &str) -> Option<Degree> {
        let degree = match symbol {
            "1" => Degree::Unison,
            "b2" => Degree::MinorSecond,
            "2" => Degree::MajorSecond,
            "b3" => Degree::MinorThird,
            "3" => Degree::MajorThird,
            "4" => Degree::Fourth,
            "#4" | "b5" => Degree::Tritone,
            "5" => Degree::Fifth,
            "b6" => Degree::MinorSixth,
            "6" => Degree::MajorSixth,
            "b7" => Degree::MinorSeventh,
            "7" => Degree::MajorSeventh,
            "8" => Degree::Octave,
            _ => return None,
        };
        Some(degree)
    }

    /// Exact Pythagorean ratio as (numerator, denominator).
    pub fn fraction(self) -> (u32, u32) {
        match self {
            Degree::Unison => (1, 1),
            Degree::MinorSecond => (256, 243),
            Degree::MajorSecond => (9, 8),
            Degree::MinorThird => (32, 27),
            Degree::MajorThird => (81, 64),
            Degree::Fourth => (4, 3),
            Degree::Tritone => (729, 512),
            Degree::Fifth => (3, 2),
            Degree::MinorSixth => (128, 81),
            Degree::MajorSixth => (27, 16),
            Degree::MinorSeventh => (16, 9),
            Degree::MajorSeventh => (243, 128),
            Degree::Octave => (2, 1),
        }
    }

    pub fn ratio(self) -> f64 {
        let (num, den) = self.fraction();
        num as f64 / den as f64
    }

    /// Semitones above the fundamental in 12-tone equal temperament.
    pub fn semitones(self) -> u32 {
        match self {
            Degree::Unison => 0,
            Degree::MinorSecond => 1,
            Degree::MajorSecond => 2,
            Degree::MinorThird => 3,
            Degree::MajorThird => 4,
            Degree::Fourth => 5,
            Degree::Tritone => 6,
            Degree::Fifth => 7,
            Degree::MinorSixth => 8,
            Degree::MajorSixth => 9,
            Degree::MinorSeventh => 10,
            Degree::MajorSeventh => 11,
            Degree::Octave => 12,
        }
    }
}

/// An interval symbol resolved to a base degree plus whole octaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub degree: Degree,
    pub octaves: u32,
}

impl Interval {
    /// Resolve a symbol such as `5`, `b7`, `#11` or `15`.
    ///
    /// # Examples
    /// ```
    /// use lyre::tuning::{Degree, Interval};
    ///
    /// let eleventh = Interval::parse("#11").unwrap();
    /// assert_eq!(eleventh.degree, Degree::Tritone);
    /// assert_eq!(eleventh.octaves, 1);
    ///
    /// // Degrees up to 8 never fall through to the compound rule
    /// assert!(Interval::parse("#5").is_err());
    /// ```
    pub fn parse(symbol: &str) -> Result<Interval, LyreError> {
        if let Some(degree) = Degree::from_symbol(symbol) {
            return Ok(Interval { degree, octaves: 0 });
        }

        let unknown = || LyreError::from(SymbolErrorKind::UnknownInterval(symbol.to_string()));

        let (accidental, digits) = match symbol.as_bytes().first() {
            Some(b'#') | Some(b'b') => symbol.split_at(1),
            _ => ("", symbol),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(unknown());
        }
        let number: u32 = digits.parse().map_err(|_| unknown())?;
        if number <= 8 {
            return Err(unknown());
        }

        let octaves = (number - 1) / 7;
        let base = (number - 1) % 7 + 1;
        let degree = Degree::from_symbol(&format!("{}{}", accidental, base)).ok_or_else(unknown)?;

        // Semitone count must fit in u32.
        octaves
            .checked_mul(12)
            .and_then(|s| s.checked_add(degree.semitones()))
            .ok_or_else(unknown)?;

        Ok(Interval { degree, octaves })
    }

    pub fn ratio(&self) -> f64 {
        self.degree.ratio() * octave_factor(self.octaves)
    }

    pub fn semitones(&self) -> u32 {
        self.degree
            .semitones()
            .saturating_add(self.octaves.saturating_mul(12))
    }
}

fn octave_factor(octaves: u32) -> f64 {
    2.0_f64.powi(octaves.min(i32::MAX as u32) as i32)
}

/// Pythagorean frequency ratio for an interval symbol.
///
/// # Examples
/// ```
/// use lyre::tuning::interval_ratio;
///
/// assert_eq!(interval_ratio("5").unwrap(), 1.5);
/// assert_eq!(interval_ratio("3").unwrap(), 81.0 / 64.0);
/// assert_eq!(interval_ratio("9").unwrap(), 9.0 / 8.0 * 2.0);
/// ```
pub fn interval_ratio(symbol: &str) -> Result<f64, LyreError> {
    Ok(Interval::parse(symbol)?.ratio())
}

/// Semitone count for an interval symbol, compound intervals included.
pub fn equal_temperament_semitones(symbol: &str) -> Result<u32, LyreError> {
    Ok(Interval::parse(symbol)?.semitones())
}

/// Equal-temperament frequency ratio `2^(semitones/12)` for an interval symbol.
pub fn equal_temperament_ratio(symbol: &str) -> Result<f64, LyreError> {
    let semitones = equal_temperament_semitones(symbol)?;
    Ok(2.0_f64.powf(semitones as f64 / 12.0))
}
