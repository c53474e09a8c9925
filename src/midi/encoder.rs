//! Chord sequences to SMF bytes.

use log::{debug, trace, warn};

use super::smf::{Event, MidiFile, Track, TICKS_PER_QUARTER};
use crate::tuning::{ChordResult, A4_FREQUENCY};

/// Note-on velocity for every note.
pub const VELOCITY: u8 = 80;

/// Center of the 14-bit pitch bend range.
pub const PITCH_BEND_CENTER: u16 = 8192;

const PITCH_BEND_MAX: f64 = 16383.0;

/// Full-scale bend in cents (±2 semitones). The receiving synth must match.
pub const PITCH_BEND_RANGE_CENTS: f64 = 200.0;

/// Deviations at or below this many cents play without a bend message.
pub const BEND_THRESHOLD_CENTS: f64 = 0.5;

/// Highest MIDI channel index; later notes in a chord share it.
pub const MAX_CHANNEL: u8 = 15;

/// How frequencies are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuningMode {
    /// Nearest MIDI note plus a per-channel pitch bend for the remainder.
    Pythagorean,
    /// Nearest MIDI note only.
    EqualTemperament,
}

/// Nearest MIDI note and the remaining deviation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MidiPitch {
    pub note: i32,
    /// `(exact - note) * 100`, within ±50 cents.
    pub cents: f64,
}

/// `69 + 12*log2(freq/440)`, rounded to the nearest note.
///
/// # Examples
/// ```
/// use lyre::midi::frequency_to_midi;
///
/// let a4 = frequency_to_midi(440.0);
/// assert_eq!(a4.note, 69);
/// assert_eq!(a4.cents, 0.0);
///
/// let fifth = frequency_to_midi(660.0);
/// assert_eq!(fifth.note, 76);
/// assert!((fifth.cents - 1.955).abs() < 0.001);
/// ```
pub fn frequency_to_midi(freq: f64) -> MidiPitch {
    let exact = 69.0 + 12.0 * (freq / A4_FREQUENCY).log2();
    let note = exact.round();
    MidiPitch {
        note: note as i32,
        cents: (exact - note) * 100.0,
    }
}

/// 14-bit pitch bend value for a deviation in cents, clamped to `[0, 16383]`.
pub fn pitch_bend_value(cents: f64) -> u16 {
    let center = PITCH_BEND_CENTER as f64;
    let bend = (center + cents / PITCH_BEND_RANGE_CENTS * center).round();
    bend.clamp(0.0, PITCH_BEND_MAX) as u16
}

/// A chord reduced to what the encoder needs.
#[derive(Debug, Clone, PartialEq)]
pub struct MidiChord {
    pub frequencies: Vec<f64>,
    /// Multiplier of the base duration.
    pub duration: f64,
}

impl MidiChord {
    pub fn new(frequencies: Vec<f64>, duration: f64) -> Self {
        Self {
            frequencies,
            duration,
        }
    }

    pub fn pythagorean(result: &ChordResult, duration: f64) -> Self {
        Self::new(result.pythagorean_frequencies(), duration)
    }

    pub fn equal_temperament(result: &ChordResult, duration: f64) -> Self {
        Self::new(result.equal_temperament_frequencies(), duration)
    }
}

/// Ticks for a chord lasting `duration * base_duration` seconds at `tempo` BPM.
pub fn duration_ticks(duration: f64, base_duration: f64, tempo: f64) -> u32 {
    let ticks_per_second = TICKS_PER_QUARTER as f64 * tempo / 60.0;
    (duration * base_duration * ticks_per_second).round() as u32
}

/// Microseconds per quarter note, limited to the 24 bits the meta event holds.
pub fn tempo_micros(tempo: f64) -> u32 {
    (60_000_000.0 / tempo).round().clamp(0.0, 0xFF_FFFF as f64) as u32
}

fn tempo_track(tempo: f64) -> Track {
    let mut track = Track::new();
    track.push(Event::tempo(0, tempo_micros(tempo)));
    track
}

fn chord_track(chords: &[MidiChord], base_duration: f64, tempo: f64, mode: TuningMode) -> Track {
    let mut track = Track::new();

    for (chord_idx, chord) in chords.iter().enumerate() {
        if chord.frequencies.len() > MAX_CHANNEL as usize + 1 {
            warn!(
                "Chord {} has {} notes; notes past the 16th share channel {}",
                chord_idx + 1,
                chord.frequencies.len(),
                MAX_CHANNEL
            );
        }

        let mut keys = Vec::with_capacity(chord.frequencies.len());
        for (note_idx, &freq) in chord.frequencies.iter().enumerate() {
            let channel = note_idx.min(MAX_CHANNEL as usize) as u8;
            let pitch = frequency_to_midi(freq);
            // Out-of-range notes are the caller's problem; keep the data byte 7-bit.
            let key = (pitch.note & 0x7F) as u8;

            if mode == TuningMode::Pythagorean && pitch.cents.abs() > BEND_THRESHOLD_CENTS {
                let bend = pitch_bend_value(pitch.cents);
                trace!(
                    "Chord {} note {}: {:.3} Hz -> key {} bend {} ({:+.2} cents)",
                    chord_idx + 1,
                    note_idx,
                    freq,
                    key,
                    bend,
                    pitch.cents
                );
                track.push(Event::pitch_bend(0, channel, bend));
            }
            track.push(Event::note_on(0, channel, key, VELOCITY));
            keys.push((channel, key));
        }

        let ticks = duration_ticks(chord.duration, base_duration, tempo);
        debug!(
            "Chord {}: {} notes, {} ticks",
            chord_idx + 1,
            keys.len(),
            ticks
        );

        for (note_idx, &(channel, key)) in keys.iter().enumerate() {
            let delta = if note_idx == 0 { ticks } else { 0 };
            track.push(Event::note_off(delta, channel, key));
        }
    }

    track
}

/// Build the two-track file model for `chords`.
pub fn build_midi_file(
    chords: &[MidiChord],
    base_duration: f64,
    tempo: f64,
    mode: TuningMode,
) -> MidiFile {
    let mut file = MidiFile::multi_track();
    file.push_track(tempo_track(tempo));
    file.push_track(chord_track(chords, base_duration, tempo, mode));
    file
}

/// Encode chords as a Standard MIDI File in the given tuning mode.
///
/// Inputs are not validated: bad frequencies or durations produce a
/// structurally valid file with wrong notes or timing.
pub fn generate_midi(chords: &[MidiChord], base_duration: f64, tempo: f64, mode: TuningMode) -> Vec<u8> {
    build_midi_file(chords, base_duration, tempo, mode).to_bytes()
}

/// Pythagorean rendering: each note gets its own channel and pitch bend.
///
/// The receiving synth's bend range must be ±2 semitones.
pub fn generate_pythagorean_midi(chords: &[MidiChord], base_duration: f64, tempo: f64) -> Vec<u8> {
    generate_midi(chords, base_duration, tempo, TuningMode::Pythagorean)
}

/// Equal-temperament reference rendering, no pitch bend.
pub fn generate_equal_temperament_midi(
    chords: &[MidiChord],
    base_duration: f64,
    tempo: f64,
) -> Vec<u8> {
    generate_midi(chords, base_duration, tempo, TuningMode::EqualTemperament)
}
