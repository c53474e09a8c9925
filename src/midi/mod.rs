//! # MIDI Module
//!
//! Export chord sequences as Standard MIDI Files (SMF).
//!
//! ## Purpose
//! Encodes chords that are already resolved to frequencies. Two renderings
//! come from the same chord list:
//! 1. **Pythagorean** - nearest MIDI note plus a pitch bend for the deviation
//! 2. **Equal temperament** - nearest MIDI note only, as a reference
//!
//! ## Sub-modules
//! - `writer` - ByteWriter: big-endian integers, VLQ, chunk framing
//! - `smf` - Event, Track, MidiFile (header + track chunks)
//! - `encoder` - Frequency to note/bend mapping and the two-track layout
//!
//! ## File Layout
//! ```text
//! MThd  format 1, 2 tracks, 480 ticks per quarter
//! MTrk  track 0: tempo (FF 51 03 tt tt tt), end of track
//! MTrk  track 1: per chord
//!         [bend] note-on ... (delta 0, channel = note index, max 15)
//!         note-off (delta = chord ticks), note-off (delta 0) ...
//!       end of track
//! ```
//!
//! ## Pitch Bend Contract
//! Bend values assume a ±200 cent range. Set the synth's pitch bend range
//! to 2 semitones or the Pythagorean file will be out of tune.
//!
//! ## Example
//! ```rust
//! use lyre::midi::{generate_pythagorean_midi, MidiChord};
//!
//! let chords = vec![MidiChord::new(vec![261.63, 331.12, 392.44], 2.0)];
//! let bytes = generate_pythagorean_midi(&chords, 1.0, 120.0);
//!
//! assert_eq!(&bytes[..4], b"MThd");
//! assert_eq!(&bytes[bytes.len() - 3..], &[0xFF, 0x2F, 0x00]);
//! ```

mod encoder;
mod smf;
mod writer;


pub use encoder::{
    build_midi_file, duration_ticks, frequency_to_midi, generate_equal_temperament_midi,
    generate_midi, generate_pythagorean_midi, pitch_bend_value, tempo_micros, MidiChord,
    MidiPitch, TuningMode, BEND_THRESHOLD_CENTS, MAX_CHANNEL, PITCH_BEND_CENTER,
    PITCH_BEND_RANGE_CENTS, VELOCITY,
};
pub use smf::{Event, MidiFile, Track, TICKS_PER_QUARTER};
pub use writer::ByteWriter;
