//! Standard MIDI File model: header, tracks, events.

use super::writer::ByteWriter;

/// Ticks per quarter note for every file this crate writes.
pub const TICKS_PER_QUARTER: u16 = 480;

const END_OF_TRACK: [u8; 3] = [0xFF, 0x2F, 0x00];

/// A track event: delta time in ticks plus the raw status/data bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub delta_ticks: u32,
    pub bytes: Vec<u8>,
}

impl Event {
    pub fn note_on(delta_ticks: u32, channel: u8, key: u8, velocity: u8) -> Self {
        Self {
            delta_ticks,
            bytes: vec![0x90 | (channel & 0x0F), key & 0x7F, velocity & 0x7F],
        }
    }

    pub fn note_off(delta_ticks: u32, channel: u8, key: u8) -> Self {
        Self {
            delta_ticks,
            bytes: vec![0x80 | (channel & 0x0F), key & 0x7F, 0x00],
        }
    }

    /// 14-bit pitch bend, 8192 = center. Sent LSB first.
    pub fn pitch_bend(delta_ticks: u32, channel: u8, value: u16) -> Self {
        Self {
            delta_ticks,
            bytes: vec![
                0xE0 | (channel & 0x0F),
                (value & 0x7F) as u8,
                ((value >> 7) & 0x7F) as u8,
            ],
        }
    }

    /// Set-tempo meta event, microseconds per quarter note (24 bits).
    pub fn tempo(delta_ticks: u32, micros_per_quarter: u32) -> Self {
        let [_, a, b, c] = micros_per_quarter.to_be_bytes();
        Self {
            delta_ticks,
            bytes: vec![0xFF, 0x51, 0x03, a, b, c],
        }
    }

    pub fn end_of_track(delta_ticks: u32) -> Self {
        Self {
            delta_ticks,
            bytes: END_OF_TRACK.to_vec(),
        }
    }

    pub fn is_end_of_track(&self) -> bool {
        self.bytes == END_OF_TRACK
    }
}

/// An ordered event list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    events: Vec<Event>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Terminate the track, appending end-of-track unless it's already there.
    pub fn close(mut self) -> Self {
        if !self.events.last().map_or(false, Event::is_end_of_track) {
            self.events.push(Event::end_of_track(0));
        }
        self
    }

    fn encode_body(&self) -> Vec<u8> {
        let mut body = ByteWriter::with_capacity(self.events.len() * 4);
        for event in &self.events {
            body.write_vlq(event.delta_ticks);
            body.write_bytes(&event.bytes);
        }
        body.finish()
    }
}

/// Header fields plus tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiFile {
    pub format: u16,
    pub division: u16,
    tracks: Vec<Track>,
}

impl MidiFile {
    /// Format 1 (simultaneous tracks), 480 ticks per quarter note.
    pub fn multi_track() -> Self {
        Self {
            format: 1,
            division: TICKS_PER_QUARTER,
            tracks: Vec::new(),
        }
    }

    /// Add a track; it is closed with end-of-track if needed.
    pub fn push_track(&mut self, track: Track) {
        self.tracks.push(track.close());
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Serialize header and track chunks.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = ByteWriter::new();

        let mut header = ByteWriter::with_capacity(6);
        header.write_u16(self.format);
        header.write_u16(self.tracks.len() as u16);
        header.write_u16(self.division);
        out.write_chunk(b"MThd", &header.finish());

        for track in &self.tracks {
            out.write_chunk(b"MTrk", &track.encode_body());
        }

        out.finish()
    }
}
