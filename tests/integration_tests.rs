//! Integration tests for the lyre pipeline
//!
//! Tests text -> tuning -> MIDI, reading the produced files back with an
//! independent SMF parser.

use lyre::{
    analyze, chord_frequencies, generate_pythagorean_midi, parse_chord_sequence, render,
    ErrorCategory, FormatErrorKind, LyreError, RenderOptions,
};
use midly::num::u15;
use midly::{Format, MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};

const CADENCE: &str = "C4: 1,3,5, duration=2\nF4: 1,3,5, duration=2\n";

fn note_ons(smf: &Smf) -> Vec<(u8, u8)> {
    smf.tracks[1]
        .iter()
        .filter_map(|e| match e.kind {
            TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn { key, .. },
            } => Some((channel.as_int(), key.as_int())),
            _ => None,
        })
        .collect()
}

fn bends(smf: &Smf) -> Vec<(u8, u16)> {
    smf.tracks[1]
        .iter()
        .filter_map(|e| match e.kind {
            TrackEventKind::Midi {
                channel,
                message: MidiMessage::PitchBend { bend },
            } => Some((channel.as_int(), bend.0.as_int())),
            _ => None,
        })
        .collect()
}

fn tempo(smf: &Smf) -> Option<u32> {
    smf.tracks[0].iter().find_map(|e| match e.kind {
        TrackEventKind::Meta(MetaMessage::Tempo(t)) => Some(t.as_int()),
        _ => None,
    })
}

#[test]
fn test_pythagorean_file_reads_back() {
    let rendering = render(CADENCE, &RenderOptions::default()).unwrap();
    let smf = Smf::parse(&rendering.pythagorean).expect("valid SMF");

    assert_eq!(smf.header.format, Format::Parallel);
    assert_eq!(smf.header.timing, Timing::Metrical(u15::new(480)));
    assert_eq!(smf.tracks.len(), 2);
    assert_eq!(tempo(&smf), Some(500_000));

    assert_eq!(
        note_ons(&smf),
        vec![(0, 60), (1, 64), (2, 67), (0, 65), (1, 69), (2, 72)]
    );
    // Roots sit on equal-tempered pitches; thirds and fifths are bent sharp
    assert_eq!(bends(&smf), vec![(1, 8512), (2, 8272), (1, 8512), (2, 8272)]);

    for track in &smf.tracks {
        assert!(matches!(
            track.last().map(|e| e.kind),
            Some(TrackEventKind::Meta(MetaMessage::EndOfTrack))
        ));
    }
}

#[test]
fn test_note_off_timing() {
    let rendering = render(CADENCE, &RenderOptions::default()).unwrap();
    let smf = Smf::parse(&rendering.pythagorean).unwrap();

    let offs: Vec<u32> = smf.tracks[1]
        .iter()
        .filter(|e| {
            matches!(
                e.kind,
                TrackEventKind::Midi {
                    message: MidiMessage::NoteOff { .. },
                    ..
                }
            )
        })
        .map(|e| e.delta.as_int())
        .collect();
    // duration 2 * 1 s * 960 ticks/s
    assert_eq!(offs, vec![1920, 0, 0, 1920, 0, 0]);
}

#[test]
fn test_equal_temperament_file_reads_back() {
    let rendering = render(CADENCE, &RenderOptions::default()).unwrap();
    let smf = Smf::parse(&rendering.equal_temperament).unwrap();

    assert_eq!(smf.tracks.len(), 2);
    assert!(bends(&smf).is_empty());
    assert_eq!(
        note_ons(&smf),
        vec![(0, 60), (1, 64), (2, 67), (0, 65), (1, 69), (2, 72)]
    );
}

#[test]
fn test_front_matter_and_overrides() {
    let source = format!("---\ntempo: 90\nbase-duration: 0.5\n---\n{}", CADENCE);

    let rendering = render(&source, &RenderOptions::default()).unwrap();
    let smf = Smf::parse(&rendering.pythagorean).unwrap();
    assert_eq!(tempo(&smf), Some(666_667));
    // duration 2 * 0.5 s * 720 ticks/s
    assert_eq!(smf.tracks[1][5].delta.as_int(), 720);

    let options = RenderOptions {
        tempo: Some(60.0),
        base_duration: None,
    };
    let rendering = render(&source, &options).unwrap();
    let smf = Smf::parse(&rendering.pythagorean).unwrap();
    assert_eq!(tempo(&smf), Some(1_000_000));
    assert_eq!(rendering.settings.base_duration, 0.5);
}

#[test]
fn test_frequency_fundamental() {
    let analysis = analyze("# concert A\n440: 1, 5, 8").unwrap();
    let result = &analysis.chords[0].result;
    assert_eq!(result.fundamental_freq, 440.0);
    assert_eq!(result.pythagorean_frequencies(), vec![440.0, 660.0, 880.0]);
}

#[test]
fn test_parse_examples() {
    let chords = parse_chord_sequence("C4: 1,3,5, duration=2").unwrap();
    assert_eq!(chords[0].fundamental, "C4");
    assert_eq!(chords[0].intervals, vec!["1", "3", "5"]);
    assert_eq!(chords[0].duration, 2.0);

    let chords = parse_chord_sequence("A3: 1,b3,5, duration=1.5").unwrap();
    assert_eq!(chords[0].duration, 1.5);
    assert_eq!(chords[0].intervals, vec!["1", "b3", "5"]);
}

#[test]
fn test_errors_surface_with_line_numbers() {
    let err = render("C4: 1,3,5\n\nG4 1,3,5", &RenderOptions::default()).unwrap_err();
    assert_eq!(
        err,
        LyreError::Parse {
            line: 3,
            kind: FormatErrorKind::MissingColon
        }
    );
    assert_eq!(err.to_string(), "Line 3: missing ':' between fundamental and intervals");

    let err = render("# nothing here\n// still nothing", &RenderOptions::default()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::EmptyInput);

    let err = analyze("C4: 1,3,#5").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::UnknownSymbol);

    for source in ["C4: 1, 3000000000", "C999999999999999999: 1,3,5"] {
        let err = analyze(source).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::UnknownSymbol, "{}", source);
    }
}

#[test]
fn test_wide_chord_shares_last_channel() {
    let intervals: Vec<String> = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let result = chord_frequencies("C2", &intervals).unwrap();
    let chord = lyre::midi::MidiChord::pythagorean(&result, 1.0);
    let bytes = generate_pythagorean_midi(&[chord], 1.0, 120.0);
    let smf = Smf::parse(&bytes).unwrap();

    let channels: Vec<u8> = note_ons(&smf).iter().map(|(ch, _)| *ch).collect();
    assert_eq!(channels.len(), 17);
    assert_eq!(&channels[..16], &(0..16).collect::<Vec<u8>>()[..]);
    assert_eq!(channels[16], 15);
}
