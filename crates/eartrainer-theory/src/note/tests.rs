//! Tests for note parsing, MIDI numbers and frequencies.

use pretty_assertions::assert_eq;

use super::*;
use crate::error::TheoryError;

#[test]
fn test_parse_note_formats() {
    assert_eq!(Note::parse("C-4").unwrap(), Note::new(PitchClass::C, 4));
    assert_eq!(Note::parse("C4").unwrap(), Note::new(PitchClass::C, 4));
    assert_eq!(Note::parse("c#-5").unwrap(), Note::new(PitchClass::CSharp, 5));
    assert_eq!(Note::parse("Bb-3").unwrap(), Note::new(PitchClass::ASharp, 3));
    assert_eq!(Note::parse("G").unwrap(), Note::new(PitchClass::G, DEFAULT_OCTAVE));
    assert_eq!(Note::parse("  F#2 ").unwrap(), Note::new(PitchClass::FSharp, 2));
}

#[test]
fn test_parse_normalizes_flats_and_white_key_accidentals() {
    assert_eq!(Note::parse("Db-4").unwrap().to_string(), "C#-4");
    assert_eq!(Note::parse("Fb-4").unwrap().to_string(), "E-4");
    assert_eq!(Note::parse("E#-4").unwrap().to_string(), "F-4");
    assert_eq!(Note::parse("Cb-4").unwrap().to_string(), "B-3");
    assert_eq!(Note::parse("B#-4").unwrap().to_string(), "C-5");
}

#[test]
fn test_parse_clamps_octave() {
    assert_eq!(Note::parse("C-0").unwrap().octave, MIN_OCTAVE);
    assert_eq!(Note::parse("A-12").unwrap().octave, MAX_OCTAVE);
    assert_eq!(Note::parse("B#-99").unwrap(), Note::new(PitchClass::C, MAX_OCTAVE));
}

#[test]
fn test_parse_rejects_oversized_octave() {
    for name in ["C-999999999", "C999", "Bb-2147483647", "g#99999999999999999999"] {
        assert!(
            matches!(Note::parse(name), Err(TheoryError::UnknownNote(_))),
            "{name}"
        );
    }
    assert!(serde_json::from_str::<Note>("\"C-999999999\"").is_err());
}

#[test]
fn test_parse_rejects_garbage() {
    assert!(Note::parse("H-4").is_err());
    assert!(Note::parse("").is_err());
    assert!(Note::parse("C##4").is_err());
    assert_eq!(Note::parse_lenient("nope"), Note::new(PitchClass::C, 4));
}

#[test]
fn test_pitch_class_lookup() {
    assert_eq!(pitch_class_index("C"), 0);
    assert_eq!(pitch_class_index("F#"), 6);
    assert_eq!(pitch_class_index("Gb"), 6);
    assert_eq!(pitch_class_index("b"), 11);
    assert_eq!(pitch_class_index("X"), 0);
    assert_eq!(PitchClass::from_index(-1), PitchClass::B);
    assert_eq!(PitchClass::from_index(25), PitchClass::CSharp);
    assert!(PitchClass::E.is_natural());
    assert!(!PitchClass::DSharp.is_natural());
}

#[test]
fn test_midi_number() {
    assert_eq!(Note::new(PitchClass::C, 4).midi_number(), 60);
    assert_eq!(Note::new(PitchClass::A, 4).midi_number(), 69);
    assert_eq!(Note::new(PitchClass::C, -1).midi_number(), 0);
    assert_eq!(Note::from_midi(61), Note::new(PitchClass::CSharp, 4));
    assert_eq!(Note::from_midi(59), Note::new(PitchClass::B, 3));
}

#[test]
fn test_transpose_carries_octave() {
    let b4 = Note::new(PitchClass::B, 4);
    assert_eq!(b4.transpose(1), Note::new(PitchClass::C, 5));
    assert_eq!(b4.transpose(13), Note::new(PitchClass::C, 6));

    let c4 = Note::new(PitchClass::C, 4);
    assert_eq!(c4.transpose(-1), Note::new(PitchClass::B, 3));
    assert_eq!(c4.transpose(-12), Note::new(PitchClass::C, 3));
    assert_eq!(c4.transpose(0), c4);
}

#[test]
fn test_note_distance() {
    let c4 = Note::new(PitchClass::C, 4);
    let e4 = Note::new(PitchClass::E, 4);
    assert_eq!(note_distance(&c4, &e4), 4);
    assert_eq!(note_distance(&e4, &c4), -4);
    assert_eq!(c4.distance_to(&Note::new(PitchClass::C, 5)), 12);
}

#[test]
fn test_frequencies() {
    assert!((note_to_frequency(&Note::new(PitchClass::A, 4)) - 440.0).abs() < 1e-9);
    assert!((Note::new(PitchClass::A, 3).frequency() - 220.0).abs() < 1e-9);
    assert!((Note::new(PitchClass::C, 4).frequency() - 261.6256).abs() < 0.001);
    assert_eq!(frequency_to_midi(440.0), 69);
    assert_eq!(frequency_to_midi(261.63), 60);
    assert_eq!(frequency_to_midi(midi_to_frequency(37)), 37);
}

#[test]
fn test_notes_in_octave() {
    let chromatic = chromatic_notes_in_octave(3);
    assert_eq!(chromatic.len(), 12);
    assert_eq!(chromatic[0].to_string(), "C-3");
    assert_eq!(chromatic[11].to_string(), "B-3");

    let names: Vec<String> = natural_notes_in_octave(4)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(names, vec!["C-4", "D-4", "E-4", "F-4", "G-4", "A-4", "B-4"]);
}

#[test]
fn test_note_serde_uses_dashed_name() {
    let note = Note::new(PitchClass::FSharp, 3);
    let json = serde_json::to_string(&note).unwrap();
    assert_eq!(json, "\"F#-3\"");
    let back: Note = serde_json::from_str("\"Gb3\"").unwrap();
    assert_eq!(back, note);
    assert!(serde_json::from_str::<Note>("\"Z9\"").is_err());
}
