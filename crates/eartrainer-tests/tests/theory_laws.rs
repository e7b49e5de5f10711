//! Universal laws of the theory layer.

use eartrainer_theory::interval::{aliases_for_semitones, notation_for_semitones};
use eartrainer_theory::{build_chord, build_fifth_quality_chord, ChordQuality, FifthQuality, Interval, Note, PitchClass};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn any_pitch_class() -> impl Strategy<Value = PitchClass> {
    (0usize..12).prop_map(|i| PitchClass::ALL[i])
}

fn any_quality() -> impl Strategy<Value = ChordQuality> {
    (0usize..ChordQuality::ALL.len()).prop_map(|i| ChordQuality::ALL[i])
}

proptest! {
    #[test]
    fn transpose_round_trips(pc in any_pitch_class(), octave in 1i32..=8, n in -24i32..=24) {
        let note = Note::new(pc, octave);
        prop_assert_eq!(note.transpose(n).transpose(-n), note);
    }

    #[test]
    fn transpose_moves_midi_by_semitones(pc in any_pitch_class(), octave in 1i32..=8, n in -24i32..=24) {
        let note = Note::new(pc, octave);
        prop_assert_eq!(note.transpose(n).midi_number(), note.midi_number() + n);
    }

    #[test]
    fn chord_tones_never_fall_below_root(pc in any_pitch_class(), quality in any_quality(), octave in 1i32..=7) {
        let chord = build_chord(pc, quality, octave);
        let root = chord.root.midi_number();
        prop_assert_eq!(chord.notes[0].midi_number(), root);
        for note in &chord.notes {
            prop_assert!(note.midi_number() >= root, "{} below {}", note, chord.root);
        }
    }

    #[test]
    fn chord_tones_match_quality_pattern(pc in any_pitch_class(), quality in any_quality(), octave in 1i32..=7) {
        let chord = build_chord(pc, quality, octave);
        let offsets: Vec<i32> = chord.notes.iter().map(|n| n.midi_number() - chord.root.midi_number()).collect();
        prop_assert_eq!(offsets.as_slice(), quality.intervals());
    }
}

#[test]
fn interval_tokens_round_trip_through_semitones() {
    for interval in Interval::ALL {
        let semitones = interval.semitones();
        let token = notation_for_semitones(semitones).expect("every table interval fits in an octave");
        let back: Interval = token.parse().unwrap();
        assert_eq!(back.semitones(), semitones, "{}", interval.name());
        assert!(aliases_for_semitones(semitones).contains(&interval.notation()));
    }
}

#[test]
fn tritone_spellings_share_six_semitones() {
    let aug: Interval = "augmented_fourth".parse().unwrap();
    let dim: Interval = "diminished_fifth".parse().unwrap();
    assert_eq!(aug.semitones(), 6);
    assert_eq!(dim.semitones(), 6);
    assert_ne!(aug.notation(), dim.notation());
}

#[test]
fn diminished_fifth_triad_keeps_major_third() {
    let chord = build_fifth_quality_chord(PitchClass::C, FifthQuality::Diminished, 4);
    let offsets: Vec<i32> = chord.notes.iter().map(|n| n.midi_number() - chord.root.midi_number()).collect();
    assert_eq!(offsets, vec![0, 4, 6]);
    assert_eq!(chord.notes[1].pitch_class, PitchClass::E);
    assert_eq!(chord.notes[2].pitch_class, PitchClass::FSharp);
}
