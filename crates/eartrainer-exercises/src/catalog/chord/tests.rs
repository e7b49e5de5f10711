use super::*;
use crate::rng::create_rng;
use crate::test_support::{overrides, store};
use eartrainer_theory::Note;
use pretty_assertions::assert_eq;
use serde_json::json;

fn by_id(id: &str) -> Box<dyn Exercise> {
    all_exercises()
        .into_iter()
        .find(|e| e.id() == id)
        .unwrap_or_else(|| panic!("missing {id}"))
}

fn names(notes: &[Note]) -> Vec<String> {
    notes.iter().map(|n| n.to_string()).collect()
}

#[test]
fn test_chord_metadata() {
    let exercise = by_id("all_triad_types");
    let meta = exercise.metadata();
    assert_eq!(meta.name, "Major, Minor, Diminished and Augmented Recognition");
    assert_eq!(meta.difficulty, 3);
    assert_eq!(meta.category, "chords");
    assert_eq!(meta.prerequisites, vec!["major_vs_minor_chords"]);
    assert_eq!(meta.tags, vec!["chords", "major", "minor", "diminished", "augmented"]);
    assert_eq!(
        meta.description,
        "Listen to a triad and identify its quality: major, minor, diminished, or augmented."
    );
}

#[test]
fn test_forced_minor_chord() {
    let (_dir, audio) = store();
    let exercise = by_id("major_minor_triads");
    let data = exercise
        .generate(
            &overrides(json!({"root_note": "A", "chord_type": "minor", "octave": 3})),
            &mut create_rng(1),
            &audio,
        )
        .unwrap();
    assert_eq!(data.correct_answer, "Minor");
    assert_eq!(data.options, vec!["Major", "Minor"]);
    assert_eq!(data.key, "A Minor");
    let ExerciseContext::Chord(ctx) = &data.context else {
        panic!("wrong context family");
    };
    assert_eq!(ctx.chord_type, "minor");
    assert_eq!(names(&ctx.chord_notes), vec!["A-3", "C-4", "E-4"]);

    let result = exercise.check_answer("minor", &data.context).unwrap();
    assert!(result.is_correct);
    assert_eq!(result.feedback, "Correct! This is a Minor chord.");
    let result = exercise.check_answer("Major", &data.context).unwrap();
    assert!(!result.is_correct);
    assert_eq!(result.feedback, "Incorrect. This is a Minor chord.");
}

#[test]
fn test_suspended_tokens_are_case_sensitive() {
    let (_dir, audio) = store();
    let exercise = by_id("suspended_chords");
    let data = exercise
        .generate(
            &overrides(json!({"root_note": "C", "chord_type": "3m"})),
            &mut create_rng(2),
            &audio,
        )
        .unwrap();
    assert_eq!(data.options, vec!["sus2", "sus4", "3m", "3M"]);
    assert_eq!(data.correct_answer, "3m");
    assert!(exercise.check_answer("3m", &data.context).unwrap().is_correct);
    assert!(!exercise.check_answer("3M", &data.context).unwrap().is_correct);
}

#[test]
fn test_sus_chord_notes() {
    let (_dir, audio) = store();
    let exercise = by_id("suspended_chords");
    let data = exercise
        .generate(
            &overrides(json!({"root_note": "D", "chord_type": "sus4", "octave": 4})),
            &mut create_rng(2),
            &audio,
        )
        .unwrap();
    let ExerciseContext::Chord(ctx) = &data.context else {
        panic!("wrong context family");
    };
    assert_eq!(names(&ctx.chord_notes), vec!["D-4", "G-4", "A-4"]);
}

#[test]
fn test_bad_overrides_ignored() {
    let (_dir, audio) = store();
    let exercise = by_id("major_minor_triads");
    let data = exercise
        .generate(
            &overrides(json!({
                "chord_type": "augmented",
                "octave": 9,
                "chord_probabilities": {"major": 0.9, "minor": 0.9}
            })),
            &mut create_rng(4),
            &audio,
        )
        .unwrap();
    let ExerciseContext::Chord(ctx) = &data.context else {
        panic!("wrong context family");
    };
    assert_eq!(ctx.octave, 4);
    assert!(ctx.chord_type == "major" || ctx.chord_type == "minor");
}

#[test]
fn test_chord_probabilities_respected() {
    let (_dir, audio) = store();
    let exercise = by_id("all_triad_types");
    let table = overrides(json!({
        "root_note": "C",
        "chord_probabilities": {"major": 0.0, "minor": 0.0, "diminished": 1.0, "augmented": 0.0}
    }));
    let mut rng = create_rng(8);
    for _ in 0..4 {
        let data = exercise.generate(&table, &mut rng, &audio).unwrap();
        assert_eq!(data.correct_answer, "Diminished");
    }
}

#[test]
fn test_fifth_quality_diminished() {
    let (_dir, audio) = store();
    let exercise = FifthQualityExercise::new();
    let data = exercise
        .generate(
            &overrides(json!({"root_note": "C", "fifth_quality": "5dim", "octave": 4})),
            &mut create_rng(1),
            &audio,
        )
        .unwrap();
    assert_eq!(data.correct_answer, "5dim");
    assert_eq!(data.options, vec!["5dim", "5J", "5aug"]);
    assert_eq!(data.key, "C Major Triad (5dim)");
    let ExerciseContext::FifthQuality(ctx) = &data.context else {
        panic!("wrong context family");
    };
    assert_eq!(names(&ctx.triad_notes), vec!["C-4", "E-4", "F#-4"]);
    assert_eq!(ctx.third_quality, ChordQuality::Major);

    let result = exercise.check_answer("5dim", &data.context).unwrap();
    assert!(result.is_correct);
    assert_eq!(result.feedback, "Correct! Diminished fifth adds strong tension.");
    let result = exercise.check_answer("5J", &data.context).unwrap();
    assert!(!result.is_correct);
    assert_eq!(result.feedback, "Incorrect. The fifth quality is 5dim.");
}

#[test]
fn test_fifth_quality_octave_range() {
    let (_dir, audio) = store();
    let exercise = FifthQualityExercise::new();
    let data = exercise
        .generate(&overrides(json!({"octave": 7})), &mut create_rng(6), &audio)
        .unwrap();
    let ExerciseContext::FifthQuality(ctx) = &data.context else {
        panic!("wrong context family");
    };
    assert_eq!(ctx.octave, 4);
    assert!(ctx.root.is_natural());
}

#[test]
fn test_chord_hints_follow_choices() {
    let sus = by_id("suspended_chords");
    assert!(sus.hints().iter().any(|h| h.contains("Suspended")));
    let triads = by_id("major_minor_triads");
    assert!(!triads.hints().iter().any(|h| h.contains("Suspended")));
}
