use super::*;
use crate::context::IntervalContext;
use crate::rng::create_rng;
use crate::test_support::{overrides, store};
use eartrainer_theory::PitchClass;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_melody_walk_starts_and_ends_home() {
    let mut rng = create_rng(3);
    for length in 4..=8 {
        let walk = melody_walk(&mut rng, length);
        assert_eq!(walk.len(), length);
        assert_eq!(walk[0], 0);
        assert_eq!(walk[length - 1], 0);
        assert!(walk.iter().all(|&i| i <= 7));
        for pair in walk[..length - 1].windows(2) {
            assert!((pair[1] as i32 - pair[0] as i32).abs() <= 2, "{:?}", walk);
        }
    }
}

#[test]
fn test_find_home_note_in_fixed_key() {
    let (_dir, audio) = store();
    let exercise = FindHomeNoteExercise::new();
    let mut rng = create_rng(11);
    let data = exercise
        .generate(&overrides(json!({"key": "F"})), &mut rng, &audio)
        .unwrap();

    assert_eq!(data.key, "Key: F - Find Home");
    assert_eq!(data.correct_answer, "F-4");
    assert_eq!(data.scale, Key::F.scale_names());
    assert!(data.options.contains(&"F-4".to_string()));
    assert!(data.options.len() <= 4);
    let mut unique = data.options.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), data.options.len());

    let ExerciseContext::HomeNote(context) = &data.context else {
        panic!("wrong context family");
    };
    assert_eq!(context.melody_notes.len(), 6);
    assert_eq!(context.melody_notes.first().map(String::as_str), Some("F-4"));
    assert_eq!(context.melody_notes.last().map(String::as_str), Some("F-4"));
    assert!(audio.audio(data.target_audio.as_deref().unwrap()).is_ok());
}

#[test]
fn test_find_home_note_melody_length_override() {
    let (_dir, audio) = store();
    let exercise = FindHomeNoteExercise::new();
    let mut rng = create_rng(5);

    let short = exercise
        .generate(&overrides(json!({"melody_length": 4})), &mut rng, &audio)
        .unwrap();
    let ExerciseContext::HomeNote(context) = &short.context else {
        panic!("wrong context family");
    };
    assert_eq!(context.melody_notes.len(), 4);

    let ignored = exercise
        .generate(&overrides(json!({"melody_length": 12})), &mut rng, &audio)
        .unwrap();
    let ExerciseContext::HomeNote(context) = &ignored.context else {
        panic!("wrong context family");
    };
    assert_eq!(context.melody_notes.len(), 6);
}

#[test]
fn test_find_home_note_accepts_enharmonic_spelling() {
    let exercise = FindHomeNoteExercise::new();
    let context = ExerciseContext::HomeNote(HomeNoteContext {
        key: Key::BFlat,
        melody_notes: vec!["Bb-4".to_string(), "C-5".to_string(), "Bb-4".to_string()],
        tonic_note: "Bb-4".to_string(),
        correct_answer: "Bb-4".to_string(),
    });

    assert!(exercise.check_answer("Bb-4", &context).unwrap().is_correct);
    assert!(exercise.check_answer("A#-4", &context).unwrap().is_correct);
    assert!(exercise.check_answer(" bb4 ", &context).unwrap().is_correct);
    assert!(!exercise.check_answer("Bb-999999999", &context).unwrap().is_correct);

    let wrong = exercise.check_answer("C-5", &context).unwrap();
    assert!(!wrong.is_correct);
    assert_eq!(
        wrong.feedback,
        "Incorrect. The tonic (home note) is Bb-4. Notice how it feels stable and resolved."
    );
}

#[test]
fn test_key_probabilities_pick_the_key() {
    let (_dir, audio) = store();
    let exercise = FindHomeNoteExercise::new();
    let mut rng = create_rng(8);
    let data = exercise
        .generate(&overrides(json!({"key_probabilities": {"G": 1.0}})), &mut rng, &audio)
        .unwrap();
    assert_eq!(data.correct_answer, "G-4");
}

#[test]
fn test_scale_degree_with_fixed_degree() {
    let (_dir, audio) = store();
    let exercise = ScaleDegreesExercise::new();
    let mut rng = create_rng(2);
    let data = exercise
        .generate(
            &overrides(json!({"key": "C", "degree_probabilities": {"5": 1.0}})),
            &mut rng,
            &audio,
        )
        .unwrap();

    assert_eq!(data.key, "Key: C - Degree 5");
    assert_eq!(data.correct_answer, "Sol");
    assert_eq!(data.options.len(), 7);
    let ExerciseContext::ScaleDegree(context) = &data.context else {
        panic!("wrong context family");
    };
    assert_eq!(context.target_note, Note::new(PitchClass::G, 4));

    let result = exercise.check_answer("sol", &data.context).unwrap();
    assert!(result.is_correct);
    assert_eq!(result.feedback, "Correct! That's Sol, the 5th degree.");

    let result = exercise.check_answer("Re", &data.context).unwrap();
    assert!(!result.is_correct);
    assert_eq!(result.feedback, "Incorrect. The correct solfège is Sol (degree 5).");
}

#[test]
fn test_label_do_mi_sol_crosses_into_next_octave() {
    let (_dir, audio) = store();
    let exercise = LabelDoMiSolExercise::new();
    let mut rng = create_rng(4);
    let data = exercise
        .generate(
            &overrides(json!({"key": "Bb", "triad_note_probabilities": {"Mi": 1.0}})),
            &mut rng,
            &audio,
        )
        .unwrap();

    assert_eq!(data.key, "Key: Bb - Mi");
    assert_eq!(data.correct_answer, "Mi");
    let mut options = data.options.clone();
    options.sort();
    assert_eq!(options, vec!["Do", "Mi", "Sol"]);
    let ExerciseContext::TriadNote(context) = &data.context else {
        panic!("wrong context family");
    };
    assert_eq!(context.target_note, Note::new(PitchClass::D, 5));
    assert!(exercise.check_answer("MI", &data.context).unwrap().is_correct);
}

#[test]
fn test_foreign_context_is_internal_error() {
    let exercise = LabelDoMiSolExercise::new();
    let context = ExerciseContext::Interval(IntervalContext {
        reference_note: Note::new(PitchClass::C, 4),
        second_note: Note::new(PitchClass::E, 4),
        interval: eartrainer_theory::Interval::MajorThird,
        interval_semitones: 4,
        question_number: 1,
        total_questions: 20,
        timing: crate::context::IntervalTiming::Melodic,
        octave: 4,
        correct_answer: "3M".to_string(),
    });
    let err = exercise.check_answer("Do", &context).unwrap_err();
    assert_eq!(err.code(), "EXERCISE_002");
}
