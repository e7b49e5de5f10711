use super::*;
use crate::rng::create_rng;
use crate::test_support::{overrides, store};
use pretty_assertions::assert_eq;
use serde_json::json;

fn thirds_melodic() -> IntervalExercise {
    IntervalExercise::new(
        "minor_third_major_third_octave",
        &[Interval::MinorThird, Interval::MajorThird, Interval::Octave],
        IntervalTiming::Melodic,
    )
}

#[test]
fn test_metadata_from_interval_set() {
    let exercise = thirds_melodic();
    let meta = exercise.metadata();
    assert_eq!(meta.id, "minor_third_major_third_octave_melodic");
    assert_eq!(meta.name, "Minor Third, Major Third and Octave (Melodic)");
    assert_eq!(
        meta.description,
        "Identify the interval: Minor Third, Major Third and Octave. 20 questions with staggered timing."
    );
    assert_eq!(meta.category, "interval_recognition");
    assert_eq!(meta.tags, vec!["intervals", "minorthird", "majorthird", "octave", "melodic"]);
    assert_eq!(meta.learning_objectives.last().unwrap(), "Develop melodic interval recognition skills");
    assert!(meta.option("interval_probabilities").is_some());
}

#[test]
fn test_harmonic_id_and_instructions() {
    let exercise = IntervalExercise::new(
        "perfect_fourth_fifth_octave",
        &[Interval::PerfectFourth, Interval::PerfectFifth, Interval::Octave],
        IntervalTiming::Harmonic,
    );
    assert_eq!(exercise.id(), "perfect_fourth_fifth_octave_harmonic");
    assert_eq!(
        exercise.instructions(),
        "Listen to the two notes played with simultaneous notes and identify the interval."
    );
    assert_eq!(exercise.hints().len(), 3);
}

#[test]
fn test_major_third_from_c() {
    let (_dir, audio) = store();
    let exercise = IntervalExercise::interval_recognition();
    let mut rng = create_rng(1);
    let data = exercise
        .generate(
            &overrides(json!({"interval": "major_third", "reference_note": "C"})),
            &mut rng,
            &audio,
        )
        .unwrap();

    assert_eq!(data.correct_answer, "3M");
    assert!(data.options.contains(&"3M".to_string()));
    assert_eq!(data.key, "Question 1/20");
    assert!(data.target_audio.is_some());

    let ExerciseContext::Interval(ctx) = &data.context else {
        panic!("wrong context family");
    };
    assert_eq!(ctx.reference_note.to_string(), "C-4");
    assert_eq!(ctx.second_note.to_string(), "E-4");
    assert_eq!(ctx.interval_semitones, 4);

    assert!(exercise.check_answer("3M", &data.context).unwrap().is_correct);
    let wrong = exercise.check_answer("3m", &data.context).unwrap();
    assert!(!wrong.is_correct);
    assert_eq!(wrong.feedback, "Incorrect. The correct answer was 3M.");
}

#[test]
fn test_options_are_notation_tokens() {
    let (_dir, audio) = store();
    let exercise = IntervalExercise::new(
        "combined_intervals",
        &[
            Interval::MinorThird,
            Interval::MajorThird,
            Interval::PerfectFourth,
            Interval::PerfectFifth,
            Interval::Octave,
        ],
        IntervalTiming::Melodic,
    );
    let data = exercise
        .generate(&ConfigOverrides::new(), &mut create_rng(9), &audio)
        .unwrap();
    assert_eq!(data.options, vec!["3m", "3M", "4J", "5J", "8J"]);
    assert!(data.options.contains(&data.correct_answer));
}

#[test]
fn test_invalid_overrides_fall_back() {
    let (_dir, audio) = store();
    let exercise = thirds_melodic();
    let data = exercise
        .generate(
            &overrides(json!({
                "interval": "perfect_fifth",
                "reference_note": "H",
                "octave": 12,
                "question_number": 99
            })),
            &mut create_rng(3),
            &audio,
        )
        .unwrap();
    let ExerciseContext::Interval(ctx) = &data.context else {
        panic!("wrong context family");
    };
    assert!(exercise.intervals().contains(&ctx.interval));
    assert_eq!(ctx.octave, 4);
    assert_eq!(ctx.question_number, 1);
    assert!(ctx.reference_note.pitch_class.is_natural());
}

#[test]
fn test_string_overrides_accepted() {
    let (_dir, audio) = store();
    let exercise = thirds_melodic();
    let data = exercise
        .generate(
            &overrides(json!({"question_number": "7", "octave": "5", "interval": "8J", "reference_note": "g"})),
            &mut create_rng(3),
            &audio,
        )
        .unwrap();
    assert_eq!(data.key, "Question 7/20");
    let ExerciseContext::Interval(ctx) = &data.context else {
        panic!("wrong context family");
    };
    assert_eq!(ctx.reference_note.to_string(), "G-5");
    assert_eq!(ctx.second_note.to_string(), "G-6");
    assert_eq!(data.correct_answer, "8J");
}

#[test]
fn test_probability_override_is_honored() {
    let (_dir, audio) = store();
    let exercise = thirds_melodic();
    let mut rng = create_rng(21);
    let table = overrides(json!({
        "reference_note": "C",
        "interval_probabilities": {"minor_third": 0.0, "major_third": 0.0, "octave": 1.0}
    }));
    for _ in 0..5 {
        let data = exercise.generate(&table, &mut rng, &audio).unwrap();
        assert_eq!(data.correct_answer, "8J");
    }
}

#[test]
fn test_same_seed_same_question() {
    let (_dir, audio) = store();
    let exercise = thirds_melodic();
    let a = exercise.generate(&ConfigOverrides::new(), &mut create_rng(5), &audio).unwrap();
    let b = exercise.generate(&ConfigOverrides::new(), &mut create_rng(5), &audio).unwrap();
    assert_eq!(a.context, b.context);
    assert_eq!(a.target_audio, b.target_audio);
}

#[test]
fn test_check_rejects_foreign_context() {
    let exercise = thirds_melodic();
    let context = ExerciseContext::TriadNote(crate::context::TriadNoteContext {
        key: eartrainer_theory::Key::C,
        target_solfege: "Do".to_string(),
        target_note: Note::new(eartrainer_theory::PitchClass::C, 4),
        correct_answer: "Do".to_string(),
    });
    assert!(exercise.check_answer("Do", &context).is_err());
}
