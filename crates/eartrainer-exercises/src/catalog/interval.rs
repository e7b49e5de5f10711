//! Interval recognition.
//!
//! Two notes a fixed interval apart, played either staggered (melodic) or
//! together (harmonic). Answers are notation tokens (`"3m"`, `"5J"`, `"8J"`)
//! and are compared case-sensitively, since case carries meaning.

use std::str::FromStr;

use eartrainer_audio::{AudioStore, RenderRequest};
use eartrainer_theory::{Interval, Note};
use rand::RngCore;

use crate::catalog::{natural_names, parse_natural, random_natural};
use crate::choice::{uniform_weights, weighted_choice};
use crate::config::{ConfigOverrides, Overrides};
use crate::context::{ExerciseContext, IntervalContext, IntervalTiming};
use crate::error::{ExerciseError, ServiceResult};
use crate::exercise::{answers_match, foreign_context, render_audio, CaseRule, Exercise};
use crate::metadata::{human_list, ConfigOption, ExerciseData, ExerciseMetadata, ExerciseResult};

/// Questions per session.
pub const TOTAL_QUESTIONS: u32 = 20;

const DEFAULT_OCTAVE: i64 = 4;
const MELODIC_NOTE_SECS: f64 = 1.5;
const MELODIC_DELAY_MS: u32 = 400;
const HARMONIC_SECS: f64 = 1.5;

/// Returns the interval exercises.
pub fn all_exercises() -> Vec<Box<dyn Exercise>> {
    use Interval::*;
    vec![
        Box::new(IntervalExercise::interval_recognition()),
        Box::new(IntervalExercise::new(
            "minor_third_major_third_octave",
            &[MinorThird, MajorThird, Octave],
            IntervalTiming::Melodic,
        )),
        Box::new(IntervalExercise::new(
            "minor_third_major_third_octave",
            &[MinorThird, MajorThird, Octave],
            IntervalTiming::Harmonic,
        )),
        Box::new(IntervalExercise::new(
            "perfect_fourth_fifth_octave",
            &[PerfectFourth, PerfectFifth, Octave],
            IntervalTiming::Melodic,
        )),
        Box::new(IntervalExercise::new(
            "perfect_fourth_fifth_octave",
            &[PerfectFourth, PerfectFifth, Octave],
            IntervalTiming::Harmonic,
        )),
        Box::new(IntervalExercise::new(
            "combined_intervals",
            &[MinorThird, MajorThird, PerfectFourth, PerfectFifth, Octave],
            IntervalTiming::Melodic,
        )),
    ]
}

/// An interval exercise over a fixed set of intervals.
#[derive(Debug, Clone)]
pub struct IntervalExercise {
    intervals: Vec<Interval>,
    timing: IntervalTiming,
    metadata: ExerciseMetadata,
    instructions: Option<String>,
    hints: Option<Vec<String>>,
}

impl IntervalExercise {
    /// Builds an exercise with id `{exercise_type}_{timing}`.
    pub fn new(exercise_type: &str, intervals: &[Interval], timing: IntervalTiming) -> Self {
        let names: Vec<&str> = intervals.iter().map(|i| i.display_name()).collect();
        let list = human_list(&names);
        let timing_word = timing.as_str();
        let timing_phrase = timing_phrase(timing);

        let mut metadata = ExerciseMetadata::new(
            format!("{}_{}", exercise_type, timing_word),
            format!("{} ({})", list, title_case(timing_word)),
            format!(
                "Identify the interval: {}. {} questions with {}.",
                list, TOTAL_QUESTIONS, timing_phrase
            ),
        );
        metadata.difficulty = 1;
        metadata.category = "interval_recognition".to_string();
        metadata.estimated_time = 300;
        metadata.answer_format = "interval_name".to_string();
        metadata.audio_duration = 3;
        metadata.learning_objectives = names
            .iter()
            .map(|n| format!("Recognize {} intervals", n))
            .chain(std::iter::once(format!(
                "Develop {} interval recognition skills",
                timing_word
            )))
            .collect();
        metadata.tags = std::iter::once("intervals".to_string())
            .chain(intervals.iter().map(|i| i.name().replace('_', "")))
            .chain(std::iter::once(timing_word.to_string()))
            .collect();

        let interval_names: Vec<&str> = intervals.iter().map(|i| i.name()).collect();
        metadata.config_options = vec![
            ConfigOption::list("available_intervals", &interval_names),
            ConfigOption::list("reference_notes", &natural_names()),
            ConfigOption::string("reference_note", "random").choices(&natural_names()),
            ConfigOption::int("octave", DEFAULT_OCTAVE, 1, 8),
            ConfigOption::string("interval", "random").choices(&interval_names),
            ConfigOption::int("question_number", 1, 1, TOTAL_QUESTIONS as i64),
            ConfigOption::int("total_questions", TOTAL_QUESTIONS as i64, TOTAL_QUESTIONS as i64, TOTAL_QUESTIONS as i64),
            ConfigOption::string("timing", timing_word),
            ConfigOption::probabilities("interval_probabilities", &interval_names, "interval"),
        ];

        Self {
            intervals: intervals.to_vec(),
            timing,
            metadata,
            instructions: None,
            hints: None,
        }
    }

    /// The introductory octave/thirds exercise, melodic.
    pub fn interval_recognition() -> Self {
        use Interval::*;
        let mut exercise = Self::new("interval_recognition", &[Octave, MinorThird, MajorThird], IntervalTiming::Melodic);
        exercise.metadata.id = "interval_recognition".to_string();
        exercise.metadata.name = "Interval Recognition".to_string();
        exercise.metadata.description = format!(
            "Identify the interval: octave, minor third, or major third. {} questions with melodic intervals.",
            TOTAL_QUESTIONS
        );
        exercise.instructions = Some(format!(
            "Listen to the two notes played with staggered timing. The root note starts first, \
             then the second note begins {}ms later. Identify whether the interval is an octave (8J), \
             minor third (3m) or major third (3M). An octave spans 12 semitones, a minor third 3 \
             and a major third 4. You will have {} questions in total.",
            MELODIC_DELAY_MS, TOTAL_QUESTIONS
        ));
        exercise.hints = Some(vec![
            "An octave sounds very consonant and 'complete', like the same note at a different pitch".to_string(),
            "A minor third sounds darker than a major third".to_string(),
            "A major third sounds brighter than a minor third".to_string(),
            "Count the semitones: octave = 12, minor third = 3, major third = 4".to_string(),
        ]);
        exercise
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn timing(&self) -> IntervalTiming {
        self.timing
    }

    fn options(&self) -> Vec<String> {
        self.intervals.iter().map(|i| i.notation().to_string()).collect()
    }

    /// Accepts an interval name or notation token from this exercise's set.
    fn parse_interval(&self, text: &str) -> Option<Interval> {
        Interval::from_str(text)
            .ok()
            .filter(|interval| self.intervals.contains(interval))
    }

    fn request(&self, reference: Note, second: Note) -> RenderRequest {
        match self.timing {
            IntervalTiming::Melodic => RenderRequest::StaggeredInterval {
                root: reference,
                second,
                root_duration: MELODIC_NOTE_SECS,
                second_duration: MELODIC_NOTE_SECS,
                delay_ms: MELODIC_DELAY_MS,
            },
            IntervalTiming::Harmonic => RenderRequest::HarmonicInterval {
                first: reference,
                second,
                duration: HARMONIC_SECS,
            },
        }
    }
}

impl Exercise for IntervalExercise {
    fn metadata(&self) -> &ExerciseMetadata {
        &self.metadata
    }

    fn generate(
        &self,
        overrides: &ConfigOverrides,
        rng: &mut dyn RngCore,
        audio: &AudioStore,
    ) -> ServiceResult<ExerciseData> {
        let o = Overrides::new(overrides, &self.metadata.id);

        let question_number = o
            .int_in("question_number", 1..=TOTAL_QUESTIONS as i64)
            .unwrap_or(1) as u32;
        let octave = o.int_in("octave", 1..=8).unwrap_or(DEFAULT_OCTAVE) as i32;
        let root = o
            .parsed("reference_note", parse_natural)
            .unwrap_or_else(|| random_natural(rng));

        let interval = match o.parsed("interval", |s| self.parse_interval(s)) {
            Some(interval) => interval,
            None => {
                let names: Vec<&str> = self.intervals.iter().map(|i| i.name()).collect();
                let table = o
                    .probabilities("interval_probabilities", &names)
                    .unwrap_or_else(|| uniform_weights(&names));
                let chosen = weighted_choice(rng, &table)
                    .ok_or_else(|| ExerciseError::internal("exercise has no intervals"))?;
                Interval::from_name(chosen).map_err(|_| ExerciseError::internal("unknown interval in table"))?
            }
        };

        let reference = Note::new(root, octave);
        let second = reference.transpose(interval.semitones());
        let handle = render_audio(audio, &self.metadata.id, &self.request(reference, second))?;
        let correct_answer = interval.notation().to_string();

        let context = IntervalContext {
            reference_note: reference,
            second_note: second,
            interval,
            interval_semitones: interval.semitones(),
            question_number,
            total_questions: TOTAL_QUESTIONS,
            timing: self.timing,
            octave,
            correct_answer: correct_answer.clone(),
        };

        Ok(ExerciseData {
            key: format!("Question {}/{}", question_number, TOTAL_QUESTIONS),
            scale: Vec::new(),
            progression_audio: None,
            target_audio: Some(handle),
            options: self.options(),
            correct_answer,
            context: ExerciseContext::Interval(context),
        })
    }

    fn check_answer(&self, answer: &str, context: &ExerciseContext) -> ServiceResult<ExerciseResult> {
        let ExerciseContext::Interval(context) = context else {
            return Err(foreign_context(&self.metadata.id, context));
        };
        let correct = context.correct_answer.as_str();
        let is_correct = answers_match(answer, correct, CaseRule::Sensitive);
        let feedback = if is_correct {
            "Correct! Well done!".to_string()
        } else {
            format!("Incorrect. The correct answer was {}.", correct)
        };
        Ok(ExerciseResult::new(is_correct, answer, correct, feedback))
    }

    fn instructions(&self) -> String {
        self.instructions.clone().unwrap_or_else(|| {
            format!(
                "Listen to the two notes played with {} and identify the interval.",
                timing_phrase(self.timing)
            )
        })
    }

    fn hints(&self) -> Vec<String> {
        self.hints.clone().unwrap_or_else(|| {
            vec![
                "Listen carefully to the distance between the two notes".to_string(),
                "Count the semitones if you're unsure".to_string(),
                "Practice with a piano to develop your ear".to_string(),
            ]
        })
    }
}

fn timing_phrase(timing: IntervalTiming) -> &'static str {
    match timing {
        IntervalTiming::Melodic => "staggered timing",
        IntervalTiming::Harmonic => "simultaneous notes",
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests;
