//! Pitch direction and contour: high or low, step or leap, melodic shapes.

use eartrainer_audio::{AudioStore, RenderRequest};
use eartrainer_theory::note::NATURAL_PITCH_CLASSES;
use eartrainer_theory::{Interval, Note, PitchClass};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::catalog::{draw_category, random_natural};
use crate::config::{ConfigOverrides, Overrides};
use crate::context::{
    Contour, Direction, DirectionContext, ExerciseContext, Motion, ShapeContext, StepLeapContext,
};
use crate::error::{ExerciseError, ServiceResult};
use crate::exercise::{answers_match, default_feedback, foreign_context, render_audio, CaseRule, Exercise};
use crate::metadata::{ConfigOption, ExerciseData, ExerciseMetadata, ExerciseResult};

const GAP_SECS: f64 = 0.5;
const STEP_NOTE_SECS: f64 = 1.0;
const SHAPE_NOTE_SECS: f64 = 0.8;

/// Intervals that count as a step.
pub const STEP_INTERVALS: [Interval; 2] = [Interval::MinorSecond, Interval::MajorSecond];

/// Intervals that count as a leap.
pub const LEAP_INTERVALS: [Interval; 9] = [
    Interval::MinorThird,
    Interval::MajorThird,
    Interval::PerfectFourth,
    Interval::PerfectFifth,
    Interval::MinorSixth,
    Interval::MajorSixth,
    Interval::MinorSeventh,
    Interval::MajorSeventh,
    Interval::Octave,
];

/// Returns the direction exercises.
pub fn all_exercises() -> Vec<Box<dyn Exercise>> {
    vec![
        Box::new(HighOrLowExercise::new()),
        Box::new(StepVsLeapExercise::new()),
        Box::new(MelodicShapesExercise::new()),
    ]
}

/// Base octave for the first note, 4 or 5.
fn base_octave<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.gen_range(4..=5)
}

/// Draws a category key from an override table or uniformly.
fn direction_metadata(id: &str, name: &str, description: &str) -> ExerciseMetadata {
    let mut metadata = ExerciseMetadata::new(id, name, description);
    metadata.difficulty = 1;
    metadata.category = "direction".to_string();
    metadata.estimated_time = 600;
    metadata.audio_duration = 3;
    metadata
}

fn labels<const N: usize>(items: [&'static str; N]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Is the second of two notes higher or lower?
#[derive(Debug, Clone)]
pub struct HighOrLowExercise {
    metadata: ExerciseMetadata,
}

impl HighOrLowExercise {
    pub fn new() -> Self {
        let mut metadata = direction_metadata(
            "high_or_low_direction",
            "High or Low?",
            "Listen to two tones and identify if the second note is higher or lower than the first.",
        );
        metadata.tags = labels(["pitch", "direction", "basic"]);
        metadata.learning_objectives = labels(["Recognize pitch direction", "Build basic auditory discrimination"]);
        metadata.answer_format = "direction".to_string();
        let keys: Vec<&str> = Direction::ALL.iter().map(|d| d.key()).collect();
        metadata.config_options = vec![
            ConfigOption::int("octave_range", 2, 1, 3),
            ConfigOption::float("note_duration", STEP_NOTE_SECS, 0.5, 2.0),
            ConfigOption::probabilities("direction_probabilities", &keys, "direction"),
        ];
        Self { metadata }
    }
}

impl Default for HighOrLowExercise {
    fn default() -> Self {
        Self::new()
    }
}

impl Exercise for HighOrLowExercise {
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
        let octave_range = o.int_in("octave_range", 1..=3).unwrap_or(2) as i32;
        let note_duration = o.float_in("note_duration", 0.5..=2.0).unwrap_or(STEP_NOTE_SECS);

        let keys: Vec<&str> = Direction::ALL.iter().map(|d| d.key()).collect();
        let direction = match draw_category(rng, &o, "direction_probabilities", &keys)? {
            "higher" => Direction::Higher,
            _ => Direction::Lower,
        };

        let first = Note::new(random_natural(rng), base_octave(rng));
        // A whole-octave shift keeps the direction unambiguous whatever the letter.
        let shift = rng.gen_range(1..=octave_range);
        let second_octave = match direction {
            Direction::Higher => first.octave + shift,
            Direction::Lower => first.octave - shift,
        };
        let second = Note::new(random_natural(rng), second_octave);

        let handle = render_audio(
            audio,
            &self.metadata.id,
            &RenderRequest::MelodicInterval {
                first,
                second,
                note_duration,
                gap_duration: GAP_SECS,
            },
        )?;

        let correct_answer = direction.label().to_string();
        Ok(ExerciseData {
            key: format!("Direction: {} → {}", first, second),
            scale: Vec::new(),
            progression_audio: None,
            target_audio: Some(handle),
            options: Direction::ALL.iter().map(|d| d.label().to_string()).collect(),
            correct_answer: correct_answer.clone(),
            context: ExerciseContext::Direction(DirectionContext {
                first_note: first,
                second_note: second,
                direction,
                note_duration,
                correct_answer,
            }),
        })
    }

    fn check_answer(&self, answer: &str, context: &ExerciseContext) -> ServiceResult<ExerciseResult> {
        let ExerciseContext::Direction(context) = context else {
            return Err(foreign_context(&self.metadata.id, context));
        };
        let correct = context.correct_answer.as_str();
        let is_correct = answers_match(answer, correct, CaseRule::Insensitive);
        Ok(ExerciseResult::new(
            is_correct,
            answer,
            correct,
            default_feedback(is_correct, correct),
        ))
    }

    fn hints(&self) -> Vec<String> {
        vec![
            "Hum the first note, then the second: did your voice go up or down?".to_string(),
            "Ignore loudness and listen only to pitch".to_string(),
        ]
    }
}

/// Is the interval between two notes a step or a leap?
#[derive(Debug, Clone)]
pub struct StepVsLeapExercise {
    metadata: ExerciseMetadata,
}

impl StepVsLeapExercise {
    pub fn new() -> Self {
        let mut metadata = direction_metadata(
            "step_vs_leap",
            "Step vs. Leap Challenge",
            "Listen to two notes and identify if the interval is a step (2nd) or leap (3rd or larger).",
        );
        metadata.tags = labels(["intervals", "steps", "leaps", "basic"]);
        metadata.learning_objectives = labels(["Distinguish steps from leaps", "Recognize interval size qualitatively"]);
        metadata.answer_format = "interval_type".to_string();
        let steps: Vec<&str> = STEP_INTERVALS.iter().map(|i| i.notation()).collect();
        let leaps: Vec<&str> = LEAP_INTERVALS.iter().map(|i| i.notation()).collect();
        let keys: Vec<&str> = Motion::ALL.iter().map(|m| m.key()).collect();
        metadata.config_options = vec![
            ConfigOption::list("step_intervals", &steps),
            ConfigOption::list("leap_intervals", &leaps),
            ConfigOption::probabilities("interval_type_probabilities", &keys, "step vs leap"),
        ];
        Self { metadata }
    }
}

impl Default for StepVsLeapExercise {
    fn default() -> Self {
        Self::new()
    }
}

impl Exercise for StepVsLeapExercise {
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
        let keys: Vec<&str> = Motion::ALL.iter().map(|m| m.key()).collect();
        let motion = match draw_category(rng, &o, "interval_type_probabilities", &keys)? {
            "step" => Motion::Step,
            _ => Motion::Leap,
        };
        let pool: &[Interval] = match motion {
            Motion::Step => &STEP_INTERVALS,
            Motion::Leap => &LEAP_INTERVALS,
        };
        let interval = *pool
            .choose(rng)
            .ok_or_else(|| ExerciseError::internal("empty interval pool"))?;

        let first = Note::new(random_natural(rng), base_octave(rng));
        let second = first.transpose(interval.semitones());

        let handle = render_audio(
            audio,
            &self.metadata.id,
            &RenderRequest::MelodicInterval {
                first,
                second,
                note_duration: STEP_NOTE_SECS,
                gap_duration: GAP_SECS,
            },
        )?;

        let correct_answer = motion.label().to_string();
        Ok(ExerciseData {
            key: format!("Interval: {} → {}", first, second),
            scale: Vec::new(),
            progression_audio: None,
            target_audio: Some(handle),
            options: Motion::ALL.iter().map(|m| m.label().to_string()).collect(),
            correct_answer: correct_answer.clone(),
            context: ExerciseContext::StepLeap(StepLeapContext {
                first_note: first,
                second_note: second,
                interval,
                interval_type: motion,
                correct_answer,
            }),
        })
    }

    fn check_answer(&self, answer: &str, context: &ExerciseContext) -> ServiceResult<ExerciseResult> {
        let ExerciseContext::StepLeap(context) = context else {
            return Err(foreign_context(&self.metadata.id, context));
        };
        let correct = context.correct_answer.as_str();
        let is_correct = answers_match(answer, correct, CaseRule::Insensitive);
        Ok(ExerciseResult::new(
            is_correct,
            answer,
            correct,
            default_feedback(is_correct, correct),
        ))
    }

    fn hints(&self) -> Vec<String> {
        vec![
            "A step moves to a neighboring note, like walking up a staircase".to_string(),
            "A leap skips over at least one note".to_string(),
        ]
    }
}

/// Which contour does a short phrase follow?
#[derive(Debug, Clone)]
pub struct MelodicShapesExercise {
    metadata: ExerciseMetadata,
}

impl MelodicShapesExercise {
    pub fn new() -> Self {
        let mut metadata = direction_metadata(
            "melodic_shapes",
            "Melodic Shapes",
            "Listen to a short melodic phrase and identify its shape (arch, zigzag, ascending, descending).",
        );
        metadata.difficulty = 2;
        metadata.estimated_time = 900;
        metadata.prerequisites = vec!["high_or_low_direction".to_string()];
        metadata.tags = labels(["melody", "contour", "patterns"]);
        metadata.learning_objectives = labels(["Recognize melodic patterns", "Build pattern recognition"]);
        metadata.answer_format = "shape".to_string();
        metadata.audio_duration = 5;
        let keys: Vec<&str> = Contour::ALL.iter().map(|c| c.key()).collect();
        metadata.config_options = vec![
            ConfigOption::int("phrase_length", 4, 3, 6),
            ConfigOption::list("shapes", &keys),
            ConfigOption::probabilities("shape_probabilities", &keys, "melodic shape"),
        ];
        Self { metadata }
    }
}

impl Default for MelodicShapesExercise {
    fn default() -> Self {
        Self::new()
    }
}

/// Diatonic step offsets from the first note for a contour.
///
/// Arch climbs to the middle and comes back; zigzag moves up two steps and
/// back one, so it alternates direction while drifting upward.
pub fn contour_offsets(shape: Contour, length: usize) -> Vec<i32> {
    let length = length as i32;
    (0..length)
        .map(|i| match shape {
            Contour::Ascending => i,
            Contour::Descending => -i,
            Contour::Arch => {
                let peak = length / 2;
                if i <= peak {
                    i
                } else {
                    2 * peak - i
                }
            }
            Contour::Zigzag => {
                if i % 2 == 0 {
                    i / 2
                } else {
                    i / 2 + 2
                }
            }
        })
        .collect()
}

/// The natural note `steps` diatonic steps from `start`.
pub fn diatonic_step(start: Note, steps: i32) -> Note {
    let start_index = NATURAL_PITCH_CLASSES
        .iter()
        .position(|pc| *pc == start.pitch_class)
        .unwrap_or(0) as i32;
    let index = start_index + steps;
    let pitch_class: PitchClass = NATURAL_PITCH_CLASSES[index.rem_euclid(7) as usize];
    Note::new(pitch_class, start.octave + index.div_euclid(7))
}

impl Exercise for MelodicShapesExercise {
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
        let phrase_length = o.int_in("phrase_length", 3..=6).unwrap_or(4) as usize;

        let keys: Vec<&str> = Contour::ALL.iter().map(|c| c.key()).collect();
        let chosen = draw_category(rng, &o, "shape_probabilities", &keys)?;
        let shape = Contour::ALL
            .iter()
            .copied()
            .find(|c| c.key() == chosen)
            .ok_or_else(|| ExerciseError::internal("unknown shape"))?;

        let start = Note::new(random_natural(rng), base_octave(rng));
        let notes: Vec<Note> = contour_offsets(shape, phrase_length)
            .into_iter()
            .map(|offset| diatonic_step(start, offset))
            .collect();

        let handle = render_audio(
            audio,
            &self.metadata.id,
            &RenderRequest::Sequence {
                notes: notes.clone(),
                note_duration: SHAPE_NOTE_SECS,
            },
        )?;

        let correct_answer = shape.label().to_string();
        Ok(ExerciseData {
            key: format!("Shape: {}", correct_answer),
            scale: Vec::new(),
            progression_audio: None,
            target_audio: Some(handle),
            options: Contour::ALL.iter().map(|c| c.label().to_string()).collect(),
            correct_answer: correct_answer.clone(),
            context: ExerciseContext::MelodicShape(ShapeContext {
                shape,
                notes,
                phrase_length: phrase_length as u32,
                correct_answer,
            }),
        })
    }

    fn check_answer(&self, answer: &str, context: &ExerciseContext) -> ServiceResult<ExerciseResult> {
        let ExerciseContext::MelodicShape(context) = context else {
            return Err(foreign_context(&self.metadata.id, context));
        };
        let correct = context.correct_answer.as_str();
        let is_correct = answers_match(answer, correct, CaseRule::Insensitive);
        Ok(ExerciseResult::new(
            is_correct,
            answer,
            correct,
            default_feedback(is_correct, correct),
        ))
    }

    fn hints(&self) -> Vec<String> {
        vec![
            "Trace the melody with your hand as it plays".to_string(),
            "Compare the last note with the first, then listen for turns in between".to_string(),
        ]
    }
}
