//! Tonal center: the home note, scale degrees and tonic-triad solfège.

use eartrainer_audio::{AudioStore, RenderRequest};
use eartrainer_theory::scale::{ordinal_suffix, solfege, solfege_degree, SOLFEGE};
use eartrainer_theory::{Key, Note};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::catalog::draw_category;
use crate::choice::{uniform_weights, weighted_choice};
use crate::config::{ConfigOverrides, Overrides};
use crate::context::{ExerciseContext, HomeNoteContext, ScaleDegreeContext, TriadNoteContext};
use crate::error::{ExerciseError, ServiceResult};
use crate::exercise::{answers_match, foreign_context, render_audio, CaseRule, Exercise};
use crate::metadata::{ConfigOption, ExerciseData, ExerciseMetadata, ExerciseResult};

const MELODY_NOTE_SECS: f64 = 0.8;
const TARGET_NOTE_SECS: f64 = 2.0;
const MELODY_STEPS: [i32; 4] = [-2, -1, 1, 2];
const TRIAD_SYLLABLES: [&str; 3] = ["Do", "Mi", "Sol"];

/// Returns the tonal-center exercises.
pub fn all_exercises() -> Vec<Box<dyn Exercise>> {
    vec![
        Box::new(FindHomeNoteExercise::new()),
        Box::new(ScaleDegreesExercise::new()),
        Box::new(LabelDoMiSolExercise::new()),
    ]
}

fn key_labels() -> Vec<&'static str> {
    Key::ALL.iter().map(|k| k.label()).collect()
}

fn key_options() -> Vec<ConfigOption> {
    let mut choices = key_labels();
    choices.push("random");
    vec![
        ConfigOption::string("key", "random").choices(&choices),
        ConfigOption::probabilities("key_probabilities", &key_labels(), "key"),
    ]
}

fn tonal_metadata(id: &str, name: &str, description: &str, prerequisite: &str) -> ExerciseMetadata {
    let mut metadata = ExerciseMetadata::new(id, name, description);
    metadata.difficulty = 2;
    metadata.category = "tonal_center".to_string();
    metadata.estimated_time = 600;
    metadata.prerequisites = vec![prerequisite.to_string()];
    metadata.requires_single_note = true;
    metadata.audio_duration = 2;
    metadata.config_options = key_options();
    metadata
}

/// Resolves `key` (a label or `"random"`) or draws one from `key_probabilities`.
fn choose_key<R: Rng + ?Sized>(rng: &mut R, o: &Overrides<'_>) -> ServiceResult<Key> {
    if let Some(key) = o.parsed("key", |s| {
        if s.eq_ignore_ascii_case("random") {
            None
        } else {
            Key::parse(s).ok()
        }
    }) {
        return Ok(key);
    }
    let labels = key_labels();
    let table = o
        .probabilities("key_probabilities", &labels)
        .unwrap_or_else(|| uniform_weights(&labels));
    let label = weighted_choice(rng, &table).ok_or_else(|| ExerciseError::internal("no keys"))?;
    Key::parse(label).map_err(|_| ExerciseError::internal("unknown key in table"))
}

/// Scale-step walk over the tonic-to-tonic octave that starts and ends on
/// index 0. Returns indices into [`Key::octave_scale`].
pub fn melody_walk<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Vec<usize> {
    let top = 7i32;
    let mut walk = Vec::with_capacity(length);
    let mut current = 0i32;
    for _ in 1..length {
        walk.push(current as usize);
        let step = MELODY_STEPS[rng.gen_range(0..MELODY_STEPS.len())];
        current = (current + step).clamp(0, top);
    }
    walk.push(0);
    walk
}

/// Compares note answers by pitch when both parse, by text otherwise.
fn same_note(answer: &str, correct: &str) -> bool {
    match (Note::parse(answer.trim()), Note::parse(correct)) {
        (Ok(a), Ok(b)) => a == b,
        _ => answers_match(answer, correct, CaseRule::Insensitive),
    }
}

/// Which melody note feels like home?
#[derive(Debug, Clone)]
pub struct FindHomeNoteExercise {
    metadata: ExerciseMetadata,
}

impl FindHomeNoteExercise {
    pub fn new() -> Self {
        let mut metadata = tonal_metadata(
            "find_home_note",
            "Find Home Note",
            "Listen to a melody and identify which note feels like 'home' (the tonic).",
            "melodic_shapes",
        );
        metadata.estimated_time = 900;
        metadata.tags = ["tonic", "home", "resolution"].iter().map(|s| s.to_string()).collect();
        metadata.learning_objectives = vec!["Recognize tonic stability".to_string(), "Identify resolution".to_string()];
        metadata.answer_format = "note".to_string();
        metadata.requires_single_note = false;
        metadata.audio_duration = 5;
        metadata.config_options.insert(0, ConfigOption::int("melody_length", 6, 4, 8));
        Self { metadata }
    }
}

impl Default for FindHomeNoteExercise {
    fn default() -> Self {
        Self::new()
    }
}

impl Exercise for FindHomeNoteExercise {
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
        let melody_length = o.int_in("melody_length", 4..=8).unwrap_or(6) as usize;
        let key = choose_key(rng, &o)?;

        let scale = key.octave_scale();
        let melody: Vec<Note> = melody_walk(rng, melody_length)
            .into_iter()
            .map(|i| scale[i])
            .collect();
        let melody_names: Vec<String> = melody.iter().map(|n| key.spell(n)).collect();
        let tonic_name = key.spell(&key.tonic());

        let mut others: Vec<&String> = Vec::new();
        for name in &melody_names[..melody_names.len() - 1] {
            if *name != tonic_name && !others.contains(&name) {
                others.push(name);
            }
        }
        let mut options = vec![tonic_name.clone()];
        options.extend(others.choose_multiple(rng, others.len().min(3)).map(|s| s.to_string()));
        options.shuffle(rng);

        let handle = render_audio(
            audio,
            &self.metadata.id,
            &RenderRequest::Sequence {
                notes: melody,
                note_duration: MELODY_NOTE_SECS,
            },
        )?;

        Ok(ExerciseData {
            key: format!("Key: {} - Find Home", key),
            scale: key.scale_names(),
            progression_audio: None,
            target_audio: Some(handle),
            options,
            correct_answer: tonic_name.clone(),
            context: ExerciseContext::HomeNote(HomeNoteContext {
                key,
                melody_notes: melody_names,
                tonic_note: tonic_name.clone(),
                correct_answer: tonic_name,
            }),
        })
    }

    fn check_answer(&self, answer: &str, context: &ExerciseContext) -> ServiceResult<ExerciseResult> {
        let ExerciseContext::HomeNote(context) = context else {
            return Err(foreign_context(&self.metadata.id, context));
        };
        let correct = context.correct_answer.as_str();
        let is_correct = same_note(answer, correct);
        let feedback = if is_correct {
            "Correct! That note feels like home and provides resolution.".to_string()
        } else {
            format!(
                "Incorrect. The tonic (home note) is {}. Notice how it feels stable and resolved.",
                correct
            )
        };
        Ok(ExerciseResult::new(is_correct, answer, correct, feedback))
    }

    fn hints(&self) -> Vec<String> {
        vec![
            "The melody always ends on the home note".to_string(),
            "Home feels restful; the other notes want to move".to_string(),
        ]
    }
}

/// Name the solfège syllable of a single scale degree.
#[derive(Debug, Clone)]
pub struct ScaleDegreesExercise {
    metadata: ExerciseMetadata,
}

impl ScaleDegreesExercise {
    pub fn new() -> Self {
        let mut metadata = tonal_metadata(
            "scale_degrees_solfege",
            "Scale Degrees with Solfège",
            "Listen to a scale degree and identify its solfège syllable (Do, Re, Mi, etc.).",
            "find_home_note",
        );
        metadata.tags = ["scale", "degrees", "solfège"].iter().map(|s| s.to_string()).collect();
        metadata.learning_objectives = vec!["Learn scale degrees".to_string(), "Connect solfège to pitch".to_string()];
        metadata.answer_format = "solfège".to_string();
        let degrees: Vec<String> = (1..=7).map(|d: u8| d.to_string()).collect();
        metadata.config_options.push(ConfigOption::list("degrees", &degrees));
        metadata
            .config_options
            .push(ConfigOption::probabilities("degree_probabilities", &degrees, "scale degree"));
        Self { metadata }
    }
}

impl Default for ScaleDegreesExercise {
    fn default() -> Self {
        Self::new()
    }
}

impl Exercise for ScaleDegreesExercise {
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
        let key = choose_key(rng, &o)?;

        const DEGREES: [&str; 7] = ["1", "2", "3", "4", "5", "6", "7"];
        let degree: u8 = draw_category(rng, &o, "degree_probabilities", &DEGREES)?
            .parse()
            .map_err(|_| ExerciseError::internal("invalid degree"))?;
        let target = key
            .degree(degree as usize)
            .ok_or_else(|| ExerciseError::internal("degree outside the scale"))?;
        let syllable = solfege(degree as usize).ok_or_else(|| ExerciseError::internal("degree has no syllable"))?;

        let mut options: Vec<String> = SOLFEGE.iter().map(|s| s.to_string()).collect();
        options.shuffle(rng);

        let handle = render_audio(
            audio,
            &self.metadata.id,
            &RenderRequest::Sequence {
                notes: vec![target],
                note_duration: TARGET_NOTE_SECS,
            },
        )?;

        Ok(ExerciseData {
            key: format!("Key: {} - Degree {}", key, degree),
            scale: key.scale_names(),
            progression_audio: None,
            target_audio: Some(handle),
            options,
            correct_answer: syllable.to_string(),
            context: ExerciseContext::ScaleDegree(ScaleDegreeContext {
                key,
                degree,
                target_note: target,
                correct_answer: syllable.to_string(),
            }),
        })
    }

    fn check_answer(&self, answer: &str, context: &ExerciseContext) -> ServiceResult<ExerciseResult> {
        let ExerciseContext::ScaleDegree(context) = context else {
            return Err(foreign_context(&self.metadata.id, context));
        };
        let correct = context.correct_answer.as_str();
        let is_correct = answers_match(answer, correct, CaseRule::Insensitive);
        let degree = context.degree as usize;
        let feedback = if is_correct {
            format!("Correct! That's {}, the {}{} degree.", correct, degree, ordinal_suffix(degree))
        } else {
            format!("Incorrect. The correct solfège is {} (degree {}).", correct, degree)
        };
        Ok(ExerciseResult::new(is_correct, answer, correct, feedback))
    }

    fn hints(&self) -> Vec<String> {
        vec![
            "Sing up the scale from Do until you reach the note".to_string(),
            "Ti pulls strongly up to Do; Fa leans down to Mi".to_string(),
        ]
    }
}

/// Name a tonic-triad note: Do, Mi or Sol.
#[derive(Debug, Clone)]
pub struct LabelDoMiSolExercise {
    metadata: ExerciseMetadata,
}

impl LabelDoMiSolExercise {
    pub fn new() -> Self {
        let mut metadata = tonal_metadata(
            "label_do_mi_sol",
            "Label Do-Mi-Sol",
            "Listen to a broken tonic triad and identify which note is Do, Mi, or Sol.",
            "scale_degrees_solfege",
        );
        metadata.tags = ["triad", "tonic", "chords"].iter().map(|s| s.to_string()).collect();
        metadata.learning_objectives = vec![
            "Recognize tonic chord tones".to_string(),
            "Build chord awareness".to_string(),
        ];
        metadata.answer_format = "solfège".to_string();
        metadata.config_options.push(ConfigOption::list("triad_notes", &TRIAD_SYLLABLES));
        metadata.config_options.push(ConfigOption::probabilities(
            "triad_note_probabilities",
            &TRIAD_SYLLABLES,
            "triad note",
        ));
        Self { metadata }
    }
}

impl Default for LabelDoMiSolExercise {
    fn default() -> Self {
        Self::new()
    }
}

impl Exercise for LabelDoMiSolExercise {
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
        let key = choose_key(rng, &o)?;
        let syllable = draw_category(rng, &o, "triad_note_probabilities", &TRIAD_SYLLABLES)?;
        let target = solfege_degree(syllable)
            .and_then(|degree| key.degree(degree))
            .ok_or_else(|| ExerciseError::internal("unknown triad syllable"))?;

        let mut options: Vec<String> = TRIAD_SYLLABLES.iter().map(|s| s.to_string()).collect();
        options.shuffle(rng);

        let handle = render_audio(
            audio,
            &self.metadata.id,
            &RenderRequest::Sequence {
                notes: vec![target],
                note_duration: TARGET_NOTE_SECS,
            },
        )?;

        Ok(ExerciseData {
            key: format!("Key: {} - {}", key, syllable),
            scale: key.scale_names(),
            progression_audio: None,
            target_audio: Some(handle),
            options,
            correct_answer: syllable.to_string(),
            context: ExerciseContext::TriadNote(TriadNoteContext {
                key,
                target_solfege: syllable.to_string(),
                target_note: target,
                correct_answer: syllable.to_string(),
            }),
        })
    }

    fn check_answer(&self, answer: &str, context: &ExerciseContext) -> ServiceResult<ExerciseResult> {
        let ExerciseContext::TriadNote(context) = context else {
            return Err(foreign_context(&self.metadata.id, context));
        };
        let correct = context.correct_answer.as_str();
        let is_correct = answers_match(answer, correct, CaseRule::Insensitive);
        let feedback = if is_correct {
            format!("Correct! That's {}, a note in the tonic triad.", correct)
        } else {
            format!("Incorrect. The correct answer is {}.", correct)
        };
        Ok(ExerciseResult::new(is_correct, answer, correct, feedback))
    }

    fn hints(&self) -> Vec<String> {
        vec![
            "Do is the most stable of the three".to_string(),
            "Sol sits a fifth above Do; Mi sits in between".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests;
