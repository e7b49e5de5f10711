//! Chord recognition: triad qualities, suspended chords and fifth quality.

use eartrainer_audio::{AudioStore, RenderRequest};
use eartrainer_theory::{build_chord, build_fifth_quality_chord, ChordQuality, FifthQuality, PitchClass};
use rand::RngCore;

use crate::catalog::{natural_names, parse_natural, random_natural};
use crate::choice::{uniform_weights, weighted_choice};
use crate::config::{ConfigOverrides, Overrides};
use crate::context::{ChordContext, ExerciseContext, FifthQualityContext};
use crate::error::{ExerciseError, ServiceResult};
use crate::exercise::{answers_match, foreign_context, render_audio, CaseRule, Exercise};
use crate::metadata::{human_list, ConfigOption, ExerciseData, ExerciseMetadata, ExerciseResult};

const CHORD_SECS: f64 = 2.0;
const DEFAULT_OCTAVE: i64 = 4;

/// Returns the chord exercises.
pub fn all_exercises() -> Vec<Box<dyn Exercise>> {
    vec![
        Box::new(ChordExercise::new(
            "major_minor_triads",
            vec![
                ChordChoice::named("major", ChordQuality::Major),
                ChordChoice::named("minor", ChordQuality::Minor),
            ],
            "Listen to a triad and identify if it sounds happy (major) or sad (minor).",
        )),
        Box::new(ChordExercise::new(
            "all_triad_types",
            vec![
                ChordChoice::named("major", ChordQuality::Major),
                ChordChoice::named("minor", ChordQuality::Minor),
                ChordChoice::named("diminished", ChordQuality::Diminished),
                ChordChoice::named("augmented", ChordQuality::Augmented),
            ],
            "Listen to a triad and identify its quality: major, minor, diminished, or augmented.",
        )),
        Box::new(ChordExercise::new(
            "suspended_chords",
            vec![
                ChordChoice::token("sus2", ChordQuality::Sus2, "Suspended 2nd"),
                ChordChoice::token("sus4", ChordQuality::Sus4, "Suspended 4th"),
                ChordChoice::token("3m", ChordQuality::Minor, "Minor Third"),
                ChordChoice::token("3M", ChordQuality::Major, "Major Third"),
            ],
            "Listen to a chord and identify its type: suspended 2nd, suspended 4th, minor third, or major third.",
        )),
        Box::new(FifthQualityExercise::new()),
    ]
}

/// One answer of a chord exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordChoice {
    /// Token used in overrides and probability tables.
    pub token: &'static str,
    pub quality: ChordQuality,
    /// Answer option shown to the learner.
    pub label: &'static str,
    /// Long name used in titles.
    pub long_name: &'static str,
}

impl ChordChoice {
    /// Choice whose label is the quality's display name (`"Major"`).
    pub fn named(token: &'static str, quality: ChordQuality) -> Self {
        Self {
            token,
            quality,
            label: quality.display_name(),
            long_name: quality.display_name(),
        }
    }

    /// Choice whose label is its token (`"3m"`).
    pub fn token(token: &'static str, quality: ChordQuality, long_name: &'static str) -> Self {
        Self {
            token,
            quality,
            label: token,
            long_name,
        }
    }
}

/// A chord exercise over a fixed set of chord types.
#[derive(Debug, Clone)]
pub struct ChordExercise {
    choices: Vec<ChordChoice>,
    metadata: ExerciseMetadata,
}

impl ChordExercise {
    pub fn new(exercise_type: &str, choices: Vec<ChordChoice>, description: &str) -> Self {
        let long_names: Vec<&str> = choices.iter().map(|c| c.long_name).collect();
        let tokens: Vec<&str> = choices.iter().map(|c| c.token).collect();

        let mut metadata = ExerciseMetadata::new(
            exercise_type,
            format!("{} Recognition", human_list(&long_names)),
            description,
        );
        metadata.difficulty = 3;
        metadata.category = "chords".to_string();
        metadata.estimated_time = 900;
        metadata.prerequisites = vec!["major_vs_minor_chords".to_string()];
        metadata.answer_format = "chord_type".to_string();
        metadata.audio_duration = 4;
        metadata.learning_objectives = long_names
            .iter()
            .map(|n| format!("Recognize {} chords", n))
            .collect();
        metadata.tags = std::iter::once("chords".to_string())
            .chain(tokens.iter().map(|t| t.replace('_', "")))
            .collect();
        metadata.config_options = vec![
            ConfigOption::list("available_chord_types", &tokens),
            ConfigOption::list("root_notes", &natural_names()),
            ConfigOption::string("root_note", "random"),
            ConfigOption::int("octave", DEFAULT_OCTAVE, 1, 7),
            ConfigOption::string("chord_type", "random").choices(&tokens),
            ConfigOption::probabilities("chord_probabilities", &tokens, "chord type"),
        ];

        Self { choices, metadata }
    }

    pub fn choices(&self) -> &[ChordChoice] {
        &self.choices
    }

    fn options(&self) -> Vec<String> {
        self.choices.iter().map(|c| c.label.to_string()).collect()
    }

    fn find(&self, text: &str) -> Option<&ChordChoice> {
        self.choices
            .iter()
            .find(|c| c.token == text || c.label == text)
            .or_else(|| {
                let mut matches = self
                    .choices
                    .iter()
                    .filter(|c| c.token.eq_ignore_ascii_case(text) || c.label.eq_ignore_ascii_case(text));
                match (matches.next(), matches.next()) {
                    (Some(only), None) => Some(only),
                    _ => None,
                }
            })
    }
}

impl Exercise for ChordExercise {
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

        let root = o
            .parsed("root_note", |s| PitchClass::parse(s).ok())
            .unwrap_or_else(|| random_natural(rng));
        let octave = o.int_in("octave", 1..=7).unwrap_or(DEFAULT_OCTAVE) as i32;

        let choice = match o.parsed("chord_type", |s| self.find(s)) {
            Some(choice) => choice,
            None => {
                let tokens: Vec<&str> = self.choices.iter().map(|c| c.token).collect();
                let table = o
                    .probabilities("chord_probabilities", &tokens)
                    .unwrap_or_else(|| uniform_weights(&tokens));
                let token = weighted_choice(rng, &table)
                    .ok_or_else(|| ExerciseError::internal("exercise has no chord types"))?;
                self.find(token)
                    .ok_or_else(|| ExerciseError::internal("unknown chord type in table"))?
            }
        };

        let chord = build_chord(root, choice.quality, octave);
        let handle = render_audio(
            audio,
            &self.metadata.id,
            &RenderRequest::Chord {
                notes: chord.notes.clone(),
                duration: CHORD_SECS,
            },
        )?;

        let correct_answer = choice.label.to_string();
        Ok(ExerciseData {
            key: format!("{} {}", root, correct_answer),
            scale: Vec::new(),
            progression_audio: None,
            target_audio: Some(handle),
            options: self.options(),
            correct_answer: correct_answer.clone(),
            context: ExerciseContext::Chord(ChordContext {
                root_note: root,
                octave,
                chord_type: choice.token.to_string(),
                chord_notes: chord.notes,
                correct_answer,
            }),
        })
    }

    fn check_answer(&self, answer: &str, context: &ExerciseContext) -> ServiceResult<ExerciseResult> {
        let ExerciseContext::Chord(context) = context else {
            return Err(foreign_context(&self.metadata.id, context));
        };
        let correct = context.correct_answer.as_str();
        let is_correct = answers_match(answer, correct, CaseRule::for_options(&self.options()));
        let feedback = if is_correct {
            format!("Correct! This is a {} chord.", correct)
        } else {
            format!("Incorrect. This is a {} chord.", correct)
        };
        Ok(ExerciseResult::new(is_correct, answer, correct, feedback))
    }

    fn hints(&self) -> Vec<String> {
        let mut hints = vec!["Listen to the overall color of the chord before picking out single notes".to_string()];
        if self.choices.iter().any(|c| c.quality == ChordQuality::Major) {
            hints.push("Major chords sound bright and stable; minor chords sound darker".to_string());
        }
        if self.choices.iter().any(|c| c.quality.is_suspended()) {
            hints.push("Suspended chords have no third, so they sound open and unresolved".to_string());
        }
        if self.choices.iter().any(|c| c.quality == ChordQuality::Diminished) {
            hints.push("Diminished chords sound tense; augmented chords sound bright but unsettled".to_string());
        }
        hints
    }
}

/// Major triad whose fifth is diminished, perfect or augmented.
#[derive(Debug, Clone)]
pub struct FifthQualityExercise {
    metadata: ExerciseMetadata,
}

impl FifthQualityExercise {
    pub fn new() -> Self {
        let tokens: Vec<&str> = FifthQuality::ALL.iter().map(|q| q.token()).collect();
        let mut metadata = ExerciseMetadata::new(
            "triad_fifth_quality",
            "Fifth Quality (5dim / 5J / 5aug)",
            "Listen to a major triad (major third fixed) and identify the fifth quality: \
             diminished (5dim), perfect (5J), or augmented (5aug).",
        );
        metadata.difficulty = 3;
        metadata.category = "chords".to_string();
        metadata.tags = ["triads", "fifth", "diminished", "augmented", "perfect"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        metadata.estimated_time = 900;
        metadata.prerequisites = vec!["major_minor_triads".to_string()];
        metadata.learning_objectives = vec!["Differentiate fifth qualities with a fixed major third".to_string()];
        metadata.answer_format = "fifth_quality".to_string();
        metadata.audio_duration = 2;
        metadata.config_options = vec![
            ConfigOption::list("root_notes", &natural_names()),
            ConfigOption::string("root_note", "random").choices(&natural_names()),
            ConfigOption::int("octave", DEFAULT_OCTAVE, 3, 5),
            ConfigOption::string("fifth_quality", "random").choices(&tokens),
            ConfigOption::probabilities("fifth_probabilities", &tokens, "fifth quality"),
        ];
        Self { metadata }
    }
}

impl Default for FifthQualityExercise {
    fn default() -> Self {
        Self::new()
    }
}

impl Exercise for FifthQualityExercise {
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

        let root = o
            .parsed("root_note", parse_natural)
            .unwrap_or_else(|| random_natural(rng));
        let octave = o.int_in("octave", 3..=5).unwrap_or(DEFAULT_OCTAVE) as i32;
        let fifth = match o.parsed("fifth_quality", |s| FifthQuality::parse(s).ok()) {
            Some(fifth) => fifth,
            None => {
                let tokens: Vec<&str> = FifthQuality::ALL.iter().map(|q| q.token()).collect();
                let table = o
                    .probabilities("fifth_probabilities", &tokens)
                    .unwrap_or_else(|| uniform_weights(&tokens));
                let token = weighted_choice(rng, &table)
                    .ok_or_else(|| ExerciseError::internal("no fifth qualities"))?;
                FifthQuality::parse(token).map_err(|_| ExerciseError::internal("unknown fifth quality in table"))?
            }
        };

        let chord = build_fifth_quality_chord(root, fifth, octave);
        let handle = render_audio(
            audio,
            &self.metadata.id,
            &RenderRequest::Chord {
                notes: chord.notes.clone(),
                duration: CHORD_SECS,
            },
        )?;

        let correct_answer = fifth.token().to_string();
        Ok(ExerciseData {
            key: format!("{} Major Triad ({})", root, correct_answer),
            scale: Vec::new(),
            progression_audio: None,
            target_audio: Some(handle),
            options: FifthQuality::ALL.iter().map(|q| q.token().to_string()).collect(),
            correct_answer: correct_answer.clone(),
            context: ExerciseContext::FifthQuality(FifthQualityContext {
                root,
                octave,
                third_quality: ChordQuality::Major,
                fifth_quality: fifth,
                triad_notes: chord.notes,
                correct_answer,
            }),
        })
    }

    fn check_answer(&self, answer: &str, context: &ExerciseContext) -> ServiceResult<ExerciseResult> {
        let ExerciseContext::FifthQuality(context) = context else {
            return Err(foreign_context(&self.metadata.id, context));
        };
        let correct = context.correct_answer.as_str();
        let is_correct = answers_match(answer, correct, CaseRule::Sensitive);
        let feedback = if is_correct {
            match context.fifth_quality {
                FifthQuality::Diminished => "Correct! Diminished fifth adds strong tension.",
                FifthQuality::Perfect => "Correct! Perfect fifth sounds stable and consonant.",
                FifthQuality::Augmented => "Correct! Augmented fifth adds bright tension.",
            }
            .to_string()
        } else {
            format!("Incorrect. The fifth quality is {}.", correct)
        };
        Ok(ExerciseResult::new(is_correct, answer, correct, feedback))
    }

    fn hints(&self) -> Vec<String> {
        vec![
            "The root and major third never change; listen only to the top note".to_string(),
            "A perfect fifth blends smoothly with the root".to_string(),
            "A diminished fifth sounds pinched; an augmented fifth sounds stretched".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests;
