//! Typed answer-check context.
//!
//! Every generated exercise carries one of these. It holds the correct
//! answer plus the musical facts behind it, so a later check needs nothing
//! but the context itself. At the service boundary it travels as a JSON
//! object with a `family` tag.

use eartrainer_theory::{ChordQuality, FifthQuality, Interval, Key, Note, PitchClass};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ConfigOverrides;

/// Context as a generic key-value map.
pub type ContextMap = serde_json::Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum ExerciseContext {
    Interval(IntervalContext),
    Chord(ChordContext),
    FifthQuality(FifthQualityContext),
    Direction(DirectionContext),
    StepLeap(StepLeapContext),
    MelodicShape(ShapeContext),
    HomeNote(HomeNoteContext),
    ScaleDegree(ScaleDegreeContext),
    TriadNote(TriadNoteContext),
}

impl ExerciseContext {
    /// The answer recorded at generation time.
    pub fn correct_answer(&self) -> &str {
        match self {
            ExerciseContext::Interval(c) => &c.correct_answer,
            ExerciseContext::Chord(c) => &c.correct_answer,
            ExerciseContext::FifthQuality(c) => &c.correct_answer,
            ExerciseContext::Direction(c) => &c.correct_answer,
            ExerciseContext::StepLeap(c) => &c.correct_answer,
            ExerciseContext::MelodicShape(c) => &c.correct_answer,
            ExerciseContext::HomeNote(c) => &c.correct_answer,
            ExerciseContext::ScaleDegree(c) => &c.correct_answer,
            ExerciseContext::TriadNote(c) => &c.correct_answer,
        }
    }

    /// The `family` tag.
    pub fn family(&self) -> &'static str {
        match self {
            ExerciseContext::Interval(_) => "interval",
            ExerciseContext::Chord(_) => "chord",
            ExerciseContext::FifthQuality(_) => "fifth_quality",
            ExerciseContext::Direction(_) => "direction",
            ExerciseContext::StepLeap(_) => "step_leap",
            ExerciseContext::MelodicShape(_) => "melodic_shape",
            ExerciseContext::HomeNote(_) => "home_note",
            ExerciseContext::ScaleDegree(_) => "scale_degree",
            ExerciseContext::TriadNote(_) => "triad_note",
        }
    }

    /// Serializes to a key-value map.
    pub fn to_map(&self) -> ContextMap {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // Internally tagged enums of structs always serialize to objects.
            _ => ContextMap::new(),
        }
    }

    /// Reads a context back from a key-value map.
    pub fn from_map(map: &ContextMap) -> Result<Self, serde_json::Error> {
        serde_json::from_value(Value::Object(map.clone()))
    }
}

/// How the two notes of an interval are played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalTiming {
    /// Root first, second note enters after a short delay.
    Melodic,
    /// Both notes together.
    Harmonic,
}

impl IntervalTiming {
    pub fn as_str(self) -> &'static str {
        match self {
            IntervalTiming::Melodic => "melodic",
            IntervalTiming::Harmonic => "harmonic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalContext {
    pub reference_note: Note,
    pub second_note: Note,
    pub interval: Interval,
    pub interval_semitones: i32,
    pub question_number: u32,
    pub total_questions: u32,
    pub timing: IntervalTiming,
    pub octave: i32,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordContext {
    pub root_note: PitchClass,
    pub octave: i32,
    /// Chord-type token as offered by the exercise (`"major"`, `"sus2"`, `"3m"`).
    pub chord_type: String,
    pub chord_notes: Vec<Note>,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FifthQualityContext {
    pub root: PitchClass,
    pub octave: i32,
    pub third_quality: ChordQuality,
    pub fifth_quality: FifthQuality,
    pub triad_notes: Vec<Note>,
    pub correct_answer: String,
}

/// Pitch direction of a second note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Higher,
    Lower,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Higher, Direction::Lower];

    pub fn key(self) -> &'static str {
        match self {
            Direction::Higher => "higher",
            Direction::Lower => "lower",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Higher => "Higher",
            Direction::Lower => "Lower",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionContext {
    pub first_note: Note,
    pub second_note: Note,
    pub direction: Direction,
    pub note_duration: f64,
    pub correct_answer: String,
}

/// Step (a second) or leap (a third or wider).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motion {
    Step,
    Leap,
}

impl Motion {
    pub const ALL: [Motion; 2] = [Motion::Step, Motion::Leap];

    pub fn key(self) -> &'static str {
        match self {
            Motion::Step => "step",
            Motion::Leap => "leap",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Motion::Step => "Step",
            Motion::Leap => "Leap",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepLeapContext {
    pub first_note: Note,
    pub second_note: Note,
    pub interval: Interval,
    pub interval_type: Motion,
    pub correct_answer: String,
}

/// Melodic contour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Contour {
    Arch,
    Zigzag,
    Ascending,
    Descending,
}

impl Contour {
    pub const ALL: [Contour; 4] = [Contour::Arch, Contour::Zigzag, Contour::Ascending, Contour::Descending];

    pub fn key(self) -> &'static str {
        match self {
            Contour::Arch => "arch",
            Contour::Zigzag => "zigzag",
            Contour::Ascending => "ascending",
            Contour::Descending => "descending",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Contour::Arch => "Arch",
            Contour::Zigzag => "Zigzag",
            Contour::Ascending => "Ascending",
            Contour::Descending => "Descending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeContext {
    pub shape: Contour,
    pub notes: Vec<Note>,
    pub phrase_length: u32,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeNoteContext {
    pub key: Key,
    /// Melody spelled for the key (`"Bb-4"`).
    pub melody_notes: Vec<String>,
    pub tonic_note: String,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleDegreeContext {
    pub key: Key,
    pub degree: u8,
    pub target_note: Note,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriadNoteContext {
    pub key: Key,
    pub target_solfege: String,
    pub target_note: Note,
    pub correct_answer: String,
}

/// Converts a JSON value into an override map, treating non-objects as empty.
pub fn overrides_from_value(value: Value) -> ConfigOverrides {
    match value {
        Value::Object(map) => map,
        _ => ConfigOverrides::new(),
    }
}
