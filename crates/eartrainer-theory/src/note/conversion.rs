//! The `Note` type: parsing, spelling, MIDI numbers and transposition.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::pitch::{letter_offset, PitchClass, NATURAL_PITCH_CLASSES};
use crate::error::{TheoryError, TheoryResult};

/// Lowest octave a parsed note can carry.
pub const MIN_OCTAVE: i32 = 1;
/// Highest octave a parsed note can carry.
pub const MAX_OCTAVE: i32 = 8;
/// Octave used when a note name carries none.
pub const DEFAULT_OCTAVE: i32 = 4;

/// Letter, optional accidental, optional one- or two-digit octave with an
/// optional dash.
const NOTE_PATTERN: &str = r"^\s*([A-Ga-g])([#b]?)(?:-?(\d{1,2}))?\s*$";

static NOTE_REGEX: OnceLock<Regex> = OnceLock::new();

fn note_regex() -> &'static Regex {
    NOTE_REGEX.get_or_init(|| Regex::new(NOTE_PATTERN).expect("invalid regex pattern"))
}

/// A pitch class in a specific octave.
///
/// Octave numbering follows scientific pitch notation (C-4 is middle C,
/// MIDI 60). Parsing clamps the octave to `[MIN_OCTAVE, MAX_OCTAVE]`;
/// arithmetic such as [`Note::transpose`] does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    pub pitch_class: PitchClass,
    pub octave: i32,
}

impl Note {
    /// Creates a note without clamping the octave.
    pub const fn new(pitch_class: PitchClass, octave: i32) -> Self {
        Self {
            pitch_class,
            octave,
        }
    }

    /// Creates a note with the octave clamped to the supported range.
    pub fn clamped(pitch_class: PitchClass, octave: i32) -> Self {
        Self::new(pitch_class, octave.clamp(MIN_OCTAVE, MAX_OCTAVE))
    }

    /// Parses `"C-4"`, `"C4"`, `"c#-5"`, `"Bb-3"` or a bare `"C"` (octave 4).
    pub fn parse(name: &str) -> TheoryResult<Self> {
        let caps = note_regex()
            .captures(name)
            .ok_or_else(|| TheoryError::UnknownNote(name.to_string()))?;

        let letter = caps[1]
            .chars()
            .next()
            .and_then(letter_offset)
            .ok_or_else(|| TheoryError::UnknownNote(name.to_string()))?;
        let accidental = match &caps[2] {
            "#" => 1,
            "b" => -1,
            _ => 0,
        };
        let octave = match caps.get(3) {
            Some(m) => m
                .as_str()
                .parse::<i32>()
                .map_err(|_| TheoryError::UnknownNote(name.to_string()))?,
            None => DEFAULT_OCTAVE,
        };

        // Cb-4 sounds as B-3 and B#-4 as C-5.
        let absolute = octave * 12 + letter + accidental;
        Ok(Note::clamped(
            PitchClass::from_index(absolute),
            absolute.div_euclid(12),
        ))
    }

    /// Parses a note, falling back to C in the default octave.
    pub fn parse_lenient(name: &str) -> Self {
        Self::parse(name).unwrap_or(Note::new(PitchClass::C, DEFAULT_OCTAVE))
    }

    /// Note for a MIDI number (60 = C-4).
    pub fn from_midi(midi: i32) -> Self {
        Self::new(PitchClass::from_index(midi), midi.div_euclid(12) - 1)
    }

    /// MIDI number: `(octave + 1) * 12 + pitch class`.
    ///
    /// # Examples
    /// ```
    /// use eartrainer_theory::Note;
    ///
    /// assert_eq!(Note::parse("C-4").unwrap().midi_number(), 60);
    /// assert_eq!(Note::parse("A-4").unwrap().midi_number(), 69);
    /// ```
    pub fn midi_number(&self) -> i32 {
        (self.octave + 1) * 12 + self.pitch_class.index() as i32
    }

    /// Moves the note by `semitones`, carrying into the octave.
    pub fn transpose(&self, semitones: i32) -> Self {
        let shifted = self.pitch_class.index() as i32 + semitones;
        Self::new(
            PitchClass::from_index(shifted),
            self.octave + shifted.div_euclid(12),
        )
    }

    /// Signed semitone distance from `self` up to `other`.
    pub fn distance_to(&self, other: &Note) -> i32 {
        other.midi_number() - self.midi_number()
    }

    /// Same pitch class in a different octave.
    pub fn with_octave(&self, octave: i32) -> Self {
        Self::new(self.pitch_class, octave)
    }
}

impl std::fmt::Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.pitch_class, self.octave)
    }
}

impl std::str::FromStr for Note {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Note {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Note {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Note::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Signed semitone distance between two notes (`b - a`).
pub fn note_distance(a: &Note, b: &Note) -> i32 {
    a.distance_to(b)
}

/// The twelve chromatic notes of one octave, C upward.
pub fn chromatic_notes_in_octave(octave: i32) -> Vec<Note> {
    PitchClass::ALL
        .iter()
        .map(|&pc| Note::new(pc, octave))
        .collect()
}

/// The seven natural notes of one octave, C upward.
pub fn natural_notes_in_octave(octave: i32) -> Vec<Note> {
    NATURAL_PITCH_CLASSES
        .iter()
        .map(|&pc| Note::new(pc, octave))
        .collect()
}
