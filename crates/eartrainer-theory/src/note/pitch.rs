//! Pitch classes and note-name spelling.

use serde::{Deserialize, Serialize};

use crate::error::{TheoryError, TheoryResult};

/// One of the twelve pitch classes, spelled with sharps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    #[serde(rename = "C#")]
    CSharp,
    D,
    #[serde(rename = "D#")]
    DSharp,
    E,
    F,
    #[serde(rename = "F#")]
    FSharp,
    G,
    #[serde(rename = "G#")]
    GSharp,
    A,
    #[serde(rename = "A#")]
    ASharp,
    B,
}

/// The white-key pitch classes, C through B.
pub const NATURAL_PITCH_CLASSES: [PitchClass; 7] = [
    PitchClass::C,
    PitchClass::D,
    PitchClass::E,
    PitchClass::F,
    PitchClass::G,
    PitchClass::A,
    PitchClass::B,
];

impl PitchClass {
    /// All pitch classes in chromatic order starting at C.
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Semitones above C (0-11).
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Pitch class for any integer, reduced mod 12.
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(12) as usize]
    }

    /// Sharp spelling of the pitch class.
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }

    /// Returns true for C, D, E, F, G, A and B.
    pub fn is_natural(self) -> bool {
        NATURAL_PITCH_CLASSES.contains(&self)
    }

    /// Parses a bare pitch-class name such as `"C"`, `"f#"` or `"Bb"`.
    ///
    /// Flats and white-key accidentals (`Cb`, `E#`) are normalized to the
    /// sharp spelling of the sounding pitch.
    pub fn parse(name: &str) -> TheoryResult<Self> {
        let trimmed = name.trim();
        let mut chars = trimmed.chars();
        let letter = chars
            .next()
            .ok_or_else(|| TheoryError::UnknownNote(name.to_string()))?;
        let base = letter_offset(letter).ok_or_else(|| TheoryError::UnknownNote(name.to_string()))?;
        let accidental = match chars.as_str() {
            "" => 0,
            "#" => 1,
            "b" => -1,
            _ => return Err(TheoryError::UnknownNote(name.to_string())),
        };
        Ok(Self::from_index(base + accidental))
    }

    /// Transposes the pitch class by a number of semitones, wrapping mod 12.
    pub fn transpose(self, semitones: i32) -> Self {
        Self::from_index(self.index() as i32 + semitones)
    }
}

impl std::fmt::Display for PitchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for PitchClass {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Semitone offset of a natural letter above C.
pub(crate) fn letter_offset(letter: char) -> Option<i32> {
    match letter.to_ascii_uppercase() {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Lenient pitch-class lookup. Unknown names map to 0 (C).
///
/// # Examples
/// ```
/// use eartrainer_theory::note::pitch_class_index;
///
/// assert_eq!(pitch_class_index("E"), 4);
/// assert_eq!(pitch_class_index("Bb"), 10);
/// assert_eq!(pitch_class_index("H"), 0);
/// ```
pub fn pitch_class_index(name: &str) -> u8 {
    PitchClass::parse(name).map(PitchClass::index).unwrap_or(0)
}
