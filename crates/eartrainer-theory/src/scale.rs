//! Scales, scale degrees, solfège and the practice keys.

use serde::{Deserialize, Serialize};

use crate::error::{TheoryError, TheoryResult};
use crate::note::{Note, PitchClass, DEFAULT_OCTAVE};

/// Solfège syllables for degrees 1 through 7 of a major scale.
pub const SOLFEGE: [&str; 7] = ["Do", "Re", "Mi", "Fa", "Sol", "La", "Ti"];

/// Scale shapes, described by their whole/half step pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleKind {
    Major,
    NaturalMinor,
    HarmonicMinor,
    /// Ascending form.
    MelodicMinor,
}

impl ScaleKind {
    /// Semitone steps between consecutive degrees, closing back to the octave.
    pub fn steps(self) -> [i32; 7] {
        match self {
            ScaleKind::Major => [2, 2, 1, 2, 2, 2, 1],
            ScaleKind::NaturalMinor => [2, 1, 2, 2, 1, 2, 2],
            ScaleKind::HarmonicMinor => [2, 1, 2, 2, 1, 3, 1],
            ScaleKind::MelodicMinor => [2, 1, 2, 2, 2, 2, 1],
        }
    }

    /// Semitone offsets of degrees 1-7 above the tonic.
    pub fn offsets(self) -> [i32; 7] {
        let mut offsets = [0; 7];
        let steps = self.steps();
        for i in 1..7 {
            offsets[i] = offsets[i - 1] + steps[i - 1];
        }
        offsets
    }
}

/// Seven ascending notes of a scale starting on `tonic`.
pub fn build_scale(tonic: Note, kind: ScaleKind) -> Vec<Note> {
    kind.offsets().iter().map(|&s| tonic.transpose(s)).collect()
}

/// Note at a 1-based degree of `scale`, or `None` out of range.
pub fn scale_degree(scale: &[Note], degree: usize) -> Option<Note> {
    degree.checked_sub(1).and_then(|i| scale.get(i)).copied()
}

/// Solfège syllable for a 1-based degree.
pub fn solfege(degree: usize) -> Option<&'static str> {
    degree.checked_sub(1).and_then(|i| SOLFEGE.get(i)).copied()
}

/// 1-based degree for a solfège syllable, case-insensitive.
pub fn solfege_degree(syllable: &str) -> Option<usize> {
    let key = syllable.trim();
    SOLFEGE
        .iter()
        .position(|s| s.eq_ignore_ascii_case(key))
        .map(|i| i + 1)
}

/// Functional name of a scale degree (`"tonic"`, `"dominant"`).
pub fn degree_name(degree: usize) -> Option<&'static str> {
    const NAMES: [&str; 7] = [
        "tonic",
        "supertonic",
        "mediant",
        "subdominant",
        "dominant",
        "submediant",
        "leading tone",
    ];
    degree.checked_sub(1).and_then(|i| NAMES.get(i)).copied()
}

/// English ordinal suffix: 1st, 2nd, 3rd, 4th, 11th, 22nd.
pub fn ordinal_suffix(n: usize) -> &'static str {
    if (10..=20).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// The major keys used by the tonal-center exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    C,
    G,
    D,
    A,
    F,
    #[serde(rename = "Bb")]
    BFlat,
    #[serde(rename = "Eb")]
    EFlat,
}

impl Key {
    pub const ALL: [Key; 7] = [Key::C, Key::G, Key::D, Key::A, Key::F, Key::BFlat, Key::EFlat];

    /// Key label as written (`"Bb"`).
    pub fn label(self) -> &'static str {
        match self {
            Key::C => "C",
            Key::G => "G",
            Key::D => "D",
            Key::A => "A",
            Key::F => "F",
            Key::BFlat => "Bb",
            Key::EFlat => "Eb",
        }
    }

    /// Parses a key label.
    pub fn parse(label: &str) -> TheoryResult<Self> {
        let key = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.label() == key)
            .ok_or_else(|| TheoryError::UnknownKey(label.to_string()))
    }

    /// Tonic in the practice octave.
    pub fn tonic(self) -> Note {
        let pitch_class = match self {
            Key::C => PitchClass::C,
            Key::G => PitchClass::G,
            Key::D => PitchClass::D,
            Key::A => PitchClass::A,
            Key::F => PitchClass::F,
            Key::BFlat => PitchClass::ASharp,
            Key::EFlat => PitchClass::DSharp,
        };
        Note::new(pitch_class, DEFAULT_OCTAVE)
    }

    /// True for keys whose signature uses flats.
    pub fn uses_flats(self) -> bool {
        matches!(self, Key::F | Key::BFlat | Key::EFlat)
    }

    /// Seven ascending scale notes starting at the tonic.
    pub fn scale(self) -> Vec<Note> {
        build_scale(self.tonic(), ScaleKind::Major)
    }

    /// Eight ascending notes, tonic to tonic.
    pub fn octave_scale(self) -> Vec<Note> {
        let mut notes = self.scale();
        notes.push(self.tonic().transpose(12));
        notes
    }

    /// Note at a 1-based degree of the key.
    pub fn degree(self, degree: usize) -> Option<Note> {
        scale_degree(&self.scale(), degree)
    }

    /// Pitch-class name spelled for this key (`A#` is `Bb` in flat keys).
    pub fn spell_pitch_class(self, pitch_class: PitchClass) -> &'static str {
        if !self.uses_flats() {
            return pitch_class.name();
        }
        match pitch_class {
            PitchClass::CSharp => "Db",
            PitchClass::DSharp => "Eb",
            PitchClass::FSharp => "Gb",
            PitchClass::GSharp => "Ab",
            PitchClass::ASharp => "Bb",
            other => other.name(),
        }
    }

    /// Note spelled for this key, dashed (`"Bb-4"`). Parses back with [`Note::parse`].
    pub fn spell(self, note: &Note) -> String {
        format!("{}-{}", self.spell_pitch_class(note.pitch_class), note.octave)
    }

    /// Scale note names without octaves (`["F", "G", "A", "Bb", ...]`).
    pub fn scale_names(self) -> Vec<String> {
        self.scale()
            .iter()
            .map(|n| self.spell_pitch_class(n.pitch_class).to_string())
            .collect()
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Key {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
