//! Chord construction and quality detection.
//!
//! Chord tones are placed ascending from the root: a tone whose pitch class
//! is numerically below the root's is bumped up one octave, so no tone ever
//! sounds below the root.

use serde::{Deserialize, Serialize};

use crate::error::{TheoryError, TheoryResult};
use crate::note::{Note, PitchClass};

/// Chord qualities built from a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    DominantSeventh,
    MajorSeventh,
    MinorSeventh,
}

impl ChordQuality {
    /// Every supported quality.
    pub const ALL: [ChordQuality; 9] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
        ChordQuality::Sus2,
        ChordQuality::Sus4,
        ChordQuality::DominantSeventh,
        ChordQuality::MajorSeventh,
        ChordQuality::MinorSeventh,
    ];

    /// Semitone offsets of each chord tone above the root.
    pub fn intervals(self) -> &'static [i32] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Diminished => &[0, 3, 6],
            ChordQuality::Augmented => &[0, 4, 8],
            ChordQuality::Sus2 => &[0, 2, 7],
            ChordQuality::Sus4 => &[0, 5, 7],
            ChordQuality::DominantSeventh => &[0, 4, 7, 10],
            ChordQuality::MajorSeventh => &[0, 4, 7, 11],
            ChordQuality::MinorSeventh => &[0, 3, 7, 10],
        }
    }

    /// Configuration identifier (`"major"`, `"sus2"`, `"dominant_seventh"`).
    pub fn name(self) -> &'static str {
        match self {
            ChordQuality::Major => "major",
            ChordQuality::Minor => "minor",
            ChordQuality::Diminished => "diminished",
            ChordQuality::Augmented => "augmented",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::DominantSeventh => "dominant_seventh",
            ChordQuality::MajorSeventh => "major_seventh",
            ChordQuality::MinorSeventh => "minor_seventh",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            ChordQuality::Major => "Major",
            ChordQuality::Minor => "Minor",
            ChordQuality::Diminished => "Diminished",
            ChordQuality::Augmented => "Augmented",
            ChordQuality::Sus2 => "Suspended 2nd",
            ChordQuality::Sus4 => "Suspended 4th",
            ChordQuality::DominantSeventh => "Dominant 7th",
            ChordQuality::MajorSeventh => "Major 7th",
            ChordQuality::MinorSeventh => "Minor 7th",
        }
    }

    /// Suffix appended to the root in a chord symbol.
    pub fn symbol_suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::DominantSeventh => "7",
            ChordQuality::MajorSeventh => "maj7",
            ChordQuality::MinorSeventh => "m7",
        }
    }

    /// True for the two suspended qualities, which have no third.
    pub fn is_suspended(self) -> bool {
        matches!(self, ChordQuality::Sus2 | ChordQuality::Sus4)
    }

    /// Parses a quality name or common alias.
    ///
    /// The third-quality tokens `3M` and `3m` map to major and minor triads;
    /// they are matched case-sensitively, everything else is not.
    pub fn parse(name: &str) -> TheoryResult<Self> {
        let trimmed = name.trim();
        match trimmed {
            "3M" => return Ok(ChordQuality::Major),
            "3m" => return Ok(ChordQuality::Minor),
            "m7" => return Ok(ChordQuality::MinorSeventh),
            _ => {}
        }
        let quality = match trimmed.to_ascii_lowercase().as_str() {
            "major" | "maj" => ChordQuality::Major,
            "minor" | "min" => ChordQuality::Minor,
            "diminished" | "dim" => ChordQuality::Diminished,
            "augmented" | "aug" => ChordQuality::Augmented,
            "sus2" | "suspended_second" => ChordQuality::Sus2,
            "sus4" | "suspended_fourth" => ChordQuality::Sus4,
            "dominant_seventh" | "7" | "dom7" => ChordQuality::DominantSeventh,
            "major_seventh" | "maj7" => ChordQuality::MajorSeventh,
            "minor_seventh" | "min7" => ChordQuality::MinorSeventh,
            _ => return Err(TheoryError::UnknownChordQuality(name.to_string())),
        };
        Ok(quality)
    }
}

impl std::fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ChordQuality {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Quality of the fifth in a triad whose third is held at a major third.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FifthQuality {
    #[serde(rename = "5dim")]
    Diminished,
    #[serde(rename = "5J")]
    Perfect,
    #[serde(rename = "5aug")]
    Augmented,
}

impl FifthQuality {
    pub const ALL: [FifthQuality; 3] = [
        FifthQuality::Diminished,
        FifthQuality::Perfect,
        FifthQuality::Augmented,
    ];

    /// Semitones from the root to the fifth.
    pub fn semitones(self) -> i32 {
        match self {
            FifthQuality::Diminished => 6,
            FifthQuality::Perfect => 7,
            FifthQuality::Augmented => 8,
        }
    }

    /// Answer token (`"5dim"`, `"5J"`, `"5aug"`).
    pub fn token(self) -> &'static str {
        match self {
            FifthQuality::Diminished => "5dim",
            FifthQuality::Perfect => "5J",
            FifthQuality::Augmented => "5aug",
        }
    }

    /// Parses an answer token. Case-sensitive.
    pub fn parse(token: &str) -> TheoryResult<Self> {
        let key = token.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|q| q.token() == key)
            .ok_or_else(|| TheoryError::UnknownFifthQuality(token.to_string()))
    }
}

impl std::fmt::Display for FifthQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl std::str::FromStr for FifthQuality {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// An ordered set of chord tones with the root first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    pub root: Note,
    pub notes: Vec<Note>,
}

impl Chord {
    /// Chord tones as dashed note names.
    pub fn note_names(&self) -> Vec<String> {
        self.notes.iter().map(ToString::to_string).collect()
    }

    /// Detected quality of the chord, if it matches a known pattern.
    pub fn quality(&self) -> Option<ChordQuality> {
        detect_quality(&self.notes)
    }

    /// Chord symbol such as `"C"`, `"F#m"` or `"G7"`.
    pub fn symbol(&self) -> String {
        chord_symbol(&self.notes)
    }

    /// Rotates the chord `inversion` times, raising each moved tone by
    /// octaves until it sits above the current top tone.
    ///
    /// Inversion 0, or any value not below the tone count, returns the chord
    /// unchanged.
    pub fn invert(&self, inversion: usize) -> Chord {
        if inversion == 0 || inversion >= self.notes.len() {
            return self.clone();
        }
        let mut notes = self.notes.clone();
        for _ in 0..inversion {
            let moved = notes.remove(0);
            let top = notes.last().map(Note::midi_number).unwrap_or(i32::MIN);
            let mut raised = moved;
            while raised.midi_number() <= top {
                raised = raised.transpose(12);
            }
            notes.push(raised);
        }
        Chord {
            root: self.root,
            notes,
        }
    }
}

/// Octave for a chord tone `semitones` above `root`, per the ascending rule.
fn tone_above(root: &Note, semitones: i32) -> Note {
    let pitch_class = root.pitch_class.transpose(semitones);
    let wrapped = i32::from(pitch_class.index() < root.pitch_class.index());
    Note::new(pitch_class, root.octave + semitones / 12 + wrapped)
}

fn chord_from_intervals(root: Note, intervals: &[i32]) -> Chord {
    Chord {
        root,
        notes: intervals.iter().map(|&s| tone_above(&root, s)).collect(),
    }
}

/// Builds a chord of `quality` on `root` in `octave`.
///
/// # Examples
/// ```
/// use eartrainer_theory::{build_chord, ChordQuality, PitchClass};
///
/// let chord = build_chord(PitchClass::A, ChordQuality::Minor, 4);
/// assert_eq!(chord.note_names(), vec!["A-4", "C-5", "E-5"]);
/// ```
pub fn build_chord(root: PitchClass, quality: ChordQuality, octave: i32) -> Chord {
    chord_from_intervals(Note::new(root, octave), quality.intervals())
}

/// Builds a triad with the third fixed at a major third and the fifth
/// varied by `fifth`.
pub fn build_fifth_quality_chord(root: PitchClass, fifth: FifthQuality, octave: i32) -> Chord {
    chord_from_intervals(Note::new(root, octave), &[0, 4, fifth.semitones()])
}

/// Infers a chord quality from its tones, treating the first as the root.
///
/// Pitch classes are compared relative to the root, so voicing and octave
/// placement do not matter. Suspended patterns are recognized as their own
/// qualities. Returns `None` for fewer than three tones or an unknown
/// pattern.
pub fn detect_quality(notes: &[Note]) -> Option<ChordQuality> {
    let root = notes.first()?;
    if notes.len() < 3 {
        return None;
    }
    let mut pattern: Vec<i32> = notes
        .iter()
        .map(|n| (n.pitch_class.index() as i32 - root.pitch_class.index() as i32).rem_euclid(12))
        .collect();
    pattern.sort_unstable();
    pattern.dedup();

    ChordQuality::ALL
        .iter()
        .copied()
        .find(|q| q.intervals() == pattern.as_slice())
}

/// Chord symbol for a list of tones (root first). Unknown patterns yield the
/// bare root name; an empty list yields an empty string.
pub fn chord_symbol(notes: &[Note]) -> String {
    let Some(root) = notes.first() else {
        return String::new();
    };
    let suffix = detect_quality(notes).map(ChordQuality::symbol_suffix).unwrap_or("");
    format!("{}{}", root.pitch_class, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_major_triad() {
        let chord = build_chord(PitchClass::C, ChordQuality::Major, 4);
        assert_eq!(chord.note_names(), vec!["C-4", "E-4", "G-4"]);
        assert_eq!(chord.root, Note::new(PitchClass::C, 4));
    }

    #[test]
    fn test_octave_bumps_wrapped_tones() {
        let chord = build_chord(PitchClass::G, ChordQuality::Major, 4);
        assert_eq!(chord.note_names(), vec!["G-4", "B-4", "D-5"]);

        let chord = build_chord(PitchClass::B, ChordQuality::Diminished, 3);
        assert_eq!(chord.note_names(), vec!["B-3", "D-4", "F-4"]);
    }

    #[test]
    fn test_suspended_and_seventh_chords() {
        assert_eq!(
            build_chord(PitchClass::D, ChordQuality::Sus2, 4).note_names(),
            vec!["D-4", "E-4", "A-4"]
        );
        assert_eq!(
            build_chord(PitchClass::D, ChordQuality::Sus4, 4).note_names(),
            vec!["D-4", "G-4", "A-4"]
        );
        assert_eq!(
            build_chord(PitchClass::G, ChordQuality::DominantSeventh, 3).note_names(),
            vec!["G-3", "B-3", "D-4", "F-4"]
        );
    }

    #[test]
    fn test_fifth_quality_chord() {
        let dim = build_fifth_quality_chord(PitchClass::C, FifthQuality::Diminished, 4);
        assert_eq!(dim.note_names(), vec!["C-4", "E-4", "F#-4"]);
        assert_eq!(dim.notes[1].midi_number() - dim.root.midi_number(), 4);
        assert_eq!(dim.notes[2].midi_number() - dim.root.midi_number(), 6);

        let aug = build_fifth_quality_chord(PitchClass::A, FifthQuality::Augmented, 4);
        assert_eq!(aug.note_names(), vec!["A-4", "C#-5", "F-5"]);
    }

    #[test]
    fn test_no_tone_below_root() {
        for pc in PitchClass::ALL {
            for quality in ChordQuality::ALL {
                let chord = build_chord(pc, quality, 4);
                let root = chord.root.midi_number();
                assert!(chord.notes.iter().all(|n| n.midi_number() >= root));
            }
        }
    }

    #[test]
    fn test_detect_quality() {
        for quality in ChordQuality::ALL {
            let chord = build_chord(PitchClass::E, quality, 3);
            assert_eq!(detect_quality(&chord.notes), Some(quality));
        }
        let two = [Note::new(PitchClass::C, 4), Note::new(PitchClass::E, 4)];
        assert_eq!(detect_quality(&two), None);

        let cluster = [
            Note::new(PitchClass::C, 4),
            Note::new(PitchClass::CSharp, 4),
            Note::new(PitchClass::D, 4),
        ];
        assert_eq!(detect_quality(&cluster), None);
    }

    #[test]
    fn test_chord_symbols() {
        assert_eq!(build_chord(PitchClass::C, ChordQuality::Major, 4).symbol(), "C");
        assert_eq!(build_chord(PitchClass::FSharp, ChordQuality::Minor, 4).symbol(), "F#m");
        assert_eq!(build_chord(PitchClass::B, ChordQuality::Diminished, 4).symbol(), "Bdim");
        assert_eq!(build_chord(PitchClass::G, ChordQuality::DominantSeventh, 4).symbol(), "G7");
        assert_eq!(chord_symbol(&[]), "");
    }

    #[test]
    fn test_inversions() {
        let chord = build_chord(PitchClass::C, ChordQuality::Major, 4);
        assert_eq!(chord.invert(1).note_names(), vec!["E-4", "G-4", "C-5"]);
        assert_eq!(chord.invert(2).note_names(), vec!["G-4", "C-5", "E-5"]);
        assert_eq!(chord.invert(0), chord);
        assert_eq!(chord.invert(3), chord);
        assert_eq!(chord.invert(1).quality(), None);
    }

    #[test]
    fn test_quality_parsing() {
        assert_eq!(ChordQuality::parse("major").unwrap(), ChordQuality::Major);
        assert_eq!(ChordQuality::parse("Dim").unwrap(), ChordQuality::Diminished);
        assert_eq!(ChordQuality::parse("3M").unwrap(), ChordQuality::Major);
        assert_eq!(ChordQuality::parse("3m").unwrap(), ChordQuality::Minor);
        assert_eq!(ChordQuality::parse("maj7").unwrap(), ChordQuality::MajorSeventh);
        assert_eq!(ChordQuality::parse("m7").unwrap(), ChordQuality::MinorSeventh);
        assert!(ChordQuality::parse("power").is_err());
        assert_eq!(FifthQuality::parse("5J").unwrap(), FifthQuality::Perfect);
        assert!(FifthQuality::parse("5j").is_err());
    }
}
