//! Named intervals.
//!
//! The table is keyed by interval *name*, not semitone count: the augmented
//! fourth and the diminished fifth are both 6 semitones but spell as `4+` and
//! `5°` respectively. Where several names share a semitone count the first
//! entry in [`Interval::ALL`] is the preferred spelling.

use serde::{Deserialize, Serialize};

use crate::error::{TheoryError, TheoryResult};
use crate::note::Note;

/// A named interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interval {
    Unison,
    MinorSecond,
    MajorSecond,
    MinorThird,
    MajorThird,
    PerfectFourth,
    AugmentedFourth,
    DiminishedFifth,
    PerfectFifth,
    MinorSixth,
    AugmentedFifth,
    MajorSixth,
    DiminishedSeventh,
    MinorSeventh,
    MajorSeventh,
    Octave,
}

impl Interval {
    /// Every interval, ordered by semitones with the preferred name first.
    pub const ALL: [Interval; 16] = [
        Interval::Unison,
        Interval::MinorSecond,
        Interval::MajorSecond,
        Interval::MinorThird,
        Interval::MajorThird,
        Interval::PerfectFourth,
        Interval::AugmentedFourth,
        Interval::DiminishedFifth,
        Interval::PerfectFifth,
        Interval::MinorSixth,
        Interval::AugmentedFifth,
        Interval::MajorSixth,
        Interval::DiminishedSeventh,
        Interval::MinorSeventh,
        Interval::MajorSeventh,
        Interval::Octave,
    ];

    /// Semitone distance.
    pub fn semitones(self) -> i32 {
        match self {
            Interval::Unison => 0,
            Interval::MinorSecond => 1,
            Interval::MajorSecond => 2,
            Interval::MinorThird => 3,
            Interval::MajorThird => 4,
            Interval::PerfectFourth => 5,
            Interval::AugmentedFourth | Interval::DiminishedFifth => 6,
            Interval::PerfectFifth => 7,
            Interval::MinorSixth | Interval::AugmentedFifth => 8,
            Interval::MajorSixth | Interval::DiminishedSeventh => 9,
            Interval::MinorSeventh => 10,
            Interval::MajorSeventh => 11,
            Interval::Octave => 12,
        }
    }

    /// Snake-case identifier used in configuration (`"major_third"`).
    pub fn name(self) -> &'static str {
        match self {
            Interval::Unison => "unison",
            Interval::MinorSecond => "minor_second",
            Interval::MajorSecond => "major_second",
            Interval::MinorThird => "minor_third",
            Interval::MajorThird => "major_third",
            Interval::PerfectFourth => "perfect_fourth",
            Interval::AugmentedFourth => "augmented_fourth",
            Interval::DiminishedFifth => "diminished_fifth",
            Interval::PerfectFifth => "perfect_fifth",
            Interval::MinorSixth => "minor_sixth",
            Interval::AugmentedFifth => "augmented_fifth",
            Interval::MajorSixth => "major_sixth",
            Interval::DiminishedSeventh => "diminished_seventh",
            Interval::MinorSeventh => "minor_seventh",
            Interval::MajorSeventh => "major_seventh",
            Interval::Octave => "octave",
        }
    }

    /// Short notation token (`"3m"`, `"5J"`, `"4+"`).
    pub fn notation(self) -> &'static str {
        match self {
            Interval::Unison => "1J",
            Interval::MinorSecond => "2m",
            Interval::MajorSecond => "2M",
            Interval::MinorThird => "3m",
            Interval::MajorThird => "3M",
            Interval::PerfectFourth => "4J",
            Interval::AugmentedFourth => "4+",
            Interval::DiminishedFifth => "5°",
            Interval::PerfectFifth => "5J",
            Interval::MinorSixth => "6m",
            Interval::AugmentedFifth => "5+",
            Interval::MajorSixth => "6M",
            Interval::DiminishedSeventh => "7°",
            Interval::MinorSeventh => "7m",
            Interval::MajorSeventh => "7M",
            Interval::Octave => "8J",
        }
    }

    /// Human-readable name (`"Major Third"`).
    pub fn display_name(self) -> &'static str {
        match self {
            Interval::Unison => "Unison",
            Interval::MinorSecond => "Minor Second",
            Interval::MajorSecond => "Major Second",
            Interval::MinorThird => "Minor Third",
            Interval::MajorThird => "Major Third",
            Interval::PerfectFourth => "Perfect Fourth",
            Interval::AugmentedFourth => "Augmented Fourth",
            Interval::DiminishedFifth => "Diminished Fifth",
            Interval::PerfectFifth => "Perfect Fifth",
            Interval::MinorSixth => "Minor Sixth",
            Interval::AugmentedFifth => "Augmented Fifth",
            Interval::MajorSixth => "Major Sixth",
            Interval::DiminishedSeventh => "Diminished Seventh",
            Interval::MinorSeventh => "Minor Seventh",
            Interval::MajorSeventh => "Major Seventh",
            Interval::Octave => "Octave",
        }
    }

    /// Looks up an interval by its snake-case name. `"tritone"` is accepted
    /// as the augmented fourth.
    pub fn from_name(name: &str) -> TheoryResult<Self> {
        let key = name.trim();
        if key == "tritone" {
            return Ok(Interval::AugmentedFourth);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|i| i.name() == key)
            .ok_or_else(|| TheoryError::UnknownInterval(name.to_string()))
    }

    /// Looks up an interval by its notation token. Case matters: `3m` is a
    /// minor third, `3M` a major third.
    pub fn from_notation(token: &str) -> TheoryResult<Self> {
        let key = token.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|i| i.notation() == key)
            .ok_or_else(|| TheoryError::UnknownInterval(token.to_string()))
    }

    /// Preferred interval for a semitone count in `0..=12`.
    pub fn from_semitones(semitones: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|i| i.semitones() == semitones)
    }

    /// Simple interval from `low` up to `high`, folded into one octave.
    ///
    /// Exact octaves (and compounds of them) report [`Interval::Octave`];
    /// only identical pitches report [`Interval::Unison`].
    pub fn between(low: &Note, high: &Note) -> Self {
        let distance = low.distance_to(high).abs();
        let folded = if distance > 0 && distance % 12 == 0 {
            12
        } else {
            distance % 12
        };
        Self::from_semitones(folded).unwrap_or(Interval::Unison)
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Interval {
    type Err = TheoryError;

    /// Accepts either the snake-case name or the notation token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).or_else(|_| Self::from_notation(s))
    }
}

/// Lenient semitone lookup by name. Unknown names map to 0.
pub fn interval_semitones(name: &str) -> i32 {
    Interval::from_name(name).map(Interval::semitones).unwrap_or(0)
}

/// Preferred notation token for a semitone count, if it is within an octave.
pub fn notation_for_semitones(semitones: i32) -> Option<&'static str> {
    Interval::from_semitones(semitones).map(Interval::notation)
}

/// Every notation token that spells the given semitone count.
pub fn aliases_for_semitones(semitones: i32) -> Vec<&'static str> {
    Interval::ALL
        .iter()
        .filter(|i| i.semitones() == semitones)
        .map(|i| i.notation())
        .collect()
}
