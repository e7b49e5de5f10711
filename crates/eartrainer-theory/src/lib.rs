//! Eartrainer Music Theory
//!
//! Pure, allocation-light helpers that turn a handful of exercise parameters
//! into concrete musical content:
//!
//! - [`note`] - pitch classes, notes with octaves, MIDI numbers, frequencies, transposition
//! - [`interval`] - the named interval table (semitones, notation tokens, display names)
//! - [`chord`] - triads, suspended and seventh chords, fifth-quality triads, quality detection
//! - [`scale`] - scale construction, solfège and the practice keys
//!
//! # Example
//!
//! ```
//! use eartrainer_theory::{Interval, Note};
//!
//! let c4: Note = "C-4".parse().unwrap();
//! let e4 = c4.transpose(Interval::MajorThird.semitones());
//! assert_eq!(e4.to_string(), "E-4");
//! assert_eq!(Interval::MajorThird.notation(), "3M");
//! ```
//!
//! # Lenient vs strict lookups
//!
//! The `parse`/`FromStr` paths are strict and return [`TheoryError`]. The
//! free functions [`note::pitch_class_index`] and [`interval::interval_semitones`]
//! are lenient: an unknown name falls back to `0` instead of failing, so
//! callers that accept user-chosen names must validate upstream.

pub mod chord;
pub mod error;
pub mod interval;
pub mod note;
pub mod scale;

pub use chord::{build_chord, build_fifth_quality_chord, detect_quality, Chord, ChordQuality, FifthQuality};
pub use error::{TheoryError, TheoryResult};
pub use interval::Interval;
pub use note::{Note, PitchClass};
pub use scale::{Key, ScaleKind};
