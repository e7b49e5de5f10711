//! Notes, pitch classes, MIDI numbers and equal-tempered frequencies.
//!
//! A [`Note`] is a [`PitchClass`] plus an octave. Flats are normalized to
//! sharps on parse, and notes serialize as `"<Name>-<octave>"` (`"C#-4"`).

mod conversion;
mod frequency;
mod pitch;

#[cfg(test)]
mod tests;

pub use conversion::{
    chromatic_notes_in_octave, natural_notes_in_octave, note_distance, Note, DEFAULT_OCTAVE,
    MAX_OCTAVE, MIN_OCTAVE,
};

pub use frequency::{frequency_to_midi, midi_to_frequency, note_to_frequency, A4_FREQUENCY, A4_MIDI};

pub use pitch::{pitch_class_index, PitchClass, NATURAL_PITCH_CLASSES};
