//! Equal-tempered frequency conversion, A4 = 440 Hz.

use super::conversion::Note;

/// Reference pitch.
pub const A4_FREQUENCY: f64 = 440.0;
/// MIDI number of the reference pitch.
pub const A4_MIDI: i32 = 69;

/// Frequency of a MIDI number: `440 * 2^((n - 69) / 12)`.
///
/// # Examples
/// ```
/// use eartrainer_theory::note::midi_to_frequency;
///
/// assert!((midi_to_frequency(69) - 440.0).abs() < 1e-9);
/// assert!((midi_to_frequency(60) - 261.626).abs() < 0.01);
/// ```
pub fn midi_to_frequency(midi: i32) -> f64 {
    A4_FREQUENCY * 2.0_f64.powf((midi - A4_MIDI) as f64 / 12.0)
}

/// Frequency of a note.
pub fn note_to_frequency(note: &Note) -> f64 {
    midi_to_frequency(note.midi_number())
}

/// Nearest MIDI number for a frequency in Hz.
pub fn frequency_to_midi(freq: f64) -> i32 {
    (A4_MIDI as f64 + 12.0 * (freq / A4_FREQUENCY).log2()).round() as i32
}

impl Note {
    /// Frequency in Hz.
    pub fn frequency(&self) -> f64 {
        note_to_frequency(self)
    }
}
