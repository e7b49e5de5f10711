//! Synthetic rendering of requests with the tone model.

use eartrainer_theory::Note;

use crate::mixer::{concat, mix_additive, mix_average, silence, Layer};
use crate::request::RenderRequest;
use crate::tone::{num_samples, piano_tone};

fn tone(note: &Note, duration: f64, sample_rate: u32) -> Vec<f64> {
    piano_tone(note.frequency(), duration, sample_rate)
}

fn chord(notes: &[Note], duration: f64, sample_rate: u32) -> Vec<f64> {
    let tones: Vec<Vec<f64>> = notes.iter().map(|n| tone(n, duration, sample_rate)).collect();
    mix_average(&tones)
}

/// Renders a request as mono samples in `[-1, 1]` (staggered overlap may exceed it).
pub fn render_synthetic(request: &RenderRequest, sample_rate: u32) -> Vec<f64> {
    match request {
        RenderRequest::Sequence {
            notes,
            note_duration,
        } => {
            let tones: Vec<Vec<f64>> = notes
                .iter()
                .map(|n| tone(n, *note_duration, sample_rate))
                .collect();
            concat(&tones)
        }
        RenderRequest::Chord { notes, duration } => chord(notes, *duration, sample_rate),
        RenderRequest::HarmonicInterval {
            first,
            second,
            duration,
        } => chord(&[*first, *second], *duration, sample_rate),
        RenderRequest::MelodicInterval {
            first,
            second,
            note_duration,
            gap_duration,
        } => concat(&[
            tone(first, *note_duration, sample_rate),
            silence(num_samples(*gap_duration, sample_rate)),
            tone(second, *note_duration, sample_rate),
        ]),
        RenderRequest::StaggeredInterval {
            root,
            second,
            root_duration,
            second_duration,
            delay_ms,
        } => {
            let root_layer = Layer::new(tone(root, *root_duration, sample_rate));
            let delay = num_samples(*delay_ms as f64 / 1000.0, sample_rate);
            let second_layer = Layer::new(tone(second, *second_duration, sample_rate)).with_offset(delay);
            let total = root_layer.end().max(second_layer.end());
            mix_additive(&[root_layer, second_layer], total)
        }
        RenderRequest::Progression {
            chords,
            chord_duration,
        } => {
            let rendered: Vec<Vec<f64>> = chords
                .iter()
                .map(|c| chord(c, *chord_duration, sample_rate))
                .collect();
            concat(&rendered)
        }
    }
}
