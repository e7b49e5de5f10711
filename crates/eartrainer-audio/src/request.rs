//! Render requests and their canonical descriptions.
//!
//! A [`RenderRequest`] fully determines the waveform it produces. Its
//! [`canonical`](RenderRequest::canonical) string feeds the cache key, so
//! every parameter that changes the audio appears in it, in order.

use std::fmt::Write as _;

use eartrainer_theory::Note;
use serde::{Deserialize, Serialize};

/// One note with absolute timing, used to drive the external sampler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEvent {
    /// MIDI note number.
    pub midi: u8,
    /// Onset in seconds from the start of the render.
    pub start_secs: f64,
    /// Sounding length in seconds.
    pub duration_secs: f64,
}

impl NoteEvent {
    fn new(note: &Note, start_secs: f64, duration_secs: f64) -> Self {
        Self {
            midi: note.midi_number().clamp(0, 127) as u8,
            start_secs,
            duration_secs,
        }
    }

    /// Release time in seconds.
    pub fn end_secs(&self) -> f64 {
        self.start_secs + self.duration_secs
    }
}

/// Audio to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderRequest {
    /// Notes back to back, each lasting `note_duration`.
    Sequence { notes: Vec<Note>, note_duration: f64 },
    /// All notes together for `duration`, averaged.
    Chord { notes: Vec<Note>, duration: f64 },
    /// Two notes together for `duration`, averaged.
    HarmonicInterval {
        first: Note,
        second: Note,
        duration: f64,
    },
    /// `first`, then `gap_duration` of silence, then `second`.
    MelodicInterval {
        first: Note,
        second: Note,
        note_duration: f64,
        gap_duration: f64,
    },
    /// `root` at 0 s, `second` entering after `delay_ms`, overlap summed.
    StaggeredInterval {
        root: Note,
        second: Note,
        root_duration: f64,
        second_duration: f64,
        delay_ms: u32,
    },
    /// Chords back to back, each averaged.
    Progression {
        chords: Vec<Vec<Note>>,
        chord_duration: f64,
    },
}

fn join_notes(notes: &[Note]) -> String {
    notes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

impl RenderRequest {
    /// Short tag naming the kind of request.
    pub fn type_tag(&self) -> &'static str {
        match self {
            RenderRequest::Sequence { .. } => "notes",
            RenderRequest::Chord { .. } => "chord",
            RenderRequest::HarmonicInterval { .. } => "harmonic_interval",
            RenderRequest::MelodicInterval { .. } => "melodic_interval",
            RenderRequest::StaggeredInterval { .. } => "staggered_interval",
            RenderRequest::Progression { .. } => "progression",
        }
    }

    /// Canonical description: the type tag followed by every parameter.
    ///
    /// Durations use Rust's shortest round-trip float formatting, so equal
    /// values always produce equal strings.
    pub fn canonical(&self) -> String {
        match self {
            RenderRequest::Sequence {
                notes,
                note_duration,
            } => format!("notes:{}:duration:{:?}", join_notes(notes), note_duration),
            RenderRequest::Chord { notes, duration } => {
                format!("chord:{}:duration:{:?}", join_notes(notes), duration)
            }
            RenderRequest::HarmonicInterval {
                first,
                second,
                duration,
            } => format!("harmonic_interval:{}:{}:duration:{:?}", first, second, duration),
            RenderRequest::MelodicInterval {
                first,
                second,
                note_duration,
                gap_duration,
            } => format!(
                "melodic_interval:{}:{}:duration:{:?}:gap:{:?}",
                first, second, note_duration, gap_duration
            ),
            RenderRequest::StaggeredInterval {
                root,
                second,
                root_duration,
                second_duration,
                delay_ms,
            } => format!(
                "staggered_interval:{}:{}:root:{:?}:second:{:?}:delay:{}",
                root, second, root_duration, second_duration, delay_ms
            ),
            RenderRequest::Progression {
                chords,
                chord_duration,
            } => {
                let mut out = format!("progression:{}", chords.len());
                for chord in chords {
                    let _ = write!(out, ":[{}]", join_notes(chord));
                }
                let _ = write!(out, ":duration:{:?}", chord_duration);
                out
            }
        }
    }

    /// Prefix for uncached output files (`"chord_"`).
    pub fn file_prefix(&self) -> String {
        format!("{}_", self.type_tag())
    }

    /// Total length of the render in seconds.
    pub fn total_duration_secs(&self) -> f64 {
        match self {
            RenderRequest::Sequence {
                notes,
                note_duration,
            } => notes.len() as f64 * note_duration,
            RenderRequest::Chord { duration, .. } => *duration,
            RenderRequest::HarmonicInterval { duration, .. } => *duration,
            RenderRequest::MelodicInterval {
                note_duration,
                gap_duration,
                ..
            } => 2.0 * note_duration + gap_duration,
            RenderRequest::StaggeredInterval {
                root_duration,
                second_duration,
                delay_ms,
                ..
            } => root_duration.max(*delay_ms as f64 / 1000.0 + second_duration),
            RenderRequest::Progression {
                chords,
                chord_duration,
            } => chords.len() as f64 * chord_duration,
        }
    }

    /// Every note with its absolute onset and length.
    pub fn note_events(&self) -> Vec<NoteEvent> {
        match self {
            RenderRequest::Sequence {
                notes,
                note_duration,
            } => notes
                .iter()
                .enumerate()
                .map(|(i, n)| NoteEvent::new(n, i as f64 * note_duration, *note_duration))
                .collect(),
            RenderRequest::Chord { notes, duration } => notes
                .iter()
                .map(|n| NoteEvent::new(n, 0.0, *duration))
                .collect(),
            RenderRequest::HarmonicInterval {
                first,
                second,
                duration,
            } => vec![
                NoteEvent::new(first, 0.0, *duration),
                NoteEvent::new(second, 0.0, *duration),
            ],
            RenderRequest::MelodicInterval {
                first,
                second,
                note_duration,
                gap_duration,
            } => vec![
                NoteEvent::new(first, 0.0, *note_duration),
                NoteEvent::new(second, note_duration + gap_duration, *note_duration),
            ],
            RenderRequest::StaggeredInterval {
                root,
                second,
                root_duration,
                second_duration,
                delay_ms,
            } => vec![
                NoteEvent::new(root, 0.0, *root_duration),
                NoteEvent::new(second, *delay_ms as f64 / 1000.0, *second_duration),
            ],
            RenderRequest::Progression {
                chords,
                chord_duration,
            } => chords
                .iter()
                .enumerate()
                .flat_map(|(i, chord)| {
                    let start = i as f64 * chord_duration;
                    chord
                        .iter()
                        .map(move |n| NoteEvent::new(n, start, *chord_duration))
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eartrainer_theory::PitchClass;
    use pretty_assertions::assert_eq;

    fn c4() -> Note {
        Note::new(PitchClass::C, 4)
    }

    fn e4() -> Note {
        Note::new(PitchClass::E, 4)
    }

    #[test]
    fn test_canonical_strings() {
        let staggered = RenderRequest::StaggeredInterval {
            root: c4(),
            second: e4(),
            root_duration: 1.5,
            second_duration: 1.5,
            delay_ms: 400,
        };
        assert_eq!(
            staggered.canonical(),
            "staggered_interval:C-4:E-4:root:1.5:second:1.5:delay:400"
        );

        let chord = RenderRequest::Chord {
            notes: vec![c4(), e4()],
            duration: 2.0,
        };
        assert_eq!(chord.canonical(), "chord:C-4,E-4:duration:2.0");
        assert_eq!(chord.file_prefix(), "chord_");
    }

    #[test]
    fn test_canonical_depends_on_note_order() {
        let a = RenderRequest::Sequence {
            notes: vec![c4(), e4()],
            note_duration: 0.8,
        };
        let b = RenderRequest::Sequence {
            notes: vec![e4(), c4()],
            note_duration: 0.8,
        };
        assert_ne!(a.canonical(), b.canonical());
    }

    #[test]
    fn test_progression_canonical_includes_chords() {
        let one = RenderRequest::Progression {
            chords: vec![vec![c4()], vec![e4()]],
            chord_duration: 1.5,
        };
        let two = RenderRequest::Progression {
            chords: vec![vec![e4()], vec![c4()]],
            chord_duration: 1.5,
        };
        assert_eq!(one.canonical(), "progression:2:[C-4]:[E-4]:duration:1.5");
        assert_ne!(one.canonical(), two.canonical());
    }

    #[test]
    fn test_total_durations() {
        let melodic = RenderRequest::MelodicInterval {
            first: c4(),
            second: e4(),
            note_duration: 1.0,
            gap_duration: 0.5,
        };
        assert!((melodic.total_duration_secs() - 2.5).abs() < 1e-12);

        let staggered = RenderRequest::StaggeredInterval {
            root: c4(),
            second: e4(),
            root_duration: 1.5,
            second_duration: 1.5,
            delay_ms: 400,
        };
        assert!((staggered.total_duration_secs() - 1.9).abs() < 1e-12);
    }

    #[test]
    fn test_note_events() {
        let melodic = RenderRequest::MelodicInterval {
            first: c4(),
            second: e4(),
            note_duration: 1.0,
            gap_duration: 0.5,
        };
        let events = melodic.note_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].midi, 60);
        assert_eq!(events[1].midi, 64);
        assert!((events[1].start_secs - 1.5).abs() < 1e-12);
        assert!((events[1].end_secs() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_request_serde_is_tagged() {
        let request = RenderRequest::HarmonicInterval {
            first: c4(),
            second: e4(),
            duration: 1.5,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "harmonic_interval");
        assert_eq!(json["first"], "C-4");
    }
}
