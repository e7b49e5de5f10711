//! Minimal Standard MIDI File writer (format 0, one track).

use std::io::{self, Write};

use byteorder::{BigEndian, WriteBytesExt};

use crate::request::NoteEvent;

/// Timing resolution.
pub const TICKS_PER_QUARTER: u16 = 480;
/// Tempo written to the track.
pub const TEMPO_BPM: u32 = 120;
/// General MIDI acoustic grand piano.
pub const PIANO_PROGRAM: u8 = 0;
/// Note-on velocity.
pub const VELOCITY: u8 = 100;

const CHANNEL: u8 = 0;

/// Ticks per second at [`TEMPO_BPM`].
pub fn ticks_per_second() -> f64 {
    TICKS_PER_QUARTER as f64 * TEMPO_BPM as f64 / 60.0
}

/// Converts seconds to the nearest tick.
pub fn seconds_to_ticks(secs: f64) -> u32 {
    (secs.max(0.0) * ticks_per_second()).round() as u32
}

/// Writes a MIDI variable-length quantity.
fn write_vlq(buf: &mut Vec<u8>, mut value: u32) {
    let mut bytes = [0u8; 4];
    let mut i = 3;
    bytes[i] = (value & 0x7F) as u8;
    value >>= 7;
    while value > 0 {
        i -= 1;
        bytes[i] = ((value & 0x7F) | 0x80) as u8;
        value >>= 7;
    }
    buf.extend_from_slice(&bytes[i..]);
}

/// A channel message at an absolute tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct TimedMessage {
    tick: u32,
    // Offs sort before ons at the same tick so repeated pitches retrigger.
    is_on: bool,
    pitch: u8,
}

fn track_chunk(events: &[NoteEvent]) -> Vec<u8> {
    let mut messages: Vec<TimedMessage> = events
        .iter()
        .flat_map(|e| {
            let on = seconds_to_ticks(e.start_secs);
            let off = seconds_to_ticks(e.end_secs()).max(on + 1);
            [
                TimedMessage {
                    tick: on,
                    is_on: true,
                    pitch: e.midi,
                },
                TimedMessage {
                    tick: off,
                    is_on: false,
                    pitch: e.midi,
                },
            ]
        })
        .collect();
    messages.sort();

    let mut t = Vec::new();

    // Tempo meta event.
    let micros = 60_000_000u32 / TEMPO_BPM;
    t.extend_from_slice(&[0x00, 0xFF, 0x51, 0x03]);
    t.extend_from_slice(&micros.to_be_bytes()[1..]);

    // Program change.
    t.extend_from_slice(&[0x00, 0xC0 | CHANNEL, PIANO_PROGRAM]);

    let mut last_tick = 0;
    for msg in &messages {
        write_vlq(&mut t, msg.tick - last_tick);
        last_tick = msg.tick;
        if msg.is_on {
            t.extend_from_slice(&[0x90 | CHANNEL, msg.pitch, VELOCITY]);
        } else {
            t.extend_from_slice(&[0x80 | CHANNEL, msg.pitch, 0x00]);
        }
    }

    // End of track.
    t.extend_from_slice(&[0x00, 0xFF, 0x2F, 0x00]);
    t
}

/// Writes `events` as a format-0 Standard MIDI File.
pub fn write_smf<W: Write>(writer: &mut W, events: &[NoteEvent]) -> io::Result<()> {
    let track = track_chunk(events);

    writer.write_all(b"MThd")?;
    writer.write_u32::<BigEndian>(6)?;
    writer.write_u16::<BigEndian>(0)?; // format 0
    writer.write_u16::<BigEndian>(1)?; // one track
    writer.write_u16::<BigEndian>(TICKS_PER_QUARTER)?;

    writer.write_all(b"MTrk")?;
    writer.write_u32::<BigEndian>(track.len() as u32)?;
    writer.write_all(&track)?;
    Ok(())
}
