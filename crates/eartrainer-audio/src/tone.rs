//! Deterministic piano-like tone model.
//!
//! Each tone is a fundamental plus two harmonics, shaped by a quick-attack,
//! slow-decay envelope and peak-normalized. No randomness is involved, so the
//! same frequency, duration and sample rate always give identical samples.

use std::f64::consts::PI;

/// `(frequency multiple, weight)` of each partial.
pub const PARTIALS: [(f64, f64); 3] = [(1.0, 1.0), (2.0, 0.3), (3.0, 0.1)];

/// Peak amplitude of a normalized tone.
pub const PEAK_AMPLITUDE: f64 = 0.7;

/// Decay rate of the envelope, per second.
const DECAY_RATE: f64 = 3.0;
/// Attack rate of the envelope, per second.
const ATTACK_RATE: f64 = 20.0;

/// Number of samples covering `duration_secs`, truncated.
pub fn num_samples(duration_secs: f64, sample_rate: u32) -> usize {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return 0;
    }
    (duration_secs * sample_rate as f64) as usize
}

/// Envelope value at time `t` seconds: `exp(-3t) * (1 - exp(-20t))`.
pub fn envelope(t: f64) -> f64 {
    (-DECAY_RATE * t).exp() * (1.0 - (-ATTACK_RATE * t).exp())
}

/// Renders one tone of `frequency` Hz lasting `duration_secs`.
///
/// The result peaks at [`PEAK_AMPLITUDE`] unless it is silent.
pub fn piano_tone(frequency: f64, duration_secs: f64, sample_rate: u32) -> Vec<f64> {
    let n = num_samples(duration_secs, sample_rate);
    let sr = sample_rate as f64;

    let mut samples: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64 / sr;
            let wave: f64 = PARTIALS
                .iter()
                .map(|&(multiple, weight)| weight * (2.0 * PI * frequency * multiple * t).sin())
                .sum();
            wave * envelope(t)
        })
        .collect();

    normalize_peak(&mut samples, PEAK_AMPLITUDE);
    samples
}

/// Scales `samples` so the largest magnitude equals `target`. Silent input is
/// left untouched.
pub fn normalize_peak(samples: &mut [f64], target: f64) {
    let peak = samples.iter().fold(0.0_f64, |m, s| m.max(s.abs()));
    if peak > 0.0 {
        let gain = target / peak;
        for s in samples.iter_mut() {
            *s *= gain;
        }
    }
}
