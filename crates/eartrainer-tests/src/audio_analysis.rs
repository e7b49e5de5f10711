//! Signal analysis helpers for rendered audio.

use eartrainer_audio::{decode_wav_mono, DecodedAudio};

/// Decodes WAV bytes, panicking with context on malformed input.
pub fn decode(wav: &[u8]) -> DecodedAudio {
    decode_wav_mono(wav).expect("rendered audio should be a valid WAV file")
}

/// Root mean square of `samples`; 0.0 for empty input.
///
/// ```rust
/// use eartrainer_tests::audio_analysis::calculate_rms;
///
/// assert_eq!(calculate_rms(&[]), 0.0);
/// assert_eq!(calculate_rms(&[1.0, -1.0]), 1.0);
/// ```
pub fn calculate_rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    (samples.iter().map(|s| s * s).sum::<f64>() / samples.len() as f64).sqrt()
}

/// Maximum absolute sample value.
pub fn peak_amplitude(samples: &[f64]) -> f64 {
    samples.iter().fold(0.0_f64, |max, s| max.max(s.abs()))
}

/// RMS over `[start, start + len)` seconds, clipped to the signal.
pub fn window_rms(audio: &DecodedAudio, start_secs: f64, len_secs: f64) -> f64 {
    let rate = audio.sample_rate as f64;
    let begin = ((start_secs.max(0.0) * rate) as usize).min(audio.samples.len());
    let end = (((start_secs + len_secs).max(0.0) * rate) as usize).min(audio.samples.len());
    calculate_rms(&audio.samples[begin..end])
}

/// Energy after `at_secs` relative to energy just before it.
///
/// A fresh note onset at `at_secs` pushes the ratio well above 1; a
/// decaying or silent signal keeps it at or below 1.
pub fn onset_ratio(audio: &DecodedAudio, at_secs: f64, window_secs: f64) -> f64 {
    let before = window_rms(audio, at_secs - window_secs, window_secs);
    let after = window_rms(audio, at_secs, window_secs);
    if before <= f64::EPSILON {
        if after <= f64::EPSILON {
            1.0
        } else {
            f64::INFINITY
        }
    } else {
        after / before
    }
}

/// Length of the decoded audio in seconds.
pub fn duration_secs(audio: &DecodedAudio) -> f64 {
    audio.samples.len() as f64 / audio.sample_rate as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audio(samples: Vec<f64>) -> DecodedAudio {
        DecodedAudio {
            samples,
            sample_rate: 10,
        }
    }

    #[test]
    fn test_peak_and_duration() {
        let a = audio(vec![0.1, -0.8, 0.5, 0.0, 0.0]);
        assert_eq!(peak_amplitude(&a.samples), 0.8);
        assert!((duration_secs(&a) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_onset_ratio() {
        let rising = audio(vec![0.1, 0.1, 0.1, 0.1, 0.9, 0.9, 0.9, 0.9]);
        assert!(onset_ratio(&rising, 0.4, 0.4) > 5.0);

        let silent = audio(vec![0.0; 8]);
        assert_eq!(onset_ratio(&silent, 0.4, 0.4), 1.0);

        let from_silence = audio(vec![0.0, 0.0, 0.0, 0.0, 0.5, 0.5, 0.5, 0.5]);
        assert!(onset_ratio(&from_silence, 0.4, 0.4).is_infinite());
    }
}
