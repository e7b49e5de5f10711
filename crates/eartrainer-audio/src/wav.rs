//! Deterministic 16-bit mono WAV encoding, plus decoding of sampler output.
//!
//! Encoded files carry no timestamps or variable metadata, so identical
//! samples always produce identical bytes. The BLAKE3 hash of the PCM data is
//! reported alongside the file bytes.

use std::io::{Cursor, Read, Seek, Write};

use crate::error::AudioResult;

/// Full-scale value for 16-bit quantization. Symmetric, so `-1.0` maps to
/// `-32767` rather than `i16::MIN`.
const PCM16_FULL_SCALE: f64 = 32_767.0;

/// Layout of every file this crate writes.
pub fn mono_pcm16_spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Quantizes one sample, clipping to `[-1, 1]`.
pub fn quantize_pcm16(sample: f64) -> i16 {
    (sample.clamp(-1.0, 1.0) * PCM16_FULL_SCALE).round() as i16
}

/// A rendered tone sequence encoded as WAV.
#[derive(Debug, Clone)]
pub struct WavResult {
    /// Complete file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 of the little-endian PCM payload, independent of the header.
    pub pcm_hash: String,
    pub sample_rate: u32,
    pub num_samples: usize,
}

impl WavResult {
    /// Encodes mono samples as 16-bit PCM.
    ///
    /// Samples are written as given; any level normalization happens before
    /// this point.
    pub fn from_mono(samples: &[f64], sample_rate: u32) -> Self {
        let pcm: Vec<i16> = samples.iter().map(|&s| quantize_pcm16(s)).collect();

        let mut hasher = blake3::Hasher::new();
        for value in &pcm {
            hasher.update(&value.to_le_bytes());
        }

        Self {
            wav_data: encode_pcm16(&pcm, sample_rate),
            pcm_hash: hasher.finalize().to_hex().to_string(),
            sample_rate,
            num_samples: samples.len(),
        }
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.num_samples as f64 / self.sample_rate as f64
    }
}

/// Writes quantized samples into an in-memory file.
fn encode_pcm16(pcm: &[i16], sample_rate: u32) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::with_capacity(44 + pcm.len() * 2));
    write_pcm16(&mut cursor, pcm, sample_rate).expect("in-memory WAV stays under the 4 GiB RIFF limit");
    cursor.into_inner()
}

fn write_pcm16<W: Write + Seek>(out: W, pcm: &[i16], sample_rate: u32) -> hound::Result<()> {
    let mut writer = hound::WavWriter::new(out, mono_pcm16_spec(sample_rate))?;
    let mut samples = writer.get_i16_writer(pcm.len() as u32);
    for &value in pcm {
        samples.write_sample(value);
    }
    samples.flush()?;
    writer.finalize()
}

/// Decoded audio, downmixed to mono.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    /// Samples in `[-1, 1]`.
    pub samples: Vec<f64>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

/// Decodes any PCM or float WAV stream to mono by averaging channels.
pub fn decode_wav_mono<R: Read>(reader: R) -> AudioResult<DecodedAudio> {
    let mut reader = hound::WavReader::new(reader)?;
    let spec = reader.spec();

    let interleaved: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let scale = match spec.bits_per_sample {
                8 => 128.0,
                16 => 32_768.0,
                24 => 8_388_608.0,
                _ => 2_147_483_648.0,
            };
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / scale))
                .collect::<Result<_, _>>()?
        }
    };

    Ok(DecodedAudio {
        samples: downmix(&interleaved, spec.channels),
        sample_rate: spec.sample_rate,
    })
}

/// Averages interleaved frames into one channel.
fn downmix(interleaved: &[f64], channels: u16) -> Vec<f64> {
    let channels = channels.max(1) as usize;
    if channels == 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f64>() / channels as f64)
        .collect()
}
