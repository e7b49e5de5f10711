//! Mono mixing for the three timing models.
//!
//! Simultaneous tones are averaged so the mix never exceeds the loudest
//! input. Offset layers (staggered onsets) are summed, so overlapping
//! regions may exceed a single tone's peak; PCM conversion clips.

/// A mono signal placed at a sample offset in the output.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Audio samples.
    pub samples: Vec<f64>,
    /// Offset in samples before this layer starts.
    pub offset: usize,
}

impl Layer {
    /// Creates a layer starting at sample 0.
    pub fn new(samples: Vec<f64>) -> Self {
        Self { samples, offset: 0 }
    }

    /// Sets the start offset in samples.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Index one past the last sample this layer writes.
    pub fn end(&self) -> usize {
        self.offset + self.samples.len()
    }
}

/// Averages equally-weighted simultaneous signals sample by sample.
///
/// The output is as long as the longest input; shorter inputs contribute
/// silence past their end.
pub fn mix_average(signals: &[Vec<f64>]) -> Vec<f64> {
    let len = signals.iter().map(Vec::len).max().unwrap_or(0);
    if signals.is_empty() {
        return Vec::new();
    }
    let scale = 1.0 / signals.len() as f64;
    let mut out = vec![0.0; len];
    for signal in signals {
        for (o, s) in out.iter_mut().zip(signal) {
            *o += s * scale;
        }
    }
    out
}

/// Sums offset layers into a buffer of `total_len` samples.
///
/// Samples that would land past `total_len` are dropped.
pub fn mix_additive(layers: &[Layer], total_len: usize) -> Vec<f64> {
    let mut out = vec![0.0; total_len];
    for layer in layers {
        if layer.offset >= total_len {
            continue;
        }
        for (o, s) in out[layer.offset..].iter_mut().zip(&layer.samples) {
            *o += s;
        }
    }
    out
}

/// Joins signals back to back.
pub fn concat(signals: &[Vec<f64>]) -> Vec<f64> {
    let mut out = Vec::with_capacity(signals.iter().map(Vec::len).sum());
    for signal in signals {
        out.extend_from_slice(signal);
    }
    out
}

/// `n` samples of silence.
pub fn silence(n: usize) -> Vec<f64> {
    vec![0.0; n]
}
