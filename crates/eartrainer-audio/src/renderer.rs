//! Request rendering with sampler-first, synthesis-fallback policy.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AudioConfig;
use crate::request::RenderRequest;
use crate::sampler::{FluidSynthBackend, FluidSynthConfig, SampleBackend};
use crate::synth::render_synthetic;
use crate::wav::WavResult;

/// Which path produced a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// The built-in tone model.
    Synthetic,
    /// The external sampler.
    Sampler,
}

/// An encoded render and the backend that produced it.
#[derive(Debug, Clone)]
pub struct RenderedAudio {
    pub wav: WavResult,
    pub backend: BackendKind,
}

/// Renders requests, preferring the sampler when one is configured.
///
/// Sampler failures never escape: they are logged and the request is
/// rendered synthetically instead.
pub struct Renderer {
    sample_rate: u32,
    sampler: Option<Box<dyn SampleBackend>>,
}

impl Renderer {
    /// A renderer that only synthesizes.
    pub fn synthetic(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            sampler: None,
        }
    }

    /// Builds a renderer from configuration. A fluidsynth backend is attached
    /// only when a soundfont is configured.
    pub fn from_config(config: &AudioConfig) -> Self {
        let sampler = config.soundfont_path.as_ref().map(|_| {
            Box::new(FluidSynthBackend::with_config(FluidSynthConfig::from(config)))
                as Box<dyn SampleBackend>
        });
        Self {
            sample_rate: config.sample_rate,
            sampler,
        }
    }

    /// Replaces the sampler backend.
    pub fn with_sampler(mut self, sampler: Box<dyn SampleBackend>) -> Self {
        self.sampler = Some(sampler);
        self
    }

    /// Output sample rate.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Whether a sampler is attached and reports itself usable.
    pub fn sampler_available(&self) -> bool {
        self.sampler.as_ref().is_some_and(|s| s.is_available())
    }

    /// Describes the backend and rate that [`render`](Self::render) will use,
    /// e.g. `synthetic@44100` or `fluidsynth:/srv/piano.sf2@44100`.
    pub fn fingerprint(&self) -> String {
        let backend = match &self.sampler {
            Some(sampler) if sampler.is_available() => sampler.fingerprint(),
            _ => "synthetic".to_string(),
        };
        format!("{}@{}", backend, self.sample_rate)
    }

    /// Renders and encodes a request.
    pub fn render(&self, request: &RenderRequest) -> RenderedAudio {
        if let Some(sampler) = &self.sampler {
            match sampler.render(request, self.sample_rate) {
                Ok(samples) => {
                    debug!(backend = sampler.name(), kind = request.type_tag(), "sampler render");
                    return RenderedAudio {
                        wav: WavResult::from_mono(&samples, self.sample_rate),
                        backend: BackendKind::Sampler,
                    };
                }
                Err(e) => {
                    warn!(
                        backend = sampler.name(),
                        code = e.code(),
                        error = %e,
                        "sampler failed, using synthetic audio"
                    );
                }
            }
        }

        let samples = render_synthetic(request, self.sample_rate);
        RenderedAudio {
            wav: WavResult::from_mono(&samples, self.sample_rate),
            backend: BackendKind::Synthetic,
        }
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("sample_rate", &self.sample_rate)
            .field("sampler", &self.sampler.as_ref().map(|s| s.name()))
            .finish()
    }
}
