//! High-fidelity rendering through an external sampler.
//!
//! The [`SampleBackend`] trait is the seam between the renderer and whatever
//! plays soundfont samples. [`FluidSynthBackend`] drives the `fluidsynth`
//! command-line program; failures are reported as [`AudioError`] and the
//! renderer falls back to synthesis.
//!
//! [`AudioError`]: crate::error::AudioError

mod fluidsynth;
pub mod midi;

pub use fluidsynth::{FluidSynthBackend, FluidSynthConfig};

use crate::error::AudioResult;
use crate::request::RenderRequest;

/// A renderer that can produce mono samples for a request.
pub trait SampleBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether the backend looks usable without attempting a render.
    fn is_available(&self) -> bool;

    /// Identifies the instrument this backend renders with. Folded into
    /// cache keys so renders from different instruments never collide.
    fn fingerprint(&self) -> String {
        self.name().to_string()
    }

    /// Renders `request` at `sample_rate`, returning mono samples.
    fn render(&self, request: &RenderRequest, sample_rate: u32) -> AudioResult<Vec<f64>>;
}
