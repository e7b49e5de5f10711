//! Eartrainer audio rendering.
//!
//! Turns [`RenderRequest`]s (note sequences, chords, intervals, progressions)
//! into mono 16-bit WAV files. Rendering goes through an external sampler when
//! one is configured and falls back to a deterministic additive "piano" tone
//! otherwise. Results are memoized on disk by [`AudioStore`], keyed by the
//! BLAKE3 hash of each request's canonical description.
//!
//! # Example
//!
//! ```no_run
//! use eartrainer_audio::{AudioConfig, AudioStore, RenderRequest};
//!
//! let store = AudioStore::new(AudioConfig::with_media_root("media"));
//! let request = RenderRequest::Chord {
//!     notes: vec!["C-4".parse().unwrap(), "E-4".parse().unwrap(), "G-4".parse().unwrap()],
//!     duration: 2.0,
//! };
//! let stored = store.get_or_render(&request).unwrap();
//! println!("{}", stored.handle);
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod mixer;
pub mod renderer;
pub mod request;
pub mod sampler;
pub mod synth;
pub mod tone;
pub mod wav;

pub use cache::{cache_key, content_type_for, AudioBytes, AudioStore, CacheInfo, StoredAudio};
pub use config::AudioConfig;
pub use error::{AudioError, AudioResult};
pub use renderer::{BackendKind, RenderedAudio, Renderer};
pub use request::{NoteEvent, RenderRequest};
pub use sampler::{FluidSynthBackend, FluidSynthConfig, SampleBackend};
pub use synth::render_synthetic;
pub use wav::{decode_wav_mono, DecodedAudio, WavResult};
