//! Error types for audio rendering and storage.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while rendering or storing audio.
#[derive(Debug, Error)]
pub enum AudioError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// WAV decoding or encoding error.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// The external sampler executable could not be found.
    #[error("fluidsynth executable not found. Set FLUIDSYNTH_PATH or install fluidsynth.")]
    SamplerNotFound,

    /// No soundfont is configured, or the configured file is missing.
    #[error("soundfont not found: {}", path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "<unset>".to_string()))]
    SoundfontMissing {
        /// The configured path, if any.
        path: Option<PathBuf>,
    },

    /// The sampler process could not be started.
    #[error("failed to spawn fluidsynth: {0}")]
    SamplerSpawn(#[source] std::io::Error),

    /// The sampler process ran past its timeout and was killed.
    #[error("fluidsynth timed out after {timeout_secs} seconds")]
    SamplerTimeout {
        /// Timeout that elapsed.
        timeout_secs: u64,
    },

    /// The sampler process exited unsuccessfully.
    #[error("fluidsynth exited with code {exit_code}: {stderr}")]
    SamplerFailed {
        /// Exit code.
        exit_code: i32,
        /// Captured stderr.
        stderr: String,
    },

    /// A render produced no samples.
    #[error("render produced no audio")]
    EmptyRender,

    /// An audio handle was malformed or escaped the media root.
    #[error("invalid audio handle: '{handle}'")]
    InvalidHandle {
        /// The rejected handle.
        handle: String,
    },

    /// An audio handle did not resolve to an existing file.
    #[error("audio not found: '{handle}'")]
    AudioNotFound {
        /// The handle that was looked up.
        handle: String,
    },
}

impl AudioError {
    /// Creates a sampler failure error.
    pub fn sampler_failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::SamplerFailed {
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Creates an invalid handle error.
    pub fn invalid_handle(handle: impl Into<String>) -> Self {
        Self::InvalidHandle {
            handle: handle.into(),
        }
    }

    /// Creates an audio-not-found error.
    pub fn not_found(handle: impl Into<String>) -> Self {
        Self::AudioNotFound {
            handle: handle.into(),
        }
    }

    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            AudioError::Io(_) => "AUDIO_001",
            AudioError::Wav(_) => "AUDIO_002",
            AudioError::SamplerNotFound => "AUDIO_003",
            AudioError::SoundfontMissing { .. } => "AUDIO_004",
            AudioError::SamplerSpawn(_) => "AUDIO_005",
            AudioError::SamplerTimeout { .. } => "AUDIO_006",
            AudioError::SamplerFailed { .. } => "AUDIO_007",
            AudioError::EmptyRender => "AUDIO_008",
            AudioError::InvalidHandle { .. } => "AUDIO_009",
            AudioError::AudioNotFound { .. } => "AUDIO_010",
        }
    }

    /// True for errors raised by the external sampler path. These are
    /// recovered by falling back to synthesis.
    pub fn is_sampler_error(&self) -> bool {
        matches!(
            self,
            AudioError::SamplerNotFound
                | AudioError::SoundfontMissing { .. }
                | AudioError::SamplerSpawn(_)
                | AudioError::SamplerTimeout { .. }
                | AudioError::SamplerFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampler_failed_helper() {
        let err = AudioError::sampler_failed(2, "bad soundfont");
        assert!(err.to_string().contains("code 2"));
        assert!(err.to_string().contains("bad soundfont"));
        assert_eq!(err.code(), "AUDIO_007");
        assert!(err.is_sampler_error());
    }

    #[test]
    fn test_soundfont_missing_message() {
        let unset = AudioError::SoundfontMissing { path: None };
        assert!(unset.to_string().contains("<unset>"));
        let set = AudioError::SoundfontMissing {
            path: Some(PathBuf::from("/tmp/piano.sf2")),
        };
        assert!(set.to_string().contains("piano.sf2"));
    }

    #[test]
    fn test_handle_errors_are_not_sampler_errors() {
        assert!(!AudioError::invalid_handle("../etc/passwd").is_sampler_error());
        assert_eq!(AudioError::not_found("audio/x.wav").code(), "AUDIO_010");
    }
}
