//! Error types surfaced by the exercise service.

use eartrainer_audio::AudioError;
use thiserror::Error;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ExerciseError>;

/// Errors a caller of the exercise service can observe.
///
/// Invalid overrides never surface (they are dropped in favor of defaults)
/// and sampler failures are absorbed by the renderer, so only these two
/// kinds reach the caller.
#[derive(Debug, Error)]
pub enum ExerciseError {
    /// No exercise is registered under the id.
    #[error("exercise not found: '{id}'")]
    NotFound {
        /// The requested id.
        id: String,
    },

    /// Anything else went wrong. The message is safe to show to a caller.
    #[error("internal error: {message}")]
    Internal {
        /// Generic description.
        message: String,
    },
}

impl ExerciseError {
    /// Creates a not-found error.
    pub fn not_found(id: impl Into<String>) -> Self {
        ExerciseError::NotFound { id: id.into() }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ExerciseError::Internal {
            message: message.into(),
        }
    }

    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ExerciseError::NotFound { .. } => "EXERCISE_001",
            ExerciseError::Internal { .. } => "EXERCISE_002",
        }
    }
}

impl From<AudioError> for ExerciseError {
    fn from(err: AudioError) -> Self {
        ExerciseError::internal(format!("audio rendering failed ({})", err.code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(ExerciseError::not_found("x").code(), "EXERCISE_001");
        assert_eq!(ExerciseError::internal("x").code(), "EXERCISE_002");
    }

    #[test]
    fn test_audio_error_is_internal_without_details() {
        let err: ExerciseError = AudioError::not_found("audio/secret/path.wav").into();
        match err {
            ExerciseError::Internal { message } => {
                assert!(message.contains("AUDIO_"));
                assert!(!message.contains("secret"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ExerciseError::not_found("nonexistent_id").to_string(),
            "exercise not found: 'nonexistent_id'"
        );
    }
}
