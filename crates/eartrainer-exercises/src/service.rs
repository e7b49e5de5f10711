//! Service facade: every operation an outer layer (HTTP handler, CLI) needs.

use eartrainer_audio::{AudioBytes, AudioConfig, AudioError, AudioStore};
use rand::RngCore;
use serde::Serialize;
use tracing::{debug, error};

use crate::config::ConfigOverrides;
use crate::context::{ContextMap, ExerciseContext};
use crate::error::{ExerciseError, ServiceResult};
use crate::exercise::Exercise;
use crate::metadata::{ExerciseData, ExerciseMetadata, ExerciseResult};
use crate::registry::ExerciseRegistry;
use crate::rng::entropy_rng;

/// Snapshot of the service's readiness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Health {
    pub exercise_count: usize,
    pub sampler_available: bool,
    pub cache_enabled: bool,
}

/// Exercise registry plus the audio store it renders into.
///
/// Holds no per-request state, so one instance can be shared across a
/// worker pool.
#[derive(Debug)]
pub struct EarTrainer {
    registry: ExerciseRegistry,
    audio: AudioStore,
}

impl EarTrainer {
    pub fn new(registry: ExerciseRegistry, audio: AudioStore) -> Self {
        Self { registry, audio }
    }

    /// Built-in catalog rendering through a store built from `config`.
    pub fn from_config(config: AudioConfig) -> Self {
        Self::new(ExerciseRegistry::with_default_catalog(), AudioStore::new(config))
    }

    pub fn registry(&self) -> &ExerciseRegistry {
        &self.registry
    }

    pub fn audio_store(&self) -> &AudioStore {
        &self.audio
    }

    fn exercise(&self, id: &str) -> ServiceResult<&dyn Exercise> {
        self.registry.get(id).ok_or_else(|| ExerciseError::not_found(id))
    }

    /// Metadata of every exercise type, in catalog order.
    pub fn list_exercise_types(&self) -> Vec<ExerciseMetadata> {
        self.registry.metadata().into_iter().cloned().collect()
    }

    pub fn exercise_metadata(&self, id: &str) -> ServiceResult<ExerciseMetadata> {
        Ok(self.exercise(id)?.metadata().clone())
    }

    /// Generates an instance with fresh randomness.
    pub fn generate(&self, id: &str, overrides: &ConfigOverrides) -> ServiceResult<ExerciseData> {
        let mut rng = entropy_rng();
        self.generate_with_rng(id, overrides, &mut rng)
    }

    /// Generates an instance drawing from `rng`.
    pub fn generate_with_rng(
        &self,
        id: &str,
        overrides: &ConfigOverrides,
        rng: &mut dyn RngCore,
    ) -> ServiceResult<ExerciseData> {
        let exercise = self.exercise(id)?;
        let result = exercise.generate(overrides, rng, &self.audio);
        if let Ok(data) = &result {
            debug!(exercise = id, answer = %data.correct_answer, "generated exercise");
        }
        conceal("generate", id, result)
    }

    /// Checks an answer against a context map produced by [`generate`](Self::generate).
    pub fn check_answer(&self, id: &str, answer: &str, context: &ContextMap) -> ServiceResult<ExerciseResult> {
        let exercise = self.exercise(id)?;
        let result = ExerciseContext::from_map(context)
            .map_err(|e| ExerciseError::internal(format!("malformed context: {}", e)))
            .and_then(|context| exercise.check_answer(answer, &context));
        conceal("check_answer", id, result)
    }

    /// Instructions text and hints.
    pub fn instructions(&self, id: &str) -> ServiceResult<(String, Vec<String>)> {
        let exercise = self.exercise(id)?;
        Ok((exercise.instructions(), exercise.hints()))
    }

    /// Reads a rendered file by the handle `generate` returned.
    pub fn audio(&self, handle: &str) -> ServiceResult<AudioBytes> {
        match self.audio.audio(handle) {
            Ok(bytes) => Ok(bytes),
            Err(AudioError::InvalidHandle { .. } | AudioError::AudioNotFound { .. }) => {
                Err(ExerciseError::not_found(handle))
            }
            Err(e) => conceal("audio", handle, Err(e.into())),
        }
    }

    pub fn health(&self) -> Health {
        Health {
            exercise_count: self.registry.len(),
            sampler_available: self.audio.renderer().sampler_available(),
            cache_enabled: self.audio.config().cache_enabled,
        }
    }
}

/// Logs internal failures and replaces their message with a generic one.
fn conceal<T>(operation: &str, subject: &str, result: ServiceResult<T>) -> ServiceResult<T> {
    match result {
        Err(ExerciseError::Internal { message }) => {
            error!(operation, subject, %message, "internal failure");
            Err(ExerciseError::internal(format!("{} failed", operation)))
        }
        other => other,
    }
}
