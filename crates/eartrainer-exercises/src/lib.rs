//! Eartrainer exercises.
//!
//! Defines the [`Exercise`] contract, the built-in catalog of interval,
//! chord, direction and tonal-center exercises, the [`ExerciseRegistry`]
//! that holds them, and the [`EarTrainer`] service that outer layers call.
//!
//! Generation is stateless: every [`ExerciseData`] carries a typed
//! [`ExerciseContext`] that is enough to check an answer later without any
//! server-side session.
//!
//! # Example
//!
//! ```no_run
//! use eartrainer_audio::AudioConfig;
//! use eartrainer_exercises::{ConfigOverrides, EarTrainer};
//!
//! let trainer = EarTrainer::from_config(AudioConfig::with_media_root("media"));
//! let data = trainer.generate("interval_recognition", &ConfigOverrides::new()).unwrap();
//! let result = trainer
//!     .check_answer("interval_recognition", &data.correct_answer, &data.context.to_map())
//!     .unwrap();
//! assert!(result.is_correct);
//! ```

pub mod catalog;
pub mod choice;
pub mod config;
pub mod context;
pub mod error;
pub mod exercise;
pub mod metadata;
pub mod registry;
pub mod rng;
pub mod service;

#[cfg(test)]
mod test_support;

pub use choice::{uniform_weights, validate_probabilities, weighted_choice, PROBABILITY_SUM_TOLERANCE};
pub use config::{parse_override, ConfigOverrides, Overrides};
pub use context::{overrides_from_value, ContextMap, ExerciseContext, IntervalTiming};
pub use error::{ExerciseError, ServiceResult};
pub use exercise::{answers_match, default_feedback, CaseRule, Exercise};
pub use metadata::{ConfigOption, ExerciseData, ExerciseMetadata, ExerciseResult, OptionKind};
pub use registry::ExerciseRegistry;
pub use rng::{create_rng, entropy_rng};
pub use service::{EarTrainer, Health};
