//! The exercise contract.
//!
//! An exercise is a stateless, reusable description: [`Exercise::generate`]
//! draws a fresh question (with audio) and [`Exercise::check_answer`] grades
//! a submitted answer using only the context that `generate` returned.

use eartrainer_audio::{AudioStore, RenderRequest};
use rand::RngCore;
use tracing::debug;

use crate::config::ConfigOverrides;
use crate::context::ExerciseContext;
use crate::error::{ExerciseError, ServiceResult};
use crate::metadata::{ExerciseData, ExerciseMetadata, ExerciseResult};

/// A kind of ear-training question.
pub trait Exercise: Send + Sync {
    /// Static descriptor.
    fn metadata(&self) -> &ExerciseMetadata;

    /// Draws a question. All randomness comes from `rng`; audio is rendered
    /// through `audio` and may block.
    fn generate(
        &self,
        overrides: &ConfigOverrides,
        rng: &mut dyn RngCore,
        audio: &AudioStore,
    ) -> ServiceResult<ExerciseData>;

    /// Grades `answer` against a context from a prior [`Exercise::generate`].
    fn check_answer(&self, answer: &str, context: &ExerciseContext) -> ServiceResult<ExerciseResult>;

    /// Unique id.
    fn id(&self) -> &str {
        &self.metadata().id
    }

    /// Instructions shown before the first question.
    fn instructions(&self) -> String {
        self.metadata().description.clone()
    }

    /// Hints the learner can ask for.
    fn hints(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Whether answer comparison cares about letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseRule {
    /// `"3m"` and `"3M"` are different answers.
    Sensitive,
    /// `"higher"` matches `"Higher"`.
    Insensitive,
}

impl CaseRule {
    /// Sensitive when two options differ only by case, insensitive otherwise.
    pub fn for_options<S: AsRef<str>>(options: &[S]) -> Self {
        for (i, a) in options.iter().enumerate() {
            for b in &options[i + 1..] {
                if a.as_ref() != b.as_ref() && a.as_ref().eq_ignore_ascii_case(b.as_ref()) {
                    return CaseRule::Sensitive;
                }
            }
        }
        CaseRule::Insensitive
    }
}

/// Compares trimmed answers under `rule`.
pub fn answers_match(answer: &str, correct: &str, rule: CaseRule) -> bool {
    let answer = answer.trim();
    let correct = correct.trim();
    match rule {
        CaseRule::Sensitive => answer == correct,
        CaseRule::Insensitive => answer.to_lowercase() == correct.to_lowercase(),
    }
}

/// Generic feedback line.
pub fn default_feedback(is_correct: bool, correct_answer: &str) -> String {
    if is_correct {
        "Correct! Well done!".to_string()
    } else {
        format!("Incorrect. The correct answer was {}. Try again!", correct_answer)
    }
}

/// Renders `request` and returns its media handle.
pub(crate) fn render_audio(audio: &AudioStore, exercise: &str, request: &RenderRequest) -> ServiceResult<String> {
    let stored = audio.get_or_render(request)?;
    debug!(
        exercise,
        handle = %stored.handle,
        cache_hit = stored.cache_hit,
        "exercise audio ready"
    );
    Ok(stored.handle)
}

/// Error for a context produced by a different exercise family.
pub(crate) fn foreign_context(exercise: &str, context: &ExerciseContext) -> ExerciseError {
    debug!(exercise, family = context.family(), "context family mismatch");
    ExerciseError::internal("context does not belong to this exercise")
}
