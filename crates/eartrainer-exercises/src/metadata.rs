//! Exercise descriptors and the data exchanged with callers.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::context::ExerciseContext;

/// Value type of a configuration option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    Int,
    Float,
    Str,
    List,
    Dict,
}

/// One named configuration option an exercise accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: OptionKind,
    pub default: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

impl ConfigOption {
    fn new(name: &str, kind: OptionKind, default: Value) -> Self {
        Self {
            name: name.to_string(),
            kind,
            default,
            description: None,
            min: None,
            max: None,
            choices: Vec::new(),
        }
    }

    pub fn int(name: &str, default: i64, min: i64, max: i64) -> Self {
        let mut option = Self::new(name, OptionKind::Int, json!(default));
        option.min = Some(min as f64);
        option.max = Some(max as f64);
        option
    }

    pub fn float(name: &str, default: f64, min: f64, max: f64) -> Self {
        let mut option = Self::new(name, OptionKind::Float, json!(default));
        option.min = Some(min);
        option.max = Some(max);
        option
    }

    pub fn string(name: &str, default: &str) -> Self {
        Self::new(name, OptionKind::Str, json!(default))
    }

    pub fn list<S: AsRef<str>>(name: &str, items: &[S]) -> Self {
        let items: Vec<&str> = items.iter().map(|s| s.as_ref()).collect();
        Self::new(name, OptionKind::List, json!(items))
    }

    /// A probability table with equal default weights over `categories`.
    pub fn probabilities<S: AsRef<str>>(name: &str, categories: &[S], subject: &str) -> Self {
        let p = if categories.is_empty() {
            0.0
        } else {
            1.0 / categories.len() as f64
        };
        let default: serde_json::Map<String, Value> = categories
            .iter()
            .map(|c| (c.as_ref().to_string(), json!(p)))
            .collect();
        Self::new(name, OptionKind::Dict, Value::Object(default)).describe(format!(
            "Custom probabilities for {} selection (must sum to 1.0)",
            subject
        ))
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn choices<S: AsRef<str>>(mut self, choices: &[S]) -> Self {
        self.choices = choices.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }
}

/// Static descriptor of an exercise type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseMetadata {
    pub id: String,
    pub name: String,
    pub description: String,
    /// 1 (easiest) to 10.
    pub difficulty: u8,
    pub prerequisites: Vec<String>,
    pub learning_objectives: Vec<String>,
    /// Estimated time in seconds.
    pub estimated_time: u32,
    pub category: String,
    pub tags: Vec<String>,
    pub input_type: String,
    pub answer_format: String,
    pub requires_progression: bool,
    pub requires_single_note: bool,
    /// Typical audio length in seconds.
    pub audio_duration: u32,
    pub config_options: Vec<ConfigOption>,
}

impl ExerciseMetadata {
    /// Starts a descriptor with multiple-choice defaults.
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            difficulty: 1,
            prerequisites: Vec::new(),
            learning_objectives: Vec::new(),
            estimated_time: 300,
            category: String::new(),
            tags: Vec::new(),
            input_type: "multiple_choice".to_string(),
            answer_format: String::new(),
            requires_progression: false,
            requires_single_note: false,
            audio_duration: 2,
            config_options: Vec::new(),
        }
    }

    /// Looks up a configuration option by name.
    pub fn option(&self, name: &str) -> Option<&ConfigOption> {
        self.config_options.iter().find(|o| o.name == name)
    }
}

/// Content generated for one instance of an exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseData {
    /// Display label for the question.
    pub key: String,
    /// Scale note names, empty when the exercise has no tonal context.
    pub scale: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progression_audio: Option<String>,
    /// Handle of the audio the learner listens to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audio: Option<String>,
    pub options: Vec<String>,
    pub correct_answer: String,
    /// Everything a later answer check needs.
    pub context: ExerciseContext,
}

/// Verdict of one answer check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseResult {
    pub is_correct: bool,
    pub user_answer: String,
    pub correct_answer: String,
    pub feedback: String,
    #[serde(default)]
    pub hints_used: Vec<String>,
    /// Seconds, when the caller tracks it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken: Option<u32>,
}

impl ExerciseResult {
    pub fn new(is_correct: bool, user_answer: &str, correct_answer: &str, feedback: impl Into<String>) -> Self {
        Self {
            is_correct,
            user_answer: user_answer.trim().to_string(),
            correct_answer: correct_answer.to_string(),
            feedback: feedback.into(),
            hints_used: Vec::new(),
            time_taken: None,
        }
    }
}

/// Joins names as `"A, B and C"`.
pub fn human_list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|s| s.as_ref()).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}
