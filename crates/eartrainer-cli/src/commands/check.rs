//! Check command implementation

use anyhow::{bail, Context, Result};
use colored::Colorize;
use eartrainer_exercises::ContextMap;
use serde_json::Value;
use std::path::Path;
use std::process::ExitCode;

use super::output::print_json;
use crate::settings::Settings;

/// Reads a context from inline JSON or `@path`.
///
/// Accepts either the context object itself or a whole generated-exercise
/// document (as printed by `generate --json`), whose `context` is used.
pub fn load_context(arg: &str) -> Result<ContextMap> {
    let text = match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(Path::new(path))
            .with_context(|| format!("Failed to read context file: {}", path))?,
        None => arg.to_string(),
    };
    let value: Value = serde_json::from_str(&text).context("Context is not valid JSON")?;

    let Value::Object(mut map) = value else {
        bail!("context must be a JSON object");
    };
    if !map.contains_key("family") {
        if let Some(Value::Object(inner)) = map.remove("context") {
            return Ok(inner);
        }
    }
    Ok(map)
}

/// Run the check command
///
/// # Returns
/// Exit code: 0 if the answer is correct, 1 otherwise
pub fn run(settings: &Settings, id: &str, answer: &str, context_arg: &str) -> Result<ExitCode> {
    let context = load_context(context_arg)?;
    let result = settings.trainer().check_answer(id, answer, &context)?;

    if settings.json {
        print_json(&result)?;
    } else if result.is_correct {
        println!("{} {}", "CORRECT".green().bold(), result.feedback);
    } else {
        println!("{} {}", "INCORRECT".red().bold(), result.feedback);
    }

    Ok(if result.is_correct {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_inline_context() {
        let map = load_context(r#"{"family":"direction","correct_answer":"Higher"}"#).unwrap();
        assert_eq!(map["family"], json!("direction"));
    }

    #[test]
    fn test_load_context_from_generated_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exercise.json");
        std::fs::write(&path, r#"{"key":"x","context":{"family":"home_note"}}"#).unwrap();

        let map = load_context(&format!("@{}", path.display())).unwrap();
        assert_eq!(map["family"], json!("home_note"));
    }

    #[test]
    fn test_load_context_rejects_non_objects() {
        assert!(load_context("[1, 2]").is_err());
        assert!(load_context("not json").is_err());
        assert!(load_context("@/definitely/missing/context.json").is_err());
    }
}
