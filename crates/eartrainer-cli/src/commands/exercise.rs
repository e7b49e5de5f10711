//! Catalog browsing: `list`, `show` and `instructions`.

use anyhow::Result;
use colored::Colorize;
use eartrainer_exercises::{ExerciseMetadata, OptionKind};
use serde_json::json;
use std::process::ExitCode;

use super::output::print_json;
use crate::settings::Settings;

/// List every exercise type.
pub fn list(settings: &Settings) -> Result<ExitCode> {
    let trainer = settings.trainer();
    let exercises = trainer.list_exercise_types();

    if settings.json {
        print_json(&exercises)?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Exercise types".cyan().bold());
    for metadata in &exercises {
        println!(
            "  {:<42} {} {}",
            metadata.id.bold(),
            metadata.name,
            format!("[{} · difficulty {}]", metadata.category, metadata.difficulty).dimmed()
        );
    }
    println!("\n{} exercise types", exercises.len());
    Ok(ExitCode::SUCCESS)
}

/// Show one exercise's metadata and configuration options.
pub fn show(settings: &Settings, id: &str) -> Result<ExitCode> {
    let metadata = settings.trainer().exercise_metadata(id)?;

    if settings.json {
        print_json(&metadata)?;
    } else {
        print_metadata(&metadata);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_metadata(metadata: &ExerciseMetadata) {
    println!("{} {}", metadata.name.cyan().bold(), format!("({})", metadata.id).dimmed());
    println!("  {}", metadata.description);
    println!("  {}: {}", "Category".dimmed(), metadata.category);
    println!("  {}: {}/10", "Difficulty".dimmed(), metadata.difficulty);
    println!("  {}: {}s", "Estimated time".dimmed(), metadata.estimated_time);
    if !metadata.prerequisites.is_empty() {
        println!("  {}: {}", "Prerequisites".dimmed(), metadata.prerequisites.join(", "));
    }
    if !metadata.tags.is_empty() {
        println!("  {}: {}", "Tags".dimmed(), metadata.tags.join(", "));
    }

    if metadata.config_options.is_empty() {
        return;
    }
    println!("  {}:", "Options".dimmed());
    for option in &metadata.config_options {
        let range = match (option.kind, option.min, option.max) {
            (OptionKind::Int | OptionKind::Float, Some(min), Some(max)) => format!(" [{}..={}]", min, max),
            _ => String::new(),
        };
        println!(
            "    {} {}{} = {}",
            option.name.bold(),
            format!("{:?}", option.kind).to_lowercase().dimmed(),
            range,
            option.default
        );
        if let Some(description) = &option.description {
            println!("      {}", description.dimmed());
        }
    }
}

/// Print instructions and hints.
pub fn instructions(settings: &Settings, id: &str) -> Result<ExitCode> {
    let (text, hints) = settings.trainer().instructions(id)?;

    if settings.json {
        print_json(&json!({ "instructions": text, "hints": hints }))?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Instructions".cyan().bold());
    println!("  {}", text);
    if !hints.is_empty() {
        println!("{}", "Hints".cyan().bold());
        for hint in &hints {
            println!("  - {}", hint);
        }
    }
    Ok(ExitCode::SUCCESS)
}
