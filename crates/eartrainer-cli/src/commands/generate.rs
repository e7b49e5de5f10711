//! Generate command implementation
//!
//! Generates one exercise instance and prints its data, including the
//! context needed by `check`.

use anyhow::{anyhow, Result};
use colored::Colorize;
use eartrainer_exercises::{create_rng, entropy_rng, parse_override, ConfigOverrides, ExerciseData};
use std::process::ExitCode;

use super::output::print_json;
use crate::settings::Settings;

/// Builds an override map from `key=value` pairs.
///
/// Values are parsed as JSON when possible (`octave=5`,
/// `interval_probabilities={"octave":1.0}`) and kept as strings otherwise.
pub fn parse_overrides(pairs: &[String]) -> Result<ConfigOverrides> {
    let mut overrides = ConfigOverrides::new();
    for pair in pairs {
        let (key, value) =
            parse_override(pair).ok_or_else(|| anyhow!("invalid override '{}' (expected key=value)", pair))?;
        overrides.insert(key, value);
    }
    Ok(overrides)
}

/// Run the generate command
///
/// # Arguments
/// * `id` - Exercise type id
/// * `sets` - Raw `key=value` overrides
/// * `seed` - Optional RNG seed for reproducible output
pub fn run(settings: &Settings, id: &str, sets: &[String], seed: Option<u64>) -> Result<ExitCode> {
    let overrides = parse_overrides(sets)?;
    let trainer = settings.trainer();

    let mut rng = match seed {
        Some(seed) => create_rng(seed),
        None => entropy_rng(),
    };
    let data = trainer.generate_with_rng(id, &overrides, &mut rng)?;

    if settings.json {
        print_json(&data)?;
    } else {
        print_human(&data)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn print_human(data: &ExerciseData) -> Result<()> {
    println!("{} {}", "Generated:".cyan().bold(), data.key);
    if !data.scale.is_empty() {
        println!("  {}: {}", "Scale".dimmed(), data.scale.join(" "));
    }
    if let Some(handle) = &data.progression_audio {
        println!("  {}: {}", "Progression audio".dimmed(), handle);
    }
    if let Some(handle) = &data.target_audio {
        println!("  {}: {}", "Audio".dimmed(), handle);
    }
    println!("  {}: {}", "Options".dimmed(), data.options.join(", "));
    println!("  {}: {}", "Answer".dimmed(), data.correct_answer.green());
    println!("  {}: {}", "Context".dimmed(), serde_json::to_string(&data.context)?);
    Ok(())
}
