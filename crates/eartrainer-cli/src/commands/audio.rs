//! Audio command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use super::output::{format_size, print_json};
use crate::settings::Settings;

/// Fetch a rendered file by handle, writing it to `output` or raw to stdout.
pub fn run(settings: &Settings, handle: &str, output: Option<&str>) -> Result<ExitCode> {
    let audio = settings.trainer().audio(handle)?;

    let Some(output) = output else {
        std::io::stdout()
            .lock()
            .write_all(&audio.bytes)
            .context("Failed to write audio to stdout")?;
        return Ok(ExitCode::SUCCESS);
    };

    std::fs::write(Path::new(output), &audio.bytes)
        .with_context(|| format!("Failed to write audio file: {}", output))?;

    if settings.json {
        print_json(&json!({
            "handle": handle,
            "output": output,
            "content_type": audio.content_type,
            "size_bytes": audio.bytes.len(),
        }))?;
    } else {
        println!(
            "{} {} -> {} ({}, {})",
            "WROTE".green().bold(),
            handle,
            output,
            audio.content_type,
            format_size(audio.bytes.len() as u64)
        );
    }
    Ok(ExitCode::SUCCESS)
}
