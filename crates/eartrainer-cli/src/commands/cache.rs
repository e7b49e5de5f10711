//! Cache management commands

use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use std::process::ExitCode;

use super::output::{format_size, print_json};
use crate::settings::Settings;

/// Clear all cache entries
pub fn clear(settings: &Settings) -> Result<ExitCode> {
    let store = settings.store();

    if !settings.json {
        println!("{}", "Clearing audio cache...".cyan().bold());
    }

    let count = store.clear()?;

    if settings.json {
        print_json(&json!({ "removed": count }))?;
    } else if count == 0 {
        println!("  {}", "Cache is already empty".dimmed());
    } else {
        println!(
            "  {} Removed {} cache {}",
            "SUCCESS".green().bold(),
            count,
            if count == 1 { "entry" } else { "entries" }
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Show cache information
pub fn info(settings: &Settings) -> Result<ExitCode> {
    let store = settings.store();
    let info = store.info()?;

    if settings.json {
        print_json(&info)?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Cache Information".cyan().bold());
    println!("  {}: {}", "Cache directory".dimmed(), info.cache_dir.display());
    println!("  {}: {}", "Enabled".dimmed(), store.config().cache_enabled);
    println!("  {}: {}", "Entry count".dimmed(), info.entry_count);
    println!("  {}: {}", "Total size".dimmed(), format_size(info.total_size_bytes));

    Ok(ExitCode::SUCCESS)
}
