//! Eartrainer CLI - developer harness for the exercise service
//!
//! Lists the exercise catalog, generates exercise instances with audio,
//! checks answers against generated contexts and manages the audio cache.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use eartrainer_cli::commands;
use eartrainer_cli::settings::Settings;

/// Eartrainer - ear-training exercise generator
#[derive(Parser)]
#[command(name = "eartrainer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Media root holding rendered audio (default: $EARTRAINER_MEDIA_ROOT or the local data dir)
    #[arg(long, global = true)]
    media_root: Option<PathBuf>,

    /// Render every request to a fresh file instead of the content-addressed cache
    #[arg(long, global = true)]
    no_cache: bool,

    /// Soundfont for the fluidsynth sampler (falls back to synthesis when unusable)
    #[arg(long, global = true)]
    soundfont: Option<PathBuf>,

    /// Output machine-readable JSON (no colored output)
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every exercise type
    List,

    /// Show one exercise type's metadata and options
    Show {
        /// Exercise type id
        id: String,
    },

    /// Generate an exercise instance and render its audio
    Generate {
        /// Exercise type id
        id: String,

        /// Configuration override as key=value (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        sets: Vec<String>,

        /// Seed for reproducible generation
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Check an answer against a generated context
    Check {
        /// Exercise type id
        id: String,

        /// The answer to check
        #[arg(short, long)]
        answer: String,

        /// Context JSON, or @path to a file holding it
        #[arg(short, long)]
        context: String,
    },

    /// Print an exercise's instructions and hints
    Instructions {
        /// Exercise type id
        id: String,
    },

    /// Fetch rendered audio by handle
    Audio {
        /// Audio handle returned by generate
        handle: String,

        /// Output file path (default: raw bytes to stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Manage the audio cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

/// Subcommands for audio cache management
#[derive(Subcommand)]
enum CacheCommands {
    /// Show cache information (entry count, total size)
    Info,
    /// Clear all cache entries
    Clear,
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let settings = Settings {
        media_root: cli.media_root,
        no_cache: cli.no_cache,
        soundfont: cli.soundfont,
        json: cli.json,
    };

    let result = match cli.command {
        Commands::List => commands::exercise::list(&settings),
        Commands::Show { id } => commands::exercise::show(&settings, &id),
        Commands::Generate { id, sets, seed } => commands::generate::run(&settings, &id, &sets, seed),
        Commands::Check { id, answer, context } => commands::check::run(&settings, &id, &answer, &context),
        Commands::Instructions { id } => commands::exercise::instructions(&settings, &id),
        Commands::Audio { handle, output } => commands::audio::run(&settings, &handle, output.as_deref()),
        Commands::Cache { command } => match command {
            CacheCommands::Info => commands::cache::info(&settings),
            CacheCommands::Clear => commands::cache::clear(&settings),
        },
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_generate_with_overrides() {
        let cli = Cli::try_parse_from([
            "eartrainer",
            "generate",
            "interval_recognition",
            "--set",
            "octave=5",
            "--set",
            "reference_note=C",
            "--seed",
            "42",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate { id, sets, seed } => {
                assert_eq!(id, "interval_recognition");
                assert_eq!(sets, vec!["octave=5", "reference_note=C"]);
                assert_eq!(seed, Some(42));
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "eartrainer",
            "list",
            "--json",
            "--no-cache",
            "--media-root",
            "/tmp/media",
            "-v",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::List));
        assert!(cli.json);
        assert!(cli.no_cache);
        assert!(cli.verbose);
        assert_eq!(cli.media_root, Some(PathBuf::from("/tmp/media")));
        assert!(cli.soundfont.is_none());
    }

    #[test]
    fn test_cli_parses_check() {
        let cli = Cli::try_parse_from([
            "eartrainer",
            "check",
            "step_vs_leap",
            "--answer",
            "Step",
            "--context",
            "@ctx.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Check { id, answer, context } => {
                assert_eq!(id, "step_vs_leap");
                assert_eq!(answer, "Step");
                assert_eq!(context, "@ctx.json");
            }
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn test_cli_requires_answer_for_check() {
        let err = Cli::try_parse_from(["eartrainer", "check", "step_vs_leap", "--context", "{}"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("--answer"));
    }

    #[test]
    fn test_cli_parses_cache_subcommands() {
        let cli = Cli::try_parse_from(["eartrainer", "cache", "clear"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Cache {
                command: CacheCommands::Clear
            }
        ));

        let cli = Cli::try_parse_from(["eartrainer", "audio", "audio/cache/abc.wav", "-o", "out.wav"]).unwrap();
        match cli.command {
            Commands::Audio { handle, output } => {
                assert_eq!(handle, "audio/cache/abc.wav");
                assert_eq!(output.as_deref(), Some("out.wav"));
            }
            _ => panic!("expected audio command"),
        }
    }
}
