//! Global flags shared by every subcommand.

use std::path::PathBuf;

use eartrainer_audio::config::ENV_MEDIA_ROOT;
use eartrainer_audio::{AudioConfig, AudioStore};
use eartrainer_exercises::EarTrainer;
use tracing::debug;

/// Settings resolved from global CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub media_root: Option<PathBuf>,
    pub no_cache: bool,
    pub soundfont: Option<PathBuf>,
    pub json: bool,
}

impl Settings {
    /// Environment configuration with command-line flags applied on top.
    ///
    /// Without `--media-root` or `EARTRAINER_MEDIA_ROOT`, media goes under the
    /// user's local data directory.
    pub fn audio_config(&self) -> AudioConfig {
        let mut config = AudioConfig::from_env();

        if let Some(root) = &self.media_root {
            config.media_root = root.clone();
        } else if std::env::var_os(ENV_MEDIA_ROOT).is_none() {
            if let Some(data_dir) = default_media_root() {
                config.media_root = data_dir;
            }
        }
        if self.no_cache {
            config.cache_enabled = false;
        }
        if let Some(soundfont) = &self.soundfont {
            config.soundfont_path = Some(soundfont.clone());
        }

        debug!(media_root = %config.media_root.display(), cache = config.cache_enabled, "audio config");
        config
    }

    pub fn store(&self) -> AudioStore {
        AudioStore::new(self.audio_config())
    }

    pub fn trainer(&self) -> EarTrainer {
        EarTrainer::from_config(self.audio_config())
    }
}

/// `<local data dir>/eartrainer/media`, when the platform has one.
pub fn default_media_root() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("eartrainer").join("media"))
}
