//! Audio configuration.
//!
//! Built with `Default` plus chained setters, or read from the environment
//! with [`AudioConfig::from_env`].

use std::path::PathBuf;
use std::time::Duration;

/// Default output sample rate.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Default timeout for one external sampler invocation.
pub const DEFAULT_SAMPLER_TIMEOUT_SECS: u64 = 10;

/// Directory under the media root holding rendered audio.
pub const AUDIO_SUBDIR: &str = "audio";
/// Directory under [`AUDIO_SUBDIR`] holding cache entries.
pub const CACHE_SUBDIR: &str = "cache";

/// Environment variable naming the media root.
pub const ENV_MEDIA_ROOT: &str = "EARTRAINER_MEDIA_ROOT";
/// Environment variable toggling the cache (`0`, `false`, `off`, `no` disable it).
pub const ENV_AUDIO_CACHE: &str = "EARTRAINER_AUDIO_CACHE";
/// Environment variable naming the soundfont.
pub const ENV_SOUNDFONT: &str = "EARTRAINER_SOUNDFONT";
/// Environment variable overriding the fluidsynth executable.
pub const ENV_FLUIDSYNTH_PATH: &str = "FLUIDSYNTH_PATH";
/// Environment variable overriding the sampler timeout, in seconds.
pub const ENV_SAMPLER_TIMEOUT: &str = "EARTRAINER_SAMPLER_TIMEOUT_SECS";

/// Configuration for rendering and storing audio.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioConfig {
    /// Root directory under which `audio/` and `audio/cache/` live.
    pub media_root: PathBuf,
    /// Whether renders are memoized by content hash.
    pub cache_enabled: bool,
    /// Soundfont for the external sampler. `None` means synthesis only.
    pub soundfont_path: Option<PathBuf>,
    /// Explicit fluidsynth executable.
    pub sampler_path: Option<PathBuf>,
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Timeout for one sampler invocation.
    pub sampler_timeout: Duration,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            media_root: PathBuf::from("media"),
            cache_enabled: true,
            soundfont_path: None,
            sampler_path: None,
            sample_rate: DEFAULT_SAMPLE_RATE,
            sampler_timeout: Duration::from_secs(DEFAULT_SAMPLER_TIMEOUT_SECS),
        }
    }
}

impl AudioConfig {
    /// Creates a config rooted at `media_root`.
    pub fn with_media_root(media_root: impl Into<PathBuf>) -> Self {
        Self {
            media_root: media_root.into(),
            ..Default::default()
        }
    }

    /// Deterministic configuration for tests: cache off, no soundfont.
    pub fn for_testing(media_root: impl Into<PathBuf>) -> Self {
        Self::with_media_root(media_root).cache_enabled(false)
    }

    /// Reads overrides from the environment on top of the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(root) = std::env::var(ENV_MEDIA_ROOT) {
            if !root.trim().is_empty() {
                config.media_root = PathBuf::from(root);
            }
        }

        if let Ok(flag) = std::env::var(ENV_AUDIO_CACHE) {
            config.cache_enabled = parse_flag(&flag).unwrap_or(true);
        }

        if let Ok(path) = std::env::var(ENV_SOUNDFONT) {
            if !path.trim().is_empty() {
                config.soundfont_path = Some(PathBuf::from(path));
            }
        }

        if let Ok(path) = std::env::var(ENV_FLUIDSYNTH_PATH) {
            if !path.trim().is_empty() {
                config.sampler_path = Some(PathBuf::from(path));
            }
        }

        if let Ok(secs) = std::env::var(ENV_SAMPLER_TIMEOUT) {
            if let Ok(secs) = secs.trim().parse::<u64>() {
                config.sampler_timeout = Duration::from_secs(secs);
            }
        }

        config
    }

    /// Sets the media root.
    pub fn media_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.media_root = path.into();
        self
    }

    /// Enables or disables the cache.
    pub fn cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Sets the soundfont path.
    pub fn soundfont(mut self, path: impl Into<PathBuf>) -> Self {
        self.soundfont_path = Some(path.into());
        self
    }

    /// Sets the fluidsynth executable path.
    pub fn sampler_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sampler_path = Some(path.into());
        self
    }

    /// Sets the output sample rate.
    pub fn sample_rate(mut self, rate: u32) -> Self {
        self.sample_rate = rate;
        self
    }

    /// Sets the sampler timeout.
    pub fn sampler_timeout(mut self, timeout: Duration) -> Self {
        self.sampler_timeout = timeout;
        self
    }

    /// Directory holding uncached renders.
    pub fn audio_dir(&self) -> PathBuf {
        self.media_root.join(AUDIO_SUBDIR)
    }

    /// Directory holding cached renders.
    pub fn cache_dir(&self) -> PathBuf {
        self.audio_dir().join(CACHE_SUBDIR)
    }
}

/// Parses a boolean-ish environment value.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AudioConfig::default();
        assert!(config.cache_enabled);
        assert_eq!(config.sample_rate, 44_100);
        assert_eq!(config.sampler_timeout, Duration::from_secs(10));
        assert!(config.soundfont_path.is_none());
    }

    #[test]
    fn test_builder_and_dirs() {
        let config = AudioConfig::with_media_root("/srv/media")
            .cache_enabled(false)
            .soundfont("/srv/piano.sf2")
            .sample_rate(22_050);
        assert_eq!(config.audio_dir(), PathBuf::from("/srv/media/audio"));
        assert_eq!(config.cache_dir(), PathBuf::from("/srv/media/audio/cache"));
        assert!(!config.cache_enabled);
        assert_eq!(config.soundfont_path, Some(PathBuf::from("/srv/piano.sf2")));
        assert_eq!(config.sample_rate, 22_050);
    }

    #[test]
    fn test_for_testing_disables_cache() {
        let config = AudioConfig::for_testing("/tmp/x");
        assert!(!config.cache_enabled);
        assert!(config.soundfont_path.is_none());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag(" FALSE "), Some(false));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("maybe"), None);
    }
}
