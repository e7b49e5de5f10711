//! Temporary media roots wired to a service.

use eartrainer_audio::{AudioConfig, AudioStore};
use eartrainer_exercises::EarTrainer;
use tempfile::TempDir;

/// Sample rate used by fixtures; low enough to keep renders fast.
pub const TEST_SAMPLE_RATE: u32 = 16_000;

/// A media root that lives as long as the fixture.
pub struct TestMedia {
    dir: TempDir,
    config: AudioConfig,
}

impl TestMedia {
    /// Synthetic-only media root with the cache enabled.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp media root");
        let config = AudioConfig::with_media_root(dir.path()).sample_rate(TEST_SAMPLE_RATE);
        Self { dir, config }
    }

    /// Synthetic-only media root with the cache disabled.
    pub fn uncached() -> Self {
        let mut media = Self::new();
        media.config = AudioConfig::for_testing(media.dir.path()).sample_rate(TEST_SAMPLE_RATE);
        media
    }

    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }

    pub fn config(&self) -> &AudioConfig {
        &self.config
    }

    pub fn store(&self) -> AudioStore {
        AudioStore::new(self.config.clone())
    }

    pub fn trainer(&self) -> EarTrainer {
        EarTrainer::from_config(self.config.clone())
    }
}

impl Default for TestMedia {
    fn default() -> Self {
        Self::new()
    }
}
