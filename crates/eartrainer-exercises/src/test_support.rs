//! Shared fixtures for unit tests.

use eartrainer_audio::{AudioConfig, AudioStore};
use serde_json::Value;
use tempfile::TempDir;

use crate::config::ConfigOverrides;

/// Synthetic-only store under a fresh media root, at a low sample rate.
pub fn store() -> (TempDir, AudioStore) {
    let dir = TempDir::new().expect("create temp media root");
    let config = AudioConfig::with_media_root(dir.path()).sample_rate(8_000);
    (dir, AudioStore::new(config))
}

/// Builds an override map from a JSON object literal.
pub fn overrides(value: Value) -> ConfigOverrides {
    match value {
        Value::Object(map) => map,
        other => panic!("overrides must be an object, got {other}"),
    }
}
