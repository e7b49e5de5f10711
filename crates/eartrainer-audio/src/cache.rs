//! Content-addressed audio storage.
//!
//! Renders are keyed by the BLAKE3 hash of their canonical description plus
//! the renderer's fingerprint (backend and sample rate), and stored as
//! `<media_root>/audio/cache/<hash>.wav`. With caching disabled
//! every render is written to a fresh `<media_root>/audio/<prefix><unique>.wav`.
//!
//! Entries are never evicted automatically; [`AudioStore::clear`] is the only
//! pruning operation.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{AudioConfig, AUDIO_SUBDIR};
use crate::error::{AudioError, AudioResult};
use crate::renderer::{BackendKind, Renderer};
use crate::request::RenderRequest;

/// Cache key for a canonical description: lowercase hex BLAKE3.
pub fn cache_key(canonical: &str) -> String {
    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}

/// Content type for a file name, by extension.
pub fn content_type_for(name: &str) -> &'static str {
    let lower = name.to_ascii_lowercase();
    if lower.ends_with(".mp3") {
        "audio/mpeg"
    } else {
        "audio/wav"
    }
}

/// Result of [`AudioStore::get_or_render`].
#[derive(Debug, Clone, Serialize)]
pub struct StoredAudio {
    /// Media-root-relative handle with `/` separators.
    pub handle: String,
    /// Absolute location on disk.
    pub path: PathBuf,
    /// BLAKE3 key of the canonical description.
    pub cache_key: String,
    /// Whether an existing entry was reused.
    pub cache_hit: bool,
    /// Backend that rendered the audio; `None` on a cache hit.
    pub backend: Option<BackendKind>,
}

/// Raw audio bytes for a handle.
#[derive(Debug, Clone)]
pub struct AudioBytes {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Cache statistics.
#[derive(Debug, Clone, Serialize)]
pub struct CacheInfo {
    /// Cache directory path.
    pub cache_dir: PathBuf,
    /// Number of cached renders.
    pub entry_count: u64,
    /// Total size in bytes.
    pub total_size_bytes: u64,
}

/// Renders through a [`Renderer`] and memoizes results on disk.
#[derive(Debug)]
pub struct AudioStore {
    config: AudioConfig,
    renderer: Renderer,
    key_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl AudioStore {
    /// Creates a store whose renderer is built from `config`.
    pub fn new(config: AudioConfig) -> Self {
        let renderer = Renderer::from_config(&config);
        Self::with_renderer(config, renderer)
    }

    /// Creates a store with an explicit renderer.
    pub fn with_renderer(config: AudioConfig, renderer: Renderer) -> Self {
        Self {
            config,
            renderer,
            key_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &AudioConfig {
        &self.config
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Path of the cache entry for a key.
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.config.cache_dir().join(format!("{}.wav", key))
    }

    /// Whether a cache entry exists for a key.
    pub fn has_entry(&self, key: &str) -> bool {
        self.entry_path(key).is_file()
    }

    /// Description hashed into the cache key for `request`.
    pub fn cache_description(&self, request: &RenderRequest) -> String {
        format!("{}|{}", request.canonical(), self.renderer.fingerprint())
    }

    /// Returns the stored audio for `request`, rendering it on a miss.
    pub fn get_or_render(&self, request: &RenderRequest) -> AudioResult<StoredAudio> {
        let mut backend = None;
        let canonical = self.cache_description(request);
        let mut stored = self.get_or_render_with(&canonical, &request.file_prefix(), || {
            let rendered = self.renderer.render(request);
            backend = Some(rendered.backend);
            Ok(rendered.wav.wav_data)
        })?;
        stored.backend = backend;
        Ok(stored)
    }

    /// Returns the stored audio for a canonical description, calling `render`
    /// to produce WAV bytes on a miss (or always, with caching disabled).
    ///
    /// Concurrent callers with the same key render once; the others wait and
    /// then read the entry.
    pub fn get_or_render_with<F>(&self, canonical: &str, prefix: &str, render: F) -> AudioResult<StoredAudio>
    where
        F: FnOnce() -> AudioResult<Vec<u8>>,
    {
        let key = cache_key(canonical);

        if !self.config.cache_enabled {
            let bytes = render()?;
            let path = self.write_uncached(prefix, &bytes)?;
            info!(path = %path.display(), "rendered uncached audio");
            return Ok(StoredAudio {
                handle: self.handle_for(&path),
                path,
                cache_key: key,
                cache_hit: false,
                backend: None,
            });
        }

        let path = self.entry_path(&key);
        let lock = self.key_lock(&key);
        let guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let outcome = self.fill_entry(&key, &path, render);
        drop(guard);
        self.release_key_lock(&key, lock);
        let cache_hit = outcome?;

        Ok(StoredAudio {
            handle: self.handle_for(&path),
            path,
            cache_key: key,
            cache_hit,
            backend: None,
        })
    }

    /// Renders into `path` unless it already exists. `Ok(true)` is a hit.
    fn fill_entry<F>(&self, key: &str, path: &Path, render: F) -> AudioResult<bool>
    where
        F: FnOnce() -> AudioResult<Vec<u8>>,
    {
        if path.is_file() {
            debug!(key = %key, "audio cache hit");
            return Ok(true);
        }
        let bytes = render()?;
        self.write_entry(path, &bytes)?;
        info!(key = %key, path = %path.display(), "cached rendered audio");
        Ok(false)
    }

    fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.key_locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn release_key_lock(&self, key: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.key_locks.lock().unwrap_or_else(PoisonError::into_inner);
        // Map entry plus our clone: nobody else is waiting.
        if Arc::strong_count(&lock) <= 2 {
            locks.remove(key);
        }
    }

    /// Writes bytes to `path` atomically via a sibling temp file.
    fn write_entry(&self, path: &Path, bytes: &[u8]) -> AudioResult<()> {
        let dir = self.config.cache_dir();
        fs::create_dir_all(&dir)?;
        let mut tmp = tempfile::Builder::new()
            .prefix(".partial_")
            .suffix(".wav")
            .tempfile_in(&dir)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| AudioError::Io(e.error))?;
        Ok(())
    }

    fn write_uncached(&self, prefix: &str, bytes: &[u8]) -> AudioResult<PathBuf> {
        let dir = self.config.audio_dir();
        fs::create_dir_all(&dir)?;
        let mut tmp = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(".wav")
            .tempfile_in(&dir)?;
        tmp.write_all(bytes)?;
        tmp.flush()?;
        let (_, path) = tmp.keep().map_err(|e| AudioError::Io(e.error))?;
        Ok(path)
    }

    /// Media-root-relative handle for a path inside the media root.
    fn handle_for(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.config.media_root).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Maps a handle to a file path under `<media_root>/audio`.
    ///
    /// Accepts `audio/cache/x.wav`, `cache/x.wav` and `x.wav`. Rejects empty
    /// handles, absolute paths and any `..` component.
    pub fn resolve_handle(&self, handle: &str) -> AudioResult<PathBuf> {
        let trimmed = handle.trim();
        if trimmed.is_empty() || trimmed.starts_with('/') || trimmed.starts_with('\\') {
            return Err(AudioError::invalid_handle(handle));
        }

        let relative = Path::new(trimmed);
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(AudioError::invalid_handle(handle));
        }

        let under_audio = relative.strip_prefix(AUDIO_SUBDIR).unwrap_or(relative);
        if under_audio.as_os_str().is_empty() {
            return Err(AudioError::invalid_handle(handle));
        }
        Ok(self.config.audio_dir().join(under_audio))
    }

    /// Reads the audio behind a handle.
    pub fn audio(&self, handle: &str) -> AudioResult<AudioBytes> {
        let path = self.resolve_handle(handle)?;
        if !path.is_file() {
            return Err(AudioError::not_found(handle));
        }
        let bytes = fs::read(&path)?;
        Ok(AudioBytes {
            bytes,
            content_type: content_type_for(handle),
        })
    }

    /// Counts cache entries and their total size.
    pub fn info(&self) -> AudioResult<CacheInfo> {
        let cache_dir = self.config.cache_dir();
        let mut entry_count = 0u64;
        let mut total_size_bytes = 0u64;

        if cache_dir.exists() {
            for entry in walkdir::WalkDir::new(&cache_dir).min_depth(1).max_depth(1) {
                let entry = entry.map_err(|e| AudioError::Io(e.into()))?;
                if is_cache_entry(entry.path()) && entry.file_type().is_file() {
                    entry_count += 1;
                    total_size_bytes += entry.metadata().map_err(|e| AudioError::Io(e.into()))?.len();
                }
            }
        }

        Ok(CacheInfo {
            cache_dir,
            entry_count,
            total_size_bytes,
        })
    }

    /// Deletes every cache entry, returning how many were removed.
    pub fn clear(&self) -> AudioResult<u64> {
        let cache_dir = self.config.cache_dir();
        if !cache_dir.exists() {
            return Ok(0);
        }

        let mut count = 0u64;
        for entry in fs::read_dir(&cache_dir)? {
            let path = entry?.path();
            if path.is_file() && is_cache_entry(&path) {
                fs::remove_file(&path)?;
                count += 1;
            }
        }
        info!(count, "cleared audio cache");
        Ok(count)
    }
}

fn is_cache_entry(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("wav")
        && !path
            .file_name()
            .and_then(|s| s.to_str())
            .is_some_and(|n| n.starts_with('.'))
}
