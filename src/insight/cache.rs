//! Insight cache — stores the last generated narrative.
//!
//! The cache is an explicit injected seam ([`InsightCache`]), not process
//! state: callers decide whether the narrative lands on disk (the default
//! `~/.tally/insight.md`) or in memory (tests). Only the narrative text is
//! ever persisted; metrics are always recomputed.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Get/set access to the cached narrative.
pub trait InsightCache {
    /// The cached narrative, if one has been generated.
    fn get(&self) -> Option<String>;
    /// Replace the cached narrative. Best-effort — failures are ignored.
    fn set(&self, text: &str);
}

/// File-backed cache at a fixed path.
#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    /// Cache at the default location, `~/.tally/insight.md`.
    pub fn open_default() -> Option<Self> {
        default_cache_path().map(|path| Self { path })
    }

    /// Cache at an explicit path (tests).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl InsightCache for FileCache {
    fn get(&self) -> Option<String> {
        let text = fs::read_to_string(&self.path).ok()?;
        if text.trim().is_empty() { None } else { Some(text) }
    }

    fn set(&self, text: &str) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = fs::write(&self.path, text);
    }
}

/// In-memory cache for tests and one-shot CLI runs.
#[derive(Debug, Default)]
pub struct MemoryCache {
    text: Mutex<Option<String>>,
}

impl InsightCache for MemoryCache {
    fn get(&self) -> Option<String> {
        self.text.lock().ok()?.clone()
    }

    fn set(&self, text: &str) {
        if let Ok(mut slot) = self.text.lock() {
            *slot = Some(text.to_string());
        }
    }
}

/// Default path of the narrative cache: `~/.tally/insight.md`.
pub fn default_cache_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tally").join("insight.md"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
