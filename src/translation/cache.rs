/*!
 * Translation caching functionality.
 *
 * This module provides a persistent cache for translations to avoid
 * redundant API calls across runs. The cache is a pure memo from exact
 * source string to translated string: entries are written on first
 * successful translation and never invalidated automatically.
 */

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, warn};
use parking_lot::RwLock;

/// Translation cache for storing and retrieving translations
pub struct TranslationCache {
    /// Internal cache storage
    entries: Arc<RwLock<HashMap<String, String>>>,

    /// Cache hit counter
    hits: Arc<RwLock<usize>>,

    /// Cache miss counter
    misses: Arc<RwLock<usize>>,
}

impl TranslationCache {
    /// Create a new empty translation cache
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
        }
    }

    /// Load a cache from disk.
    ///
    /// A missing or unparseable file degrades to an empty cache rather than
    /// failing the run.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let entries = match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<HashMap<String, String>>(&content) {
                Ok(map) => {
                    debug!("Loaded {} cached translation(s) from {:?}", map.len(), path);
                    map
                }
                Err(e) => {
                    warn!("Cache file {:?} is not valid JSON ({}), starting empty", path, e);
                    HashMap::new()
                }
            },
            Err(_) => {
                debug!("No cache file at {:?}, starting empty", path);
                HashMap::new()
            }
        };

        Self {
            entries: Arc::new(RwLock::new(entries)),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
        }
    }

    /// Get a translation from the cache
    pub fn get(&self, source_text: &str) -> Option<String> {
        let entries = self.entries.read();

        match entries.get(source_text) {
            Some(translation) => {
                let mut hits = self.hits.write();
                *hits += 1;

                debug!("Cache hit for '{}'", truncate_text(source_text, 30));

                Some(translation.clone())
            }
            None => {
                let mut misses = self.misses.write();
                *misses += 1;

                debug!("Cache miss for '{}'", truncate_text(source_text, 30));

                None
            }
        }
    }

    /// Store a translation in the cache
    pub fn set(&self, source_text: &str, translation: &str) {
        let mut entries = self.entries.write();
        entries.insert(source_text.to_string(), translation.to_string());

        debug!("Cached translation for '{}'", truncate_text(source_text, 30));
    }

    /// Persist the full mapping, overwriting any prior file.
    ///
    /// The on-disk format is pretty-printed JSON so cache diffs stay
    /// reviewable.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create cache directory: {:?}", parent))?;
        }

        let entries = self.entries.read();
        let json = serde_json::to_string_pretty(&*entries)
            .context("Failed to serialize translation cache")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write cache file: {:?}", path))?;

        debug!("Saved {} cache entries to {:?}", entries.len(), path);
        Ok(())
    }

    /// Get cache statistics
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TranslationCache {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
        }
    }
}

/// Truncate text to a maximum length with ellipsis
fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max_length).collect::<String>())
    }
}
