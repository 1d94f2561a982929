//! Detection result cache.
//!
//! Keys are normalized samples (see [`LanguageDetector::normalize_sample`]),
//! values are shared immutable results. An entry is never replaced once
//! written, so concurrent writers of the same key are harmless. The cache is
//! unbounded until [`DetectionCache::clear`] is called.
//!
//! [`LanguageDetector::normalize_sample`]: super::detector::LanguageDetector::normalize_sample

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use super::detector::LanguageDetectionResult;

/// Cache of detection results keyed by normalized sample.
pub trait DetectionCache: Send + Sync + std::fmt::Debug {
    /// Look up a result.
    fn get(&self, key: &str) -> Option<Arc<LanguageDetectionResult>>;

    /// Store a result. Existing entries are kept.
    fn put(&self, key: String, result: Arc<LanguageDetectionResult>);

    /// Drop every entry.
    fn clear(&self);

    /// Number of entries.
    fn len(&self) -> usize;

    /// Whether the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory cache backed by a read-write locked map.
#[derive(Debug, Default)]
pub struct MemoryDetectionCache {
    entries: RwLock<HashMap<String, Arc<LanguageDetectionResult>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryDetectionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// (hits, misses) since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits.load(Ordering::Relaxed), self.misses.load(Ordering::Relaxed))
    }
}

impl DetectionCache for MemoryDetectionCache {
    fn get(&self, key: &str) -> Option<Arc<LanguageDetectionResult>> {
        let hit = self.entries.read().get(key).cloned();
        if hit.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        hit
    }

    fn put(&self, key: String, result: Arc<LanguageDetectionResult>) {
        self.entries.write().entry(key).or_insert(result);
    }

    fn clear(&self) {
        self.entries.write().clear();
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}

/// Cache that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDetectionCache;

impl DetectionCache for NoDetectionCache {
    fn get(&self, _key: &str) -> Option<Arc<LanguageDetectionResult>> {
        None
    }

    fn put(&self, _key: String, _result: Arc<LanguageDetectionResult>) {}

    fn clear(&self) {}

    fn len(&self) -> usize {
        0
    }
}
