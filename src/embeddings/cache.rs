// In-memory embedding cache keyed by trimmed text.
//
// Append-only memoization for the life of the process: entries are never
// evicted or persisted. Writes are idempotent (re-embedding a word and
// overwriting its entry is harmless), so a plain RwLock is enough. The
// lock is never held across an await.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Shared embedding cache. Cheap to clone; clones share the same map.
#[derive(Clone, Default)]
pub struct EmbeddingCache {
    entries: Arc<RwLock<HashMap<String, Arc<Vec<f64>>>>>,
}

impl EmbeddingCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a vector by exact key.
    pub fn get(&self, key: &str) -> Option<Arc<Vec<f64>>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    /// Store a vector, replacing any previous entry for the key.
    pub fn insert(&self, key: &str, embedding: Vec<f64>) -> Arc<Vec<f64>> {
        let embedding = Arc::new(embedding);
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), Arc::clone(&embedding));
        embedding
    }

    pub fn contains(&self, key: &str) -> bool {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry. Only tests reset the cache; servers keep it for
    /// the life of the process.
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }
}
