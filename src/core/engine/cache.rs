//! Bounded backend cache
//!
//! Owns the set of loaded synthesis backends, keyed by language code. Loads
//! on miss, evicts the least-recently-used entry on overflow, and funnels
//! every read and mutation through a single mutual-exclusion region; the
//! cache is the one shared mutable resource across sessions.
//!
//! The lock is deliberately held across the load call. That serializes
//! concurrent cold misses, but it guarantees at most one load per code with
//! no double-checked bookkeeping. With a small capacity and a pre-warm list
//! the cold path is rare; a per-key lock with a double-checked acquire is
//! the known alternative if load latency under concurrent misses ever
//! matters.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::core::language::LanguageCode;
use crate::errors::LoadError;

use super::backend::{BackendHandle, BackendLoader};

/// One resident backend. Position in [`CacheInner::entries`] encodes
/// recency: least-recently-used first, most-recently-used last.
struct CacheEntry {
    code: LanguageCode,
    handle: Arc<BackendHandle>,
}

struct CacheInner {
    entries: Vec<CacheEntry>,
}

/// Bounded, LRU-evicting cache of loaded synthesis backends.
pub struct BackendCache {
    loader: Arc<dyn BackendLoader>,
    capacity: usize,
    inner: Mutex<CacheInner>,
}

impl BackendCache {
    /// Create a cache holding at most `capacity` loaded backends.
    ///
    /// A zero capacity is clamped to one: a cache that cannot hold the
    /// backend it just loaded is useless.
    pub fn new(loader: Arc<dyn BackendLoader>, capacity: usize) -> Self {
        Self {
            loader,
            capacity: capacity.max(1),
            inner: Mutex::new(CacheInner {
                entries: Vec::new(),
            }),
        }
    }

    /// Get the backend for `code`, loading it on miss.
    ///
    /// On hit the entry is marked most-recently-used and returned without
    /// touching the loader. On miss the loader runs while the cache lock is
    /// held; a failed load propagates without mutating cache state, so other
    /// codes are unaffected and the cache stays usable. A successful load
    /// evicts the least-recently-used entry first when at capacity.
    pub async fn acquire(&self, code: LanguageCode) -> Result<Arc<BackendHandle>, LoadError> {
        let mut inner = self.inner.lock().await;

        if let Some(pos) = inner.entries.iter().position(|e| e.code == code) {
            // Hit: move to the back (most recently used).
            let entry = inner.entries.remove(pos);
            let handle = Arc::clone(&entry.handle);
            inner.entries.push(entry);
            debug!(language = %code, "backend cache hit");
            return Ok(handle);
        }

        info!(language = %code, "loading synthesis backend");
        let handle = Arc::new(self.loader.load(code).await?);

        if inner.entries.len() >= self.capacity {
            let evicted = inner.entries.remove(0);
            info!(
                language = %evicted.code,
                "backend cache full, unloading least recently used backend"
            );
            // Dropping the entry releases the backend once in-flight
            // segments holding the Arc finish.
        }

        inner.entries.push(CacheEntry {
            code,
            handle: Arc::clone(&handle),
        });
        info!(
            language = %code,
            resident = inner.entries.len(),
            "synthesis backend loaded"
        );

        Ok(handle)
    }

    /// Number of currently loaded backends.
    pub async fn resident_count(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    /// Language codes currently resident, least-recently-used first.
    pub async fn resident_codes(&self) -> Vec<LanguageCode> {
        self.inner
            .lock()
            .await
            .entries
            .iter()
            .map(|e| e.code)
            .collect()
    }
}
