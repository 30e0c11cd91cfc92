//! FIFO cache for fetched stream blobs
//!
//! Remote streams are downloaded whole and kept keyed by URL so replaying a
//! recent track skips the network. Eviction is insertion-order (FIFO), not
//! recency-based: a `get` never reorders entries. Blobs are shared as
//! `Arc<Vec<u8>>` so an evicted entry only frees memory once the engine drops
//! its handle.

use std::collections::VecDeque;
use std::sync::Arc;

/// Bounded URL-keyed blob cache with FIFO eviction
#[derive(Debug)]
pub struct StreamCache {
    capacity: usize,
    entries: VecDeque<(String, Arc<Vec<u8>>)>,
}

impl StreamCache {
    /// Create a cache holding up to `capacity` blobs
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Look up a blob by URL without affecting eviction order
    pub fn get(&self, url: &str) -> Option<Arc<Vec<u8>>> {
        self.entries
            .iter()
            .find(|(key, _)| key == url)
            .map(|(_, blob)| Arc::clone(blob))
    }

    /// Insert a blob, evicting the oldest entry when full
    ///
    /// Inserting an existing URL replaces its payload in place and keeps its
    /// position in the eviction order.
    pub fn insert(&mut self, url: impl Into<String>, blob: Arc<Vec<u8>>) {
        if self.capacity == 0 {
            return;
        }
        let url = url.into();
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| *key == url) {
            entry.1 = blob;
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((url, blob));
    }

    /// Number of cached blobs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of blobs held
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
