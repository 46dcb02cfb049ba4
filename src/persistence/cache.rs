//! Time-limited cache of fetched annotation payloads.
//!
//! Revisiting an image within the TTL is served locally; saves write through
//! so a cached payload never lags behind what was last sent.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use web_time::Instant;

use crate::model::ImageId;

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Value,
    stored_at: Instant,
}

/// Payloads keyed by image id, each fresh for `ttl` after it was stored.
#[derive(Debug, Clone)]
pub struct AnnotationCache {
    ttl: Duration,
    entries: HashMap<ImageId, CacheEntry>,
}

impl AnnotationCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached payload for `image`, if still fresh. `Value::Null` means
    /// the service had no annotations for it.
    pub fn get(&self, image: &ImageId) -> Option<&Value> {
        let entry = self.entries.get(image)?;
        (entry.stored_at.elapsed() < self.ttl).then_some(&entry.payload)
    }

    pub fn is_fresh(&self, image: &ImageId) -> bool {
        self.get(image).is_some()
    }

    pub fn insert(&mut self, image: ImageId, payload: Value) {
        log::trace!("Cache: stored payload for {}", image);
        self.entries.insert(
            image,
            CacheEntry {
                payload,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn invalidate(&mut self, image: &ImageId) {
        if self.entries.remove(image).is_some() {
            log::trace!("Cache: invalidated {}", image);
        }
    }

    /// Drop every expired entry.
    pub fn prune(&mut self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AnnotationCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::constants::CACHE_TTL_SECS))
    }
}
