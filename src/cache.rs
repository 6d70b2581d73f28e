//! Explicit result cache.
//!
//! The estimator itself is stateless. Callers that re-run it on the same
//! upload keep results here, keyed by an identity they supply (file content
//! hash or an upload id) plus the configuration fingerprint.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::config::EstimatorConfig;
use crate::error::Result;
use crate::types::IriResult;

/// Identity of one upload. Hashes come from `DefaultHasher` and are only
/// meaningful inside the process that made them; the cache lives in memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey(pub u64);

impl CacheKey {
    /// Key derived from the raw bytes of the uploaded file.
    pub fn from_content(bytes: &[u8]) -> Self {
        let mut hasher = DefaultHasher::new();
        bytes.hash(&mut hasher);
        CacheKey(hasher.finish())
    }

    /// Key derived from a caller-side identity such as a file name.
    pub fn from_identity(identity: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        identity.hash(&mut hasher);
        CacheKey(hasher.finish())
    }
}

type Slot = (CacheKey, u64);

pub struct IriCache {
    capacity: usize,
    entries: HashMap<Slot, Arc<IriResult>>,
    /// Insertion order, oldest first
    order: VecDeque<Slot>,
    hits: u64,
    misses: u64,
}

impl IriCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&self, key: CacheKey, config: &EstimatorConfig) -> Option<Arc<IriResult>> {
        self.entries.get(&(key, config.fingerprint())).cloned()
    }

    pub fn insert(
        &mut self,
        key: CacheKey,
        config: &EstimatorConfig,
        result: IriResult,
    ) -> Arc<IriResult> {
        let slot = (key, config.fingerprint());
        let result = Arc::new(result);
        if self.entries.insert(slot, result.clone()).is_none() {
            self.order.push_back(slot);
        }
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        result
    }

    /// Return the cached result or compute, store and return it. Failures
    /// are passed through and never cached.
    pub fn get_or_try_insert_with<F>(
        &mut self,
        key: CacheKey,
        config: &EstimatorConfig,
        compute: F,
    ) -> Result<Arc<IriResult>>
    where
        F: FnOnce() -> Result<IriResult>,
    {
        if let Some(hit) = self.get(key, config) {
            self.hits += 1;
            return Ok(hit);
        }
        self.misses += 1;
        let result = compute()?;
        Ok(self.insert(key, config, result))
    }

    /// Drop every entry for `key`, whatever configuration produced it.
    pub fn invalidate(&mut self, key: CacheKey) {
        self.entries.retain(|(k, _), _| *k != key);
        self.order.retain(|(k, _)| *k != key);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses)
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

impl Default for IriCache {
    fn default() -> Self {
        Self::new(16)
    }
}
