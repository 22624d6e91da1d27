use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Instant;

use kip_types::{Clock, SystemClock};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{is_under, KvPair, KvStore, WriteOptions};

struct Entry {
    value: Vec<u8>,
    last_index: u64,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| now < deadline)
    }
}

/// In-memory, HashMap-based key-value store.
///
/// Intended for tests and embedding. Entries are held behind a `RwLock` and
/// TTLs are evaluated against the injected [`Clock`], so expiry can be driven
/// deterministically. Expired entries are invisible to reads and are removed
/// on the next write or [`purge_expired`](Self::purge_expired).
pub struct InMemoryKvStore {
    entries: RwLock<HashMap<String, Entry>>,
    clock: Arc<dyn Clock>,
    next_index: AtomicU64,
}

impl InMemoryKvStore {
    /// Create a new empty store on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a new empty store that evaluates TTLs against `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
            next_index: AtomicU64::new(1),
        }
    }

    /// Number of live keys.
    pub fn len(&self) -> StoreResult<usize> {
        let now = self.clock.now();
        let map = self.entries.read().map_err(poisoned)?;
        Ok(map.values().filter(|e| e.is_live(now)).count())
    }

    /// Returns `true` if no live keys remain.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> StoreResult<usize> {
        let now = self.clock.now();
        let mut map = self.entries.write().map_err(poisoned)?;
        let before = map.len();
        map.retain(|_, e| e.is_live(now));
        let purged = before - map.len();
        if purged > 0 {
            debug!(purged, "expired keys purged");
        }
        Ok(purged)
    }
}

impl Default for InMemoryKvStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for InMemoryKvStore {
    fn put(&self, key: &str, value: &[u8], options: Option<&WriteOptions>) -> StoreResult<()> {
        if key.is_empty() {
            return Err(StoreError::InvalidKey {
                key: key.to_string(),
                reason: "key must not be empty".into(),
            });
        }
        let now = self.clock.now();
        let expires_at = match options.and_then(|o| o.ttl) {
            Some(ttl) => Some(now.checked_add(ttl).ok_or_else(|| {
                StoreError::InvalidOptions(format!("ttl of {}s is out of range", ttl.as_secs()))
            })?),
            None => None,
        };
        let last_index = self.next_index.fetch_add(1, Ordering::Relaxed);

        let mut map = self.entries.write().map_err(poisoned)?;
        map.retain(|_, e| e.is_live(now));
        map.insert(
            key.to_string(),
            Entry {
                value: value.to_vec(),
                last_index,
                expires_at,
            },
        );
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<KvPair> {
        let now = self.clock.now();
        let map = self.entries.read().map_err(poisoned)?;
        match map.get(key) {
            Some(entry) if entry.is_live(now) => Ok(KvPair {
                key: key.to_string(),
                value: entry.value.clone(),
                last_index: entry.last_index,
            }),
            _ => Err(StoreError::KeyNotFound(key.to_string())),
        }
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        let now = self.clock.now();
        let mut map = self.entries.write().map_err(poisoned)?;
        match map.remove(key) {
            Some(entry) if entry.is_live(now) => Ok(()),
            _ => Err(StoreError::KeyNotFound(key.to_string())),
        }
    }

    fn list(&self, prefix: &str) -> StoreResult<Vec<KvPair>> {
        let now = self.clock.now();
        let map = self.entries.read().map_err(poisoned)?;
        let pairs: Vec<KvPair> = map
            .iter()
            .filter(|(k, e)| e.is_live(now) && is_under(k, prefix))
            .map(|(k, e)| KvPair {
                key: k.clone(),
                value: e.value.clone(),
                last_index: e.last_index,
            })
            .collect();
        if pairs.is_empty() {
            return Err(StoreError::KeyNotFound(prefix.to_string()));
        }
        Ok(pairs)
    }
}

impl std::fmt::Debug for InMemoryKvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut d = f.debug_struct("InMemoryKvStore");
        match self.len() {
            Ok(count) => d.field("key_count", &count),
            Err(_) => d.field("key_count", &"unavailable"),
        };
        d.finish()
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Unavailable(format!("lock poisoned: {e}"))
}
