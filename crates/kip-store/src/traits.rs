use std::sync::Arc;
use std::time::Duration;

use crate::error::{StoreError, StoreResult};

/// Options attached to a single write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Evict the key this long after the write. `None` keeps it forever.
    pub ttl: Option<Duration>,
}

impl WriteOptions {
    /// Options for a write that expires after `ttl`.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl: Some(ttl) }
    }
}

/// A key together with its stored value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KvPair {
    pub key: String,
    pub value: Vec<u8>,
    /// Store-assigned revision of the last write to this key.
    pub last_index: u64,
}

/// Key-value store consumed by the registry layer.
///
/// All implementations must satisfy these invariants:
/// - `put` overwrites unconditionally; there is no compare-and-swap.
/// - `get`/`delete` on an absent key return [`StoreError::KeyNotFound`].
/// - `list` has directory semantics: `"a/b"` matches `"a/b"` and `"a/b/c"` but
///   not `"a/bc"`. A prefix with no live keys is `KeyNotFound`.
/// - Expired keys are invisible to every read.
/// - Calls may block on network I/O; no retries happen at this layer.
pub trait KvStore: Send + Sync {
    /// Write `value` at `key`, replacing any previous value.
    fn put(&self, key: &str, value: &[u8], options: Option<&WriteOptions>) -> StoreResult<()>;

    /// Read the pair stored at `key`.
    fn get(&self, key: &str) -> StoreResult<KvPair>;

    /// Remove `key`.
    fn delete(&self, key: &str) -> StoreResult<()>;

    /// List every pair at or below `prefix`. Ordering is backend-defined.
    fn list(&self, prefix: &str) -> StoreResult<Vec<KvPair>>;

    /// Check whether `key` currently exists.
    ///
    /// Default implementation calls `get()`. Backends may override to avoid
    /// transferring the value.
    fn exists(&self, key: &str) -> StoreResult<bool> {
        match self.get(key) {
            Ok(_) => Ok(true),
            Err(StoreError::KeyNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    fn put(&self, key: &str, value: &[u8], options: Option<&WriteOptions>) -> StoreResult<()> {
        (**self).put(key, value, options)
    }

    fn get(&self, key: &str) -> StoreResult<KvPair> {
        (**self).get(key)
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        (**self).delete(key)
    }

    fn list(&self, prefix: &str) -> StoreResult<Vec<KvPair>> {
        (**self).list(prefix)
    }

    fn exists(&self, key: &str) -> StoreResult<bool> {
        (**self).exists(key)
    }
}

/// Returns `true` if `key` sits at or below the directory `prefix`.
pub(crate) fn is_under(key: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }
    match key.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn under_exact_and_children() {
        assert!(is_under("a/b", "a/b"));
        assert!(is_under("a/b/c", "a/b"));
        assert!(is_under("a/b/c/d", "a/b"));
    }

    #[test]
    fn not_under_sibling_with_shared_prefix() {
        assert!(!is_under("a/bc", "a/b"));
        assert!(!is_under("a", "a/b"));
    }

    #[test]
    fn trailing_slash_prefix() {
        assert!(is_under("a/b/c", "a/b/"));
        assert!(!is_under("a/b", "a/b/"));
    }

    #[test]
    fn empty_prefix_matches_everything() {
        assert!(is_under("anything", ""));
    }

    #[test]
    fn write_options_with_ttl() {
        let opts = WriteOptions::with_ttl(Duration::from_secs(3600));
        assert_eq!(opts.ttl, Some(Duration::from_secs(3600)));
        assert_eq!(WriteOptions::default().ttl, None);
    }
}
