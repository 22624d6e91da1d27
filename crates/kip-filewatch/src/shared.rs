use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use crate::file::CachedFile;

/// Read access to a watched file.
pub trait Watcher: Send + Sync {
    /// Current contents, refreshing first if due.
    fn contents(&self) -> String;

    /// Change counter; never touches the filesystem.
    fn version(&self) -> u64;
}

/// A [`CachedFile`] behind a mutex.
///
/// Refresh-and-read happens under one lock, so concurrent callers never see
/// contents and version from different refreshes.
#[derive(Debug)]
pub struct SharedFile {
    inner: Mutex<CachedFile>,
}

impl SharedFile {
    pub fn new(file: CachedFile) -> Self {
        Self {
            inner: Mutex::new(file),
        }
    }

    /// Contents and version observed under the same lock.
    pub fn snapshot(&self) -> (String, u64) {
        let mut file = self.lock();
        let contents = file.contents().to_string();
        (contents, file.version())
    }

    pub fn set_check_period(&self, period: Duration) {
        self.lock().check_period = period;
    }

    pub fn into_inner(self) -> CachedFile {
        self.inner.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    // Poisoning is ignored: refresh never leaves the cache half-updated.
    fn lock(&self) -> MutexGuard<'_, CachedFile> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl From<CachedFile> for SharedFile {
    fn from(file: CachedFile) -> Self {
        Self::new(file)
    }
}

impl Watcher for SharedFile {
    fn contents(&self) -> String {
        self.lock().contents().to_string()
    }

    fn version(&self) -> u64 {
        self.lock().version()
    }
}
