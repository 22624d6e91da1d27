use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use kip_types::{Clock, SystemClock};
use tracing::{debug, warn};

use crate::fs::{FileSystem, OsFileSystem};

/// How long a [`CachedFile`] trusts its contents before probing again.
pub const DEFAULT_CHECK_PERIOD: Duration = Duration::from_secs(10);

/// Read-through cache over the file at one path.
///
/// # Refresh rules
///
/// - An empty path watches nothing; contents stay empty.
/// - Within `check_period` of the last probe, the filesystem is not touched.
/// - Otherwise the file is stat'd. A failed stat is logged and still counts
///   as a probe, so a missing file is not polled faster than the period.
/// - If the modification time is strictly newer than the last one read, the
///   file is re-read. A failed read is logged and retried on the next probe.
/// - `version` goes up by exactly one every time the contents are replaced.
///
/// Not synchronized. Wrap it in a [`SharedFile`](crate::SharedFile) to share
/// it between threads.
pub struct CachedFile {
    path: PathBuf,
    /// Minimum time between two filesystem probes.
    pub check_period: Duration,
    contents: String,
    mod_time: Option<SystemTime>,
    stat_time: Option<Instant>,
    version: u64,
    fs: Arc<dyn FileSystem>,
    clock: Arc<dyn Clock>,
}

impl CachedFile {
    /// Watch `path` on the real filesystem and load it once.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_parts(path, Arc::new(OsFileSystem), Arc::new(SystemClock))
    }

    /// Watch `path` through the given filesystem and clock, loading it once.
    pub fn with_parts(
        path: impl Into<PathBuf>,
        fs: Arc<dyn FileSystem>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut file = Self {
            path: path.into(),
            check_period: DEFAULT_CHECK_PERIOD,
            contents: String::new(),
            mod_time: None,
            stat_time: None,
            version: 0,
            fs,
            clock,
        };
        file.refresh();
        file
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of times the contents have been replaced.
    ///
    /// Does not probe the filesystem.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Current contents, probing the filesystem first if the check period
    /// has elapsed.
    pub fn contents(&mut self) -> &str {
        self.refresh();
        &self.contents
    }

    /// Probe the file if due. Returns `true` if the contents changed.
    pub fn refresh(&mut self) -> bool {
        if self.path.as_os_str().is_empty() {
            return false;
        }
        let now = self.clock.now();
        if let Some(last) = self.stat_time {
            if now.saturating_duration_since(last) < self.check_period {
                return false;
            }
        }
        self.stat_time = Some(now);

        let modified = match self.fs.modified(&self.path) {
            Ok(modified) => modified,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "error getting file info");
                return false;
            }
        };
        if self.mod_time.is_some_and(|known| modified <= known) {
            return false;
        }

        let contents = match self.fs.read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "error reading file contents");
                return false;
            }
        };
        self.version += 1;
        self.contents = contents;
        self.mod_time = Some(modified);
        debug!(path = %self.path.display(), version = self.version, "file contents refreshed");
        true
    }
}

impl std::fmt::Debug for CachedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedFile")
            .field("path", &self.path)
            .field("check_period", &self.check_period)
            .field("version", &self.version)
            .finish()
    }
}
