//! Throttled read-through cache over a single file.
//!
//! Credentials and configuration files are read far more often than they
//! change. [`CachedFile`] serves the last-read contents and only goes back to
//! the filesystem once its check period has elapsed, re-reading the file only
//! if its modification time moved forward. Every change bumps a version
//! counter, so callers can tell "has anything changed since I looked" without
//! comparing contents.
//!
//! Probe failures never reach the caller: they are logged and the last good
//! contents keep being served.
//!
//! - [`CachedFile`] -- single-owner cache (`&mut self`)
//! - [`SharedFile`] -- mutex-guarded cache implementing [`Watcher`]
//! - [`FileSystem`] -- the stat/read seam, with [`OsFileSystem`]

pub mod config;
pub mod error;
pub mod file;
pub mod fs;
pub mod shared;

pub use config::WatchConfig;
pub use error::{WatchError, WatchResult};
pub use file::{CachedFile, DEFAULT_CHECK_PERIOD};
pub use fs::{FileSystem, OsFileSystem};
pub use shared::{SharedFile, Watcher};
