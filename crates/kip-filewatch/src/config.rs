use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{WatchError, WatchResult};
use crate::file::{CachedFile, DEFAULT_CHECK_PERIOD};

/// Configuration for one watched file.
///
/// ```toml
/// path = "/etc/kip/credentials"
/// check_period_secs = 10
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub path: PathBuf,
    pub check_period_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            check_period_secs: DEFAULT_CHECK_PERIOD.as_secs(),
        }
    }
}

impl WatchConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn from_toml_str(s: &str) -> WatchResult<Self> {
        toml::from_str(s).map_err(|e| WatchError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<std::path::Path>) -> WatchResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn check_period(&self) -> Duration {
        Duration::from_secs(self.check_period_secs)
    }

    /// Start watching the configured path on the real filesystem.
    pub fn build(&self) -> CachedFile {
        let mut file = CachedFile::new(self.path.clone());
        file.check_period = self.check_period();
        file
    }
}
