use std::path::Path;
use std::time::Duration;

use kip_types::RegistryObject;
use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};
use crate::key::{KeyLayout, DEFAULT_TTL, MAX_TTL};

/// Configuration for an [`ObjectRegistry`](crate::ObjectRegistry).
///
/// ```toml
/// root = "milpa/logs"
/// ttl_secs = 3600
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Root segment override. `None` uses the object kind's own root.
    pub root: Option<String>,
    /// Time-to-live applied to every record write, in seconds.
    pub ttl_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            root: None,
            ttl_secs: DEFAULT_TTL.as_secs(),
        }
    }
}

impl RegistryConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> RegistryResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| RegistryError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> RegistryResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| RegistryError::Config(format!("reading {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Check that the TTL is within `1..=MAX_TTL` and the root is non-empty.
    pub fn validate(&self) -> RegistryResult<()> {
        if self.ttl_secs == 0 {
            return Err(RegistryError::Config("ttl_secs must be positive".into()));
        }
        if self.ttl_secs > MAX_TTL.as_secs() {
            return Err(RegistryError::Config(format!(
                "ttl_secs must be at most {}",
                MAX_TTL.as_secs()
            )));
        }
        if let Some(root) = &self.root {
            if root.trim_matches('/').is_empty() {
                return Err(RegistryError::Config("root must not be empty".into()));
            }
        }
        Ok(())
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Key layout for objects of kind `T` under this configuration.
    pub fn layout_for<T: RegistryObject>(&self) -> KeyLayout {
        KeyLayout::new(self.root.as_deref().unwrap_or(T::KEY_ROOT))
    }
}
