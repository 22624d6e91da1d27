use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Identity contract for objects persisted through a registry.
///
/// An object is addressed by the name of its owner plus a local name that is
/// unique within that owner. A registry is parameterized over exactly one
/// implementor, so no run-time kind checks are needed.
pub trait RegistryObject: Serialize + DeserializeOwned + Send + Sync {
    /// The kind string written into serialized records (e.g. "LogFile").
    const KIND: &'static str;

    /// Fixed root segment of this kind's key namespace.
    const KEY_ROOT: &'static str;

    /// Name of the object that created this one. Empty if unowned.
    fn owner_name(&self) -> &str;

    /// Local name, unique within the owner's namespace.
    fn name(&self) -> &str;
}

/// Metadata common to every persisted object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Local name of the object.
    pub name: String,
    /// Unique identifier (UUID v7, time-ordered).
    pub uid: String,
    /// When the object was first constructed.
    pub creation_timestamp: DateTime<Utc>,
    /// Free-form labels.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl ObjectMeta {
    /// Fresh metadata with a new uid and the current time.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uid: uuid::Uuid::now_v7().to_string(),
            creation_timestamp: Utc::now(),
            labels: BTreeMap::new(),
        }
    }
}

impl Default for ObjectMeta {
    fn default() -> Self {
        Self::new("")
    }
}

/// Reference to another top-level object, typically the owner.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub uid: String,
}

impl ObjectReference {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            uid: String::new(),
        }
    }

    /// Attach the owner's uid.
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = uid.into();
        self
    }
}

impl fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}
