//! Log records captured from the objects that produced them.
//!
//! Logs live under their owner's namespace and carry a time-to-live in the
//! store, so they clean themselves up once the owner stops refreshing them.

use serde::{Deserialize, Serialize};

use crate::object::{ObjectMeta, ObjectReference, RegistryObject};

/// A single log record owned by another object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFile {
    pub kind: String,
    pub api_version: String,
    pub metadata: ObjectMeta,
    /// The object that produced this log.
    pub parent_object: ObjectReference,
    pub content: String,
}

impl LogFile {
    pub const KIND: &'static str = "LogFile";
    pub const API_VERSION: &'static str = "v1";

    /// Create a log owned by `owner` with an unknown owner kind.
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::for_owner(&ObjectReference::new("", owner), name, content)
    }

    /// Create a log owned by the referenced object.
    pub fn for_owner(
        owner: &ObjectReference,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            kind: Self::KIND.to_string(),
            api_version: Self::API_VERSION.to_string(),
            metadata: ObjectMeta::new(name),
            parent_object: owner.clone(),
            content: content.into(),
        }
    }
}

impl Default for LogFile {
    fn default() -> Self {
        Self::new("", "", "")
    }
}

impl RegistryObject for LogFile {
    const KIND: &'static str = LogFile::KIND;
    const KEY_ROOT: &'static str = "milpa/logs";

    fn owner_name(&self) -> &str {
        &self.parent_object.name
    }

    fn name(&self) -> &str {
        &self.metadata.name
    }
}

/// A list of log records, as returned by list operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFileList {
    pub kind: String,
    pub api_version: String,
    pub items: Vec<LogFile>,
}

impl LogFileList {
    pub const KIND: &'static str = "LogFileList";

    pub fn new() -> Self {
        Self::from(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogFile> {
        self.items.iter()
    }
}

impl Default for LogFileList {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<LogFile>> for LogFileList {
    fn from(items: Vec<LogFile>) -> Self {
        Self {
            kind: Self::KIND.to_string(),
            api_version: LogFile::API_VERSION.to_string(),
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_comes_from_owner_and_metadata() {
        let log = LogFile::new("web-0", "stdout", "hello");
        assert_eq!(log.owner_name(), "web-0");
        assert_eq!(log.name(), "stdout");
        assert_eq!(log.kind, "LogFile");
        assert_eq!(log.api_version, "v1");
    }

    #[test]
    fn for_owner_keeps_reference() {
        let owner = ObjectReference::new("Pod", "web-0").with_uid("u-1");
        let log = LogFile::for_owner(&owner, "stderr", "");
        assert_eq!(log.parent_object, owner);
    }

    #[test]
    fn default_log_has_empty_identity() {
        let log = LogFile::default();
        assert!(log.owner_name().is_empty());
        assert!(log.name().is_empty());
    }

    #[test]
    fn json_roundtrip() {
        let log = LogFile::new("web-0", "stdout", "line one\nline two");
        let json = serde_json::to_string(&log).unwrap();
        assert!(json.contains("\"parentObject\""));
        let parsed: LogFile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, log);
    }

    #[test]
    fn list_from_vec() {
        let list = LogFileList::from(vec![
            LogFile::new("a", "1", ""),
            LogFile::new("b", "2", ""),
        ]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.kind, "LogFileList");
        assert_eq!(list.iter().map(|l| l.name()).collect::<Vec<_>>(), ["1", "2"]);
        assert!(LogFileList::new().is_empty());
    }
}
