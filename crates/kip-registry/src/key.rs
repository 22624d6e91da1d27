//! Key layout for registry namespaces.
//!
//! Keys are built from a fixed root segment, then the owner name, then the
//! local name:
//!
//! - root only: `<root>`
//! - owner, no name: `<root>/<owner>`
//! - owner and name: `<root>/<owner>/<name>`
//!
//! Owner and name are single path segments: they must not contain `/` and
//! must not be `.` or `..`, so no derived key can collide with the
//! placeholder or escape its owner.

use std::time::Duration;

use crate::error::{RegistryError, RegistryResult};

/// Value written at the placeholder key.
pub const PLACEHOLDER_VALUE: &[u8] = b".";

/// Time-to-live applied to every record write.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Longest accepted time-to-live (one year).
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// The key namespace of one object kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyLayout {
    root: String,
}

impl KeyLayout {
    /// Create a layout rooted at `root` (surrounding slashes are dropped).
    pub fn new(root: impl Into<String>) -> Self {
        let root = root.into();
        Self {
            root: root.trim_matches('/').to_string(),
        }
    }

    /// The root segment.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Key of the entry that keeps the namespace non-empty.
    pub fn placeholder_key(&self) -> String {
        format!("{}/.", self.root)
    }

    /// Returns `true` if `key` is the placeholder entry.
    pub fn is_placeholder(&self, key: &str) -> bool {
        key.strip_prefix(self.root.as_str()) == Some("/.")
    }

    /// Derive the key for an (owner, name) pair.
    ///
    /// Both empty addresses the whole namespace and an empty name addresses
    /// one owner's sub-namespace. A name without an owner is rejected.
    pub fn derive_key(&self, owner: &str, name: &str) -> RegistryResult<String> {
        match (owner.is_empty(), name.is_empty()) {
            (true, true) => Ok(self.root.clone()),
            (false, true) => {
                validate_segment(owner, "owner")?;
                Ok(format!("{}/{}", self.root, owner))
            }
            (false, false) => {
                validate_segment(owner, "owner")?;
                validate_segment(name, "name")?;
                Ok(format!("{}/{}/{}", self.root, owner, name))
            }
            (true, false) => Err(RegistryError::InvalidName {
                name: name.to_string(),
                reason: "a name requires an owner".into(),
            }),
        }
    }
}

/// Split a compound `owner/name` identity.
///
/// The input must contain exactly one `/` with a non-empty segment on each
/// side.
///
/// # Examples
///
/// ```
/// use kip_registry::split_compound_name;
///
/// assert_eq!(split_compound_name("web-0/stdout").unwrap(), ("web-0", "stdout"));
/// assert!(split_compound_name("web-0").is_err());
/// assert!(split_compound_name("web-0/").is_err());
/// assert!(split_compound_name("a/b/c").is_err());
/// ```
pub fn split_compound_name(compound: &str) -> RegistryResult<(&str, &str)> {
    let invalid = |reason: &str| RegistryError::InvalidName {
        name: compound.to_string(),
        reason: reason.to_string(),
    };
    let (owner, name) = compound
        .split_once('/')
        .ok_or_else(|| invalid("expected <owner>/<name>"))?;
    if owner.is_empty() || name.is_empty() {
        return Err(invalid("owner and name must both be non-empty"));
    }
    if name.contains('/') {
        return Err(invalid("expected exactly one '/'"));
    }
    Ok((owner, name))
}

fn validate_segment(segment: &str, what: &str) -> RegistryResult<()> {
    if segment.contains('/') || segment == "." || segment == ".." {
        return Err(RegistryError::InvalidName {
            name: segment.to_string(),
            reason: format!("{what} must be a single path segment"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn layout() -> KeyLayout {
        KeyLayout::new("milpa/logs")
    }

    #[test]
    fn root_only() {
        assert_eq!(layout().derive_key("", "").unwrap(), "milpa/logs");
    }

    #[test]
    fn owner_only() {
        assert_eq!(layout().derive_key("web-0", "").unwrap(), "milpa/logs/web-0");
    }

    #[test]
    fn owner_and_name() {
        assert_eq!(
            layout().derive_key("web-0", "stdout").unwrap(),
            "milpa/logs/web-0/stdout"
        );
    }

    #[test]
    fn name_without_owner_rejected() {
        let err = layout().derive_key("", "stdout").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidName { .. }));
    }

    #[test]
    fn multi_segment_parts_rejected() {
        assert!(layout().derive_key("a/b", "").is_err());
        assert!(layout().derive_key("a", "b/c").is_err());
        assert!(layout().derive_key(".", "").is_err());
        assert!(layout().derive_key("a", "..").is_err());
    }

    #[test]
    fn placeholder_key_and_detection() {
        let l = layout();
        assert_eq!(l.placeholder_key(), "milpa/logs/.");
        assert!(l.is_placeholder("milpa/logs/."));
        assert!(!l.is_placeholder("milpa/logs/x"));
        assert!(!l.is_placeholder("other/logs/."));
        assert!(!l.is_placeholder("milpa/logs/a/."));
    }

    #[test]
    fn root_slashes_trimmed() {
        assert_eq!(KeyLayout::new("/milpa/logs/").root(), "milpa/logs");
    }

    #[test]
    fn split_valid() {
        assert_eq!(split_compound_name("web-0/stdout").unwrap(), ("web-0", "stdout"));
    }

    #[test]
    fn split_rejects_malformed() {
        for bad in ["", "web-0", "/stdout", "web-0/", "/", "a/b/c"] {
            let err = split_compound_name(bad).unwrap_err();
            assert!(
                matches!(err, RegistryError::InvalidName { .. }),
                "expected InvalidName for {bad:?}, got: {err}"
            );
        }
    }

    #[test]
    fn default_ttl_is_one_hour() {
        assert_eq!(DEFAULT_TTL, Duration::from_secs(3600));
    }

    proptest! {
        #[test]
        fn derivation_is_deterministic(
            owner in "[a-z0-9][a-z0-9.-]{0,15}",
            name in "[a-z0-9][a-z0-9._-]{0,15}",
        ) {
            let l = layout();
            prop_assert_eq!(l.derive_key(&owner, &name).unwrap(), l.derive_key(&owner, &name).unwrap());
        }

        #[test]
        fn branches_nest_and_never_hit_placeholder(
            owner in "[a-z0-9][a-z0-9.-]{0,15}",
            name in "[a-z0-9][a-z0-9._-]{0,15}",
        ) {
            let l = layout();
            let root = l.derive_key("", "").unwrap();
            let owner_key = l.derive_key(&owner, "").unwrap();
            let full = l.derive_key(&owner, &name).unwrap();

            prop_assert_eq!(owner_key.strip_prefix(&format!("{root}/")), Some(owner.as_str()));
            prop_assert_eq!(full.strip_prefix(&format!("{owner_key}/")), Some(name.as_str()));
            prop_assert!(!l.is_placeholder(&owner_key));
            prop_assert!(!l.is_placeholder(&full));
        }

        #[test]
        fn compound_name_roundtrip(
            owner in "[a-z0-9][a-z0-9.-]{0,15}",
            name in "[a-z0-9][a-z0-9._-]{0,15}",
        ) {
            let compound = format!("{owner}/{name}");
            let (o, n) = split_compound_name(&compound).unwrap();
            prop_assert_eq!(o, owner.as_str());
            prop_assert_eq!(n, name.as_str());
        }
    }
}
