//! Error types for registry operations.

use kip_codec::CodecError;
use kip_store::StoreError;
use thiserror::Error;

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No record exists at the derived key.
    #[error("not found: {key}")]
    NotFound { key: String },

    /// A compound name could not be split into owner and name.
    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// Encoding or decoding a record failed.
    #[error("{context}: {source}")]
    Serialization {
        context: String,
        #[source]
        source: CodecError,
    },

    /// The store failed or could not be reached.
    #[error("{context}: {source}")]
    Store {
        context: String,
        #[source]
        source: StoreError,
    },

    /// Registry configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

impl RegistryError {
    /// Returns `true` if the requested identity is absent.
    ///
    /// Absence is the one failure callers routinely treat as non-fatal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound { .. })
    }

    /// Prefix the context of a store or serialization failure.
    ///
    /// `NotFound` and `InvalidName` pass through untouched so callers can
    /// still match on them.
    pub fn with_context(self, outer: impl std::fmt::Display) -> Self {
        match self {
            RegistryError::Store { context, source } => RegistryError::Store {
                context: format!("{outer}: {context}"),
                source,
            },
            RegistryError::Serialization { context, source } => RegistryError::Serialization {
                context: format!("{outer}: {context}"),
                source,
            },
            other => other,
        }
    }

    pub(crate) fn store(context: impl Into<String>, source: StoreError) -> Self {
        match source {
            StoreError::KeyNotFound(key) => RegistryError::NotFound { key },
            source => RegistryError::Store {
                context: context.into(),
                source,
            },
        }
    }

    pub(crate) fn codec(context: impl Into<String>, source: CodecError) -> Self {
        RegistryError::Serialization {
            context: context.into(),
            source,
        }
    }
}

/// Convenience type alias for registry operations.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
