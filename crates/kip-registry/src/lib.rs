//! Object registry for the kip control plane.
//!
//! The registry maps typed domain objects onto a flat, `/`-separated key-value
//! namespace. Each object kind owns one root segment; below it, objects are
//! grouped by the name of the object that owns them:
//!
//! ```text
//! milpa/logs                  whole namespace
//! milpa/logs/.                placeholder, always present, never returned
//! milpa/logs/<owner>          everything one owner created
//! milpa/logs/<owner>/<name>   a single object
//! ```
//!
//! Every write carries a time-to-live (one hour by default) so records that
//! stop being refreshed are evicted by the store.
//!
//! # Write semantics
//!
//! Create and Update share one code path: the record is written over any
//! existing value and then read back, so callers observe what the store holds.
//! There is no compare-and-swap; concurrent writers to one identity are
//! last-write-wins at the store.
//!
//! # Modules
//!
//! - [`error`] — Error types for registry operations
//! - [`key`] — Key layout, derivation, and compound-name parsing
//! - [`config`] — [`RegistryConfig`], loadable from TOML
//! - [`registry`] — The generic [`ObjectRegistry`]

pub mod config;
pub mod error;
pub mod key;
pub mod registry;

pub use config::RegistryConfig;
pub use error::{RegistryError, RegistryResult};
pub use key::{split_compound_name, KeyLayout, DEFAULT_TTL, MAX_TTL, PLACEHOLDER_VALUE};
pub use registry::{LogRegistry, ObjectRegistry};
