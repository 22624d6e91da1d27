//! Key-value store contract for the kip control plane.
//!
//! The control plane treats a distributed, replicated key-value store as its
//! system of record. This crate pins down the small surface the registry layer
//! consumes and provides an in-memory backend with the same semantics.
//!
//! # Semantics
//!
//! 1. Keys are `/`-separated paths. The store has no real directories.
//! 2. `list(prefix)` returns every live key equal to `prefix` or below
//!    `prefix/`. An empty prefix is reported as [`StoreError::KeyNotFound`].
//! 3. `get` and `delete` on an absent key return [`StoreError::KeyNotFound`],
//!    which callers must be able to tell apart from transport failures.
//! 4. A write may carry a TTL after which the store evicts the key on its own.
//! 5. Concurrent writers to one key are last-write-wins.
//!
//! # Backends
//!
//! - [`InMemoryKvStore`] -- `HashMap`-based store for tests and embedding

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryKvStore;
pub use traits::{KvPair, KvStore, WriteOptions};
