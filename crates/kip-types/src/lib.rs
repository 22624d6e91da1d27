//! Foundation types for the kip control plane.
//!
//! This crate provides the domain objects persisted by the registry layer and
//! the time abstraction shared by the store and the file cache. Every other
//! kip crate depends on `kip-types`.
//!
//! # Key Types
//!
//! - [`ObjectMeta`] — Name, uid, creation time and labels of an object
//! - [`ObjectReference`] — Reference to the object that owns another one
//! - [`LogFile`] — A log record owned by another object
//! - [`RegistryObject`] — Identity contract for anything a registry persists
//! - [`Clock`] — Monotonic time source, with [`SystemClock`] and [`ManualClock`]

pub mod log;
pub mod object;
pub mod time;

pub use log::{LogFile, LogFileList};
pub use object::{ObjectMeta, ObjectReference, RegistryObject};
pub use time::{Clock, ManualClock, SystemClock};
