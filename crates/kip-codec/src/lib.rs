//! Object codecs for the kip control plane.
//!
//! A codec turns a typed object into the opaque payload stored under its key
//! and back. The registry is generic over [`Codec`], so the record encoding
//! is chosen once when the registry is built.
//!
//! - [`JsonCodec`] -- human-readable records, the default on disk
//! - [`BincodeCodec`] -- compact binary records

pub mod codec;
pub mod error;

pub use codec::{BincodeCodec, Codec, JsonCodec};
pub use error::{CodecError, CodecResult};
