//! envelope-core
//!
//! Self-describing binary envelope for persisted metadata: optional
//! header (magic, format version, content version, flags), optional
//! xxhash64 checksum slot, and a JSON payload that may be LZ4 compressed.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod options;
pub mod types;

pub mod checksum;
pub mod compression;
pub mod headers;

// Payload chain and entry points
pub mod stream;
pub mod frame;
pub mod persist;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::checksum::{ChecksumAlg, Cksum};
    pub use crate::frame::{decode, encode, encode_to_vec, Decoded};
    pub use crate::headers::{HeaderError, VersionCheck};
    pub use crate::options::Options;
    pub use crate::stream::WriterAt;
    pub use crate::types::EnvelopeError;
}
