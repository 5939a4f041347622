//! compression/mod.rs
//! Streaming LZ4 (frame format) around the payload region.
//!
//! Notes:
//! - Maximum uncompressed block size is fixed (`LZ4_BLOCK_MAX`) and is part
//!   of the wire contract.
//! - The encoder must be finished before the payload checksum is read so
//!   that the frame trailer is fully emitted.

pub mod types;
pub mod stream;

pub use types::*;
pub use stream::*;
