//! stream/mod.rs
//! Transform chain around the payload region.
//!
//! Encode: value -> `TeeWriter` (hash) -> `PayloadSink` (lz4 or plain) -> sink.
//! Decode: source -> `PayloadSource` (lz4 or plain) -> `TeeReader` (hash) -> value.
//!
//! The hash always covers the logical (uncompressed) bytes.

pub mod io;
pub mod encode;
pub mod decode;

pub use io::*;
pub use encode::*;
pub use decode::*;
