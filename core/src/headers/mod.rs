//! headers/mod.rs
//! Fixed-width envelope prefix.
//!
//! Layout (big-endian):
//! - `0..7`   magic signature
//! - `7`      format version
//! - `8..12`  content version
//! - `12..16` flags (bit0 = compress, bit1 = checksum, rest zero)

pub mod types;
pub mod version;
pub mod encode;
pub mod decode;

pub use types::*;
pub use version::*;
pub use encode::*;
pub use decode::*;
