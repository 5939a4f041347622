//! headers/types.rs
//! Header struct, flags and header-level errors.

use std::fmt;

use crate::constants::{flags, FORMAT_VERSION, MAGIC};
use crate::options::Options;

bitflags::bitflags! {
    /// Header flags word. Undefined bits are reserved and must be zero.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HeaderFlags: u32 {
        /// Payload is LZ4 compressed
        const COMPRESS = flags::COMPRESS;

        /// Checksum slot follows the header
        const CHECKSUM = flags::CHECKSUM;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub magic: [u8; 7],
    pub format_version: u8,
    pub content_version: u32,
    pub flags: HeaderFlags,
}

impl Header {
    /// Header for a frame written with `opts` by this implementation.
    pub fn from_options(opts: &Options) -> Self {
        Self {
            magic: MAGIC,
            format_version: FORMAT_VERSION,
            content_version: opts.meta_version,
            flags: opts.header_flags(),
        }
    }
}

pub fn fmt_bytes(b: &[u8]) -> String {
    if b.iter().all(|&c| c.is_ascii_graphic() || c == b' ') {
        format!("b\"{}\"", String::from_utf8_lossy(b))
    } else {
        format!("0x{}", hex::encode(b))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// Buffer too short to contain the header (or its signature part).
    BufferTooShort { have: usize, need: usize },

    /// Magic does not match.
    BadSignature { tag: String, got: Vec<u8>, want: Vec<u8> },

    /// Format version neither current nor tolerated.
    IncompatibleVersion { got: u8, want: u8 },

    /// Content version disagrees with the caller's expectation.
    ContentVersionMismatch { tag: String, got: u32, want: u32 },

    /// Reserved flag bits are set.
    ReservedFlags { raw: u32 },
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use HeaderError::*;
        match self {
            BufferTooShort { have, need } =>
                write!(f, "header buffer too short: {} < {}", have, need),
            BadSignature { tag, got, want } =>
                write!(f, "bad signature {}: got {}, expected {}", tag, fmt_bytes(got), fmt_bytes(want)),
            IncompatibleVersion { got, want } =>
                write!(f, "incompatible envelope version {} (current {})", got, want),
            ContentVersionMismatch { tag, got, want } =>
                write!(f, "{} version mismatch: got {}, expected {}", tag, got, want),
            ReservedFlags { raw } =>
                write!(f, "reserved header flags set: 0x{:08x}", raw),
        }
    }
}

impl std::error::Error for HeaderError {}
