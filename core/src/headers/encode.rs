//! headers/encode.rs
//! Header encoding.
//!
//! Design notes:
//! - Serializes `Header` into a fixed 16-byte buffer, integers big-endian.
//! - Field order must match `decode.rs` exactly.

use byteorder::{BigEndian, ByteOrder};

use crate::constants::{CONTENT_VERSION_OFFSET, FLAGS_OFFSET, HEADER_LEN};
use crate::headers::types::Header;

/// Serialize a `Header` into its fixed-width wire form.
#[inline]
pub fn encode_header(h: &Header) -> [u8; HEADER_LEN] {
    let mut out = [0u8; HEADER_LEN];
    let l = h.magic.len();

    out[..l].copy_from_slice(&h.magic);                                     // 0..7   magic
    out[l] = h.format_version;                                              // 7      format version
    BigEndian::write_u32(&mut out[CONTENT_VERSION_OFFSET..], h.content_version); // 8..12  content version
    BigEndian::write_u32(&mut out[FLAGS_OFFSET..], h.flags.bits());         // 12..16 flags

    debug_assert_eq!(l + 1, CONTENT_VERSION_OFFSET);
    out
}
