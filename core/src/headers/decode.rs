//! headers/decode.rs
//! Header decoding.
//!
//! Design notes:
//! - Decoding is split in two so that an incompatible format version is
//!   rejected from the first 8 bytes alone (`decode_signature`).
//! - The header is authoritative: recovered flags replace the caller's
//!   compress/checksum hints, including on the tolerated-version path.

use byteorder::{BigEndian, ByteOrder};
use tracing::warn;

use crate::constants::{
    CONTENT_VERSION_OFFSET, FLAGS_OFFSET, FORMAT_VERSION, HEADER_LEN, MAGIC, SIGNATURE_LEN,
};
use crate::headers::types::{Header, HeaderError, HeaderFlags};
use crate::headers::version::{classify_format_version, VersionCheck};
use crate::options::Options;

/// Result of a successful header decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedHeader {
    pub header: Header,
    pub check: VersionCheck,
}

impl DecodedHeader {
    /// Caller options with compress/checksum taken from the header.
    pub fn effective_options(&self, opts: &Options) -> Options {
        let mut eff = *opts;
        eff.apply_flags(self.header.flags);
        eff
    }

    /// Format version of a frame accepted via the tolerated path.
    pub fn tolerated_version(&self) -> Option<u8> {
        match self.check {
            VersionCheck::Tolerated { got } => Some(got),
            _ => None,
        }
    }
}

/// Check the magic and classify the format version from the first 8 bytes.
///
/// Never returns `VersionCheck::Incompatible`; that case is an error.
pub fn decode_signature(buf: &[u8], tag: &str) -> Result<VersionCheck, HeaderError> {
    if buf.len() < SIGNATURE_LEN {
        return Err(HeaderError::BufferTooShort { have: buf.len(), need: SIGNATURE_LEN });
    }
    let l = MAGIC.len();
    if buf[..l] != MAGIC {
        return Err(HeaderError::BadSignature {
            tag: tag.to_string(),
            got: buf[..l].to_vec(),
            want: MAGIC.to_vec(),
        });
    }
    match classify_format_version(buf[l]) {
        VersionCheck::Incompatible { got } => {
            Err(HeaderError::IncompatibleVersion { got, want: FORMAT_VERSION })
        }
        check => Ok(check),
    }
}

/// Decode and validate a full 16-byte header against the caller's options.
pub fn decode_header(buf: &[u8], opts: &Options, tag: &str) -> Result<DecodedHeader, HeaderError> {
    if buf.len() < HEADER_LEN {
        return Err(HeaderError::BufferTooShort { have: buf.len(), need: HEADER_LEN });
    }
    let check = decode_signature(buf, tag)?;

    let content_version = BigEndian::read_u32(&buf[CONTENT_VERSION_OFFSET..]);
    if check.checks_content_version() && content_version != opts.meta_version {
        return Err(HeaderError::ContentVersionMismatch {
            tag: tag.to_string(),
            got: content_version,
            want: opts.meta_version,
        });
    }
    if let VersionCheck::Tolerated { got } = check {
        warn!(
            tag,
            got,
            want = FORMAT_VERSION,
            "compatible envelope version mismatch, skipping meta-version check"
        );
    }

    let raw = BigEndian::read_u32(&buf[FLAGS_OFFSET..]);
    let flags = HeaderFlags::from_bits(raw).ok_or(HeaderError::ReservedFlags { raw })?;

    let mut magic = [0u8; MAGIC.len()];
    magic.copy_from_slice(&buf[..MAGIC.len()]);

    Ok(DecodedHeader {
        header: Header {
            magic,
            format_version: buf[MAGIC.len()],
            content_version,
            flags,
        },
        check,
    })
}
