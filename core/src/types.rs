use std::io;
use crate::{compression::CompressionError, headers::HeaderError};


/// Unified envelope error covering I/O, header, compression, JSON and integrity.
/// - `From<T>` impls enable `?` across encode/decode.
/// - Messages carry the caller tag and expected vs actual values.
#[derive(Debug)]
pub enum EnvelopeError {
    /// Sink/source I/O error, passed through unchanged.
    Io(io::Error),

    /// Signature, version or flags rejected.
    Header(HeaderError),

    /// Compression/decompression error.
    Compression(CompressionError),

    /// Structured (JSON) encode/decode error, passed through unchanged.
    Codec(serde_json::Error),

    /// Accumulated payload hash differs from the stored one.
    BadChecksum { tag: String, expected: u64, actual: u64 },

    /// Bytes left after the value beyond the single trailing newline.
    TrailingBytes { len: usize },

    /// Compressed payload ended without the LZ4 end mark.
    TruncatedFrame,
}

impl EnvelopeError {
    pub fn is_bad_signature(&self) -> bool {
        matches!(self, EnvelopeError::Header(HeaderError::BadSignature { .. }))
    }

    /// Incompatible format version or content-version mismatch.
    pub fn is_version_error(&self) -> bool {
        matches!(
            self,
            EnvelopeError::Header(
                HeaderError::IncompatibleVersion { .. } | HeaderError::ContentVersionMismatch { .. }
            )
        )
    }

    pub fn is_bad_checksum(&self) -> bool {
        matches!(self, EnvelopeError::BadChecksum { .. })
    }
}

impl std::fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvelopeError::Io(e) => write!(f, "I/O error: {}", e),
            EnvelopeError::Header(e) => write!(f, "header error: {}", e),
            EnvelopeError::Compression(e) => write!(f, "compression error: {}", e),
            EnvelopeError::Codec(e) => write!(f, "codec error: {}", e),
            EnvelopeError::BadChecksum { tag, expected, actual } =>
                write!(f, "bad {} checksum: expected {:016x}, got {:016x}", tag, expected, actual),
            EnvelopeError::TrailingBytes { len } =>
                write!(f, "{} unexpected trailing bytes after payload", len),
            EnvelopeError::TruncatedFrame =>
                write!(f, "compressed payload truncated: missing lz4 end mark"),
        }
    }
}

impl std::error::Error for EnvelopeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EnvelopeError::Io(e) => Some(e),
            EnvelopeError::Header(e) => Some(e),
            EnvelopeError::Compression(e) => Some(e),
            EnvelopeError::Codec(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for EnvelopeError {
    fn from(e: io::Error) -> Self {
        EnvelopeError::Io(e)
    }
}

impl From<HeaderError> for EnvelopeError {
    fn from(e: HeaderError) -> Self {
        EnvelopeError::Header(e)
    }
}

impl From<CompressionError> for EnvelopeError {
    fn from(e: CompressionError) -> Self {
        EnvelopeError::Compression(e)
    }
}

impl From<serde_json::Error> for EnvelopeError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json wraps reader/writer failures; surface those as plain I/O.
        if e.is_io() {
            return EnvelopeError::Io(e.into());
        }
        EnvelopeError::Codec(e)
    }
}
