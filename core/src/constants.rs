//! constants.rs
//! Wire constants shared by the encoder and decoder.

/// Magic signature identifying the envelope family.
/// Occupies bytes `0..7`; byte 7 carries the format version.
pub const MAGIC: [u8; 7] = *b"aistore";

/// Current envelope (format) version written by this implementation.
pub const FORMAT_VERSION: u8 = 3;

/// Older format versions that are still readable.
/// Frames carrying one of these skip the content-version check.
pub const TOLERATED_FORMAT_VERSIONS: &[u8] = &[2];

/// Offset of the content version (big-endian u32).
pub const CONTENT_VERSION_OFFSET: usize = 8;
/// Offset of the flags word (big-endian u32).
pub const FLAGS_OFFSET: usize = 12;
/// Fixed header size in bytes; never varies with flags.
pub const HEADER_LEN: usize = 16;

/// Magic + format version; everything the version policy needs.
pub const SIGNATURE_LEN: usize = CONTENT_VERSION_OFFSET;

/// Checksum slot width (big-endian u64), independent of the hash family.
pub const CHECKSUM_LEN: usize = 8;

/// Maximum uncompressed LZ4 block size (64 KiB).
pub const LZ4_BLOCK_MAX: usize = 64 * 1024;

/// Flag bits carried in the header flags word.
pub mod flags {
    pub const COMPRESS: u32 = 1 << 0;
    pub const CHECKSUM: u32 = 1 << 1;
}
