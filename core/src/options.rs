//! options.rs
//! Caller-facing configuration for a single encode/decode call.
//!
//! On decode, `compress` and `checksum` are only hints: when `signature`
//! is set the flags recovered from the header replace them.

use serde::{Deserialize, Serialize};

use crate::headers::HeaderFlags;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Write (encode) / expect (decode) the fixed-width header.
    pub signature: bool,
    /// LZ4-compress the payload.
    pub compress: bool,
    /// Reserve and fill an xxhash64 slot over the logical payload.
    pub checksum: bool,
    /// Pretty-print the JSON payload with 2-space indentation.
    pub indent: bool,
    /// Expected content (schema) version.
    pub meta_version: u32,
}

impl Options {
    /// No header, no compression, no checksum.
    pub fn plain() -> Self {
        Self::default()
    }

    /// Human-readable local files.
    pub fn plain_local() -> Self {
        Self { indent: true, ..Self::default() }
    }

    /// Signed, compressed and checksummed.
    pub fn cc_sign(meta_version: u32) -> Self {
        Self {
            signature: true,
            compress: true,
            checksum: true,
            indent: false,
            meta_version,
        }
    }

    /// Signed and checksummed, not compressed.
    pub fn cksum_sign(meta_version: u32) -> Self {
        Self {
            signature: true,
            checksum: true,
            meta_version,
            ..Self::default()
        }
    }

    pub fn with_signature(mut self, on: bool) -> Self {
        self.signature = on;
        self
    }

    pub fn with_compress(mut self, on: bool) -> Self {
        self.compress = on;
        self
    }

    pub fn with_checksum(mut self, on: bool) -> Self {
        self.checksum = on;
        self
    }

    pub fn with_indent(mut self, on: bool) -> Self {
        self.indent = on;
        self
    }

    pub fn with_meta_version(mut self, meta_version: u32) -> Self {
        self.meta_version = meta_version;
        self
    }

    /// Flags word describing this configuration.
    pub fn header_flags(&self) -> HeaderFlags {
        let mut f = HeaderFlags::empty();
        f.set(HeaderFlags::COMPRESS, self.compress);
        f.set(HeaderFlags::CHECKSUM, self.checksum);
        f
    }

    /// Overwrite the compress/checksum hints with header-recovered flags.
    pub fn apply_flags(&mut self, f: HeaderFlags) {
        self.compress = f.contains(HeaderFlags::COMPRESS);
        self.checksum = f.contains(HeaderFlags::CHECKSUM);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        assert_eq!(Options::plain(), Options::default());
        assert!(Options::plain_local().indent);

        let cc = Options::cc_sign(7);
        assert!(cc.signature && cc.compress && cc.checksum);
        assert_eq!(cc.meta_version, 7);

        let ck = Options::cksum_sign(2);
        assert!(ck.signature && ck.checksum && !ck.compress);
    }

    #[test]
    fn header_flags_applied_verbatim() {
        let mut opts = Options::plain();
        opts.apply_flags(HeaderFlags::COMPRESS | HeaderFlags::CHECKSUM);
        assert!(opts.compress && opts.checksum);

        opts.apply_flags(HeaderFlags::empty());
        assert!(!opts.compress && !opts.checksum);
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let opts: Options = serde_json::from_str(r#"{"checksum":true}"#).unwrap();
        assert_eq!(opts, Options::plain().with_checksum(true));
    }
}
