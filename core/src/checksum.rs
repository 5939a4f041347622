//! checksum.rs
//! Running 64-bit payload hash and the audit value returned on decode.
//!
//! The hash is xxHash64 (seed 0). Its 8-byte big-endian form is what lands
//! in the checksum slot and what gets hex-encoded into `Cksum`.

use std::fmt;

use serde::Serialize;
use xxhash_rust::xxh64::{xxh64, Xxh64};

const SEED: u64 = 0;

/// Checksum algorithm tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ChecksumAlg {
    #[serde(rename = "xxhash")]
    XxHash64,
}

impl ChecksumAlg {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecksumAlg::XxHash64 => "xxhash",
        }
    }
}

impl fmt::Display for ChecksumAlg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hex-encoded digest plus its algorithm.
/// Audit artifact only; verification already happened when it is produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Cksum {
    #[serde(rename = "type")]
    pub alg: ChecksumAlg,
    pub value: String,
}

impl Cksum {
    pub fn from_sum(sum: u64) -> Self {
        Self {
            alg: ChecksumAlg::XxHash64,
            value: hex::encode(sum.to_be_bytes()),
        }
    }
}

impl fmt::Display for Cksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.alg, self.value)
    }
}

/// Streaming accumulator over the logical payload bytes.
pub struct PayloadHasher {
    state: Xxh64,
}

impl PayloadHasher {
    pub fn new() -> Self {
        Self { state: Xxh64::new(SEED) }
    }

    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }

    pub fn sum(&self) -> u64 {
        self.state.digest()
    }
}

impl Default for PayloadHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot form of `PayloadHasher`.
pub fn payload_sum(data: &[u8]) -> u64 {
    xxh64(data, SEED)
}
