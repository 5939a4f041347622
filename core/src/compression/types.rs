//! compression/types.rs
use std::fmt;

#[derive(Debug)]
pub enum CompressionError {
    UnsupportedBlockSize { size: usize },
    CodecProcessFailed { codec: String, msg: String },
}

impl fmt::Display for CompressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CompressionError::*;
        match self {
            UnsupportedBlockSize { size } =>
                write!(f, "unsupported lz4 block size: {}", size),
            CodecProcessFailed { codec, msg } =>
                write!(f, "codec {} process failed: {}", codec, msg),
        }
    }
}

impl std::error::Error for CompressionError {}

impl From<lz4_flex::frame::Error> for CompressionError {
    fn from(e: lz4_flex::frame::Error) -> Self {
        CompressionError::CodecProcessFailed { codec: "lz4".into(), msg: e.to_string() }
    }
}
