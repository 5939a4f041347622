//! compression/stream.rs
//! LZ4 frame writer/reader adapters.
use std::io::{self, Read, Write};

use lz4_flex::frame::{BlockSize, FrameDecoder, FrameEncoder, FrameInfo};

use crate::compression::types::CompressionError;
use crate::constants::LZ4_BLOCK_MAX;

/// Map a maximum block size in bytes onto an LZ4 frame block size.
pub fn block_size_for(max: usize) -> Result<BlockSize, CompressionError> {
    match max {
        x if x == 64 * 1024 => Ok(BlockSize::Max64KB),
        x if x == 256 * 1024 => Ok(BlockSize::Max256KB),
        x if x == 1024 * 1024 => Ok(BlockSize::Max1MB),
        x if x == 4 * 1024 * 1024 => Ok(BlockSize::Max4MB),
        size => Err(CompressionError::UnsupportedBlockSize { size }),
    }
}

/// Compressing writer. Call `finish` to emit the end mark.
pub struct Lz4Writer<W: Write> {
    inner: FrameEncoder<W>,
}

impl<W: Write> Lz4Writer<W> {
    pub fn new(w: W) -> Result<Self, CompressionError> {
        let info = FrameInfo::new().block_size(block_size_for(LZ4_BLOCK_MAX)?);
        Ok(Self { inner: FrameEncoder::with_frame_info(info, w) })
    }

    /// Flush the last block and the frame trailer, returning the sink.
    pub fn finish(self) -> Result<W, CompressionError> {
        Ok(self.inner.finish()?)
    }
}

impl<W: Write> Write for Lz4Writer<W> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Length of the LZ4 frame end mark (a zero block size).
const END_MARK_LEN: usize = 4;

/// Source wrapper remembering the last bytes consumed and whether the
/// source itself failed.
struct TailReader<R: Read> {
    inner: R,
    tail: [u8; END_MARK_LEN],
    seen: u64,
    failed: bool,
}

impl<R: Read> TailReader<R> {
    fn new(inner: R) -> Self {
        Self { inner, tail: [0xFF; END_MARK_LEN], seen: 0, failed: false }
    }

    fn ends_with_end_mark(&self) -> bool {
        self.seen >= END_MARK_LEN as u64 && self.tail == [0u8; END_MARK_LEN]
    }
}

impl<R: Read> Read for TailReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = match self.inner.read(buf) {
            Ok(n) => n,
            Err(e) => {
                self.failed = true;
                return Err(e);
            }
        };
        if n >= END_MARK_LEN {
            self.tail.copy_from_slice(&buf[n - END_MARK_LEN..n]);
        } else if n > 0 {
            self.tail.rotate_left(n);
            self.tail[END_MARK_LEN - n..].copy_from_slice(&buf[..n]);
        }
        self.seen += n as u64;
        Ok(n)
    }
}

/// Decompressing reader.
///
/// Errors raised by the decoder itself (not by the source) come out as
/// `InvalidData` wrapping a `CompressionError`; see `is_decode_error`.
pub struct Lz4Reader<R: Read> {
    inner: FrameDecoder<TailReader<R>>,
}

impl<R: Read> Lz4Reader<R> {
    pub fn new(r: R) -> Self {
        Self { inner: FrameDecoder::new(TailReader::new(r)) }
    }

    /// Whether the last bytes consumed were the frame end mark.
    /// Only meaningful once the reader has returned EOF.
    pub fn ended_cleanly(&self) -> bool {
        self.inner.get_ref().ends_with_end_mark()
    }
}

impl<R: Read> Read for Lz4Reader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.read(buf) {
            Ok(n) => Ok(n),
            Err(e) if self.inner.get_ref().failed => Err(e),
            Err(e) => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                CompressionError::CodecProcessFailed { codec: "lz4".into(), msg: e.to_string() },
            )),
        }
    }
}

/// True for errors produced by a corrupt compressed stream.
pub fn is_decode_error(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::InvalidData
        && e.get_ref().map_or(false, |inner| inner.is::<CompressionError>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_size_mapping() {
        assert!(matches!(block_size_for(LZ4_BLOCK_MAX), Ok(BlockSize::Max64KB)));
        assert!(matches!(
            block_size_for(1000),
            Err(CompressionError::UnsupportedBlockSize { size: 1000 })
        ));
    }

    #[test]
    fn spans_multiple_blocks() {
        let data: Vec<u8> = (0..3 * LZ4_BLOCK_MAX + 17).map(|i| (i % 251) as u8).collect();

        let mut w = Lz4Writer::new(Vec::new()).unwrap();
        w.write_all(&data).unwrap();
        let compressed = w.finish().unwrap();

        let mut out = Vec::new();
        Lz4Reader::new(compressed.as_slice()).read_to_end(&mut out).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn end_mark_is_tracked() {
        let mut w = Lz4Writer::new(Vec::new()).unwrap();
        w.write_all(b"{\"a\":1}\n").unwrap();
        let compressed = w.finish().unwrap();

        let mut r = Lz4Reader::new(compressed.as_slice());
        r.read_to_end(&mut Vec::new()).unwrap();
        assert!(r.ended_cleanly());

        for cut in 1..=END_MARK_LEN {
            let mut r = Lz4Reader::new(&compressed[..compressed.len() - cut]);
            let _ = r.read_to_end(&mut Vec::new());
            assert!(!r.ended_cleanly(), "cut {cut}");
        }
    }

    #[test]
    fn tail_tracks_short_reads() {
        let mut t = TailReader::new(&b"abc\0\0\0\0"[..]);
        let mut one = [0u8; 1];
        while t.read(&mut one).unwrap() == 1 {}
        assert!(t.ends_with_end_mark());
        assert_eq!(t.seen, 7);
    }

    #[test]
    fn decoder_errors_are_tagged() {
        let mut r = Lz4Reader::new(&b"not an lz4 frame at all"[..]);
        let err = r.read_to_end(&mut Vec::new()).unwrap_err();
        assert!(is_decode_error(&err));
        assert!(!is_decode_error(&io::Error::new(io::ErrorKind::InvalidData, "other")));
    }
}
