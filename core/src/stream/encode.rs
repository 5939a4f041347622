//! stream/encode.rs
//! Write side of the payload chain.

use std::io::{self, Write};

use crate::checksum::PayloadHasher;
use crate::compression::{CompressionError, Lz4Writer};

/// Sink for the payload region: raw or LZ4-wrapped.
pub enum PayloadSink<W: Write> {
    Plain(W),
    Lz4(Lz4Writer<W>),
}

impl<W: Write> PayloadSink<W> {
    pub fn new(w: W, compress: bool) -> Result<Self, CompressionError> {
        if compress {
            Ok(PayloadSink::Lz4(Lz4Writer::new(w)?))
        } else {
            Ok(PayloadSink::Plain(w))
        }
    }

    /// Finalize compression (frame trailer included) and return the sink.
    pub fn finish(self) -> Result<W, CompressionError> {
        match self {
            PayloadSink::Plain(w) => Ok(w),
            PayloadSink::Lz4(z) => z.finish(),
        }
    }
}

impl<W: Write> Write for PayloadSink<W> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            PayloadSink::Plain(w) => w.write(buf),
            PayloadSink::Lz4(z) => z.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            PayloadSink::Plain(w) => w.flush(),
            PayloadSink::Lz4(z) => z.flush(),
        }
    }
}

/// Forwards writes and feeds the accepted bytes into an optional hasher.
pub struct TeeWriter<'h, W: Write> {
    inner: W,
    hasher: Option<&'h mut PayloadHasher>,
    count: u64,
}

impl<'h, W: Write> TeeWriter<'h, W> {
    pub fn new(inner: W, hasher: Option<&'h mut PayloadHasher>) -> Self {
        Self { inner, hasher, count: 0 }
    }

    /// Logical bytes written so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for TeeWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        if let Some(h) = self.hasher.as_deref_mut() {
            h.update(&buf[..n]);
        }
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
