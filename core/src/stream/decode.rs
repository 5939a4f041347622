//! stream/decode.rs
//! Read side of the payload chain.

use std::io::{self, Read};

use crate::checksum::PayloadHasher;
use crate::compression::Lz4Reader;

/// Source for the payload region: raw or LZ4-wrapped.
pub enum PayloadSource<R: Read> {
    Plain(R),
    Lz4(Lz4Reader<R>),
}

impl<R: Read> PayloadSource<R> {
    pub fn new(r: R, compress: bool) -> Self {
        if compress {
            PayloadSource::Lz4(Lz4Reader::new(r))
        } else {
            PayloadSource::Plain(r)
        }
    }

    /// False when an LZ4 stream hit EOF without its end mark.
    pub fn ended_cleanly(&self) -> bool {
        match self {
            PayloadSource::Plain(_) => true,
            PayloadSource::Lz4(z) => z.ended_cleanly(),
        }
    }
}

impl<R: Read> Read for PayloadSource<R> {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            PayloadSource::Plain(r) => r.read(buf),
            PayloadSource::Lz4(z) => z.read(buf),
        }
    }
}

/// Forwards reads and feeds every returned byte into an optional hasher.
pub struct TeeReader<'h, R: Read> {
    inner: R,
    hasher: Option<&'h mut PayloadHasher>,
}

impl<'h, R: Read> TeeReader<'h, R> {
    pub fn new(inner: R, hasher: Option<&'h mut PayloadHasher>) -> Self {
        Self { inner, hasher }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }
}

impl<R: Read> Read for TeeReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if let Some(h) = self.hasher.as_deref_mut() {
            h.update(&buf[..n]);
        }
        Ok(n)
    }
}
