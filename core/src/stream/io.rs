//! stream/io.rs
//! Sink capability plus header/slot I/O helpers.

use std::io::{self, Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, ReadBytesExt};

use crate::constants::{HEADER_LEN, SIGNATURE_LEN};
use crate::headers::{decode_header, decode_signature, encode_header, DecodedHeader, Header};
use crate::options::Options;
use crate::types::EnvelopeError;

/// Sequential sink that can also overwrite bytes at an earlier offset.
///
/// The checksum slot is reserved before the payload and backpatched after
/// it, so the sink must stay exclusively owned for the whole encode.
/// Files opened with `append(true)` are not valid sinks: every write lands
/// at the end regardless of the seek, so the backpatch would append.
pub trait WriterAt: Write {
    /// Current absolute offset of the next sequential write.
    fn offset(&mut self) -> io::Result<u64>;

    /// Write `buf` at `offset` without moving the sequential position.
    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<()>;
}

impl<T: Write + Seek> WriterAt for T {
    fn offset(&mut self) -> io::Result<u64> {
        self.stream_position()
    }

    fn write_at(&mut self, buf: &[u8], offset: u64) -> io::Result<()> {
        let end = self.stream_position()?;
        self.seek(SeekFrom::Start(offset))?;
        self.write_all(buf)?;
        self.seek(SeekFrom::Start(end))?;
        Ok(())
    }
}

// ================= Header =================

pub fn write_header<W: Write>(w: &mut W, h: &Header) -> Result<(), EnvelopeError> {
    w.write_all(&encode_header(h))?;
    Ok(())
}

/// Read and validate the header.
///
/// Magic and format version are checked before the remaining 8 bytes are
/// read, so an incompatible frame leaves the rest of the source untouched.
pub fn read_header<R: Read>(r: &mut R, opts: &Options, tag: &str) -> Result<DecodedHeader, EnvelopeError> {
    let mut buf = [0u8; HEADER_LEN];
    r.read_exact(&mut buf[..SIGNATURE_LEN])?;
    decode_signature(&buf[..SIGNATURE_LEN], tag)?;

    r.read_exact(&mut buf[SIGNATURE_LEN..])?;
    Ok(decode_header(&buf, opts, tag)?)
}

// ================= Checksum slot =================

pub fn read_checksum_slot<R: Read>(r: &mut R) -> Result<u64, EnvelopeError> {
    Ok(r.read_u64::<BigEndian>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn write_at_keeps_sequential_position() {
        let mut c = Cursor::new(Vec::new());
        c.write_all(b"__abcd").unwrap();
        assert_eq!(c.offset().unwrap(), 6);

        c.write_at(b"XY", 0).unwrap();
        assert_eq!(c.offset().unwrap(), 6);

        c.write_all(b"ef").unwrap();
        assert_eq!(c.into_inner(), b"XYabcdef");
    }
}
