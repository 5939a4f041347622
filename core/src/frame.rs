//! frame.rs
//! `encode` / `decode` entry points.
//!
//! ```text
//! [ header (16, if signature) ][ checksum slot (8, if checksum) ][ payload ... ]
//! ```
//!
//! The payload is JSON followed by a single `\n`, optionally LZ4 framed.
//! The checksum slot holds xxhash64 (big-endian) of the uncompressed
//! payload, newline included.

use std::io::{BufReader, BufWriter, Cursor, IntoInnerError, Read, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use crate::checksum::{Cksum, PayloadHasher};
use crate::compression::is_decode_error;
use crate::constants::CHECKSUM_LEN;
use crate::headers::Header;
use crate::options::Options;
use crate::stream::{
    read_checksum_slot, read_header, write_header, PayloadSink, PayloadSource, TeeReader,
    TeeWriter, WriterAt,
};
use crate::types::EnvelopeError;

/// Initial capacity for in-memory encodes.
const ENCODE_BUF_CAPACITY: usize = 32 * 1024;

/// Outcome of a successful `decode`.
#[derive(Debug)]
pub struct Decoded<T> {
    pub value: T,
    /// Present when the frame was checksummed (and verified).
    pub checksum: Option<Cksum>,
    /// Format version of a frame accepted via the tolerated-mismatch path.
    pub tolerated_version: Option<u8>,
}

/// Encode `value` into `sink`.
///
/// Errors are sink I/O or JSON failures. Nothing is rolled back; on error
/// the sink holds a partial frame and cleanup belongs to the caller.
pub fn encode<W, T>(sink: &mut W, value: &T, opts: &Options) -> Result<(), EnvelopeError>
where
    W: WriterAt,
    T: Serialize + ?Sized,
{
    if opts.signature {
        write_header(sink, &Header::from_options(opts))?;
    }
    let slot = if opts.checksum {
        let off = sink.offset()?;
        sink.write_all(&[0u8; CHECKSUM_LEN])?;
        Some(off)
    } else {
        None
    };

    let mut hasher = PayloadHasher::new();
    let payload = PayloadSink::new(&mut *sink, opts.compress)?;
    let mut w = BufWriter::new(TeeWriter::new(payload, opts.checksum.then_some(&mut hasher)));
    if opts.indent {
        serde_json::to_writer_pretty(&mut w, value)?;
    } else {
        serde_json::to_writer(&mut w, value)?;
    }
    w.write_all(b"\n")?;

    let tee = w.into_inner().map_err(IntoInnerError::into_error)?;
    let logical_len = tee.count();
    // Compressed trailer goes out before the sum is taken.
    tee.into_inner().finish()?;

    if let Some(off) = slot {
        sink.write_at(&hasher.sum().to_be_bytes(), off)?;
    }
    sink.flush()?;

    debug!(
        signature = opts.signature,
        compress = opts.compress,
        checksum = opts.checksum,
        logical_len,
        "encoded envelope"
    );
    Ok(())
}

/// Encode into a fresh in-memory buffer.
pub fn encode_to_vec<T: Serialize + ?Sized>(value: &T, opts: &Options) -> Result<Vec<u8>, EnvelopeError> {
    let mut cur = Cursor::new(Vec::with_capacity(ENCODE_BUF_CAPACITY));
    encode(&mut cur, value, opts)?;
    Ok(cur.into_inner())
}

/// Decode a frame from `source`.
///
/// With `opts.signature` the header's flags replace `opts.compress` and
/// `opts.checksum`; without it they are trusted verbatim. `tag` names the
/// value in errors and logs. The source is consumed and dropped on every
/// exit path. On checksum mismatch, or when the LZ4 stream is corrupt
/// while checksumming is on, the parsed value is discarded.
pub fn decode<R, T>(mut source: R, opts: &Options, tag: &str) -> Result<Decoded<T>, EnvelopeError>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut opts = *opts;
    let mut tolerated_version = None;
    if opts.signature {
        let hdr = read_header(&mut source, &opts, tag)?;
        opts = hdr.effective_options(&opts);
        tolerated_version = hdr.tolerated_version();
    }
    let expected = if opts.checksum {
        Some(read_checksum_slot(&mut source)?)
    } else {
        None
    };

    let mut hasher = PayloadHasher::new();
    let payload = PayloadSource::new(source, opts.compress);
    let mut reader = BufReader::new(TeeReader::new(payload, opts.checksum.then_some(&mut hasher)));
    let parsed: Result<T, serde_json::Error> = {
        let mut de = serde_json::Deserializer::from_reader(&mut reader);
        serde::Deserialize::deserialize(&mut de)
    };

    let Some(expected) = expected else {
        let value = parsed?;
        if opts.compress {
            reader.read_to_end(&mut Vec::new())?;
            if !reader.get_ref().get_ref().ended_cleanly() {
                return Err(EnvelopeError::TruncatedFrame);
            }
        }
        drop(reader);
        debug!(tag, compress = opts.compress, "decoded envelope");
        return Ok(Decoded { value, checksum: None, tolerated_version });
    };

    // The encoder's trailing newline is usually left unread.
    let mut rest = Vec::new();
    let drained = reader.read_to_end(&mut rest).map_err(EnvelopeError::from);
    let ended_cleanly = reader.get_ref().get_ref().ended_cleanly();
    drop(reader);

    // A corrupt LZ4 stream is an integrity failure like a wrong sum.
    let parsed = parsed.map_err(EnvelopeError::from);
    let corrupt = is_corrupt_stream(&parsed) || is_corrupt_stream(&drained);
    match drained {
        Err(e) if !corrupt => return Err(e),
        _ => {}
    }

    let actual = hasher.sum();
    if corrupt || actual != expected {
        error!(tag, expected, actual, corrupt, "bad meta checksum");
        return Err(EnvelopeError::BadChecksum { tag: tag.to_string(), expected, actual });
    }
    let value = parsed?;
    if !(rest.is_empty() || rest == b"\n") {
        return Err(EnvelopeError::TrailingBytes { len: rest.len() });
    }
    if !ended_cleanly {
        return Err(EnvelopeError::TruncatedFrame);
    }

    debug!(tag, compress = opts.compress, checksum = actual, "decoded envelope");
    Ok(Decoded {
        value,
        checksum: Some(Cksum::from_sum(actual)),
        tolerated_version,
    })
}

fn is_corrupt_stream<T>(r: &Result<T, EnvelopeError>) -> bool {
    matches!(r, Err(EnvelopeError::Io(e)) if is_decode_error(e))
}
