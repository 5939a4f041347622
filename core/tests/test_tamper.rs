// Integrity suite: any corruption of a checksummed frame must surface as an
// error, never as a silently accepted value.

#[cfg(test)]
mod tests {
    use envelope_core::checksum::payload_sum;
    use envelope_core::constants::{CHECKSUM_LEN, HEADER_LEN};
    use envelope_core::frame::{decode, encode_to_vec, Decoded};
    use envelope_core::headers::{encode_header, Header};
    use envelope_core::options::Options;
    use envelope_core::types::EnvelopeError;
    use serde_json::{json, Value};

    fn value() -> Value {
        json!({"name": "bucket-1", "copies": 3, "mirror": {"enabled": true, "paths": ["/a", "/b"]}})
    }

// # ❌ 1. Single-byte flips

    #[test]
    fn flipping_any_slot_or_payload_byte_is_bad_checksum() {
        let opts = Options::cksum_sign(1);
        let buf = encode_to_vec(&value(), &opts).unwrap();

        for i in HEADER_LEN..buf.len() {
            for mask in [0x01u8, 0x80] {
                let mut bad = buf.clone();
                bad[i] ^= mask;
                let err = decode::<_, Value>(bad.as_slice(), &opts, "bmd").unwrap_err();
                assert!(err.is_bad_checksum(), "offset {i} mask {mask:#x}: {err}");
            }
        }
    }

    #[test]
    fn flipped_slot_in_compressed_frame() {
        let opts = Options::cc_sign(1);
        let mut buf = encode_to_vec(&value(), &opts).unwrap();
        buf[HEADER_LEN + 3] ^= 0x10;
        let err = decode::<_, Value>(buf.as_slice(), &opts, "bmd").unwrap_err();
        match err {
            EnvelopeError::BadChecksum { tag, expected, actual } => {
                assert_eq!(tag, "bmd");
                assert_ne!(expected, actual);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn corrupted_compressed_payload_is_rejected() {
        let opts = Options::cc_sign(1);
        let buf = encode_to_vec(&value(), &opts).unwrap();

        for i in HEADER_LEN + CHECKSUM_LEN..buf.len() {
            let mut bad = buf.clone();
            bad[i] ^= 0x01;
            let err = decode::<_, Value>(bad.as_slice(), &opts, "bmd").unwrap_err();
            assert!(err.is_bad_checksum(), "offset {i}: {err:?}");
        }
    }

// # ✂️ 2. Truncation and extension

    #[test]
    fn truncated_frame_is_rejected() {
        let opts = Options::cc_sign(1);
        let buf = encode_to_vec(&value(), &opts).unwrap();
        for len in [0, 7, HEADER_LEN, HEADER_LEN + CHECKSUM_LEN, buf.len() - 1] {
            assert!(decode::<_, Value>(&buf[..len], &opts, "bmd").is_err(), "len {len}");
        }
    }

    #[test]
    fn missing_end_mark_is_truncated_frame() {
        let opts = Options::cc_sign(1);
        let buf = encode_to_vec(&value(), &opts).unwrap();
        for cut in 1..=4 {
            let err = decode::<_, Value>(&buf[..buf.len() - cut], &opts, "bmd").unwrap_err();
            assert!(matches!(err, EnvelopeError::TruncatedFrame), "cut {cut}: {err:?}");
        }
    }

    #[test]
    fn missing_end_mark_without_checksum() {
        let opts = Options::plain().with_signature(true).with_compress(true);
        let buf = encode_to_vec(&value(), &opts).unwrap();
        let err = decode::<_, Value>(&buf[..buf.len() - 4], &opts, "bmd").unwrap_err();
        assert!(matches!(err, EnvelopeError::TruncatedFrame), "{err:?}");
    }

    #[test]
    fn appended_bytes_are_bad_checksum() {
        let opts = Options::cksum_sign(1);
        let mut buf = encode_to_vec(&value(), &opts).unwrap();
        buf.extend_from_slice(b"junk");
        let err = decode::<_, Value>(buf.as_slice(), &opts, "bmd").unwrap_err();
        assert!(err.is_bad_checksum());
    }

    #[test]
    fn extra_trailing_bytes_with_valid_sum() {
        // Hand-built frame whose checksum covers two trailing newlines.
        let opts = Options::cksum_sign(1);
        let payload = b"{\"a\":1}\n\n";

        let mut buf = encode_header(&Header::from_options(&opts)).to_vec();
        buf.extend_from_slice(&payload_sum(payload).to_be_bytes());
        buf.extend_from_slice(payload);

        let err = decode::<_, Value>(buf.as_slice(), &opts, "bmd").unwrap_err();
        assert!(matches!(err, EnvelopeError::TrailingBytes { len: 2 }));
    }

// # ✅ 3. Unchecked frames

    #[test]
    fn unchecked_frame_does_not_verify() {
        let opts = Options::plain().with_signature(true).with_meta_version(1);
        let mut buf = encode_to_vec(&json!({"copies": 3}), &opts).unwrap();
        let pos = buf.iter().rposition(|&b| b == b'3').unwrap();
        buf[pos] = b'4';

        let got: Decoded<Value> = decode(buf.as_slice(), &opts, "bmd").unwrap();
        assert_eq!(got.value, json!({"copies": 4}));
        assert!(got.checksum.is_none());
    }
}
