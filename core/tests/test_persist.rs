// File save/load suite.

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::ErrorKind;

    use envelope_core::frame::Decoded;
    use envelope_core::options::Options;
    use envelope_core::persist::{load, save};
    use envelope_core::types::EnvelopeError;
    use serde_json::{json, Value};

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bmd");
        let v = json!({"version": 3, "buckets": ["a", "b"]});

        save(&path, &v, &Options::cc_sign(1)).unwrap();
        let got: Decoded<Value> = load(&path, &Options::cc_sign(1), "bmd").unwrap();
        assert_eq!(got.value, v);
        assert!(!dir.path().join("bmd.tmp").exists());
    }

    #[test]
    fn save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        save(&path, &json!({"v": 1}), &Options::plain_local()).unwrap();
        save(&path, &json!({"v": 2}), &Options::plain_local()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{\n  \"v\": 2\n}\n");
        let got: Decoded<Value> = load(&path, &Options::plain_local(), "config").unwrap();
        assert_eq!(got.value, json!({"v": 2}));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load::<Value>(dir.path().join("nope"), &Options::plain(), "x").unwrap_err();
        assert!(matches!(err, EnvelopeError::Io(ref e) if e.kind() == ErrorKind::NotFound));
    }

    #[test]
    fn save_into_missing_dir_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("bmd");
        assert!(save(&path, &json!({}), &Options::cc_sign(1)).is_err());
        assert!(!path.exists());
    }
}
