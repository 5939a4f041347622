//! persist.rs
//! Whole-file save/load on top of `frame`.
//!
//! `save` writes `<path>.tmp`, syncs it and renames it over `path`, so a
//! reader never observes a half-written frame under the final name.

use std::fs::{self, File};
use std::io::{BufWriter, IntoInnerError};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::frame::{self, Decoded};
use crate::options::Options;
use crate::types::EnvelopeError;

fn tmp_path(path: &Path) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(".tmp");
    PathBuf::from(s)
}

fn write_synced<T: Serialize + ?Sized>(tmp: &Path, value: &T, opts: &Options) -> Result<(), EnvelopeError> {
    let mut w = BufWriter::new(File::create(tmp)?);
    frame::encode(&mut w, value, opts)?;
    let file = w.into_inner().map_err(IntoInnerError::into_error)?;
    file.sync_all()?;
    Ok(())
}

pub fn save<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T, opts: &Options) -> Result<(), EnvelopeError> {
    let path = path.as_ref();
    let tmp = tmp_path(path);

    if let Err(e) = write_synced(&tmp, value, opts) {
        if let Err(rm) = fs::remove_file(&tmp) {
            warn!(path = %tmp.display(), error = %rm, "failed to remove temporary file");
        }
        return Err(e);
    }
    fs::rename(&tmp, path)?;

    debug!(path = %path.display(), "saved");
    Ok(())
}

pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>, opts: &Options, tag: &str) -> Result<Decoded<T>, EnvelopeError> {
    let file = File::open(path.as_ref())?;
    frame::decode(file, opts, tag)
}
