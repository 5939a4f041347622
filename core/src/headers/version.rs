//! headers/version.rs
//! Format-version compatibility policy.
//!
//! The format version describes the envelope layout and is distinct from
//! the caller's content version. Tolerated versions are decodable, but
//! their content-version field is not trusted.

use crate::constants::{FORMAT_VERSION, TOLERATED_FORMAT_VERSIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCheck {
    /// Written by this implementation.
    Current,
    /// Older but readable; skip the content-version check.
    Tolerated { got: u8 },
    /// Not readable.
    Incompatible { got: u8 },
}

impl VersionCheck {
    /// Whether the content version may be compared against the caller's.
    pub fn checks_content_version(&self) -> bool {
        matches!(self, VersionCheck::Current)
    }
}

pub fn classify_format_version(got: u8) -> VersionCheck {
    if got == FORMAT_VERSION {
        VersionCheck::Current
    } else if TOLERATED_FORMAT_VERSIONS.contains(&got) {
        VersionCheck::Tolerated { got }
    } else {
        VersionCheck::Incompatible { got }
    }
}
