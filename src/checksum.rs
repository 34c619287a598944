//! Checksum column of a manifest line.
//!
//! The value is carried through to the food file exactly as the manifest
//! states it. Nothing here verifies it against file contents; the shape check
//! only feeds diagnostics.

use serde::Serialize;
use std::fmt;

/// Expected length of a hex-encoded SHA-256 digest.
const DIGEST_HEX_LEN: usize = 64;

/// A checksum string taken verbatim from a manifest line.
///
/// # Examples
///
/// ```
/// use fish_feeder::checksum::Checksum;
///
/// let digest = Checksum::from("a".repeat(64));
/// assert!(digest.looks_like_sha256());
/// assert!(!Checksum::from("deadbeef").looks_like_sha256());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Checksum(String);

impl Checksum {
    /// Return the checksum as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the value is 64 lowercase hexadecimal characters.
    #[must_use]
    pub fn looks_like_sha256(&self) -> bool {
        self.0.len() == DIGEST_HEX_LEN
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, 'a'..='f'))
    }
}

impl From<&str> for Checksum {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Checksum {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
