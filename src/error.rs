//! Error types for filename classification and manifest parsing.
//!
//! Classification failures are recoverable: the manifest parser records them
//! as skip reasons and moves on to the next line. Only a failure to read the
//! manifest stream itself is surfaced to callers.

use crate::package::PackageMap;
use thiserror::Error;

/// Reasons a single filename could not be turned into a platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The filename does not follow the `name_version_os-arch.ext` layout.
    #[error("malformed filename \"{filename}\": {reason}")]
    MalformedFilename {
        /// The rejected filename.
        filename: String,
        /// Which segmentation step failed.
        reason: &'static str,
    },

    /// The OS name or architecture label is missing from the taxonomy.
    #[error("unknown platform token \"{token}\" in \"{filename}\"")]
    UnknownPlatform {
        /// The unrecognised OS name or architecture label.
        token: String,
        /// The filename the token was taken from.
        filename: String,
    },
}

/// Errors that abort a manifest parse pass.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Reading the manifest stream failed part way through.
    ///
    /// `partial` holds every entry classified before the failing line.
    #[error("failed to read manifest at line {line}: {source}")]
    InputRead {
        /// 1-based number of the line that could not be read.
        line: usize,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
        /// Entries collected before the failure.
        partial: PackageMap,
    },

    /// The manifest stream could not be rewound before parsing.
    #[error("failed to rewind manifest: {0}")]
    Rewind(#[source] std::io::Error),
}

/// Result type alias using [`ClassifyError`].
pub type Result<T> = std::result::Result<T, ClassifyError>;
