//! Error types for the fish-feeder CLI.
//!
//! Each variant names the stage that failed so the single line printed by
//! `main` tells the user where to look.

use crate::fetch::FetchError;
use camino::Utf8PathBuf;
use fish_feeder::ManifestError;
use thiserror::Error;

/// Errors that can occur while generating a food file.
#[derive(Debug, Error)]
pub enum FeederError {
    /// The configuration file or the resolved settings are unusable.
    #[error("configuration error: {reason}")]
    Config {
        /// Description of the problem.
        reason: String,
    },

    /// An explicitly requested configuration file does not exist.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        /// Path given with `--config`.
        path: Utf8PathBuf,
    },

    /// The manifest could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The manifest could not be read back for parsing.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// The food file template failed to render.
    #[error("failed to render food file: {reason}")]
    Render {
        /// Description of the template failure, including its causes.
        reason: String,
    },

    /// No manifest line could be classified into a package.
    #[error("no packages could be classified from {source_name}")]
    EmptyPackageMap {
        /// Where the manifest came from.
        source_name: String,
    },

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, FeederError>;
