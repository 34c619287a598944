//! Classify checksummed release artefacts into GoFish package descriptors.
//!
//! Release pages usually publish a `checksums.txt` manifest listing every
//! asset with its SHA-256 digest. This crate reads such a manifest, works out
//! the operating system and architecture of each asset from its filename, and
//! builds the package descriptors a GoFish food file needs.
//!
//! # Modules
//!
//! - [`taxonomy`] - OS and architecture lookup tables
//! - [`classifier`] - Positional filename classification
//! - [`resource`] - Binary path and install path layouts per OS kind
//! - [`checksum`] - Checksum column wrapper
//! - [`package`] - Package descriptors and the food aggregate
//! - [`manifest`] - Manifest parsing with skip diagnostics
//! - [`error`] - Classification and manifest errors

pub mod checksum;
pub mod classifier;
pub mod error;
pub mod manifest;
pub mod package;
pub mod resource;
pub mod taxonomy;

pub use error::{ClassifyError, ManifestError};
pub use manifest::{ParseReport, parse_manifest, parse_seekable};
pub use package::{Food, FoodMetadata, PackageDescriptor, PackageMap};
