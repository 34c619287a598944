//! Package descriptors and the aggregate handed to rendering.
//!
//! A [`PackageDescriptor`] is created once per classified manifest line and
//! not changed afterwards; the URL and mirror builders consume the descriptor
//! and return a new one. [`Food`] bundles the descriptors with the software
//! metadata that a food file header needs.

use crate::checksum::Checksum;
use crate::classifier::Platform;
use crate::resource::{ResourceTemplate, resolve_resource};
use crate::taxonomy::OsKind;
use serde::Serialize;
use std::collections::BTreeMap;

/// Descriptors keyed by artefact filename.
///
/// Ordered by filename so rendering is deterministic.
pub type PackageMap = BTreeMap<String, PackageDescriptor>;

/// One installable package for a single OS and architecture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageDescriptor {
    os: OsKind,
    food_name: &'static str,
    arch: &'static str,
    resources: Vec<&'static ResourceTemplate>,
    url: String,
    mirrors: Option<Vec<String>>,
    sha256: Checksum,
}

impl PackageDescriptor {
    /// Build a descriptor for a resolved platform.
    ///
    /// The URL starts empty and there are no mirrors.
    ///
    /// # Examples
    ///
    /// ```
    /// use fish_feeder::classifier::resolve_platform;
    /// use fish_feeder::package::PackageDescriptor;
    ///
    /// let platform = resolve_platform("hugo_0.40.3_Linux-64bit.tar.gz").expect("known");
    /// let package = PackageDescriptor::new(platform, "deadbeef".into());
    /// assert_eq!(package.os().as_str(), "unix");
    /// assert_eq!(package.food_name(), "linux");
    /// assert_eq!(package.arch(), "amd64");
    /// assert!(package.url().is_empty());
    /// ```
    #[must_use]
    pub fn new(platform: Platform, sha256: Checksum) -> Self {
        Self {
            os: platform.os.kind,
            food_name: platform.os.food_name,
            arch: platform.arch,
            resources: vec![resolve_resource(platform.os.kind)],
            url: String::new(),
            mirrors: None,
            sha256,
        }
    }

    /// Return a copy of this descriptor with `url` set.
    #[must_use]
    pub fn with_url(self, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..self
        }
    }

    /// Return a copy of this descriptor with the given mirror URLs.
    #[must_use]
    pub fn with_mirrors(self, mirrors: Vec<String>) -> Self {
        Self {
            mirrors: Some(mirrors),
            ..self
        }
    }

    /// The OS kind identifier (`unix` or `windows`).
    #[must_use]
    pub const fn os(&self) -> OsKind {
        self.os
    }

    /// The GoFish OS name, e.g. `darwin`.
    #[must_use]
    pub const fn food_name(&self) -> &'static str {
        self.food_name
    }

    /// The canonical architecture identifier, e.g. `amd64`.
    #[must_use]
    pub const fn arch(&self) -> &'static str {
        self.arch
    }

    /// The resources installed from this package.
    #[must_use]
    pub fn resources(&self) -> &[&'static ResourceTemplate] {
        &self.resources
    }

    /// The download URL, empty until filled in.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Mirror URLs, if any were set.
    #[must_use]
    pub fn mirrors(&self) -> Option<&[String]> {
        self.mirrors.as_deref()
    }

    /// The checksum copied from the manifest.
    #[must_use]
    pub const fn sha256(&self) -> &Checksum {
        &self.sha256
    }
}

/// Set every descriptor's URL to `<base>/<filename>`.
///
/// A trailing `/` on `base` is ignored.
///
/// # Examples
///
/// ```
/// use fish_feeder::manifest::parse_manifest;
/// use fish_feeder::package::with_download_base;
///
/// let packages = parse_manifest("abc  hugo_0.40.3_Linux-64bit.tar.gz\n".as_bytes())
///     .expect("readable");
/// let packages = with_download_base(packages, "https://example.test/v0.40.3/");
/// let package = packages.get("hugo_0.40.3_Linux-64bit.tar.gz").expect("classified");
/// assert_eq!(package.url(), "https://example.test/v0.40.3/hugo_0.40.3_Linux-64bit.tar.gz");
/// ```
#[must_use]
pub fn with_download_base(packages: PackageMap, base: &str) -> PackageMap {
    let trimmed = base.trim_end_matches('/');
    packages
        .into_iter()
        .map(|(filename, package)| {
            let url = format!("{trimmed}/{filename}");
            (filename, package.with_url(url))
        })
        .collect()
}

/// Give every descriptor one mirror URL per base, `<base>/<filename>`.
///
/// Bases are joined as in [`with_download_base`]. An empty `bases` slice
/// leaves the descriptors without mirrors.
///
/// # Examples
///
/// ```
/// use fish_feeder::manifest::parse_manifest;
/// use fish_feeder::package::with_mirror_bases;
///
/// let packages = parse_manifest("abc  hugo_0.40.3_Linux-64bit.tar.gz\n".as_bytes())
///     .expect("readable");
/// let packages = with_mirror_bases(packages, &["https://mirror.test/hugo/".to_owned()]);
/// let package = packages.get("hugo_0.40.3_Linux-64bit.tar.gz").expect("classified");
/// assert_eq!(
///     package.mirrors(),
///     Some(["https://mirror.test/hugo/hugo_0.40.3_Linux-64bit.tar.gz".to_owned()].as_slice())
/// );
/// ```
#[must_use]
pub fn with_mirror_bases(packages: PackageMap, bases: &[String]) -> PackageMap {
    if bases.is_empty() {
        return packages;
    }
    packages
        .into_iter()
        .map(|(filename, package)| {
            let mirrors = bases
                .iter()
                .map(|base| format!("{}/{filename}", base.trim_end_matches('/')))
                .collect();
            (filename, package.with_mirrors(mirrors))
        })
        .collect()
}

/// Software metadata for the food file header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FoodMetadata {
    /// Software name, also the binary name in resource paths.
    pub name: String,
    /// One-line human description.
    pub description: String,
    /// SPDX licence identifier.
    pub license: String,
    /// Project homepage URL.
    pub homepage: String,
    /// Free-form caveats shown after installation.
    pub caveats: String,
    /// Released version string.
    pub version: String,
}

/// Everything a food file is rendered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Food {
    /// Header metadata.
    #[serde(flatten)]
    pub metadata: FoodMetadata,
    /// Classified packages keyed by artefact filename.
    pub packages: PackageMap,
}

impl Food {
    /// Bundle metadata and packages.
    #[must_use]
    pub const fn new(metadata: FoodMetadata, packages: PackageMap) -> Self {
        Self { metadata, packages }
    }
}
