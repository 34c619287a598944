//! Static OS and architecture tables for release filenames.
//!
//! Release assets name their platform with human-readable labels such as
//! `macOS` or `64bit`. These tables map those labels onto the identifiers
//! GoFish expects. Lookups are case-sensitive and return `None` for any label
//! not listed, leaving the caller to decide whether a miss is fatal.

use serde::Serialize;
use std::fmt;

/// Broad operating-system family, which selects the resource layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OsKind {
    /// Unix-like systems: Linux, macOS and the BSDs.
    Unix,
    /// Microsoft Windows.
    Windows,
}

impl OsKind {
    /// Return the canonical identifier for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unix => "unix",
            Self::Windows => "windows",
        }
    }
}

impl fmt::Display for OsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Taxonomy entry for one supported operating system.
///
/// `kind` and `food_name` are independent: macOS is a [`OsKind::Unix`] system
/// whose GoFish name is `darwin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OsInfo {
    /// The OS family.
    pub kind: OsKind,
    /// The short OS name used in food files.
    pub food_name: &'static str,
}

impl OsInfo {
    const fn unix(food_name: &'static str) -> Self {
        Self {
            kind: OsKind::Unix,
            food_name,
        }
    }

    const fn windows(food_name: &'static str) -> Self {
        Self {
            kind: OsKind::Windows,
            food_name,
        }
    }
}

/// OS names as they appear in release filenames.
const OS_TABLE: &[(&str, OsInfo)] = &[
    ("DragonFlyBSD", OsInfo::unix("dragonflybsd")),
    ("FreeBSD", OsInfo::unix("freebsd")),
    ("Linux", OsInfo::unix("linux")),
    ("NetBSD", OsInfo::unix("netbsd")),
    ("OpenBSD", OsInfo::unix("openbsd")),
    ("Windows", OsInfo::windows("windows")),
    ("macOS", OsInfo::unix("darwin")),
];

/// Architecture labels as they appear in release filenames.
const ARCH_TABLE: &[(&str, &str)] = &[
    ("32bit", "386"),
    ("64bit", "amd64"),
    ("ARM", "arm"),
    ("ARM64", "arm64"),
];

/// Look up the taxonomy entry for an OS name such as `"Linux"`.
///
/// # Examples
///
/// ```
/// use fish_feeder::taxonomy::{lookup_os, OsKind};
///
/// let info = lookup_os("macOS").expect("macOS is listed");
/// assert_eq!(info.kind, OsKind::Unix);
/// assert_eq!(info.food_name, "darwin");
/// assert!(lookup_os("Plan9").is_none());
/// ```
#[must_use]
pub fn lookup_os(name: &str) -> Option<OsInfo> {
    OS_TABLE
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, info)| *info)
}

/// Look up the canonical identifier for an architecture label such as
/// `"64bit"`.
///
/// # Examples
///
/// ```
/// use fish_feeder::taxonomy::lookup_arch;
///
/// assert_eq!(lookup_arch("64bit"), Some("amd64"));
/// assert_eq!(lookup_arch("riscv64"), None);
/// ```
#[must_use]
pub fn lookup_arch(label: &str) -> Option<&'static str> {
    ARCH_TABLE
        .iter()
        .find(|(key, _)| *key == label)
        .map(|(_, arch)| *arch)
}

/// Iterate over every OS name the taxonomy recognises.
pub fn supported_os_names() -> impl Iterator<Item = &'static str> {
    OS_TABLE.iter().map(|(name, _)| *name)
}

/// Iterate over every architecture label the taxonomy recognises.
pub fn supported_arch_labels() -> impl Iterator<Item = &'static str> {
    ARCH_TABLE.iter().map(|(label, _)| *label)
}
