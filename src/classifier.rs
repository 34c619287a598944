//! Positional classifier for release artefact filenames.
//!
//! Release assets follow the layout `<name>_<version>_<os>-<arch>.<ext>`, for
//! example `hugo_0.40.3_macOS-64bit.tar.gz`. The classifier reads that layout
//! by position rather than by searching for known keywords:
//!
//! 1. the filename is split on runs of `_` into at most three fields, and the
//!    third field (with any further underscores) carries the platform;
//! 2. the platform field is cut at its first `.`;
//! 3. the remainder is split on the first run of `-` into OS and arch.
//!
//! Two consequences follow and are kept deliberately. An OS name or
//! architecture label containing `.` is truncated at the dot, and an
//! architecture label containing `-` is returned whole after the first hyphen
//! run, so it only classifies if the taxonomy lists it verbatim.

use crate::error::{ClassifyError, Result};
use crate::taxonomy::{OsInfo, lookup_arch, lookup_os};

/// Number of underscore-delimited fields up to and including the platform.
const UNDERSCORE_FIELDS: usize = 3;

/// Number of hyphen-delimited fields in the platform field.
const HYPHEN_FIELDS: usize = 2;

/// Raw OS and architecture labels cut out of a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformLabels<'a> {
    /// OS name as written in the filename, e.g. `"macOS"`.
    pub os: &'a str,
    /// Architecture label as written in the filename, e.g. `"64bit"`.
    pub arch: &'a str,
}

/// A filename's platform after taxonomy lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Taxonomy entry for the OS.
    pub os: OsInfo,
    /// Canonical architecture identifier, e.g. `"amd64"`.
    pub arch: &'static str,
}

/// Extract the OS name and architecture label from a release filename.
///
/// # Errors
///
/// Returns [`ClassifyError::MalformedFilename`] when the filename has fewer
/// than three underscore-delimited fields or its platform field has no
/// hyphen.
///
/// # Examples
///
/// ```
/// use fish_feeder::classifier::classify;
///
/// let labels = classify("hugo_0.40.3_Linux-64bit.tar.gz").expect("well formed");
/// assert_eq!(labels.os, "Linux");
/// assert_eq!(labels.arch, "64bit");
/// ```
pub fn classify(filename: &str) -> Result<PlatformLabels<'_>> {
    let fields = split_runs(filename, '_', UNDERSCORE_FIELDS);
    let &[_, _, platform_field] = fields.as_slice() else {
        return Err(malformed(filename, "expected at least three '_'-separated fields"));
    };

    let platform = strip_extension(platform_field);
    let labels = split_runs(platform, '-', HYPHEN_FIELDS);
    let &[os, arch] = labels.as_slice() else {
        return Err(malformed(filename, "expected '<os>-<arch>' after the version"));
    };

    Ok(PlatformLabels { os, arch })
}

/// Classify a filename and resolve both labels through the taxonomy.
///
/// # Errors
///
/// Returns [`ClassifyError::MalformedFilename`] for layout failures and
/// [`ClassifyError::UnknownPlatform`] when either label is not listed in the
/// taxonomy. The OS name is checked first.
///
/// # Examples
///
/// ```
/// use fish_feeder::classifier::resolve_platform;
/// use fish_feeder::taxonomy::OsKind;
///
/// let platform = resolve_platform("hugo_0.40.3_Windows-32bit.zip").expect("known");
/// assert_eq!(platform.os.kind, OsKind::Windows);
/// assert_eq!(platform.arch, "386");
/// ```
pub fn resolve_platform(filename: &str) -> Result<Platform> {
    let labels = classify(filename)?;
    let os = lookup_os(labels.os).ok_or_else(|| unknown(labels.os, filename))?;
    let arch = lookup_arch(labels.arch).ok_or_else(|| unknown(labels.arch, filename))?;
    Ok(Platform { os, arch })
}

/// Software name and version read from the first two fields of a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseIdentity<'a> {
    /// The leading name field, e.g. `"hugo"`.
    pub name: &'a str,
    /// The version field, e.g. `"0.40.3"`.
    pub version: &'a str,
}

/// Read the name and version fields of a well-formed release filename.
///
/// Returns `None` when the filename does not have the three positional
/// fields [`classify`] requires, or when either leading field is empty.
///
/// # Examples
///
/// ```
/// use fish_feeder::classifier::release_identity;
///
/// let identity = release_identity("hugo_0.40.3_Linux-64bit.tar.gz").expect("three fields");
/// assert_eq!(identity.name, "hugo");
/// assert_eq!(identity.version, "0.40.3");
/// ```
#[must_use]
pub fn release_identity(filename: &str) -> Option<ReleaseIdentity<'_>> {
    let fields = split_runs(filename, '_', UNDERSCORE_FIELDS);
    match *fields.as_slice() {
        [name, version, _] if !name.is_empty() && !version.is_empty() => {
            Some(ReleaseIdentity { name, version })
        }
        _ => None,
    }
}

/// Split `input` on runs of `delimiter`, returning at most `limit` fields.
///
/// The last field holds the unsplit remainder. A leading delimiter run yields
/// an empty first field.
fn split_runs(input: &str, delimiter: char, limit: usize) -> Vec<&str> {
    let mut fields = Vec::with_capacity(limit);
    let mut rest = input;
    while fields.len() + 1 < limit {
        let Some((head, tail)) = rest.split_once(delimiter) else {
            break;
        };
        fields.push(head);
        rest = tail.trim_start_matches(delimiter);
    }
    fields.push(rest);
    fields
}

/// Cut the platform field at its first `.`.
fn strip_extension(field: &str) -> &str {
    field.split_once('.').map_or(field, |(head, _)| head)
}

fn malformed(filename: &str, reason: &'static str) -> ClassifyError {
    ClassifyError::MalformedFilename {
        filename: filename.to_owned(),
        reason,
    }
}

fn unknown(token: &str, filename: &str) -> ClassifyError {
    ClassifyError::UnknownPlatform {
        token: token.to_owned(),
        filename: filename.to_owned(),
    }
}
