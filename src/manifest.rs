//! Checksum manifest parsing.
//!
//! A manifest lists one artefact per line as `<hash><whitespace><filename>`,
//! the format written by `sha256sum` and published next to most GitHub
//! releases. Each line is classified into a [`PackageDescriptor`]. Lines that
//! cannot be decoded, split or classified are skipped with a debug log entry,
//! since release manifests routinely list files that are not installable
//! packages (the checksum file itself, source archives, `.deb` duplicates with
//! other naming). Only a failure to read the stream aborts a parse.

use crate::checksum::Checksum;
use crate::classifier::resolve_platform;
use crate::error::{ClassifyError, ManifestError};
use crate::package::{PackageDescriptor, PackageMap};
use log::{debug, warn};
use std::io::{self, BufRead, BufReader, Read, Seek};
use thiserror::Error;

/// Why a manifest line produced no package.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// The line is not valid UTF-8.
    #[error("line is not valid UTF-8")]
    InvalidUtf8,

    /// The line has no whitespace separating a hash from a filename.
    #[error("line is not '<hash> <filename>'")]
    MissingSeparator,

    /// The filename could not be classified.
    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

/// A manifest line that was skipped, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number within the manifest.
    pub line_number: usize,
    /// Why the line was skipped.
    pub reason: SkipReason,
}

/// The packages parsed from a manifest plus the lines that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Classified packages keyed by filename.
    pub packages: PackageMap,
    /// Lines that produced no package, in manifest order.
    pub skipped: Vec<SkippedLine>,
}

/// Split a manifest line at its first whitespace run into hash and filename.
///
/// A single `*` before the filename (the binary-mode marker written by
/// `sha256sum -b`) and trailing whitespace are dropped. Returns `None` when
/// there is no whitespace or either side is empty.
///
/// # Examples
///
/// ```
/// use fish_feeder::manifest::split_line;
///
/// assert_eq!(
///     split_line("abc123  hugo_0.40.3_Linux-64bit.tar.gz"),
///     Some(("abc123", "hugo_0.40.3_Linux-64bit.tar.gz"))
/// );
/// assert_eq!(
///     split_line("abc123 *hugo_0.40.3_Windows-64bit.zip"),
///     Some(("abc123", "hugo_0.40.3_Windows-64bit.zip"))
/// );
/// assert_eq!(split_line("bogus"), None);
/// ```
#[must_use]
pub fn split_line(line: &str) -> Option<(&str, &str)> {
    let (hash, rest) = line.split_once(char::is_whitespace)?;
    let field = rest.trim();
    let filename = field.strip_prefix('*').unwrap_or(field);
    if hash.is_empty() || filename.is_empty() {
        return None;
    }
    Some((hash, filename))
}

/// Classify `filename` and build its descriptor with `hash` as checksum.
///
/// # Errors
///
/// Returns a [`ClassifyError`] when the filename is malformed or names an
/// unknown platform.
pub fn build_descriptor(hash: &str, filename: &str) -> Result<PackageDescriptor, ClassifyError> {
    let platform = resolve_platform(filename)?;
    let checksum = Checksum::from(hash);
    if !checksum.looks_like_sha256() {
        warn!("checksum for {filename} is not a 64-character lowercase hex digest");
    }
    Ok(PackageDescriptor::new(platform, checksum))
}

/// Parse manifest lines, keeping a record of every skipped line.
///
/// Lines are raw bytes; a trailing `\r` is dropped and a line that is not
/// UTF-8 is skipped. A later line for the same filename replaces an earlier
/// one.
///
/// # Errors
///
/// Returns [`ManifestError::InputRead`] when the line source yields an I/O
/// error. The error carries the packages collected before the failure.
pub fn parse_lines_with_report<I, S>(lines: I) -> Result<ParseReport, ManifestError>
where
    I: IntoIterator<Item = io::Result<S>>,
    S: AsRef<[u8]>,
{
    let mut report = ParseReport::default();
    for (index, next) in lines.into_iter().enumerate() {
        let line_number = index + 1;
        let line = match next {
            Ok(line) => line,
            Err(source) => {
                return Err(ManifestError::InputRead {
                    line: line_number,
                    source,
                    partial: report.packages,
                });
            }
        };

        match decode_line(line.as_ref()).and_then(parse_line) {
            Ok((filename, package)) => {
                if report.packages.insert(filename.to_owned(), package).is_some() {
                    debug!("manifest line {line_number} replaces an earlier entry for {filename}");
                }
            }
            Err(reason) => {
                debug!("skipping manifest line {line_number}: {reason}");
                report.skipped.push(SkippedLine {
                    line_number,
                    reason,
                });
            }
        }
    }

    debug!(
        "classified {} manifest entries, skipped {} lines",
        report.packages.len(),
        report.skipped.len()
    );
    Ok(report)
}

/// Parse manifest lines into a [`PackageMap`].
///
/// # Errors
///
/// Returns [`ManifestError::InputRead`] when the line source yields an I/O
/// error.
pub fn parse_lines<I, S>(lines: I) -> Result<PackageMap, ManifestError>
where
    I: IntoIterator<Item = io::Result<S>>,
    S: AsRef<[u8]>,
{
    parse_lines_with_report(lines).map(|report| report.packages)
}

/// Parse a manifest from a buffered reader.
///
/// # Errors
///
/// Returns [`ManifestError::InputRead`] when reading fails.
///
/// # Examples
///
/// ```
/// use fish_feeder::manifest::parse_manifest;
///
/// let text = "\
/// abc  hugo_0.40.3_Linux-64bit.tar.gz
/// def  hugo_0.40.3_checksums.txt
/// ";
/// let packages = parse_manifest(text.as_bytes()).expect("in-memory read");
/// assert_eq!(packages.len(), 1);
/// ```
pub fn parse_manifest<R: BufRead>(reader: R) -> Result<PackageMap, ManifestError> {
    parse_lines(reader.split(b'\n'))
}

/// Rewind `reader` to its start, then parse it as a manifest.
///
/// # Errors
///
/// Returns [`ManifestError::Rewind`] if seeking fails, otherwise as
/// [`parse_manifest`].
pub fn parse_seekable<R: Read + Seek>(reader: R) -> Result<ParseReport, ManifestError> {
    let mut buffered = BufReader::new(reader);
    buffered.rewind().map_err(ManifestError::Rewind)?;
    parse_lines_with_report(buffered.split(b'\n'))
}

fn decode_line(raw: &[u8]) -> Result<&str, SkipReason> {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    std::str::from_utf8(raw).map_err(|_| SkipReason::InvalidUtf8)
}

fn parse_line(line: &str) -> Result<(&str, PackageDescriptor), SkipReason> {
    let (hash, filename) = split_line(line).ok_or(SkipReason::MissingSeparator)?;
    let package = build_descriptor(hash, filename)?;
    Ok((filename, package))
}
