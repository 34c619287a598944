//! Manifest retrieval into a temporary file.
//!
//! A [`ManifestSource`] copies the raw checksum manifest into a caller-owned
//! file. [`fetch_to_tempfile`] pairs a source with a `fish-feeder-*` temp
//! file that is removed when dropped, ready to be rewound and parsed.

use camino::Utf8PathBuf;
use log::debug;
use std::fs::File;
use std::io;
use std::sync::OnceLock;
use std::time::Duration;
use tempfile::NamedTempFile;

/// Network timeout for manifest downloads.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Prefix of the temporary file holding a downloaded manifest.
pub const TEMPFILE_PREFIX: &str = "fish-feeder-";

/// Somewhere a checksum manifest can be copied from.
///
/// Abstractions allow tests to replace HTTP access with canned content.
#[cfg_attr(test, mockall::automock)]
pub trait ManifestSource {
    /// Human-readable location used in logs and error messages.
    fn location(&self) -> String;

    /// URL prefix that release assets listed in the manifest live under, if
    /// it can be derived from the location.
    fn download_base(&self) -> Option<String>;

    /// Copy the manifest bytes into `dest`, returning the number of bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest is missing, the transfer fails, or
    /// `dest` cannot be written.
    fn copy_into(&self, dest: &mut File) -> Result<u64, FetchError>;
}

/// Errors arising while fetching a manifest.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("download failed for {url}: {reason}")]
    HttpError {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The manifest does not exist (HTTP 404 or a missing local file).
    #[error("manifest not found: {location}")]
    NotFound {
        /// The URL or path that was requested.
        location: String,
    },

    /// I/O error writing or reading the manifest.
    #[error("I/O error while fetching manifest: {0}")]
    Io(#[from] io::Error),
}

/// Manifest served over HTTP(S).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpManifestSource {
    url: String,
}

impl HttpManifestSource {
    /// Create a source for the manifest at `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl ManifestSource for HttpManifestSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    fn download_base(&self) -> Option<String> {
        parent_url(&self.url).map(str::to_owned)
    }

    fn copy_into(&self, dest: &mut File) -> Result<u64, FetchError> {
        let response = http_agent()
            .get(&self.url)
            .call()
            .map_err(|e| map_ureq_error(&self.url, &e))?;
        let copied = io::copy(&mut response.into_body().as_reader(), dest)?;
        Ok(copied)
    }
}

/// Manifest already present on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileManifestSource {
    path: Utf8PathBuf,
}

impl FileManifestSource {
    /// Create a source for the manifest at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ManifestSource for FileManifestSource {
    fn location(&self) -> String {
        self.path.to_string()
    }

    fn download_base(&self) -> Option<String> {
        None
    }

    fn copy_into(&self, dest: &mut File) -> Result<u64, FetchError> {
        let mut input = File::open(&self.path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => FetchError::NotFound {
                location: self.path.to_string(),
            },
            _ => FetchError::Io(err),
        })?;
        Ok(io::copy(&mut input, dest)?)
    }
}

/// Copy the manifest from `source` into a fresh temporary file.
///
/// The file is deleted when the returned handle is dropped. Its cursor is
/// left at the end of the written data; rewind before reading.
///
/// # Errors
///
/// Returns an error if the temp file cannot be created or the source fails.
pub fn fetch_to_tempfile(source: &dyn ManifestSource) -> Result<NamedTempFile, FetchError> {
    let mut file = tempfile::Builder::new()
        .prefix(TEMPFILE_PREFIX)
        .suffix(".txt")
        .tempfile()?;
    let copied = source.copy_into(file.as_file_mut())?;
    debug!(
        "copied {copied} bytes from {} into {}",
        source.location(),
        file.path().display()
    );
    Ok(file)
}

/// Return the URL with its final path segment removed.
///
/// Returns `None` when the URL has no path after the host.
///
/// # Examples
///
/// ```
/// use fish_feeder_cli::fetch::parent_url;
///
/// assert_eq!(
///     parent_url("https://github.com/gohugoio/hugo/releases/download/v0.40.3/hugo_0.40.3_checksums.txt"),
///     Some("https://github.com/gohugoio/hugo/releases/download/v0.40.3"),
/// );
/// assert_eq!(parent_url("https://example.test"), None);
/// ```
#[must_use]
pub fn parent_url(url: &str) -> Option<&str> {
    let (_, after_scheme) = url.split_once("://")?;
    if !after_scheme.contains('/') {
        return None;
    }
    url.rsplit_once('/').map(|(dir, _)| dir)
}

/// Shared `ureq` agent with request timeout configuration.
fn http_agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(|| {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(DOWNLOAD_TIMEOUT))
            .build();
        ureq::Agent::new_with_config(config)
    })
}

/// Map a ureq error to a [`FetchError`].
fn map_ureq_error(url: &str, err: &ureq::Error) -> FetchError {
    match err {
        ureq::Error::StatusCode(404) => FetchError::NotFound {
            location: url.to_owned(),
        },
        other => FetchError::HttpError {
            url: url.to_owned(),
            reason: other.to_string(),
        },
    }
}
