//! Layered configuration for food file generation.
//!
//! Settings come from four layers, later ones winning field by field:
//! built-in defaults, a TOML file (`--config` or `~/.fish-feeder.toml`),
//! `FISH_FEEDER_*` environment variables, and command-line flags.

use crate::error::{FeederError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use directories_next::BaseDirs;
use fish_feeder::FoodMetadata;
use log::{debug, info};
use serde::Deserialize;

/// File name of the per-user configuration file in the home directory.
pub const CONFIG_FILE_NAME: &str = ".fish-feeder.toml";

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "FISH_FEEDER_";

/// Settings for one food file run. Every field is optional at each layer.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FeederConfig {
    /// URL of the checksum manifest.
    pub url: Option<String>,
    /// URL prefix under which the release assets are published. Defaults to
    /// the directory of `url`.
    pub download_base: Option<String>,
    /// Extra URL prefixes that also serve the release assets.
    pub mirrors: Option<Vec<String>>,
    /// Software name.
    pub name: Option<String>,
    /// One-line description.
    pub description: Option<String>,
    /// SPDX licence identifier.
    pub license: Option<String>,
    /// Project homepage.
    pub homepage: Option<String>,
    /// Post-install caveats.
    pub caveats: Option<String>,
    /// Released version.
    pub version: Option<String>,
}

impl FeederConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`FeederError::Config`] on malformed TOML or unknown keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use fish_feeder_cli::config::FeederConfig;
    ///
    /// let config = FeederConfig::from_toml("name = \"hugo\"\n").expect("valid TOML");
    /// assert_eq!(config.name.as_deref(), Some("hugo"));
    /// ```
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|err| FeederError::Config {
            reason: err.to_string(),
        })
    }

    /// Read and parse the TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FeederError::ConfigNotFound`] if the file is missing and
    /// [`FeederError::Config`] if it cannot be read or parsed.
    pub fn from_file(path: &Utf8Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => FeederError::ConfigNotFound {
                path: path.to_path_buf(),
            },
            _ => FeederError::Config {
                reason: format!("cannot read {path}: {err}"),
            },
        })?;
        toml::from_str(&source).map_err(|err| FeederError::Config {
            reason: format!("{path}: {err}"),
        })
    }

    /// Load the file layer.
    ///
    /// An `explicit` path must exist. Otherwise `fallback` is read when it
    /// exists, and defaults are used when it does not.
    ///
    /// # Errors
    ///
    /// Returns an error when the chosen file cannot be read or parsed.
    pub fn load(explicit: Option<&Utf8Path>, fallback: Option<&Utf8Path>) -> Result<Self> {
        if let Some(path) = explicit {
            info!("using config file {path}");
            return Self::from_file(path);
        }
        match fallback {
            Some(path) if path.is_file() => {
                info!("using config file {path}");
                Self::from_file(path)
            }
            Some(path) => {
                debug!("no config file at {path}; using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Build the environment layer from `lookup`.
    ///
    /// Each field is read from `FISH_FEEDER_<FIELD>` (for example
    /// `FISH_FEEDER_DOWNLOAD_BASE`). Empty values are ignored.
    /// `FISH_FEEDER_MIRRORS` is a comma-separated list.
    #[must_use]
    pub fn from_env_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |field: &str| {
            lookup(&format!("{ENV_PREFIX}{field}")).filter(|value| !value.trim().is_empty())
        };
        Self {
            url: read("URL"),
            download_base: read("DOWNLOAD_BASE"),
            mirrors: read("MIRRORS").map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|base| !base.is_empty())
                    .map(str::to_owned)
                    .collect()
            }),
            name: read("NAME"),
            description: read("DESCRIPTION"),
            license: read("LICENSE"),
            homepage: read("HOMEPAGE"),
            caveats: read("CAVEATS"),
            version: read("VERSION"),
        }
    }

    /// Build the environment layer from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Overlay `overrides` on top of `self`; set fields in `overrides` win.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            url: overrides.url.or(self.url),
            download_base: overrides.download_base.or(self.download_base),
            mirrors: overrides.mirrors.or(self.mirrors),
            name: overrides.name.or(self.name),
            description: overrides.description.or(self.description),
            license: overrides.license.or(self.license),
            homepage: overrides.homepage.or(self.homepage),
            caveats: overrides.caveats.or(self.caveats),
            version: overrides.version.or(self.version),
        }
    }

    /// Metadata for the food header; unset fields become empty strings.
    #[must_use]
    pub fn metadata(&self) -> FoodMetadata {
        FoodMetadata {
            name: self.name.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            license: self.license.clone().unwrap_or_default(),
            homepage: self.homepage.clone().unwrap_or_default(),
            caveats: self.caveats.clone().unwrap_or_default(),
            version: self.version.clone().unwrap_or_default(),
        }
    }
}

/// Path of the per-user configuration file, if a home directory is known.
#[must_use]
pub fn default_config_path() -> Option<Utf8PathBuf> {
    let dirs = BaseDirs::new()?;
    let home = Utf8PathBuf::from_path_buf(dirs.home_dir().to_path_buf()).ok()?;
    Some(home.join(CONFIG_FILE_NAME))
}
