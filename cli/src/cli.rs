//! CLI argument definitions for fish-feeder.
//!
//! Metadata flags mirror the configuration file keys so that
//! [`Cli::overrides`] can layer them over file and environment settings.

use crate::config::FeederConfig;
use camino::Utf8PathBuf;
use clap::Parser;

/// Generate a GoFish food file from a release checksum manifest.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "fish-feeder")]
#[command(version, about)]
#[command(long_about = concat!(
    "Generate a GoFish food file from a release checksum manifest.\n\n",
    "Each line of the manifest pairs a SHA-256 digest with a release asset named ",
    "<name>_<version>_<os>-<arch>.<ext>. Assets whose OS and architecture are ",
    "recognised become packages in the generated Lua food file; everything else ",
    "is skipped.\n\n",
    "Settings are read from ~/.fish-feeder.toml (or --config), then FISH_FEEDER_* ",
    "environment variables, then the flags below.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Generate a food file for a Hugo release:\n",
    "    $ fish-feeder --url https://github.com/gohugoio/hugo/releases/download/v0.40.3/hugo_0.40.3_checksums.txt\n\n",
    "  Use a local manifest and publish URL:\n",
    "    $ fish-feeder --manifest checksums.txt --download-base https://example.test/v1.0.0\n\n",
    "  Preview the classified packages:\n",
    "    $ fish-feeder --url <URL> --dry-run",
))]
pub struct Cli {
    /// Configuration file [default: ~/.fish-feeder.toml].
    #[arg(long, value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Checksum manifest URL.
    #[arg(short, long, value_name = "URL", conflicts_with = "manifest")]
    pub url: Option<String>,

    /// Read the checksum manifest from a local file instead of a URL.
    #[arg(short, long, value_name = "FILE")]
    pub manifest: Option<Utf8PathBuf>,

    /// Write the food file here instead of standard output.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,

    /// URL prefix for package downloads [default: directory of --url].
    #[arg(long, value_name = "URL")]
    pub download_base: Option<String>,

    /// Additional URL prefix serving the same assets (repeatable).
    #[arg(long = "mirror", value_name = "URL")]
    pub mirrors: Vec<String>,

    /// Software name [default: first segment of the first asset name].
    #[arg(long)]
    pub name: Option<String>,

    /// One-line description.
    #[arg(long)]
    pub description: Option<String>,

    /// SPDX licence identifier.
    #[arg(long)]
    pub license: Option<String>,

    /// Project homepage.
    #[arg(long)]
    pub homepage: Option<String>,

    /// Post-install caveats.
    #[arg(long)]
    pub caveats: Option<String>,

    /// Released version [default: second segment of the first asset name].
    #[arg(long = "release-version", value_name = "VERSION")]
    pub release_version: Option<String>,

    /// Emit the classified packages as JSON instead of a food file.
    #[arg(long, conflicts_with = "dry_run")]
    pub json: bool,

    /// Print a package summary to stderr and skip rendering.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Cli {
    /// The configuration layer contributed by command-line flags.
    ///
    /// # Examples
    ///
    /// ```
    /// use clap::Parser;
    /// use fish_feeder_cli::cli::Cli;
    ///
    /// let cli = Cli::parse_from(["fish-feeder", "--name", "hugo", "--release-version", "0.40.3"]);
    /// let overrides = cli.overrides();
    /// assert_eq!(overrides.name.as_deref(), Some("hugo"));
    /// assert_eq!(overrides.version.as_deref(), Some("0.40.3"));
    /// ```
    #[must_use]
    pub fn overrides(&self) -> FeederConfig {
        FeederConfig {
            url: self.url.clone(),
            download_base: self.download_base.clone(),
            mirrors: (!self.mirrors.is_empty()).then(|| self.mirrors.clone()),
            name: self.name.clone(),
            description: self.description.clone(),
            license: self.license.clone(),
            homepage: self.homepage.clone(),
            caveats: self.caveats.clone(),
            version: self.release_version.clone(),
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
