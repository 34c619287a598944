//! Food file generation pipeline.
//!
//! Resolves settings, copies the manifest into a temp file, classifies it,
//! fills in download URLs and metadata, then writes a food file, JSON, or a
//! dry-run summary.

use crate::cli::Cli;
use crate::config::{FeederConfig, default_config_path};
use crate::error::{FeederError, Result};
use crate::fetch::{FileManifestSource, HttpManifestSource, ManifestSource, fetch_to_tempfile};
use crate::render::FoodRenderer;
use camino::Utf8Path;
use fish_feeder::classifier::release_identity;
use fish_feeder::manifest::SkipReason;
use fish_feeder::package::{with_download_base, with_mirror_bases};
use fish_feeder::taxonomy::{supported_arch_labels, supported_os_names};
use fish_feeder::{ClassifyError, Food, FoodMetadata, PackageMap, parse_seekable};
use log::{debug, info, warn};
use std::fmt::Write as _;
use std::io::Write;

/// Run the CLI against the real environment and home directory.
///
/// # Errors
///
/// Returns the first failure from any pipeline stage.
pub fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<()> {
    let fallback = default_config_path();
    run_with(
        cli,
        fallback.as_deref(),
        FeederConfig::from_env(),
        stdout,
        stderr,
    )
}

/// Run the CLI with an explicit fallback config path and environment layer.
///
/// # Errors
///
/// Returns the first failure from any pipeline stage.
pub fn run_with(
    cli: &Cli,
    fallback: Option<&Utf8Path>,
    env: FeederConfig,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    let config = resolve_config(cli, fallback, env)?;
    let source = select_source(cli, &config)?;
    let food = feed(source.as_ref(), &config)?;

    if cli.dry_run {
        stderr.write_all(format_summary(&food).as_bytes())?;
        return Ok(());
    }

    let rendered = if cli.json {
        render_json(&food)?
    } else {
        FoodRenderer::new()?.render(&food)?
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            info!("wrote food file to {path}");
        }
        None => stdout.write_all(rendered.as_bytes())?,
    }
    Ok(())
}

/// Layer the config file, environment, and flags.
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded.
pub fn resolve_config(
    cli: &Cli,
    fallback: Option<&Utf8Path>,
    env: FeederConfig,
) -> Result<FeederConfig> {
    let file = FeederConfig::load(cli.config.as_deref(), fallback)?;
    Ok(file.merge(env).merge(cli.overrides()))
}

/// Choose where to read the manifest from.
///
/// `--manifest` wins over any configured URL.
///
/// # Errors
///
/// Returns [`FeederError::Config`] when neither a file nor a URL is set.
pub fn select_source(cli: &Cli, config: &FeederConfig) -> Result<Box<dyn ManifestSource>> {
    if let Some(path) = &cli.manifest {
        return Ok(Box::new(FileManifestSource::new(path.clone())));
    }
    match config.url.as_deref() {
        Some(url) => Ok(Box::new(HttpManifestSource::new(url))),
        None => Err(FeederError::Config {
            reason: "no manifest source; pass --url or --manifest, or set url in the config file"
                .to_owned(),
        }),
    }
}

/// Fetch, classify, and assemble the food for `source`.
///
/// # Errors
///
/// Returns an error if fetching or reading fails, or if no line of the
/// manifest could be classified.
pub fn feed(source: &dyn ManifestSource, config: &FeederConfig) -> Result<Food> {
    let mut manifest = fetch_to_tempfile(source)?;
    let report = parse_seekable(manifest.as_file_mut())?;

    if !report.skipped.is_empty() {
        info!(
            "skipped {} manifest lines that are not installable packages",
            report.skipped.len()
        );
    }
    if report.skipped.iter().any(|line| {
        matches!(
            line.reason,
            SkipReason::Classify(ClassifyError::UnknownPlatform { .. })
        )
    }) {
        debug!(
            "recognised OS names: {}; architecture labels: {}",
            supported_os_names().collect::<Vec<_>>().join(", "),
            supported_arch_labels().collect::<Vec<_>>().join(", ")
        );
    }
    if report.packages.is_empty() {
        return Err(FeederError::EmptyPackageMap {
            source_name: source.location(),
        });
    }
    debug!("package map: {:#?}", report.packages);

    let packages = match config
        .download_base
        .clone()
        .or_else(|| source.download_base())
    {
        Some(base) => with_download_base(report.packages, &base),
        None => {
            warn!(
                "no download base known for {}; package URLs are left empty",
                source.location()
            );
            report.packages
        }
    };
    let packages = match &config.mirrors {
        Some(bases) => with_mirror_bases(packages, bases),
        None => packages,
    };

    let metadata = infer_metadata(config.metadata(), &packages);
    Ok(Food::new(metadata, packages))
}

/// Fill an empty name or version from the first classified filename.
///
/// # Examples
///
/// ```
/// use fish_feeder::{FoodMetadata, parse_manifest};
/// use fish_feeder_cli::run::infer_metadata;
///
/// let packages = parse_manifest("abc  hugo_0.40.3_Linux-64bit.tar.gz\n".as_bytes())
///     .expect("readable");
/// let metadata = infer_metadata(FoodMetadata::default(), &packages);
/// assert_eq!(metadata.name, "hugo");
/// assert_eq!(metadata.version, "0.40.3");
/// ```
#[must_use]
pub fn infer_metadata(mut metadata: FoodMetadata, packages: &PackageMap) -> FoodMetadata {
    let Some(identity) = packages.keys().find_map(|filename| release_identity(filename)) else {
        return metadata;
    };
    if metadata.name.is_empty() {
        info!("using name {} from release filenames", identity.name);
        identity.name.clone_into(&mut metadata.name);
    }
    if metadata.version.is_empty() {
        info!("using version {} from release filenames", identity.version);
        identity.version.clone_into(&mut metadata.version);
    }
    metadata
}

/// Human-readable package summary for `--dry-run`.
///
/// # Examples
///
/// ```
/// use fish_feeder::{Food, FoodMetadata, parse_manifest};
/// use fish_feeder_cli::run::format_summary;
///
/// let packages = parse_manifest("abc  hugo_0.40.3_macOS-64bit.tar.gz\n".as_bytes())
///     .expect("readable");
/// let summary = format_summary(&Food::new(FoodMetadata::default(), packages));
/// assert!(summary.contains("darwin/amd64"));
/// ```
#[must_use]
pub fn format_summary(food: &Food) -> String {
    let mut output = format!(
        "{} {}: {} packages\n",
        display_or_unset(&food.metadata.name),
        display_or_unset(&food.metadata.version),
        food.packages.len()
    );
    for (filename, package) in &food.packages {
        let platform = format!("{}/{}", package.food_name(), package.arch());
        if writeln!(output, "  {platform:<16} {filename}").is_err() {
            // Writing to a String never fails.
        }
    }
    output
}

fn display_or_unset(value: &str) -> &str {
    if value.is_empty() { "<unset>" } else { value }
}

fn render_json(food: &Food) -> Result<String> {
    let mut json = serde_json::to_string_pretty(food).map_err(|err| FeederError::Render {
        reason: err.to_string(),
    })?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
