//! Unit tests for the generation pipeline.

use super::*;
use crate::fetch::MockManifestSource;
use camino::Utf8PathBuf;
use clap::Parser;
use rstest::{fixture, rstest};
use std::io::Write;

const HUGO_MANIFEST: &str = concat!(
    "1111  hugo_0.40.3_Linux-64bit.tar.gz\n",
    "2222  hugo_0.40.3_macOS-64bit.tar.gz\n",
    "3333  hugo_0.40.3_Windows-64bit.zip\n",
    "4444  hugo_0.40.3_checksums.txt\n",
);

fn mock_source(manifest: &'static str, base: Option<&'static str>) -> MockManifestSource {
    let mut source = MockManifestSource::new();
    source
        .expect_location()
        .returning(|| "mock://checksums.txt".to_owned());
    source
        .expect_download_base()
        .returning(move || base.map(str::to_owned));
    source.expect_copy_into().returning(move |dest| {
        dest.write_all(manifest.as_bytes())?;
        Ok(u64::try_from(manifest.len()).expect("manifest length fits in u64"))
    });
    source
}

#[fixture]
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("temp dir")
}

fn utf8(path: std::path::PathBuf) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(path).expect("utf-8 path")
}

#[test]
fn feed_classifies_and_fills_urls_from_source() {
    let source = mock_source(HUGO_MANIFEST, Some("https://example.test/v0.40.3"));

    let food = feed(&source, &FeederConfig::default()).expect("feed succeeds");

    assert_eq!(food.packages.len(), 3);
    let package = food
        .packages
        .get("hugo_0.40.3_Windows-64bit.zip")
        .expect("classified");
    assert_eq!(
        package.url(),
        "https://example.test/v0.40.3/hugo_0.40.3_Windows-64bit.zip"
    );
    assert_eq!(food.metadata.name, "hugo");
    assert_eq!(food.metadata.version, "0.40.3");
}

#[test]
fn configured_download_base_wins_over_source() {
    let source = mock_source(HUGO_MANIFEST, Some("https://example.test/v0.40.3"));
    let config = FeederConfig {
        download_base: Some("https://mirror.test/hugo/".to_owned()),
        ..FeederConfig::default()
    };

    let food = feed(&source, &config).expect("feed succeeds");

    assert!(
        food.packages
            .values()
            .all(|package| package.url().starts_with("https://mirror.test/hugo/hugo_"))
    );
}

#[test]
fn configured_mirrors_are_joined_per_package() {
    let source = mock_source(HUGO_MANIFEST, Some("https://example.test/v0.40.3"));
    let config = FeederConfig {
        mirrors: Some(vec!["https://mirror.test/hugo".to_owned()]),
        ..FeederConfig::default()
    };

    let food = feed(&source, &config).expect("feed succeeds");

    let package = food
        .packages
        .get("hugo_0.40.3_macOS-64bit.tar.gz")
        .expect("classified");
    assert_eq!(
        package.mirrors(),
        Some(["https://mirror.test/hugo/hugo_0.40.3_macOS-64bit.tar.gz".to_owned()].as_slice())
    );
}

#[test]
fn missing_download_base_leaves_urls_empty() {
    let source = mock_source(HUGO_MANIFEST, None);

    let food = feed(&source, &FeederConfig::default()).expect("feed succeeds");

    assert!(food.packages.values().all(|package| package.url().is_empty()));
}

#[test]
fn manifest_without_packages_is_an_error() {
    let source = mock_source("aaaa  bogus\nbbbb  hugo_0.40.3_checksums.txt\n", None);

    let err = feed(&source, &FeederConfig::default()).expect_err("nothing classified");

    assert!(matches!(
        err,
        FeederError::EmptyPackageMap { source_name } if source_name == "mock://checksums.txt"
    ));
}

#[rstest]
#[case::both_unset("", "", "hugo", "0.40.3")]
#[case::name_set("gohugo", "", "gohugo", "0.40.3")]
#[case::both_set("gohugo", "1.0.0", "gohugo", "1.0.0")]
fn infer_metadata_only_fills_blanks(
    #[case] name: &str,
    #[case] version: &str,
    #[case] expected_name: &str,
    #[case] expected_version: &str,
) {
    let packages = fish_feeder::parse_manifest(HUGO_MANIFEST.as_bytes()).expect("readable");
    let metadata = FoodMetadata {
        name: name.to_owned(),
        version: version.to_owned(),
        ..FoodMetadata::default()
    };

    let inferred = infer_metadata(metadata, &packages);

    assert_eq!(inferred.name, expected_name);
    assert_eq!(inferred.version, expected_version);
}

#[test]
fn select_source_requires_url_or_manifest() {
    let cli = Cli::parse_from(["fish-feeder"]);
    let result = select_source(&cli, &FeederConfig::default());
    assert!(matches!(result, Err(FeederError::Config { .. })));
}

#[test]
fn select_source_prefers_local_manifest() {
    let cli = Cli::parse_from(["fish-feeder", "--manifest", "sums.txt"]);
    let config = FeederConfig {
        url: Some("https://example.test/sums.txt".to_owned()),
        ..FeederConfig::default()
    };

    let source = select_source(&cli, &config).expect("source chosen");

    assert_eq!(source.location(), "sums.txt");
}

#[rstest]
fn config_layers_apply_in_order(temp_dir: tempfile::TempDir) {
    let path = utf8(temp_dir.path().join("feeder.toml"));
    std::fs::write(
        &path,
        "name = \"file\"\nlicense = \"MIT\"\nhomepage = \"https://file.test\"\n",
    )
    .expect("write config");
    let env = FeederConfig {
        license: Some("Apache-2.0".to_owned()),
        homepage: Some("https://env.test".to_owned()),
        ..FeederConfig::default()
    };
    let cli = Cli::parse_from(["fish-feeder", "--homepage", "https://flag.test"]);

    let config = resolve_config(&cli, Some(&path), env).expect("config resolves");

    assert_eq!(config.name.as_deref(), Some("file"));
    assert_eq!(config.license.as_deref(), Some("Apache-2.0"));
    assert_eq!(config.homepage.as_deref(), Some("https://flag.test"));
}

fn write_manifest(temp_dir: &tempfile::TempDir) -> Utf8PathBuf {
    let path = utf8(temp_dir.path().join("checksums.txt"));
    std::fs::write(&path, HUGO_MANIFEST).expect("write manifest");
    path
}

#[rstest]
fn run_with_renders_lua_to_stdout(temp_dir: tempfile::TempDir) {
    let manifest = write_manifest(&temp_dir);
    let cli = Cli::parse_from([
        "fish-feeder",
        "--manifest",
        manifest.as_str(),
        "--download-base",
        "https://example.test/v0.40.3",
        "--license",
        "Apache-2.0",
    ]);
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();

    run_with(&cli, None, FeederConfig::default(), &mut stdout, &mut stderr).expect("run succeeds");

    let lua = String::from_utf8(stdout).expect("utf-8 output");
    assert!(lua.starts_with("local name = \"hugo\"\n"));
    assert!(lua.contains("license = \"Apache-2.0\""));
    assert!(lua.contains("os = \"darwin\""));
    assert!(stderr.is_empty());
}

#[rstest]
fn run_with_dry_run_writes_summary_to_stderr(temp_dir: tempfile::TempDir) {
    let manifest = write_manifest(&temp_dir);
    let cli = Cli::parse_from(["fish-feeder", "--manifest", manifest.as_str(), "--dry-run"]);
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();

    run_with(&cli, None, FeederConfig::default(), &mut stdout, &mut stderr).expect("run succeeds");

    assert!(stdout.is_empty());
    let summary = String::from_utf8(stderr).expect("utf-8 summary");
    assert!(summary.starts_with("hugo 0.40.3: 3 packages\n"));
    assert!(summary.contains("windows/amd64"));
}

#[rstest]
fn run_with_json_emits_package_map(temp_dir: tempfile::TempDir) {
    let manifest = write_manifest(&temp_dir);
    let cli = Cli::parse_from(["fish-feeder", "--manifest", manifest.as_str(), "--json"]);
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();

    run_with(&cli, None, FeederConfig::default(), &mut stdout, &mut stderr).expect("run succeeds");

    let value: serde_json::Value = serde_json::from_slice(&stdout).expect("valid JSON");
    assert_eq!(value["name"], "hugo");
    assert_eq!(
        value["packages"]["hugo_0.40.3_Linux-64bit.tar.gz"]["os"],
        "unix"
    );
    assert_eq!(
        value["packages"]["hugo_0.40.3_Linux-64bit.tar.gz"]["resources"][0]["installpath"],
        "\"bin/\" .. name"
    );
}

#[rstest]
fn run_with_output_writes_file(temp_dir: tempfile::TempDir) {
    let manifest = write_manifest(&temp_dir);
    let output = utf8(temp_dir.path().join("hugo.lua"));
    let cli = Cli::parse_from([
        "fish-feeder",
        "--manifest",
        manifest.as_str(),
        "--output",
        output.as_str(),
    ]);
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();

    run_with(&cli, None, FeederConfig::default(), &mut stdout, &mut stderr).expect("run succeeds");

    assert!(stdout.is_empty());
    let lua = std::fs::read_to_string(&output).expect("food file written");
    assert!(lua.contains("food = {"));
}

#[test]
fn run_with_missing_source_fails() {
    let cli = Cli::parse_from(["fish-feeder"]);
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();

    let err = run_with(&cli, None, FeederConfig::default(), &mut stdout, &mut stderr)
        .expect_err("no source");

    assert!(matches!(err, FeederError::Config { .. }));
}
