//! Behaviour-driven tests covering release filename classification.

use std::cell::RefCell;

use fish_feeder::ClassifyError;
use fish_feeder::classifier::{Platform, resolve_platform};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Default)]
struct ClassificationWorld {
    filename: RefCell<String>,
    outcome: RefCell<Option<Result<Platform, ClassifyError>>>,
}

#[fixture]
fn world() -> ClassificationWorld {
    ClassificationWorld::default()
}

fn resolved(world: &ClassificationWorld) -> Platform {
    let borrow = world.outcome.borrow();
    match borrow.as_ref() {
        Some(Ok(platform)) => *platform,
        Some(Err(err)) => panic!("expected a platform, got {err}"),
        None => panic!("the filename should have been classified"),
    }
}

fn failure(world: &ClassificationWorld) -> ClassifyError {
    let borrow = world.outcome.borrow();
    match borrow.as_ref() {
        Some(Err(err)) => err.clone(),
        Some(Ok(platform)) => panic!("expected a failure, got {platform:?}"),
        None => panic!("the filename should have been classified"),
    }
}

#[given("the release filename \"{filename}\"")]
fn set_filename(world: &ClassificationWorld, filename: String) {
    world.filename.replace(filename);
}

#[when("the filename is classified")]
fn classify_filename(world: &ClassificationWorld) {
    let outcome = resolve_platform(&world.filename.borrow());
    world.outcome.replace(Some(outcome));
}

#[then("the OS kind is \"{kind}\"")]
fn assert_kind(world: &ClassificationWorld, kind: String) {
    assert_eq!(resolved(world).os.kind.as_str(), kind);
}

#[then("the food name is \"{name}\"")]
fn assert_food_name(world: &ClassificationWorld, name: String) {
    assert_eq!(resolved(world).os.food_name, name);
}

#[then("the architecture is \"{arch}\"")]
fn assert_arch(world: &ClassificationWorld, arch: String) {
    assert_eq!(resolved(world).arch, arch);
}

#[then("classification fails as a malformed filename")]
fn assert_malformed(world: &ClassificationWorld) {
    let err = failure(world);
    assert!(
        matches!(err, ClassifyError::MalformedFilename { .. }),
        "expected MalformedFilename, got {err:?}"
    );
}

#[then("classification reports the unknown token \"{token}\"")]
fn assert_unknown_token(world: &ClassificationWorld, token: String) {
    let err = failure(world);
    let ClassifyError::UnknownPlatform { token: reported, .. } = err else {
        panic!("expected UnknownPlatform");
    };
    assert_eq!(reported, token);
}

#[scenario(
    path = "tests/features/classification.feature",
    name = "Classify a Linux tarball"
)]
fn scenario_linux(world: ClassificationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/classification.feature",
    name = "Classify a macOS archive as darwin"
)]
fn scenario_macos(world: ClassificationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/classification.feature",
    name = "Classify a Windows zip"
)]
fn scenario_windows(world: ClassificationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/classification.feature",
    name = "Reject a filename with too few underscore fields"
)]
fn scenario_too_few_fields(world: ClassificationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/classification.feature",
    name = "Reject a platform field without a hyphen"
)]
fn scenario_no_hyphen(world: ClassificationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/classification.feature",
    name = "Report an unknown operating system"
)]
fn scenario_unknown_os(world: ClassificationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/classification.feature",
    name = "Report an unknown architecture"
)]
fn scenario_unknown_arch(world: ClassificationWorld) {
    let _ = world;
}
