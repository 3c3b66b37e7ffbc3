//! Behavioural tests for `load_day`.

use std::cell::RefCell;

use camino::Utf8PathBuf;
use parcel_core::PackageId;
use parcel_data::{DeliveryDay, LoadError, LoaderConfig, load_day};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

fn demos_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../demos")
}

#[derive(Debug)]
struct LoadWorld {
    scratch: TempDir,
    config: RefCell<Option<LoaderConfig>>,
    outcome: RefCell<Option<Result<DeliveryDay, LoadError>>>,
}

impl LoadWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn new() -> Self {
        Self {
            scratch: TempDir::new().expect("create temp dir"),
            config: RefCell::new(None),
            outcome: RefCell::new(None),
        }
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn scratch_path(&self, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.scratch.path().join(name)).expect("utf-8 temp path")
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn with_day<T>(&self, f: impl FnOnce(&DeliveryDay) -> T) -> T {
        let outcome = self.outcome.borrow();
        let day = outcome
            .as_ref()
            .expect("load should be attempted")
            .as_ref()
            .expect("expected the day to load");
        f(day)
    }
}

#[fixture]
fn world() -> LoadWorld {
    LoadWorld::new()
}

#[given("the sample distance table and package manifest")]
fn given_sample_day(world: &LoadWorld) {
    let demos = demos_dir();
    world.config.replace(Some(LoaderConfig::new(
        demos.join("distances.csv"),
        demos.join("packages.csv"),
    )));
}

#[given("the sample distance table and a missing package manifest")]
fn given_missing_manifest(world: &LoadWorld) {
    let config = LoaderConfig::new(
        demos_dir().join("distances.csv"),
        world.scratch_path("absent.csv"),
    );
    world.config.replace(Some(config));
}

#[given("a schedule file with a single trip")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn given_schedule_file(world: &LoadWorld) {
    let path = world.scratch_path("schedule.json");
    let ids: Vec<String> = (1..=16).map(|id: u32| id.to_string()).collect();
    let json = format!(
        r#"[{{"label": "Truck 1", "departure": "08:00:00", "packages": [{}]}}]"#,
        ids.join(", ")
    );
    std::fs::write(&path, json).expect("write schedule");
    let mut config = world.config.borrow_mut();
    let current = config.take().expect("tables should be given first");
    *config = Some(current.with_schedule(path));
}

#[when("the day is loaded")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn when_loaded(world: &LoadWorld) {
    let outcome = {
        let config = world.config.borrow();
        load_day(config.as_ref().expect("config should be given"))
    };
    world.outcome.replace(Some(outcome));
}

#[then("{packages} packages and {locations} locations are available")]
fn then_counts(world: &LoadWorld, packages: usize, locations: usize) {
    world.with_day(|day| {
        assert_eq!(day.directory.len(), packages);
        assert_eq!(day.graph.location_count(), locations);
    });
}

#[then("the hub is {address}")]
fn then_hub(world: &LoadWorld, address: String) {
    let hub = world.with_day(|day| day.hub.address.clone());
    assert_eq!(hub, address.trim_matches('"'));
}

#[then("the schedule has {trips} trips")]
fn then_trips(world: &LoadWorld, trips: usize) {
    assert_eq!(world.with_day(|day| day.schedule.len()), trips);
}

#[then("package {id} is addressed to {address}")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_package_address(world: &LoadWorld, id: u32, address: String) {
    let package = PackageId::new(id).expect("positive id in feature");
    let (street, label) = world.with_day(|day| {
        let record = day.directory.get(package).expect("package present");
        (
            record.destination.address.clone(),
            record.destination.label.clone(),
        )
    });
    assert_eq!(street, address.trim_matches('"'));
    assert_eq!(label, "Third District Juvenile Court");
}

#[then("loading fails to open the manifest")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_open_fails(world: &LoadWorld) {
    let outcome = world.outcome.borrow();
    let result = outcome.as_ref().expect("load should be attempted");
    assert!(matches!(
        result,
        Err(LoadError::Open { path, .. }) if path.as_str().ends_with("absent.csv")
    ));
}

#[scenario(path = "tests/features/load_day.feature", index = 0)]
fn sample_day(world: LoadWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/load_day.feature", index = 1)]
fn corrected_address(world: LoadWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/load_day.feature", index = 2)]
fn json_schedule(world: LoadWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/load_day.feature", index = 3)]
fn missing_manifest(world: LoadWorld) {
    let _ = world;
}
