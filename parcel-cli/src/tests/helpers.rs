//! Paths to the demo delivery day and small filesystem helpers.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

pub(super) fn demos_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../demos")
}

pub(super) fn demo_args() -> DayArgs {
    let demos = demos_dir();
    DayArgs {
        distances: Some(demos.join("distances.csv")),
        packages: Some(demos.join("packages.csv")),
        schedule: None,
    }
}

pub(super) fn demo_day() -> SimulatedDay {
    let config = DayConfig::try_from(demo_args()).expect("demo paths are set");
    SimulatedDay::run(&config).expect("demo day simulates")
}

pub(super) fn utf8_root(dir: &tempfile::TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace")
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture file");
}

pub(super) fn output_text(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).expect("output is utf-8")
}
