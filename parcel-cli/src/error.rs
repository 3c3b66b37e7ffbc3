//! Error types emitted by the parcel CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use chrono::NaiveTime;
use parcel_core::PackageId;
use parcel_data::LoadError;
use parcel_dispatch::{AssignmentError, SimulationError};
use thiserror::Error;

/// Errors emitted by the parcel CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing flag.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// The distance table, manifest or schedule could not be read.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The schedule does not partition the manifest.
    #[error("invalid schedule: {0}")]
    Assignment(#[from] AssignmentError),
    /// A truck could not finish its trip.
    #[error("simulation failed: {0}")]
    Simulation(#[from] SimulationError),
    /// A one-shot status query was rejected.
    #[error(transparent)]
    Query(#[from] QueryError),
    /// Serializing the JSON report failed.
    #[error("failed to serialize report: {0}")]
    SerializeReport(#[source] serde_json::Error),
    /// Writing output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Reading menu input failed.
    #[error("failed to read input: {0}")]
    ReadInput(#[source] std::io::Error),
}

/// A time or package id typed by the user was rejected.
///
/// The menu reports these and asks again; the `status` subcommand exits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The time is not four digits forming a valid clock time.
    #[error("{input:?} is not a time in HHMM format")]
    BadTimeFormat {
        /// Text as typed.
        input: String,
    },
    /// Statuses are only available once the hub opens.
    #[error("{} is before the hub opens at 08:00", .time.format("%H:%M"))]
    BeforeOpening {
        /// Parsed time.
        time: NaiveTime,
    },
    /// The package id is not a whole number.
    #[error("{input:?} is not a package id")]
    BadPackageId {
        /// Text as typed.
        input: String,
    },
    /// The package id is outside `1..=max`.
    #[error("package id {id} is out of range (1 to {max})")]
    PackageOutOfRange {
        /// Parsed id.
        id: u32,
        /// Number of packages in the directory.
        max: usize,
    },
    /// The id is in range but no package carries it.
    #[error("package {id} is not in the manifest")]
    UnknownPackage {
        /// Requested id.
        id: PackageId,
    },
}
