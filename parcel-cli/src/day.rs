//! Resolving the delivery-day inputs and running the fleet.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use parcel_core::PackageDirectory;
use parcel_data::{DeliveryDay, LoaderConfig, load_day};
use parcel_dispatch::{Fleet, FleetConfig, FleetReport, TruckSimulator};
use serde::{Deserialize, Serialize};

use crate::{ARG_DISTANCES, ARG_PACKAGES, ARG_SCHEDULE, CliError, ENV_DISTANCES, ENV_PACKAGES};

// Shared by every subcommand. Config files use a `[cmds.day]` table and
// environment variables the `PARCEL_CMDS_DAY_` prefix.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "day")]
#[ortho_config(prefix = "PARCEL")]
pub(crate) struct DayArgs {
    /// Path to the distance table CSV.
    #[arg(long = ARG_DISTANCES, value_name = "path")]
    #[serde(default)]
    pub(crate) distances: Option<Utf8PathBuf>,
    /// Path to the package manifest CSV.
    #[arg(long = ARG_PACKAGES, value_name = "path")]
    #[serde(default)]
    pub(crate) packages: Option<Utf8PathBuf>,
    /// Path to a JSON truck schedule; the built-in schedule is used otherwise.
    #[arg(long = ARG_SCHEDULE, value_name = "path")]
    #[serde(default)]
    pub(crate) schedule: Option<Utf8PathBuf>,
}

impl DayArgs {
    pub(crate) fn into_config(self) -> Result<DayConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        DayConfig::try_from(merged)
    }
}

/// Resolved input paths for one delivery day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DayConfig {
    pub(crate) distances: Utf8PathBuf,
    pub(crate) packages: Utf8PathBuf,
    pub(crate) schedule: Option<Utf8PathBuf>,
}

impl DayConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.distances, ARG_DISTANCES)?;
        Self::require_existing(&self.packages, ARG_PACKAGES)?;
        if let Some(schedule) = &self.schedule {
            Self::require_existing(schedule, ARG_SCHEDULE)?;
        }
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match parcel_data::fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub(crate) fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            schedule: self.schedule.clone(),
            ..LoaderConfig::new(self.distances.clone(), self.packages.clone())
        }
    }
}

impl TryFrom<DayArgs> for DayConfig {
    type Error = CliError;

    fn try_from(args: DayArgs) -> Result<Self, Self::Error> {
        let distances = args.distances.ok_or(CliError::MissingArgument {
            field: ARG_DISTANCES,
            env: ENV_DISTANCES,
        })?;
        let packages = args.packages.ok_or(CliError::MissingArgument {
            field: ARG_PACKAGES,
            env: ENV_PACKAGES,
        })?;
        Ok(Self {
            distances,
            packages,
            schedule: args.schedule,
        })
    }
}

/// The directory after every truck has finished, plus the trip logs.
#[derive(Debug, Clone)]
pub(crate) struct SimulatedDay {
    pub(crate) directory: PackageDirectory,
    pub(crate) report: FleetReport,
}

impl SimulatedDay {
    /// Load the day described by `config` and drive every scheduled trip.
    pub(crate) fn run(config: &DayConfig) -> Result<Self, CliError> {
        let DeliveryDay {
            graph,
            hub,
            mut directory,
            schedule,
        } = load_day(&config.loader_config())?;
        let mut fleet = Fleet::assign(&mut directory, &hub, &schedule, FleetConfig::default())?;
        let outcome = fleet.run(&graph, &TruckSimulator::default());
        fleet.restore(&mut directory);
        let report = outcome?;
        tracing::info!(
            trips = report.trips.len(),
            packages = directory.len(),
            total_miles = report.total_miles(),
            "simulated delivery day"
        );
        Ok(Self { directory, report })
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<DayConfig, CliError> {
    let merged = DayArgs::merge_from_layers(layers).map_err(CliError::from)?;
    DayConfig::try_from(merged)
}
