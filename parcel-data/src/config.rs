//! Paths the loader reads from.

use camino::Utf8PathBuf;

/// Input files for one delivery day.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoaderConfig {
    /// Lower-triangular distance table CSV.
    pub distance_table: Utf8PathBuf,
    /// Package manifest CSV.
    pub package_file: Utf8PathBuf,
    /// JSON truck schedule; the built-in reference schedule when absent.
    pub schedule: Option<Utf8PathBuf>,
}

impl LoaderConfig {
    /// Read the given tables and use the built-in schedule.
    #[must_use]
    pub fn new(
        distance_table: impl Into<Utf8PathBuf>,
        package_file: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            distance_table: distance_table.into(),
            package_file: package_file.into(),
            schedule: None,
        }
    }

    /// Read the truck schedule from a JSON file.
    #[must_use]
    pub fn with_schedule(mut self, schedule: impl Into<Utf8PathBuf>) -> Self {
        self.schedule = Some(schedule.into());
        self
    }
}
