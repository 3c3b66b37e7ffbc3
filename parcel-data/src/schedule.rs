//! Manual truck schedules.
//!
//! Two vehicles make two trips each. The package lists are fixed by hand,
//! not computed.

use std::io::Read;

use camino::Utf8Path;
use parcel_core::{PackageId, clock};
use parcel_dispatch::TruckAssignment;

use crate::LoadError;
use crate::fs::open_utf8_file;

fn trip(label: &str, hour: u32, minute: u32, packages: &[u32]) -> TruckAssignment {
    TruckAssignment::new(
        label,
        clock(hour, minute),
        packages.iter().copied().filter_map(PackageId::new),
    )
}

/// The schedule for the reference delivery day.
///
/// # Examples
/// ```
/// use parcel_core::clock;
/// use parcel_data::reference_schedule;
///
/// let schedule = reference_schedule();
/// let departures: Vec<_> = schedule.iter().map(|trip| trip.departure).collect();
/// assert_eq!(departures, [clock(8, 0), clock(9, 5), clock(8, 0), clock(10, 20)]);
/// assert_eq!(schedule.iter().map(|trip| trip.packages.len()).sum::<usize>(), 40);
/// ```
#[must_use]
pub fn reference_schedule() -> Vec<TruckAssignment> {
    vec![
        trip(
            "Truck 1a",
            8,
            0,
            &[13, 14, 15, 16, 19, 20, 21, 34, 39, 27, 35],
        ),
        trip("Truck 1b", 9, 5, &[6, 25, 26, 28, 32, 11, 12, 17, 22, 23]),
        trip(
            "Truck 2a",
            8,
            0,
            &[1, 3, 4, 7, 8, 18, 29, 30, 31, 36, 37, 38, 40],
        ),
        trip("Truck 2b", 10, 20, &[5, 9, 2, 10, 24, 33]),
    ]
}

/// Read a JSON schedule from `path`.
///
/// # Errors
///
/// Returns [`LoadError::Open`] when the file cannot be opened and
/// [`LoadError::Schedule`] when it does not decode.
pub fn load_schedule(path: &Utf8Path) -> Result<Vec<TruckAssignment>, LoadError> {
    let file = open_utf8_file(path).map_err(|source| LoadError::Open {
        path: path.to_owned(),
        source,
    })?;
    parse_schedule(file, path)
}

/// Decode a JSON list of trips; `origin` names the source in errors.
///
/// Each trip is `{"label": ..., "departure": "HH:MM:SS", "packages": [...]}`.
///
/// # Errors
///
/// Returns [`LoadError::Schedule`] for malformed JSON, zero package ids or
/// unparseable times.
pub fn parse_schedule<R: Read>(
    reader: R,
    origin: &Utf8Path,
) -> Result<Vec<TruckAssignment>, LoadError> {
    serde_json::from_reader(reader).map_err(|source| LoadError::Schedule {
        path: origin.to_owned(),
        source,
    })
}
