//! Derive a package's status at an arbitrary time of day.

use std::fmt;

use chrono::NaiveTime;

use super::{ArrivalNote, PackageRecord};
use crate::clock::format_clock;

/// Where a package is in its lifecycle at a given moment.
///
/// `Display` produces the status text shown to dispatchers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PackageStatus {
    /// Not yet at the hub; the note explains why.
    AwaitingArrival(ArrivalNote),
    /// At the hub, not yet loaded.
    AtHub,
    /// Loaded onto `truck` and not yet delivered.
    EnRoute {
        /// Carrying truck.
        truck: String,
    },
    /// Dropped off by `truck` at `at`.
    Delivered {
        /// Delivering truck.
        truck: String,
        /// Delivery time.
        at: NaiveTime,
    },
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AwaitingArrival(note) => note.fmt(f),
            Self::AtHub => f.write_str("waiting at HUB"),
            Self::EnRoute { truck } => write!(f, "{truck} en route"),
            Self::Delivered { truck, at } => {
                write!(f, "{truck} delivered at {}", format_clock(*at))
            }
        }
    }
}

/// Status of `record` at wall-clock time `query`.
///
/// Each phase starts exactly at its timestamp: querying at `delivered_at`
/// reports delivered, at `loaded_at` reports en route, and at `arrived_at`
/// reports waiting at the hub.
///
/// # Examples
/// ```
/// use parcel_core::{Deadline, Location, PackageId, PackageRecord, clock, status_at};
///
/// let mut record = PackageRecord::new(
///     PackageId::new(3).expect("positive id"),
///     Location::unlabelled("233 Canyon Rd", "84103"),
///     Deadline::EndOfDay,
///     2.0,
/// );
/// record.mark_loaded("Truck 1", clock(9, 0));
///
/// assert_eq!(status_at(&record, clock(8, 59)).to_string(), "waiting at HUB");
/// assert_eq!(status_at(&record, clock(9, 0)).to_string(), "Truck 1 en route");
/// ```
#[must_use]
pub fn status_at(record: &PackageRecord, query: NaiveTime) -> PackageStatus {
    if query < record.arrived_at() {
        return PackageStatus::AwaitingArrival(record.arrival_note());
    }
    let Some(loading) = record.loading().filter(|loading| query >= loading.at) else {
        return PackageStatus::AtHub;
    };
    match record.delivered_at() {
        Some(at) if query >= at => PackageStatus::Delivered {
            truck: loading.truck.clone(),
            at,
        },
        _ => PackageStatus::EnRoute {
            truck: loading.truck.clone(),
        },
    }
}
