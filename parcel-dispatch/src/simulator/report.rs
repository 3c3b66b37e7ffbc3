//! Per-trip output of the simulator.

use chrono::NaiveTime;
use parcel_core::{Location, PackageId};

/// One leg of a trip: where the truck arrived and what it dropped off.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopRecord {
    /// Stop reached at the end of the leg.
    pub location: Location,
    /// Miles driven on this leg.
    pub leg_miles: f64,
    /// Odometer reading after the leg.
    pub total_miles: f64,
    /// Wall-clock arrival time.
    pub arrived_at: NaiveTime,
    /// Packages delivered at this stop, in inventory order.
    pub delivered: Vec<PackageId>,
}

/// Everything a truck did between leaving and returning to the hub.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripReport {
    /// Label of the truck that made the trip.
    pub truck: String,
    /// Hub the trip starts and ends at.
    pub hub: Location,
    /// Scheduled departure.
    pub departure: NaiveTime,
    /// Legs in driving order; the last one returns to the hub.
    pub stops: Vec<StopRecord>,
}

impl TripReport {
    /// Miles driven over the whole trip.
    #[must_use]
    pub fn total_miles(&self) -> f64 {
        self.stops.last().map_or(0.0, |stop| stop.total_miles)
    }

    /// Time the truck got back, or its departure if it never left.
    #[must_use]
    pub fn finished_at(&self) -> NaiveTime {
        self.stops
            .last()
            .map_or(self.departure, |stop| stop.arrived_at)
    }

    /// Stops visited, starting with the hub.
    pub fn route(&self) -> impl Iterator<Item = &Location> + '_ {
        std::iter::once(&self.hub).chain(self.stops.iter().map(|stop| &stop.location))
    }

    /// Number of packages delivered over the trip.
    #[must_use]
    pub fn delivered_count(&self) -> usize {
        self.stops.iter().map(|stop| stop.delivered.len()).sum()
    }
}
