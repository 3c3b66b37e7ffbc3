//! Small graphs and records shared by unit, behaviour and property tests.

use crate::clock::clock;
use crate::{AddressGraph, Deadline, DeliveryTruck, Location, PackageId, PackageRecord};

/// Hub `A` with stops `B` (4 mi) and `C` (6 mi); `B` to `C` is 3 mi.
#[derive(Debug, Clone)]
pub struct TriangleRoute {
    /// Distances between the three locations, including zero self-loops.
    pub graph: AddressGraph,
    /// Start and end of every trip.
    pub hub: Location,
    /// Closest stop to the hub.
    pub near: Location,
    /// Farthest stop from the hub.
    pub far: Location,
}

impl TriangleRoute {
    /// Build the three-location graph.
    #[must_use]
    pub fn new() -> Self {
        let hub = Location::new("A", "1 Hub Way", "84000");
        let near = Location::new("B", "2 Near St", "84001");
        let far = Location::new("C", "3 Far Ave", "84002");
        let mut graph = AddressGraph::new();
        for location in [&hub, &near, &far] {
            graph.add_undirected_edge(location, location, 0.0);
        }
        graph.add_undirected_edge(&hub, &near, 4.0);
        graph.add_undirected_edge(&hub, &far, 6.0);
        graph.add_undirected_edge(&near, &far, 3.0);
        Self {
            graph,
            hub,
            near,
            far,
        }
    }

    /// A truck at the hub departing at 08:00 carrying one package for each
    /// stop, far stop loaded first.
    #[must_use]
    #[expect(
        clippy::expect_used,
        reason = "fixture loads two packages into an empty truck"
    )]
    pub fn loaded_truck(&self) -> DeliveryTruck {
        let mut truck = DeliveryTruck::new("Truck 1", self.hub.clone(), clock(8, 0));
        truck
            .load(record(2, &self.far))
            .expect("empty truck has room");
        truck
            .load(record(1, &self.near))
            .expect("empty truck has room");
        truck
    }
}

impl Default for TriangleRoute {
    fn default() -> Self {
        Self::new()
    }
}

/// A package bound for `destination` with an end-of-day deadline.
///
/// Zero is mapped to package 1 so helpers never need to unwrap.
#[must_use]
pub fn record(raw_id: u32, destination: &Location) -> PackageRecord {
    let id = PackageId::new(raw_id).unwrap_or(PackageId::MIN);
    PackageRecord::new(id, destination.clone(), Deadline::EndOfDay, 1.0)
}

/// Tolerance used by [`assert_close`].
pub const MILES_EPSILON: f64 = 1.0e-9;

/// Compare mileages within a small epsilon.
///
/// # Panics
///
/// Panics when the values differ by more than [`MILES_EPSILON`].
#[expect(
    clippy::float_arithmetic,
    reason = "test delta computation requires float maths"
)]
pub fn assert_close(actual: f64, expected: f64) {
    let delta = (actual - expected).abs();
    assert!(
        delta <= MILES_EPSILON,
        "expected {expected}, got {actual} (|Δ| = {delta})"
    );
}
