//! Greedy nearest-neighbour stop selection.

use std::cmp::Ordering;

use parcel_core::{AddressGraph, DispatchPlanner, Location, PackageRecord};

/// How to choose between equidistant destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum TieBreak {
    /// Keep the first record met while scanning the inventory.
    #[default]
    FirstInInventory,
    /// Prefer the record with the smaller package identifier.
    LowestPackageId,
}

/// Always drive to the closest destination still on board.
///
/// Candidates whose distance is missing from the graph are skipped with a
/// warning. When no candidate is reachable the first inventory destination is
/// returned so the caller can decide how to handle the missing leg.
///
/// # Examples
/// ```
/// use parcel_core::DispatchPlanner;
/// use parcel_core::test_support::{TriangleRoute, record};
/// use parcel_dispatch::NearestNeighbourPlanner;
///
/// let triangle = TriangleRoute::new();
/// let inventory = vec![record(2, &triangle.far), record(1, &triangle.near)];
/// let planner = NearestNeighbourPlanner::default();
///
/// let next = planner.next_stop(&triangle.graph, &triangle.hub, &inventory);
/// assert_eq!(next, &triangle.near);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighbourPlanner {
    tie_break: TieBreak,
}

impl NearestNeighbourPlanner {
    /// Build a planner with an explicit tie-break rule.
    #[must_use]
    pub const fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    /// The configured tie-break rule.
    #[must_use]
    pub const fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    fn prefers(&self, candidate: &PackageRecord, incumbent: Option<&PackageRecord>) -> bool {
        match (self.tie_break, incumbent) {
            (TieBreak::LowestPackageId, Some(best)) => candidate.id < best.id,
            (TieBreak::FirstInInventory, _) | (_, None) => false,
        }
    }
}

impl DispatchPlanner for NearestNeighbourPlanner {
    fn next_stop<'a>(
        &self,
        graph: &AddressGraph,
        current: &'a Location,
        inventory: &'a [PackageRecord],
    ) -> &'a Location {
        // Any finite seed would hide candidates at or beyond it.
        let mut best_distance = f64::INFINITY;
        let mut best: Option<&'a PackageRecord> = None;
        for record in inventory {
            let distance = match graph.distance_between(current, &record.destination) {
                Ok(distance) => distance,
                Err(err) => {
                    log::warn!("skipping package {} as a candidate: {err}", record.id);
                    continue;
                }
            };
            let replace = match distance.total_cmp(&best_distance) {
                Ordering::Less => true,
                Ordering::Equal => self.prefers(record, best),
                Ordering::Greater => false,
            };
            if replace {
                best_distance = distance;
                best = Some(record);
            }
        }
        match (best, inventory.first()) {
            (Some(record), _) => &record.destination,
            (None, Some(first)) => {
                log::warn!(
                    "no reachable destination from {current}; falling back to {}",
                    first.destination
                );
                &first.destination
            }
            (None, None) => current,
        }
    }
}
