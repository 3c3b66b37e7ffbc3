//! Drive one truck through its deliveries and back to the hub.
//!
//! The loop runs at most once per record on board when the trip starts. Each
//! pass asks the planner for a stop, drives there and unloads every record
//! addressed to it. Once the inventory is empty the truck returns to its hub
//! directly, bypassing the planner.

use parcel_core::{AddressGraph, DeliveryTruck, DispatchPlanner, GraphError, Location};
use thiserror::Error;

use crate::planner::{NearestNeighbourPlanner, TieBreak};

mod report;

pub use report::{StopRecord, TripReport};

/// What to do when a leg's distance is missing from the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum MissingEdgePolicy {
    /// Log a warning and count the leg as zero miles.
    #[default]
    Warn,
    /// Abort the trip with [`SimulationError::MissingEdge`].
    Fail,
}

/// Configuration for [`TruckSimulator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulatorConfig {
    /// Handling of legs with no recorded distance.
    pub missing_edge: MissingEdgePolicy,
    /// Tie-break used by the default planner.
    pub tie_break: TieBreak,
}

/// Errors raised while simulating a trip.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// A leg had no distance and the policy is [`MissingEdgePolicy::Fail`].
    #[error("truck {truck} cannot drive the next leg")]
    MissingEdge {
        /// Label of the truck.
        truck: String,
        /// The failed lookup.
        #[source]
        source: GraphError,
    },
    /// The planner kept choosing stops that delivered nothing.
    #[error("truck {truck} stalled with {remaining} packages still on board")]
    Stalled {
        /// Label of the truck.
        truck: String,
        /// Records left in the inventory.
        remaining: usize,
    },
}

/// Runs the advance-and-unload loop for a single truck.
///
/// # Examples
/// ```
/// use parcel_core::test_support::TriangleRoute;
/// use parcel_dispatch::{SimulatorConfig, TruckSimulator};
///
/// let triangle = TriangleRoute::new();
/// let mut truck = triangle.loaded_truck();
/// let report = TruckSimulator::new(SimulatorConfig::default())
///     .run(&triangle.graph, &mut truck)
///     .expect("every leg is in the graph");
///
/// assert_eq!(report.total_miles(), 13.0);
/// assert!(truck.has_completed_route());
/// ```
#[derive(Debug, Clone)]
pub struct TruckSimulator<P = NearestNeighbourPlanner> {
    planner: P,
    config: SimulatorConfig,
}

impl TruckSimulator<NearestNeighbourPlanner> {
    /// Use the greedy planner with the configured tie-break.
    #[must_use]
    pub const fn new(config: SimulatorConfig) -> Self {
        Self {
            planner: NearestNeighbourPlanner::new(config.tie_break),
            config,
        }
    }
}

impl Default for TruckSimulator<NearestNeighbourPlanner> {
    fn default() -> Self {
        Self::new(SimulatorConfig::default())
    }
}

impl<P: DispatchPlanner> TruckSimulator<P> {
    /// Use a custom planner; `config.tie_break` is ignored.
    #[must_use]
    pub const fn with_planner(planner: P, config: SimulatorConfig) -> Self {
        Self { planner, config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Deliver everything on board and return the truck to its hub.
    ///
    /// A truck with an empty inventory stays parked and yields a report with
    /// no stops.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::MissingEdge`] for a leg absent from the
    /// graph under [`MissingEdgePolicy::Fail`], and
    /// [`SimulationError::Stalled`] when packages remain after one pass per
    /// starting record.
    pub fn run(
        &self,
        graph: &AddressGraph,
        truck: &mut DeliveryTruck,
    ) -> Result<TripReport, SimulationError> {
        let passes = truck.inventory().len();
        let mut stops = Vec::with_capacity(passes.saturating_add(1));
        for _ in 0..passes {
            if truck.inventory().is_empty() {
                break;
            }
            let next = self
                .planner
                .next_stop(graph, truck.current_location(), truck.inventory())
                .clone();
            stops.push(self.advance(graph, truck, next)?);
        }
        if !truck.inventory().is_empty() {
            return Err(SimulationError::Stalled {
                truck: truck.label().to_owned(),
                remaining: truck.inventory().len(),
            });
        }
        if truck.has_departed() {
            truck.begin_return();
            let hub = truck.hub().clone();
            stops.push(self.advance(graph, truck, hub)?);
        }
        log::info!(
            "{} back at {} after {:.1} miles",
            truck.label(),
            parcel_core::format_clock(truck.clock()),
            truck.miles()
        );
        Ok(TripReport {
            truck: truck.label().to_owned(),
            hub: truck.hub().clone(),
            departure: truck.departure(),
            stops,
        })
    }

    fn advance(
        &self,
        graph: &AddressGraph,
        truck: &mut DeliveryTruck,
        stop: Location,
    ) -> Result<StopRecord, SimulationError> {
        let leg_miles = match graph.distance_between(truck.current_location(), &stop) {
            Ok(miles) => miles,
            Err(source) => match self.config.missing_edge {
                MissingEdgePolicy::Warn => {
                    log::warn!("{}: {source}; counting the leg as 0 miles", truck.label());
                    0.0
                }
                MissingEdgePolicy::Fail => {
                    return Err(SimulationError::MissingEdge {
                        truck: truck.label().to_owned(),
                        source,
                    });
                }
            },
        };
        let arrived_at = truck.travel_to(stop.clone(), leg_miles);
        let delivered = truck.unload_here();
        log::debug!(
            "{} reached {stop} at {} with {} deliveries",
            truck.label(),
            parcel_core::format_clock(arrived_at),
            delivered.len()
        );
        Ok(StopRecord {
            location: stop,
            leg_miles,
            total_miles: truck.miles(),
            arrived_at,
            delivered,
        })
    }
}

#[cfg(test)]
mod tests;
