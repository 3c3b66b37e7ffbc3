//! Greedy dispatch and trip simulation for the parcel delivery engine.
//!
//! [`NearestNeighbourPlanner`] is the default
//! [`DispatchPlanner`](parcel_core::DispatchPlanner): from wherever a truck
//! stands it drives to the closest destination still on board.
//! [`TruckSimulator`] repeats that choice until the inventory is empty and
//! then brings the truck home, returning a [`TripReport`] with one
//! [`StopRecord`] per leg. [`Fleet`] turns a manual schedule into loaded
//! trucks and runs them, sequentially or in parallel.
//!
//! Trucks own the records they carry, so simulations never share mutable
//! state. The address graph is only read.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod fleet;
mod planner;
mod simulator;

pub use fleet::{AssignmentError, Fleet, FleetConfig, FleetReport, TruckAssignment};
pub use planner::{NearestNeighbourPlanner, TieBreak};
pub use simulator::{
    MissingEdgePolicy, SimulationError, SimulatorConfig, StopRecord, TripReport, TruckSimulator,
};
