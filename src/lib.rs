//! Facade crate for the parcel delivery engine.
//!
//! This crate re-exports the core domain types and exposes the dispatch
//! simulator and the file loaders behind feature flags.

#![forbid(unsafe_code)]

pub use parcel_core::{
    AddressGraph, ArrivalNote, ChainingHashMap, Deadline, DeliveryTruck, DispatchPlanner,
    GraphError, Location, PackageDirectory, PackageId, PackageRecord, PackageStatus,
    ShortestPaths, TruckError, TruckState, status_at,
};

#[cfg(feature = "dispatch")]
pub use parcel_dispatch::{
    AssignmentError, Fleet, FleetConfig, FleetReport, MissingEdgePolicy, NearestNeighbourPlanner,
    SimulationError, SimulatorConfig, TieBreak, TripReport, TruckAssignment, TruckSimulator,
};

#[cfg(feature = "loader")]
pub use parcel_data::{DeliveryDay, LoadError, LoaderConfig, load_day};
