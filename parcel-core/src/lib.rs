//! Core domain types for the parcel delivery engine.
//!
//! The crate models a single delivery day: an [`AddressGraph`] of mileage
//! between stops, a [`PackageDirectory`] of [`PackageRecord`] values with
//! their lifecycle timestamps, and the [`DeliveryTruck`] that carries them.
//! Route selection is abstracted behind [`DispatchPlanner`]; the greedy
//! implementation and the trip simulator live in `parcel-dispatch`.
//!
//! Nothing here reads files or environment variables. Loaders build these
//! values and hand them in.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod clock;
pub mod graph;
mod location;
pub mod package;
mod planner;
pub mod table;
mod truck;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use clock::{clock, end_of_day, format_clock, hub_opens, travel_time};
pub use graph::{AddressGraph, GraphError, LocationId, ShortestPaths};
pub use location::Location;
pub use package::{
    ArrivalNote, Deadline, LifecycleError, Loading, PackageDirectory, PackageId, PackageRecord,
    PackageStatus, ZeroPackageId, status_at,
};
pub use planner::DispatchPlanner;
pub use table::{ChainingHashMap, DEFAULT_BUCKETS};
pub use truck::{DEFAULT_CAPACITY, DEFAULT_SPEED_MPH, DeliveryTruck, TruckError, TruckState};
