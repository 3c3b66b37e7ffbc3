//! Travel distances between delivery locations.
//!
//! [`AddressGraph`] stores locations and the pairwise mileage between them.
//! It is built once by the loader and read concurrently during simulation.
//! [`ShortestPaths`] runs Dijkstra over a graph without touching the shared
//! locations, keeping per-run bookkeeping in its own tables.

mod address;
mod error;
mod shortest_path;

pub use address::{AddressGraph, LocationId};
pub use error::GraphError;
pub use shortest_path::ShortestPaths;
