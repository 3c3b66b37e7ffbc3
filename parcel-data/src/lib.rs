//! Loaders that turn the day's input files into core values.
//!
//! Responsibilities:
//! - Parse the lower-triangular distance table into an
//!   [`AddressGraph`](parcel_core::AddressGraph).
//! - Parse the package manifest into a
//!   [`PackageDirectory`](parcel_core::PackageDirectory) and apply the
//!   hub-arrival exceptions.
//! - Provide the manual truck schedule, built in or read from JSON.
//!
//! Boundaries:
//! - Do not encode routing rules (live in `parcel-dispatch`).
//! - Every path arrives through [`LoaderConfig`]; nothing reads the
//!   environment.
//!
//! Invariants:
//! - Malformed input is a [`LoadError`] and aborts the load.

#![forbid(unsafe_code)]

mod config;
mod day;
mod distances;
mod error;
mod exceptions;
pub mod fs;
mod packages;
mod schedule;

pub use config::LoaderConfig;
pub use day::{DeliveryDay, load_day};
pub use distances::{DistanceTable, load_distance_table, parse_distance_table};
pub use error::LoadError;
pub use exceptions::{ArrivalException, apply_exceptions, reference_exceptions};
pub use packages::{load_packages, parse_deadline, parse_packages};
pub use schedule::{load_schedule, parse_schedule, reference_schedule};
