//! Delivery trucks and their per-trip state.
//!
//! A [`DeliveryTruck`] owns the records it carries. Records move from the
//! inventory to the delivered list as the truck stops at their destinations,
//! so no two trucks ever hold the same record.

use chrono::{NaiveTime, TimeDelta};
use thiserror::Error;

use crate::clock::travel_time;
use crate::{Location, PackageId, PackageRecord};

/// Packages a truck can carry when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 16;

/// Constant driving speed when none is configured.
pub const DEFAULT_SPEED_MPH: f64 = 18.0;

/// Phase of a truck's trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TruckState {
    /// Parked at the hub, before departure or after returning.
    #[default]
    AtHub,
    /// Driving between delivery stops.
    EnRoute,
    /// Inventory is empty and the truck is heading back to the hub.
    Returning,
}

/// Errors raised while loading a truck.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TruckError {
    /// The truck already holds as many packages as it can carry.
    #[error("truck {truck} is full ({capacity} packages)")]
    CapacityExceeded {
        /// Label of the full truck.
        truck: String,
        /// Configured capacity.
        capacity: usize,
    },
    /// Packages can only be loaded before the truck leaves the hub.
    #[error("truck {truck} has already departed")]
    AlreadyDeparted {
        /// Label of the departed truck.
        truck: String,
    },
}

/// A vehicle making one trip out of the hub.
///
/// # Examples
/// ```
/// use parcel_core::{DeliveryTruck, Location, TruckState, clock};
///
/// let hub = Location::new("Hub", "4001 South 700 East", "84107");
/// let truck = DeliveryTruck::new("Truck 1", hub.clone(), clock(8, 0));
///
/// assert_eq!(truck.state(), TruckState::AtHub);
/// assert_eq!(truck.route(), &[hub]);
/// assert_eq!(truck.capacity(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct DeliveryTruck {
    label: String,
    hub: Location,
    current: Location,
    capacity: usize,
    speed_mph: f64,
    miles: f64,
    route: Vec<Location>,
    departure: NaiveTime,
    travel_offset: TimeDelta,
    inventory: Vec<PackageRecord>,
    delivered: Vec<PackageRecord>,
    state: TruckState,
}

impl DeliveryTruck {
    /// Park a new truck at `hub`, scheduled to leave at `departure`.
    pub fn new(label: impl Into<String>, hub: Location, departure: NaiveTime) -> Self {
        Self {
            label: label.into(),
            current: hub.clone(),
            route: vec![hub.clone()],
            hub,
            capacity: DEFAULT_CAPACITY,
            speed_mph: DEFAULT_SPEED_MPH,
            miles: 0.0,
            departure,
            travel_offset: TimeDelta::zero(),
            inventory: Vec::new(),
            delivered: Vec::new(),
            state: TruckState::AtHub,
        }
    }

    /// Override the package capacity.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Override the constant driving speed.
    #[must_use]
    pub const fn with_speed(mut self, speed_mph: f64) -> Self {
        self.speed_mph = speed_mph;
        self
    }

    /// Place `record` in the inventory and stamp it as loaded at departure.
    ///
    /// # Errors
    ///
    /// Returns [`TruckError::CapacityExceeded`] when the truck is full and
    /// [`TruckError::AlreadyDeparted`] once it has left the hub. The record is
    /// not modified in either case.
    pub fn load(&mut self, mut record: PackageRecord) -> Result<(), TruckError> {
        if self.has_departed() {
            return Err(TruckError::AlreadyDeparted {
                truck: self.label.clone(),
            });
        }
        if self.inventory.len() >= self.capacity {
            return Err(TruckError::CapacityExceeded {
                truck: self.label.clone(),
                capacity: self.capacity,
            });
        }
        record.mark_loaded(self.label.clone(), self.departure);
        self.inventory.push(record);
        Ok(())
    }

    /// Drive to `stop`, adding `leg_miles` to the odometer.
    ///
    /// The running travel offset is recomputed from the cumulative mileage.
    /// Arriving at the hub while returning parks the truck.
    #[expect(
        clippy::float_arithmetic,
        reason = "odometer accumulates floating-point mileage"
    )]
    pub fn travel_to(&mut self, stop: Location, leg_miles: f64) -> NaiveTime {
        self.miles += leg_miles;
        self.travel_offset = travel_time(self.miles, self.speed_mph);
        self.state = if self.state == TruckState::Returning && stop == self.hub {
            TruckState::AtHub
        } else {
            TruckState::EnRoute
        };
        self.route.push(stop.clone());
        self.current = stop;
        self.clock()
    }

    /// Mark the truck as heading back to the hub.
    pub const fn begin_return(&mut self) {
        self.state = TruckState::Returning;
    }

    /// Deliver every inventory record addressed to the current location.
    ///
    /// Matching records are collected first and then moved to the delivered
    /// list, stamped with the current clock. Returns their identifiers in
    /// inventory order.
    pub fn unload_here(&mut self) -> Vec<PackageId> {
        let now = self.clock();
        let (mut arriving, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut self.inventory)
            .into_iter()
            .partition(|record| record.destination == self.current);
        self.inventory = remaining;
        let mut ids = Vec::with_capacity(arriving.len());
        for record in &mut arriving {
            // Every inventory record went through `load`, so this cannot fail.
            if let Err(err) = record.mark_delivered(now) {
                log::warn!("{err}");
            }
            ids.push(record.id);
        }
        self.delivered.append(&mut arriving);
        ids
    }

    /// Truck label, e.g. `"Truck 1"`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Start and end location of every trip.
    #[must_use]
    pub const fn hub(&self) -> &Location {
        &self.hub
    }

    /// Where the truck is now.
    #[must_use]
    pub const fn current_location(&self) -> &Location {
        &self.current
    }

    /// Maximum number of packages carried.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Constant driving speed.
    #[must_use]
    pub const fn speed_mph(&self) -> f64 {
        self.speed_mph
    }

    /// Cumulative miles driven.
    #[must_use]
    pub const fn miles(&self) -> f64 {
        self.miles
    }

    /// Every location visited, starting with the hub.
    #[must_use]
    pub fn route(&self) -> &[Location] {
        &self.route
    }

    /// Scheduled departure time.
    #[must_use]
    pub const fn departure(&self) -> NaiveTime {
        self.departure
    }

    /// Driving time since departure.
    #[must_use]
    pub const fn travel_offset(&self) -> TimeDelta {
        self.travel_offset
    }

    /// Current wall-clock time for this truck.
    #[must_use]
    pub fn clock(&self) -> NaiveTime {
        self.departure + self.travel_offset
    }

    /// Records still on board.
    #[must_use]
    pub fn inventory(&self) -> &[PackageRecord] {
        &self.inventory
    }

    /// Records dropped off so far.
    #[must_use]
    pub fn delivered(&self) -> &[PackageRecord] {
        &self.delivered
    }

    /// Hand the delivered records back, leaving the list empty.
    pub fn take_delivered(&mut self) -> Vec<PackageRecord> {
        std::mem::take(&mut self.delivered)
    }

    /// Hand back whatever is still on board, leaving the inventory empty.
    pub fn take_inventory(&mut self) -> Vec<PackageRecord> {
        std::mem::take(&mut self.inventory)
    }

    /// Current trip phase.
    #[must_use]
    pub const fn state(&self) -> TruckState {
        self.state
    }

    /// Whether the truck has left the hub at least once.
    #[must_use]
    pub fn has_departed(&self) -> bool {
        self.route.len() > 1
    }

    /// Whether the trip is over: nothing on board and parked at the hub.
    #[must_use]
    pub fn has_completed_route(&self) -> bool {
        self.inventory.is_empty() && self.state == TruckState::AtHub && self.current == self.hub
    }
}
