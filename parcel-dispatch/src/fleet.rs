//! Manual truck assignment and whole-fleet simulation.
//!
//! A schedule names each trip's truck, departure time and package list. The
//! lists must partition the directory: every package on exactly one truck.
//! [`Fleet::assign`] checks that before moving any record, so a rejected
//! schedule leaves the directory untouched.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveTime;
use parcel_core::{
    AddressGraph, DEFAULT_CAPACITY, DEFAULT_SPEED_MPH, DeliveryTruck, DispatchPlanner, Location,
    PackageDirectory, PackageId, TruckError,
};
use rayon::prelude::*;
use thiserror::Error;

use crate::simulator::{SimulationError, TripReport, TruckSimulator};

/// One trip in a manual schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TruckAssignment {
    /// Label of the trip, e.g. `"Truck 1a"`.
    pub label: String,
    /// Time the truck leaves the hub.
    pub departure: NaiveTime,
    /// Packages loaded for this trip.
    pub packages: Vec<PackageId>,
}

impl TruckAssignment {
    /// Describe one trip.
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        departure: NaiveTime,
        packages: impl IntoIterator<Item = PackageId>,
    ) -> Self {
        Self {
            label: label.into(),
            departure,
            packages: packages.into_iter().collect(),
        }
    }
}

/// Vehicle settings shared by every truck in a fleet.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FleetConfig {
    /// Packages each truck can carry.
    pub capacity: usize,
    /// Constant driving speed.
    pub speed_mph: f64,
    /// Simulate trucks on the rayon thread pool instead of one by one.
    pub parallel: bool,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            speed_mph: DEFAULT_SPEED_MPH,
            parallel: false,
        }
    }
}

/// Errors raised when a schedule does not partition the directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    /// The schedule names a package the directory does not hold.
    #[error("{truck} is assigned unknown package {id}")]
    UnknownPackage {
        /// Trip naming the package.
        truck: String,
        /// Offending identifier.
        id: PackageId,
    },
    /// A package appears in more than one place in the schedule.
    #[error("package {id} is assigned to both {first} and {second}")]
    DuplicatePackage {
        /// Offending identifier.
        id: PackageId,
        /// Trip that claimed it first.
        first: String,
        /// Trip that claimed it again.
        second: String,
    },
    /// A trip leaves the hub before one of its packages reaches it.
    #[error("{truck} leaves before package {id} reaches the hub at {arrives_at}")]
    NotYetArrived {
        /// Trip carrying the package.
        truck: String,
        /// Offending identifier.
        id: PackageId,
        /// Time the package becomes available for loading.
        arrives_at: NaiveTime,
    },
    /// Some directory packages are on no truck.
    #[error("packages left unassigned: {}", format_ids(.ids))]
    Unassigned {
        /// Missing identifiers in ascending order.
        ids: Vec<PackageId>,
    },
    /// A trip carries more packages than the truck holds.
    #[error(transparent)]
    Truck(#[from] TruckError),
}

fn format_ids(ids: &[PackageId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Summary of a whole-fleet run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetReport {
    /// One report per trip, in schedule order.
    pub trips: Vec<TripReport>,
}

impl FleetReport {
    /// Miles driven by every truck combined.
    #[must_use]
    pub fn total_miles(&self) -> f64 {
        self.trips.iter().map(TripReport::total_miles).sum()
    }

    /// Report for the trip labelled `truck`.
    #[must_use]
    pub fn trip(&self, truck: &str) -> Option<&TripReport> {
        self.trips.iter().find(|trip| trip.truck == truck)
    }
}

/// Loaded trucks ready to be simulated.
///
/// # Examples
/// ```
/// use parcel_core::test_support::{TriangleRoute, record};
/// use parcel_core::{PackageDirectory, PackageId, clock};
/// use parcel_dispatch::{Fleet, FleetConfig, TruckAssignment, TruckSimulator};
///
/// let triangle = TriangleRoute::new();
/// let mut directory: PackageDirectory =
///     [record(1, &triangle.near), record(2, &triangle.far)].into_iter().collect();
/// let ids = [1, 2].into_iter().filter_map(PackageId::new);
/// let schedule = [TruckAssignment::new("Truck 1", clock(8, 0), ids)];
///
/// let mut fleet = Fleet::assign(&mut directory, &triangle.hub, &schedule, FleetConfig::default())
///     .expect("schedule covers the directory");
/// assert!(directory.is_empty());
///
/// let report = fleet
///     .run(&triangle.graph, &TruckSimulator::default())
///     .expect("complete graph");
/// fleet.restore(&mut directory);
///
/// assert_eq!(report.total_miles(), 13.0);
/// assert_eq!(directory.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Fleet {
    trucks: Vec<DeliveryTruck>,
    config: FleetConfig,
}

impl Fleet {
    /// Move every scheduled record out of `directory` onto its truck.
    ///
    /// Each record is stamped as loaded at its truck's departure time.
    ///
    /// # Errors
    ///
    /// Returns an [`AssignmentError`] when the schedule names an unknown
    /// package, names a package twice, leaves a package out, overfills a
    /// truck or sends a package out before it reaches the hub. The directory
    /// is unchanged in every error case.
    pub fn assign(
        directory: &mut PackageDirectory,
        hub: &Location,
        schedule: &[TruckAssignment],
        config: FleetConfig,
    ) -> Result<Self, AssignmentError> {
        validate(directory, schedule, config.capacity)?;
        let mut trucks = Vec::with_capacity(schedule.len());
        for assignment in schedule {
            let mut truck = DeliveryTruck::new(
                assignment.label.clone(),
                hub.clone(),
                assignment.departure,
            )
            .with_capacity(config.capacity)
            .with_speed(config.speed_mph);
            for &id in &assignment.packages {
                let Some(record) = directory.remove(id) else {
                    continue;
                };
                truck.load(record)?;
            }
            trucks.push(truck);
        }
        Ok(Self { trucks, config })
    }

    /// Simulate every truck until it is back at the hub.
    ///
    /// Reports come back in schedule order whether or not the run is parallel.
    ///
    /// # Errors
    ///
    /// Returns the first [`SimulationError`] raised by any truck.
    pub fn run<P: DispatchPlanner>(
        &mut self,
        graph: &AddressGraph,
        simulator: &TruckSimulator<P>,
    ) -> Result<FleetReport, SimulationError> {
        let trips = if self.config.parallel {
            self.trucks
                .par_iter_mut()
                .map(|truck| simulator.run(graph, truck))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            self.trucks
                .iter_mut()
                .map(|truck| simulator.run(graph, truck))
                .collect::<Result<Vec<_>, _>>()?
        };
        Ok(FleetReport { trips })
    }

    /// Return every record, delivered or not, to `directory`.
    pub fn restore(&mut self, directory: &mut PackageDirectory) {
        for truck in &mut self.trucks {
            directory.extend(truck.take_delivered());
            directory.extend(truck.take_inventory());
        }
    }

    /// Trucks in schedule order.
    #[must_use]
    pub fn trucks(&self) -> &[DeliveryTruck] {
        &self.trucks
    }

    /// The truck labelled `label`.
    #[must_use]
    pub fn truck(&self, label: &str) -> Option<&DeliveryTruck> {
        self.trucks.iter().find(|truck| truck.label() == label)
    }

    /// Vehicle settings used when loading.
    #[must_use]
    pub const fn config(&self) -> &FleetConfig {
        &self.config
    }
}

fn validate(
    directory: &PackageDirectory,
    schedule: &[TruckAssignment],
    capacity: usize,
) -> Result<(), AssignmentError> {
    let mut owners: HashMap<PackageId, &str> = HashMap::with_capacity(directory.len());
    for assignment in schedule {
        if assignment.packages.len() > capacity {
            return Err(TruckError::CapacityExceeded {
                truck: assignment.label.clone(),
                capacity,
            }
            .into());
        }
        for &id in &assignment.packages {
            let Some(record) = directory.get(id) else {
                return Err(AssignmentError::UnknownPackage {
                    truck: assignment.label.clone(),
                    id,
                });
            };
            if assignment.departure < record.arrived_at() {
                return Err(AssignmentError::NotYetArrived {
                    truck: assignment.label.clone(),
                    id,
                    arrives_at: record.arrived_at(),
                });
            }
            if let Some(first) = owners.insert(id, &assignment.label) {
                return Err(AssignmentError::DuplicatePackage {
                    id,
                    first: first.to_owned(),
                    second: assignment.label.clone(),
                });
            }
        }
    }
    let unassigned: BTreeSet<PackageId> = directory
        .iter()
        .map(|record| record.id)
        .filter(|id| !owners.contains_key(id))
        .collect();
    if unassigned.is_empty() {
        Ok(())
    } else {
        Err(AssignmentError::Unassigned {
            ids: unassigned.into_iter().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcel_core::{ArrivalNote, clock};
    use parcel_core::test_support::{TriangleRoute, assert_close, record};
    use rstest::{fixture, rstest};

    fn ids(raw: &[u32]) -> Vec<PackageId> {
        raw.iter().copied().filter_map(PackageId::new).collect()
    }

    #[fixture]
    fn triangle() -> TriangleRoute {
        TriangleRoute::new()
    }

    fn directory(triangle: &TriangleRoute) -> PackageDirectory {
        [
            record(1, &triangle.near),
            record(2, &triangle.far),
            record(3, &triangle.far),
            record(4, &triangle.near).with_arrival(clock(9, 5), ArrivalNote::DelayedOnFlight),
        ]
        .into_iter()
        .collect()
    }

    fn two_trips() -> Vec<TruckAssignment> {
        vec![
            TruckAssignment::new("Truck 1", clock(8, 0), ids(&[1, 2])),
            TruckAssignment::new("Truck 2", clock(9, 5), ids(&[3, 4])),
        ]
    }

    #[rstest]
    fn assign_moves_records_onto_trucks(triangle: TriangleRoute) {
        let mut dir = directory(&triangle);
        let fleet = Fleet::assign(&mut dir, &triangle.hub, &two_trips(), FleetConfig::default())
            .expect("valid partition");
        assert!(dir.is_empty());
        let second = fleet.truck("Truck 2").expect("second trip");
        let loaded: Vec<_> = second
            .inventory()
            .iter()
            .map(|r| (r.id, r.loaded_at()))
            .collect();
        assert_eq!(
            loaded,
            ids(&[3, 4])
                .into_iter()
                .map(|id| (id, Some(clock(9, 5))))
                .collect::<Vec<_>>()
        );
    }

    #[rstest]
    #[case::unknown(
        vec![TruckAssignment::new("Truck 1", clock(8, 0), ids(&[9, 1, 2, 3, 4]))],
        AssignmentError::UnknownPackage { truck: "Truck 1".into(), id: PackageId::new(9).expect("positive") }
    )]
    #[case::duplicate(
        vec![
            TruckAssignment::new("Truck 1", clock(8, 0), ids(&[1, 2, 3])),
            TruckAssignment::new("Truck 2", clock(9, 5), ids(&[3, 4])),
        ],
        AssignmentError::DuplicatePackage {
            id: PackageId::new(3).expect("positive"),
            first: "Truck 1".into(),
            second: "Truck 2".into(),
        }
    )]
    #[case::not_yet_arrived(
        vec![
            TruckAssignment::new("Truck 1", clock(8, 0), ids(&[1, 2, 4])),
            TruckAssignment::new("Truck 2", clock(9, 5), ids(&[3])),
        ],
        AssignmentError::NotYetArrived {
            truck: "Truck 1".into(),
            id: PackageId::new(4).expect("positive"),
            arrives_at: clock(9, 5),
        }
    )]
    #[case::unassigned(
        vec![TruckAssignment::new("Truck 1", clock(8, 0), ids(&[2, 3]))],
        AssignmentError::Unassigned { ids: ids(&[1, 4]) }
    )]
    fn invalid_schedules_leave_the_directory_intact(
        triangle: TriangleRoute,
        #[case] schedule: Vec<TruckAssignment>,
        #[case] expected: AssignmentError,
    ) {
        let mut dir = directory(&triangle);
        let err = Fleet::assign(&mut dir, &triangle.hub, &schedule, FleetConfig::default())
            .expect_err("invalid schedule");
        assert_eq!(err, expected);
        assert_eq!(dir.len(), 4);
    }

    #[rstest]
    fn late_package_message_names_its_arrival() {
        let err = AssignmentError::NotYetArrived {
            truck: "Truck 1".into(),
            id: PackageId::new(4).expect("positive"),
            arrives_at: clock(9, 5),
        };
        assert_eq!(
            err.to_string(),
            "Truck 1 leaves before package 4 reaches the hub at 09:05:00"
        );
    }

    #[rstest]
    fn overfull_trip_is_rejected(triangle: TriangleRoute) {
        let mut dir = directory(&triangle);
        let config = FleetConfig {
            capacity: 2,
            ..FleetConfig::default()
        };
        let schedule = vec![
            TruckAssignment::new("Truck 1", clock(8, 0), ids(&[1, 2, 3])),
            TruckAssignment::new("Truck 2", clock(9, 5), ids(&[4])),
        ];
        let err = Fleet::assign(&mut dir, &triangle.hub, &schedule, config)
            .expect_err("too many packages");
        assert!(matches!(
            err,
            AssignmentError::Truck(TruckError::CapacityExceeded { capacity: 2, .. })
        ));
        assert_eq!(dir.len(), 4);
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn run_reports_every_trip_in_schedule_order(triangle: TriangleRoute, #[case] parallel: bool) {
        let mut dir = directory(&triangle);
        let config = FleetConfig {
            parallel,
            ..FleetConfig::default()
        };
        let mut fleet =
            Fleet::assign(&mut dir, &triangle.hub, &two_trips(), config).expect("valid partition");
        let report = fleet
            .run(&triangle.graph, &TruckSimulator::default())
            .expect("complete graph");
        let labels: Vec<_> = report.trips.iter().map(|t| t.truck.as_str()).collect();
        assert_eq!(labels, vec!["Truck 1", "Truck 2"]);
        assert_close(report.total_miles(), 26.0);
        assert!(fleet.trucks().iter().all(DeliveryTruck::has_completed_route));
    }

    #[rstest]
    fn restore_returns_delivered_records(triangle: TriangleRoute) {
        let mut dir = directory(&triangle);
        let mut fleet = Fleet::assign(&mut dir, &triangle.hub, &two_trips(), FleetConfig::default())
            .expect("valid partition");
        fleet
            .run(&triangle.graph, &TruckSimulator::default())
            .expect("complete graph");
        fleet.restore(&mut dir);
        assert_eq!(dir.len(), 4);
        assert!(dir.iter().all(|r| r.delivered_at().is_some()));
        let four = dir.get(PackageId::new(4).expect("positive")).expect("restored");
        assert_eq!(four.delivered_at(), Some(clock(9, 18) + chrono::TimeDelta::seconds(20)));
    }
}
