//! Tests for the `TruckSimulator`.

use super::*;
use chrono::NaiveTime;
use parcel_core::test_support::{TriangleRoute, assert_close, record};
use parcel_core::{PackageId, TruckState, clock};
use rstest::{fixture, rstest};

fn at(hour: u32, minute: u32, second: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, second).expect("valid time")
}

fn id(raw: u32) -> PackageId {
    PackageId::new(raw).expect("positive id")
}

#[fixture]
fn triangle() -> TriangleRoute {
    TriangleRoute::new()
}

/// Planner that never moves the truck.
struct StayPut;

impl DispatchPlanner for StayPut {
    fn next_stop<'a>(
        &self,
        _graph: &AddressGraph,
        current: &'a Location,
        _inventory: &'a [parcel_core::PackageRecord],
    ) -> &'a Location {
        current
    }
}

#[rstest]
fn worked_scenario_visits_near_then_far_then_home(triangle: TriangleRoute) {
    let mut truck = triangle.loaded_truck();
    let report = TruckSimulator::default()
        .run(&triangle.graph, &mut truck)
        .expect("complete graph");

    let route: Vec<_> = report.route().cloned().collect();
    assert_eq!(
        route,
        vec![
            triangle.hub.clone(),
            triangle.near.clone(),
            triangle.far.clone(),
            triangle.hub.clone()
        ]
    );
    assert_eq!(truck.route(), route.as_slice());
    assert_close(report.total_miles(), 13.0);
    assert_close(truck.miles(), 13.0);

    let arrivals: Vec<_> = report.stops.iter().map(|stop| stop.arrived_at).collect();
    assert_eq!(arrivals, vec![at(8, 13, 20), at(8, 23, 20), at(8, 43, 20)]);
    let delivered: Vec<_> = report
        .stops
        .iter()
        .map(|stop| stop.delivered.clone())
        .collect();
    assert_eq!(delivered, vec![vec![id(1)], vec![id(2)], Vec::new()]);
    assert_eq!(report.finished_at(), at(8, 43, 20));
    assert_eq!(report.delivered_count(), 2);
}

#[rstest]
fn delivery_stamps_follow_cumulative_mileage(triangle: TriangleRoute) {
    let mut truck = triangle.loaded_truck();
    TruckSimulator::default()
        .run(&triangle.graph, &mut truck)
        .expect("complete graph");
    let stamps: Vec<_> = truck
        .delivered()
        .iter()
        .map(|r| (r.id, r.delivered_at()))
        .collect();
    assert_eq!(
        stamps,
        vec![(id(1), Some(at(8, 13, 20))), (id(2), Some(at(8, 23, 20)))]
    );
}

#[rstest]
fn trip_ends_parked_at_the_hub(triangle: TriangleRoute) {
    let mut truck = triangle.loaded_truck();
    TruckSimulator::default()
        .run(&triangle.graph, &mut truck)
        .expect("complete graph");
    assert!(truck.inventory().is_empty());
    assert_eq!(truck.current_location(), &triangle.hub);
    assert_eq!(truck.state(), TruckState::AtHub);
    assert!(truck.has_completed_route());
}

#[rstest]
fn co_located_packages_share_one_stop(triangle: TriangleRoute) {
    let mut truck = DeliveryTruck::new("Truck 2", triangle.hub.clone(), clock(9, 0));
    truck.load(record(4, &triangle.near)).expect("room");
    truck.load(record(5, &triangle.near)).expect("room");
    let report = TruckSimulator::default()
        .run(&triangle.graph, &mut truck)
        .expect("complete graph");
    assert_eq!(report.stops.len(), 2);
    let first = report.stops.first().expect("one delivery stop");
    assert_eq!(first.delivered, vec![id(4), id(5)]);
    assert_close(report.total_miles(), 8.0);
}

#[rstest]
fn empty_truck_never_leaves(triangle: TriangleRoute) {
    let mut truck = DeliveryTruck::new("Truck 3", triangle.hub.clone(), clock(8, 0));
    let report = TruckSimulator::default()
        .run(&triangle.graph, &mut truck)
        .expect("nothing to drive");
    assert!(report.stops.is_empty());
    assert_eq!(report.finished_at(), clock(8, 0));
    assert!(truck.has_completed_route());
}

#[rstest]
fn missing_edge_warns_and_counts_zero_by_default(triangle: TriangleRoute) {
    let island = Location::new("X", "9 Island Rd", "84999");
    let mut truck = DeliveryTruck::new("Truck 1", triangle.hub.clone(), clock(8, 0));
    truck.load(record(1, &island)).expect("room");
    let report = TruckSimulator::default()
        .run(&triangle.graph, &mut truck)
        .expect("soft failure");
    assert!(report.stops.iter().all(|stop| stop.leg_miles <= 0.0));
    assert_eq!(report.delivered_count(), 1);
    assert!(truck.has_completed_route());
}

#[rstest]
fn missing_edge_fails_when_configured(triangle: TriangleRoute) {
    let island = Location::new("X", "9 Island Rd", "84999");
    let mut truck = DeliveryTruck::new("Truck 1", triangle.hub.clone(), clock(8, 0));
    truck.load(record(1, &island)).expect("room");
    let simulator = TruckSimulator::new(SimulatorConfig {
        missing_edge: MissingEdgePolicy::Fail,
        ..SimulatorConfig::default()
    });
    let err = simulator
        .run(&triangle.graph, &mut truck)
        .expect_err("hard failure");
    assert!(matches!(
        err,
        SimulationError::MissingEdge { ref truck, .. } if truck == "Truck 1"
    ));
}

#[rstest]
fn planner_that_never_moves_is_reported_as_stalled(triangle: TriangleRoute) {
    let mut truck = triangle.loaded_truck();
    let simulator = TruckSimulator::with_planner(StayPut, SimulatorConfig::default());
    let err = simulator
        .run(&triangle.graph, &mut truck)
        .expect_err("no progress");
    assert_eq!(
        err,
        SimulationError::Stalled {
            truck: "Truck 1".into(),
            remaining: 2
        }
    );
}

#[cfg(feature = "serde")]
#[rstest]
fn simulator_config_reads_kebab_case_policies() {
    let config: SimulatorConfig =
        serde_json::from_str(r#"{"missing_edge": "fail", "tie_break": "lowest-package-id"}"#)
            .expect("valid config");
    assert_eq!(
        config,
        SimulatorConfig {
            missing_edge: MissingEdgePolicy::Fail,
            tie_break: TieBreak::LowestPackageId,
        }
    );
}

#[cfg(feature = "serde")]
#[rstest]
fn trip_report_survives_json(triangle: TriangleRoute) {
    let mut truck = triangle.loaded_truck();
    let report = TruckSimulator::default()
        .run(&triangle.graph, &mut truck)
        .expect("complete graph");
    let json = serde_json::to_string(&report).expect("serialise report");
    let decoded: TripReport = serde_json::from_str(&json).expect("decode report");
    assert_eq!(decoded, report);
    assert_eq!(decoded.finished_at(), at(8, 43, 20));
}
