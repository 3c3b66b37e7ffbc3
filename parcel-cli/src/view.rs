//! Text and JSON renderings of a simulated day.

use std::io::{self, Write};

use chrono::NaiveTime;
use parcel_core::{PackageId, PackageRecord, format_clock};
use parcel_dispatch::TripReport;
use serde::Serialize;

use crate::CliError;
use crate::day::SimulatedDay;

/// Every package with its end-of-day status, each trip's mileage and route,
/// and the fleet total.
pub(crate) fn write_report(writer: &mut dyn Write, day: &SimulatedDay) -> io::Result<()> {
    writeln!(
        writer,
        "{:>3}  {:<40} {:<16} {:<5}  {:<8}  {:>6}  Status",
        "ID", "Address", "City", "Zip", "Deadline", "Kg"
    )?;
    for record in day.directory.sorted() {
        writeln!(
            writer,
            "{:>3}  {:<40} {:<16} {:<5}  {:<8}  {:>6}  {}",
            record.id.get(),
            record.destination.address,
            record.city,
            record.destination.zipcode,
            record.deadline.to_string(),
            record.weight_kg,
            record.final_status()
        )?;
    }
    writeln!(writer)?;
    for trip in &day.report.trips {
        writeln!(
            writer,
            "{}: {:.1} miles, {} packages, back at {}",
            trip.truck,
            trip.total_miles(),
            trip.delivered_count(),
            format_clock(trip.finished_at())
        )?;
        let stops: Vec<_> = trip
            .route()
            .map(|location| location.address.as_str())
            .collect();
        writeln!(writer, "  route: {}", stops.join(" -> "))?;
    }
    writeln!(writer, "Total mileage: {:.1}", day.report.total_miles())?;
    let late = late_packages(day);
    if late.is_empty() {
        writeln!(writer, "Every package met its deadline.")
    } else {
        let ids: Vec<_> = late.iter().map(ToString::to_string).collect();
        writeln!(writer, "Late packages: {}", ids.join(", "))
    }
}

/// One package's status at `at`.
pub(crate) fn write_status(
    writer: &mut dyn Write,
    record: &PackageRecord,
    at: NaiveTime,
) -> io::Result<()> {
    writeln!(
        writer,
        "Package {} to {} (deadline {}) at {}: {}",
        record.id,
        record.destination.address,
        record.deadline,
        at.format("%H:%M"),
        record.status_at(at)
    )
}

/// Every package's status at `at`, sorted by id.
pub(crate) fn write_all_statuses(
    writer: &mut dyn Write,
    day: &SimulatedDay,
    at: NaiveTime,
) -> io::Result<()> {
    writeln!(writer, "Package status at {}", at.format("%H:%M"))?;
    for record in day.directory.sorted() {
        writeln!(
            writer,
            "{:>3}  {:<40} {:<8}  {}",
            record.id.get(),
            record.destination.address,
            record.deadline.to_string(),
            record.status_at(at)
        )?;
    }
    Ok(())
}

fn late_packages(day: &SimulatedDay) -> Vec<PackageId> {
    day.directory
        .sorted()
        .into_iter()
        .filter(|record| record.met_deadline() == Some(false))
        .map(|record| record.id)
        .collect()
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    total_miles: f64,
    late_packages: Vec<PackageId>,
    trips: Vec<TripSummary<'a>>,
    packages: Vec<PackageSummary<'a>>,
}

#[derive(Debug, Serialize)]
struct TripSummary<'a> {
    truck: &'a str,
    departure: NaiveTime,
    finished_at: NaiveTime,
    miles: f64,
    delivered: usize,
    route: Vec<&'a str>,
}

impl<'a> From<&'a TripReport> for TripSummary<'a> {
    fn from(trip: &'a TripReport) -> Self {
        Self {
            truck: &trip.truck,
            departure: trip.departure,
            finished_at: trip.finished_at(),
            miles: trip.total_miles(),
            delivered: trip.delivered_count(),
            route: trip
                .route()
                .map(|location| location.address.as_str())
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PackageSummary<'a> {
    id: PackageId,
    address: &'a str,
    zipcode: &'a str,
    deadline: String,
    status: String,
    delivered_at: Option<NaiveTime>,
    met_deadline: Option<bool>,
}

impl<'a> From<&'a PackageRecord> for PackageSummary<'a> {
    fn from(record: &'a PackageRecord) -> Self {
        Self {
            id: record.id,
            address: &record.destination.address,
            zipcode: &record.destination.zipcode,
            deadline: record.deadline.to_string(),
            status: record.final_status().to_string(),
            delivered_at: record.delivered_at(),
            met_deadline: record.met_deadline(),
        }
    }
}

/// The report as pretty-printed JSON.
pub(crate) fn write_json_report(writer: &mut dyn Write, day: &SimulatedDay) -> Result<(), CliError> {
    let report = JsonReport {
        total_miles: day.report.total_miles(),
        late_packages: late_packages(day),
        trips: day.report.trips.iter().map(TripSummary::from).collect(),
        packages: day
            .directory
            .sorted()
            .into_iter()
            .map(PackageSummary::from)
            .collect(),
    };
    let payload = serde_json::to_string_pretty(&report).map_err(CliError::SerializeReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
