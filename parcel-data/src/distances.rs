//! Distance table parsing.
//!
//! The table has one header row followed by one row per location:
//! `label, "address\n(zipcode)", d0, d1, ...`. Only cells on or below the
//! diagonal are read; each is mirrored into the upper triangle. The first
//! location is the hub.

use std::io::Read;
use std::iter;

use camino::Utf8Path;
use csv::StringRecord;
use parcel_core::{AddressGraph, Location};

use crate::LoadError;
use crate::fs::open_utf8_file;

/// Columns before the first distance cell.
const LEADING_COLUMNS: usize = 2;

/// Graph and stops read from a distance table.
#[derive(Debug, Clone)]
pub struct DistanceTable {
    /// Symmetric mileage between every pair of locations.
    pub graph: AddressGraph,
    /// Location on the first row.
    pub hub: Location,
    /// Locations in row order.
    pub locations: Vec<Location>,
}

/// Read a distance table from `path`.
///
/// # Errors
///
/// Returns [`LoadError::Open`] when the file cannot be opened and any error
/// from [`parse_distance_table`].
pub fn load_distance_table(path: &Utf8Path) -> Result<DistanceTable, LoadError> {
    let file = open_utf8_file(path).map_err(|source| LoadError::Open {
        path: path.to_owned(),
        source,
    })?;
    parse_distance_table(file, path)
}

/// Parse a distance table; `origin` names the source in errors.
///
/// # Errors
///
/// Returns a [`LoadError`] for undecodable CSV, short rows, malformed
/// address cells, missing or non-numeric distances and tables with no rows.
///
/// # Examples
/// ```
/// use camino::Utf8Path;
/// use parcel_data::parse_distance_table;
///
/// let csv = "Location,Address,Hub,Park\n\
///            Hub,\"1 Main St\n(84000)\",0.0,\n\
///            Park,\"2 Elm St\n(84001)\",3.5,0.0\n";
/// let table = parse_distance_table(csv.as_bytes(), Utf8Path::new("inline.csv"))
///     .expect("well-formed table");
///
/// let park = table.locations.last().expect("two rows");
/// assert_eq!(table.graph.distance_between(park, &table.hub), Ok(3.5));
/// assert_eq!(table.graph.distance_between(&table.hub, park), Ok(3.5));
/// ```
pub fn parse_distance_table<R: Read>(
    reader: R,
    origin: &Utf8Path,
) -> Result<DistanceTable, LoadError> {
    let mut rows = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let mut graph = AddressGraph::new();
    let mut locations: Vec<Location> = Vec::new();
    for row in rows.records() {
        let record = row.map_err(|source| LoadError::Csv {
            path: origin.to_owned(),
            source,
        })?;
        let line = record.position().map_or(0, csv::Position::line);
        let expected = LEADING_COLUMNS.saturating_add(locations.len()).saturating_add(1);
        if record.len() < expected {
            return Err(LoadError::RowShape {
                path: origin.to_owned(),
                line,
                expected,
                found: record.len(),
            });
        }
        let location = parse_location(&record, origin, line)?;
        graph.add_location(location.clone());
        let earlier = locations.iter().chain(iter::once(&location));
        let cells = record.iter().skip(LEADING_COLUMNS);
        for (column, (cell, other)) in cells.zip(earlier).enumerate() {
            let miles = parse_miles(cell).ok_or_else(|| LoadError::InvalidDistance {
                path: origin.to_owned(),
                line,
                column,
                cell: cell.to_owned(),
            })?;
            graph.add_undirected_edge(&location, other, miles);
        }
        locations.push(location);
    }
    let hub = locations
        .first()
        .cloned()
        .ok_or_else(|| LoadError::EmptyDistanceTable {
            path: origin.to_owned(),
        })?;
    log::debug!(
        "loaded {} locations and {} edges from {origin}",
        graph.location_count(),
        graph.edge_count()
    );
    Ok(DistanceTable {
        graph,
        hub,
        locations,
    })
}

fn parse_location(
    record: &StringRecord,
    origin: &Utf8Path,
    line: u64,
) -> Result<Location, LoadError> {
    let label = record.get(0).unwrap_or_default().trim();
    let cell = record.get(1).unwrap_or_default();
    split_address(cell)
        .map(|(address, zipcode)| Location::new(label, address, zipcode))
        .ok_or_else(|| LoadError::InvalidLocation {
            path: origin.to_owned(),
            line,
            cell: cell.to_owned(),
        })
}

/// Split `"street\n(zipcode)"` into its parts.
fn split_address(cell: &str) -> Option<(&str, &str)> {
    let (head, tail) = cell.trim().rsplit_once('(')?;
    let street = head.trim();
    let zipcode = tail.strip_suffix(')')?.trim();
    (!street.is_empty() && !zipcode.is_empty()).then_some((street, zipcode))
}

fn parse_miles(cell: &str) -> Option<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|miles| miles.is_finite() && *miles >= 0.0)
}
