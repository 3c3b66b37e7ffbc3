//! Package manifest parsing.
//!
//! One header row, then `id, street, city, state, zip, deadline, weight,
//! notes` per package. Notes may be omitted.

use std::io::Read;

use camino::Utf8Path;
use chrono::NaiveTime;
use csv::StringRecord;
use parcel_core::{Deadline, Location, PackageDirectory, PackageId, PackageRecord};

use crate::LoadError;
use crate::fs::open_utf8_file;

/// Columns every row must carry.
const REQUIRED_COLUMNS: usize = 7;

/// Read a package manifest from `path`.
///
/// # Errors
///
/// Returns [`LoadError::Open`] when the file cannot be opened and any error
/// from [`parse_packages`].
pub fn load_packages(path: &Utf8Path) -> Result<PackageDirectory, LoadError> {
    let file = open_utf8_file(path).map_err(|source| LoadError::Open {
        path: path.to_owned(),
        source,
    })?;
    parse_packages(file, path)
}

/// Parse a package manifest; `origin` names the source in errors.
///
/// Destinations are unlabelled; identity is the street and zipcode.
///
/// # Errors
///
/// Returns a [`LoadError`] for undecodable CSV, short rows, non-positive or
/// repeated ids, unknown deadline formats and invalid weights.
pub fn parse_packages<R: Read>(
    reader: R,
    origin: &Utf8Path,
) -> Result<PackageDirectory, LoadError> {
    let mut rows = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let mut directory = PackageDirectory::new();
    for row in rows.records() {
        let record = row.map_err(|source| LoadError::Csv {
            path: origin.to_owned(),
            source,
        })?;
        let line = record.position().map_or(0, csv::Position::line);
        let package = parse_row(&record, origin, line)?;
        if directory.contains(package.id) {
            return Err(LoadError::DuplicatePackage {
                path: origin.to_owned(),
                line,
                id: package.id.get(),
            });
        }
        directory.insert(package);
    }
    log::debug!("loaded {} packages from {origin}", directory.len());
    Ok(directory)
}

/// Parse `H:MM AM/PM` or `EOD`.
///
/// # Examples
/// ```
/// use parcel_core::{Deadline, clock};
/// use parcel_data::parse_deadline;
///
/// assert_eq!(parse_deadline("10:30 AM"), Some(Deadline::At(clock(10, 30))));
/// assert_eq!(parse_deadline("EOD"), Some(Deadline::EndOfDay));
/// assert_eq!(parse_deadline("noon"), None);
/// ```
#[must_use]
pub fn parse_deadline(cell: &str) -> Option<Deadline> {
    let text = cell.trim();
    if text.eq_ignore_ascii_case("EOD") {
        return Some(Deadline::EndOfDay);
    }
    NaiveTime::parse_from_str(text, "%I:%M %p")
        .ok()
        .map(Deadline::At)
}

fn parse_row(
    record: &StringRecord,
    origin: &Utf8Path,
    line: u64,
) -> Result<PackageRecord, LoadError> {
    if record.len() < REQUIRED_COLUMNS {
        return Err(LoadError::RowShape {
            path: origin.to_owned(),
            line,
            expected: REQUIRED_COLUMNS,
            found: record.len(),
        });
    }
    let cell = |index: usize| record.get(index).unwrap_or_default().trim();
    let id = cell(0)
        .parse::<u32>()
        .ok()
        .and_then(PackageId::new)
        .ok_or_else(|| LoadError::InvalidPackageId {
            path: origin.to_owned(),
            line,
            cell: cell(0).to_owned(),
        })?;
    let deadline = parse_deadline(cell(5)).ok_or_else(|| LoadError::InvalidDeadline {
        path: origin.to_owned(),
        line,
        cell: cell(5).to_owned(),
    })?;
    let weight_kg = cell(6)
        .parse::<f64>()
        .ok()
        .filter(|weight| weight.is_finite() && *weight >= 0.0)
        .ok_or_else(|| LoadError::InvalidWeight {
            path: origin.to_owned(),
            line,
            cell: cell(6).to_owned(),
        })?;
    Ok(PackageRecord::new(
        id,
        Location::unlabelled(cell(1), cell(4)),
        deadline,
        weight_kg,
    )
    .with_city_state(cell(2), cell(3))
    .with_notes(cell(7)))
}
