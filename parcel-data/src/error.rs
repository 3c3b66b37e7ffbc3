//! Errors raised while loading the day's input.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Malformed or unreadable input. Always fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("failed to open {path}")]
    Open {
        /// File that failed to open.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The CSV reader could not decode a row.
    #[error("failed to read CSV from {path}")]
    Csv {
        /// File being read.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: csv::Error,
    },
    /// A row has fewer columns than the format requires.
    #[error("{path}:{line}: expected at least {expected} columns, found {found}")]
    RowShape {
        /// File being read.
        path: Utf8PathBuf,
        /// One-based line number.
        line: u64,
        /// Minimum column count.
        expected: usize,
        /// Columns present.
        found: usize,
    },
    /// The address cell is not `address\n(zipcode)`.
    #[error("{path}:{line}: invalid address cell {cell:?}")]
    InvalidLocation {
        /// File being read.
        path: Utf8PathBuf,
        /// One-based line number.
        line: u64,
        /// Offending cell.
        cell: String,
    },
    /// A distance on or below the diagonal is blank or not a number.
    #[error("{path}:{line}: invalid distance {cell:?} in column {column}")]
    InvalidDistance {
        /// File being read.
        path: Utf8PathBuf,
        /// One-based line number.
        line: u64,
        /// Zero-based distance column.
        column: usize,
        /// Offending cell.
        cell: String,
    },
    /// The distance table has no data rows.
    #[error("{path}: distance table has no locations")]
    EmptyDistanceTable {
        /// File being read.
        path: Utf8PathBuf,
    },
    /// The package id is not a positive integer.
    #[error("{path}:{line}: invalid package id {cell:?}")]
    InvalidPackageId {
        /// File being read.
        path: Utf8PathBuf,
        /// One-based line number.
        line: u64,
        /// Offending cell.
        cell: String,
    },
    /// The same package id appears twice in the manifest.
    #[error("{path}:{line}: package {id} is listed twice")]
    DuplicatePackage {
        /// File being read.
        path: Utf8PathBuf,
        /// One-based line number of the repeat.
        line: u64,
        /// Repeated identifier.
        id: u32,
    },
    /// The deadline is neither `H:MM AM/PM` nor `EOD`.
    #[error("{path}:{line}: invalid deadline {cell:?}")]
    InvalidDeadline {
        /// File being read.
        path: Utf8PathBuf,
        /// One-based line number.
        line: u64,
        /// Offending cell.
        cell: String,
    },
    /// The mass is not a non-negative number.
    #[error("{path}:{line}: invalid weight {cell:?}")]
    InvalidWeight {
        /// File being read.
        path: Utf8PathBuf,
        /// One-based line number.
        line: u64,
        /// Offending cell.
        cell: String,
    },
    /// The schedule file is not a JSON list of trips.
    #[error("failed to parse schedule {path}")]
    Schedule {
        /// File being read.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
}
