//! Parsing the times and package ids typed by the user.

use chrono::NaiveTime;
use parcel_core::{PackageId, hub_opens};

use crate::QueryError;

/// Parse a four-digit `HHMM` time no earlier than the hub opening.
pub(crate) fn parse_query_time(input: &str) -> Result<NaiveTime, QueryError> {
    let text = input.trim();
    let bad_format = || QueryError::BadTimeFormat {
        input: text.to_owned(),
    };
    if text.len() != 4 || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(bad_format());
    }
    let time = NaiveTime::parse_from_str(text, "%H%M").map_err(|_| bad_format())?;
    if time < hub_opens() {
        return Err(QueryError::BeforeOpening { time });
    }
    Ok(time)
}

/// Parse a package id in `1..=max`.
pub(crate) fn parse_package_id(input: &str, max: usize) -> Result<PackageId, QueryError> {
    let text = input.trim();
    let raw: u32 = text.parse().map_err(|_| QueryError::BadPackageId {
        input: text.to_owned(),
    })?;
    let in_range = usize::try_from(raw).is_ok_and(|value| value <= max);
    PackageId::new(raw)
        .filter(|_| in_range)
        .ok_or(QueryError::PackageOutOfRange { id: raw, max })
}
