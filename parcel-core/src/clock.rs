//! Time-of-day helpers shared by the package lifecycle and the trucks.

use chrono::{NaiveTime, TimeDelta};

const MICROS_PER_HOUR: f64 = 3_600_000_000.0;

/// Build a wall-clock time from hours and minutes.
///
/// Out-of-range components fall back to midnight; callers pass literals.
#[must_use]
pub fn clock(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// Time packages are normally available at the hub.
#[must_use]
pub fn hub_opens() -> NaiveTime {
    clock(8, 0)
}

/// Sentinel used for "end of day" deadlines: 23:59:59.999999.
#[must_use]
pub fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap_or_default()
}

/// Driving time for `miles` at a constant `speed_mph`, to the microsecond.
///
/// Non-positive or non-finite inputs yield zero rather than a negative or
/// undefined duration.
///
/// # Examples
/// ```
/// use chrono::TimeDelta;
/// use parcel_core::travel_time;
///
/// assert_eq!(travel_time(4.0, 18.0), TimeDelta::seconds(800));
/// assert_eq!(travel_time(1.0, 0.0), TimeDelta::zero());
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "mileage over speed is converted to whole microseconds"
)]
pub fn travel_time(miles: f64, speed_mph: f64) -> TimeDelta {
    if !(miles.is_finite() && speed_mph.is_finite()) || miles <= 0.0 || speed_mph <= 0.0 {
        return TimeDelta::zero();
    }
    let micros = (miles / speed_mph * MICROS_PER_HOUR).round();
    TimeDelta::microseconds(micros as i64)
}

/// Render a time as `HH:MM:SS`.
#[must_use]
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(4.0, 800)]
    #[case(7.0, 1400)]
    #[case(18.0, 3600)]
    fn travel_time_at_eighteen_mph(#[case] miles: f64, #[case] seconds: i64) {
        assert_eq!(travel_time(miles, 18.0), TimeDelta::seconds(seconds));
    }

    #[rstest]
    #[case(-1.0, 18.0)]
    #[case(1.0, -18.0)]
    #[case(f64::NAN, 18.0)]
    #[case(f64::INFINITY, 18.0)]
    fn degenerate_inputs_are_zero(#[case] miles: f64, #[case] speed: f64) {
        assert_eq!(travel_time(miles, speed), TimeDelta::zero());
    }

    #[rstest]
    fn end_of_day_is_last_microsecond() {
        assert_eq!(format_clock(end_of_day()), "23:59:59");
        assert!(end_of_day() > clock(23, 59));
    }
}
