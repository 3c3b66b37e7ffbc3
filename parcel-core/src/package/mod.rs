//! Package records and their delivery lifecycle.
//!
//! A [`PackageRecord`] carries the immutable description of a parcel plus a
//! timeline of when it reached the hub, when it was loaded onto a truck and
//! when it was dropped off. Status text is never stored; it is derived from
//! the timeline by [`status_at`].

use std::fmt;
use std::num::NonZeroU32;

use chrono::NaiveTime;
use thiserror::Error;

use crate::Location;
use crate::clock::{end_of_day, format_clock, hub_opens};

mod directory;
mod status;

pub use directory::PackageDirectory;
pub use status::{PackageStatus, status_at};

/// Unique, positive package identifier.
///
/// # Examples
/// ```
/// use parcel_core::PackageId;
///
/// assert_eq!(PackageId::new(14).map(PackageId::get), Some(14));
/// assert!(PackageId::new(0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u32", into = "u32")
)]
pub struct PackageId(NonZeroU32);

impl PackageId {
    /// The smallest valid identifier.
    pub const MIN: Self = Self(NonZeroU32::MIN);

    /// Wrap a raw identifier; zero is rejected.
    #[must_use]
    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

/// Returned when converting zero into a [`PackageId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("package identifiers must be positive")]
pub struct ZeroPackageId;

impl TryFrom<u32> for PackageId {
    type Error = ZeroPackageId;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or(ZeroPackageId)
    }
}

impl From<PackageId> for u32 {
    fn from(id: PackageId) -> Self {
        id.get()
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Latest acceptable delivery time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Deadline {
    /// Deliver no later than this time.
    At(NaiveTime),
    /// Deliver any time today.
    EndOfDay,
}

impl Deadline {
    /// The deadline as a comparable time; end of day maps to 23:59:59.999999.
    #[must_use]
    pub fn as_time(self) -> NaiveTime {
        match self {
            Self::At(time) => time,
            Self::EndOfDay => end_of_day(),
        }
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(time) => write!(f, "{}", time.format("%-I:%M %p")),
            Self::EndOfDay => f.write_str("EOD"),
        }
    }
}

/// Condition of a package before it reaches the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArrivalNote {
    /// Arrives with the morning shipment.
    #[default]
    OnTime,
    /// Held up in transit and reaches the hub late.
    DelayedOnFlight,
    /// Listed with an incorrect address that is corrected later.
    WrongAddress,
}

impl fmt::Display for ArrivalNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OnTime => "waiting at HUB",
            Self::DelayedOnFlight => "delayed on flight",
            Self::WrongAddress => "wrong address listed",
        })
    }
}

/// When and by which truck a package was picked up.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loading {
    /// Label of the truck carrying the package.
    pub truck: String,
    /// Time the package left the hub.
    pub at: NaiveTime,
}

/// Errors from lifecycle transitions on a [`PackageRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// Delivery was recorded for a package that was never loaded.
    #[error("package {id} cannot be delivered before it is loaded")]
    DeliveredBeforeLoaded {
        /// Affected package.
        id: PackageId,
    },
}

/// A parcel and its delivery timeline.
///
/// # Examples
/// ```
/// use parcel_core::{Deadline, Location, PackageId, PackageRecord, clock};
///
/// let id = PackageId::new(1).expect("positive id");
/// let mut record = PackageRecord::new(
///     id,
///     Location::unlabelled("195 W Oakland Ave", "84115"),
///     Deadline::At(clock(10, 30)),
///     21.0,
/// );
/// record.mark_loaded("Truck 1", clock(8, 0));
/// record.mark_delivered(clock(8, 40))?;
///
/// assert_eq!(record.met_deadline(), Some(true));
/// assert_eq!(record.final_status().to_string(), "Truck 1 delivered at 08:40:00");
/// # Ok::<(), parcel_core::LifecycleError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackageRecord {
    /// Unique identifier.
    pub id: PackageId,
    /// Where the package must be delivered.
    pub destination: Location,
    /// City line of the delivery address.
    pub city: String,
    /// State line of the delivery address.
    pub state: String,
    /// Latest acceptable delivery time.
    pub deadline: Deadline,
    /// Mass in kilograms.
    pub weight_kg: f64,
    /// Free-text handling notes.
    pub notes: String,
    arrival_note: ArrivalNote,
    arrived_at: NaiveTime,
    loaded: Option<Loading>,
    delivered_at: Option<NaiveTime>,
}

impl PackageRecord {
    /// Construct a record that reaches the hub at opening time.
    #[must_use]
    pub fn new(id: PackageId, destination: Location, deadline: Deadline, weight_kg: f64) -> Self {
        Self {
            id,
            destination,
            city: String::new(),
            state: String::new(),
            deadline,
            weight_kg,
            notes: String::new(),
            arrival_note: ArrivalNote::OnTime,
            arrived_at: hub_opens(),
            loaded: None,
            delivered_at: None,
        }
    }

    /// Set the city and state lines.
    #[must_use]
    pub fn with_city_state(mut self, city: impl Into<String>, state: impl Into<String>) -> Self {
        self.city = city.into();
        self.state = state.into();
        self
    }

    /// Attach handling notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Override when the package reaches the hub and why.
    #[must_use]
    pub const fn with_arrival(mut self, at: NaiveTime, note: ArrivalNote) -> Self {
        self.set_arrival(at, note);
        self
    }

    /// Change when the package reaches the hub and why, in place.
    pub const fn set_arrival(&mut self, at: NaiveTime, note: ArrivalNote) {
        self.arrived_at = at;
        self.arrival_note = note;
    }

    /// Replace the destination, e.g. once a wrong address is corrected.
    pub fn redirect(&mut self, destination: Location) {
        self.destination = destination;
    }

    /// Time the package reaches the hub.
    #[must_use]
    pub const fn arrived_at(&self) -> NaiveTime {
        self.arrived_at
    }

    /// Status reported before the package reaches the hub.
    #[must_use]
    pub const fn arrival_note(&self) -> ArrivalNote {
        self.arrival_note
    }

    /// Loading details, once the package is on a truck.
    #[must_use]
    pub const fn loading(&self) -> Option<&Loading> {
        self.loaded.as_ref()
    }

    /// Time the package left the hub, if loaded.
    #[must_use]
    pub fn loaded_at(&self) -> Option<NaiveTime> {
        self.loaded.as_ref().map(|loading| loading.at)
    }

    /// Time the package was dropped off, if delivered.
    #[must_use]
    pub const fn delivered_at(&self) -> Option<NaiveTime> {
        self.delivered_at
    }

    /// Record that `truck` picked the package up at `at`.
    pub fn mark_loaded(&mut self, truck: impl Into<String>, at: NaiveTime) {
        self.loaded = Some(Loading {
            truck: truck.into(),
            at,
        });
    }

    /// Record the drop-off time.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::DeliveredBeforeLoaded`] when the package was
    /// never loaded; the record is left unchanged.
    pub fn mark_delivered(&mut self, at: NaiveTime) -> Result<(), LifecycleError> {
        if self.loaded.is_none() {
            return Err(LifecycleError::DeliveredBeforeLoaded { id: self.id });
        }
        self.delivered_at = Some(at);
        Ok(())
    }

    /// Status at `query`; see [`status_at`].
    #[must_use]
    pub fn status_at(&self, query: NaiveTime) -> PackageStatus {
        status_at(self, query)
    }

    /// Status once every recorded lifecycle event has happened.
    #[must_use]
    pub fn final_status(&self) -> PackageStatus {
        match (&self.loaded, self.delivered_at) {
            (Some(loading), Some(at)) => PackageStatus::Delivered {
                truck: loading.truck.clone(),
                at,
            },
            (Some(loading), None) => PackageStatus::EnRoute {
                truck: loading.truck.clone(),
            },
            (None, _) => PackageStatus::AtHub,
        }
    }

    /// Whether the delivery beat the deadline; `None` until delivered.
    #[must_use]
    pub fn met_deadline(&self) -> Option<bool> {
        self.delivered_at
            .map(|delivered| delivered <= self.deadline.as_time())
    }

    /// Delivery time rendered as `HH:MM:SS`, or an empty string.
    #[must_use]
    pub fn delivered_at_text(&self) -> String {
        self.delivered_at.map(format_clock).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::clock;
    use rstest::{fixture, rstest};

    #[fixture]
    fn record() -> PackageRecord {
        PackageRecord::new(
            PackageId::new(9).expect("positive"),
            Location::unlabelled("300 State St", "84103"),
            Deadline::EndOfDay,
            2.0,
        )
    }

    #[rstest]
    fn delivery_requires_loading(mut record: PackageRecord) {
        let err = record
            .mark_delivered(clock(9, 0))
            .expect_err("not yet loaded");
        assert_eq!(
            err,
            LifecycleError::DeliveredBeforeLoaded { id: record.id }
        );
        assert!(record.delivered_at().is_none());
    }

    #[rstest]
    fn final_status_tracks_timeline(mut record: PackageRecord) {
        assert_eq!(record.final_status(), PackageStatus::AtHub);
        record.mark_loaded("Truck 2", clock(10, 20));
        assert_eq!(record.final_status().to_string(), "Truck 2 en route");
        record.mark_delivered(clock(11, 5)).expect("loaded");
        assert_eq!(
            record.final_status().to_string(),
            "Truck 2 delivered at 11:05:00"
        );
    }

    #[rstest]
    #[case(Deadline::At(clock(10, 30)), clock(10, 30), true)]
    #[case(Deadline::At(clock(10, 30)), clock(10, 31), false)]
    #[case(Deadline::EndOfDay, clock(23, 59), true)]
    fn deadline_check(
        mut record: PackageRecord,
        #[case] deadline: Deadline,
        #[case] delivered: NaiveTime,
        #[case] met: bool,
    ) {
        record.deadline = deadline;
        assert_eq!(record.met_deadline(), None);
        record.mark_loaded("Truck 1", clock(8, 0));
        record.mark_delivered(delivered).expect("loaded");
        assert_eq!(record.met_deadline(), Some(met));
    }

    #[rstest]
    #[case(Deadline::At(clock(9, 0)), "9:00 AM")]
    #[case(Deadline::At(clock(10, 30)), "10:30 AM")]
    #[case(Deadline::EndOfDay, "EOD")]
    fn deadline_renders_like_source_data(#[case] deadline: Deadline, #[case] text: &str) {
        assert_eq!(deadline.to_string(), text);
    }

    #[rstest]
    fn zero_id_is_rejected() {
        assert_eq!(PackageId::try_from(0), Err(ZeroPackageId));
    }
}
