//! Hub-arrival exceptions.
//!
//! Most packages are at the hub when it opens. A few arrive late on a
//! delayed flight, and one is listed with the wrong address until a
//! correction comes in. These facts are not in the manifest, so they live
//! in a side table keyed by package id.

use chrono::NaiveTime;
use parcel_core::{ArrivalNote, Location, PackageDirectory, PackageId, clock};

/// A package that reaches the hub later than opening time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrivalException {
    /// Affected package.
    pub id: PackageId,
    /// When the package becomes available for loading.
    pub arrives_at: NaiveTime,
    /// Reason reported before arrival.
    pub note: ArrivalNote,
    /// Replacement destination for a wrong-address listing.
    pub corrected_destination: Option<Location>,
}

impl ArrivalException {
    /// A package held up in transit until `arrives_at`.
    #[must_use]
    pub const fn delayed(id: PackageId, arrives_at: NaiveTime) -> Self {
        Self {
            id,
            arrives_at,
            note: ArrivalNote::DelayedOnFlight,
            corrected_destination: None,
        }
    }

    /// A package whose address is corrected to `destination` at `arrives_at`.
    #[must_use]
    pub const fn wrong_address(
        id: PackageId,
        arrives_at: NaiveTime,
        destination: Location,
    ) -> Self {
        Self {
            id,
            arrives_at,
            note: ArrivalNote::WrongAddress,
            corrected_destination: Some(destination),
        }
    }
}

/// The exceptions for the reference delivery day.
///
/// Packages 6, 25, 28 and 32 land at 09:05. Package 9 is listed at the
/// wrong address until 10:20, when it is corrected to 410 S State St.
#[must_use]
pub fn reference_exceptions() -> Vec<ArrivalException> {
    let delayed = [6, 25, 28, 32]
        .into_iter()
        .filter_map(PackageId::new)
        .map(|id| ArrivalException::delayed(id, clock(9, 5)));
    let corrected = PackageId::new(9).map(|id| {
        ArrivalException::wrong_address(
            id,
            clock(10, 20),
            Location::unlabelled("410 S State St", "84111"),
        )
    });
    delayed.chain(corrected).collect()
}

/// Stamp late arrivals and apply address corrections in `directory`.
///
/// Records are updated in place, so directory enumeration order is
/// unchanged. Exceptions for packages not in the directory are logged and skipped.
/// Returns the number applied.
pub fn apply_exceptions(
    directory: &mut PackageDirectory,
    exceptions: &[ArrivalException],
) -> usize {
    let mut applied = 0_usize;
    for exception in exceptions {
        let Some(record) = directory.get_mut(exception.id) else {
            log::warn!("no package {} to apply an arrival exception to", exception.id);
            continue;
        };
        record.set_arrival(exception.arrives_at, exception.note);
        if let Some(destination) = &exception.corrected_destination {
            log::info!(
                "package {} redirected from {} to {destination}",
                exception.id,
                record.destination
            );
            record.redirect(destination.clone());
        }
        applied = applied.saturating_add(1);
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcel_core::test_support::record;
    use parcel_core::{PackageStatus, hub_opens};
    use rstest::{fixture, rstest};

    fn id(raw: u32) -> PackageId {
        PackageId::new(raw).expect("positive id")
    }

    #[fixture]
    fn directory() -> PackageDirectory {
        let wrong = Location::unlabelled("300 State St", "84103");
        (1..=40).map(|raw| record(raw, &wrong)).collect()
    }

    #[rstest]
    fn reference_table_lists_five_packages() {
        let ids: Vec<_> = reference_exceptions().iter().map(|e| e.id.get()).collect();
        assert_eq!(ids, vec![6, 25, 28, 32, 9]);
    }

    #[rstest]
    fn delayed_packages_report_the_flight_before_landing(mut directory: PackageDirectory) {
        let applied = apply_exceptions(&mut directory, &reference_exceptions());
        assert_eq!(applied, 5);
        let six = directory.get(id(6)).expect("package 6");
        assert_eq!(six.arrived_at(), clock(9, 5));
        assert_eq!(
            six.status_at(clock(9, 4)),
            PackageStatus::AwaitingArrival(ArrivalNote::DelayedOnFlight)
        );
        assert_eq!(six.status_at(clock(9, 5)), PackageStatus::AtHub);
        let one = directory.get(id(1)).expect("package 1");
        assert_eq!(one.arrived_at(), hub_opens());
    }

    #[rstest]
    fn wrong_address_is_corrected(mut directory: PackageDirectory) {
        apply_exceptions(&mut directory, &reference_exceptions());
        let nine = directory.get(id(9)).expect("package 9");
        assert_eq!(
            nine.destination,
            Location::unlabelled("410 S State St", "84111")
        );
        assert_eq!(
            nine.status_at(clock(10, 0)).to_string(),
            "wrong address listed"
        );
    }

    #[rstest]
    fn exceptions_keep_enumeration_order() {
        let wrong = Location::unlabelled("300 State St", "84103");
        let mut chained = PackageDirectory::with_buckets(1);
        chained.extend((1..=12).map(|raw| record(raw, &wrong)));
        let before: Vec<_> = chained.iter().map(|r| r.id).collect();
        apply_exceptions(&mut chained, &reference_exceptions());
        let after: Vec<_> = chained.iter().map(|r| r.id).collect();
        assert_eq!(after, before);
    }

    #[rstest]
    fn unknown_packages_are_skipped() {
        let mut empty = PackageDirectory::new();
        assert_eq!(apply_exceptions(&mut empty, &reference_exceptions()), 0);
        assert!(empty.is_empty());
    }
}
