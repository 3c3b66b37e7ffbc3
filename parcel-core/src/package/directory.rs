//! Lookup table from package identifier to record.

use crate::table::{ChainingHashMap, Iter};

use super::{PackageId, PackageRecord};

/// Every package of the day, keyed by identifier.
///
/// Backed by a [`ChainingHashMap`], so [`PackageDirectory::iter`] yields
/// records in bucket order rather than identifier order. Use
/// [`PackageDirectory::sorted`] when presentation order matters.
///
/// # Examples
/// ```
/// use parcel_core::{Deadline, Location, PackageDirectory, PackageId, PackageRecord};
///
/// let id = PackageId::new(4).expect("positive id");
/// let record = PackageRecord::new(
///     id,
///     Location::unlabelled("380 W 2880 S", "84115"),
///     Deadline::EndOfDay,
///     4.0,
/// );
///
/// let mut directory = PackageDirectory::new();
/// directory.insert(record);
/// assert_eq!(directory.len(), 1);
/// assert!(directory.get(id).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageDirectory {
    records: ChainingHashMap<PackageId, PackageRecord>,
}

impl PackageDirectory {
    /// Construct an empty directory with the default bucket count.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an empty directory with `buckets` buckets.
    #[must_use]
    pub fn with_buckets(buckets: usize) -> Self {
        Self {
            records: ChainingHashMap::with_buckets(buckets),
        }
    }

    /// Insert or replace the record stored under `record.id`.
    ///
    /// Returns the record previously stored under that identifier.
    pub fn insert(&mut self, record: PackageRecord) -> Option<PackageRecord> {
        self.records.insert(record.id, record)
    }

    /// Record for `id`, or `None` when absent.
    #[must_use]
    pub fn get(&self, id: PackageId) -> Option<&PackageRecord> {
        self.records.get(&id)
    }

    /// Mutable record for `id`.
    pub fn get_mut(&mut self, id: PackageId) -> Option<&mut PackageRecord> {
        self.records.get_mut(&id)
    }

    /// Remove and return the record for `id`; absent ids are a no-op.
    pub fn remove(&mut self, id: PackageId) -> Option<PackageRecord> {
        self.records.remove(&id)
    }

    /// Returns `true` when `id` is present.
    #[must_use]
    pub fn contains(&self, id: PackageId) -> bool {
        self.records.contains_key(&id)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when the directory holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in bucket order; see the type-level note on ordering.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &PackageRecord> + '_ {
        self.entries().map(|(_, record)| record)
    }

    /// Identifier/record pairs in bucket order.
    #[must_use]
    pub fn entries(&self) -> Iter<'_, PackageId, PackageRecord> {
        self.records.iter()
    }

    /// Records sorted by identifier.
    #[must_use]
    pub fn sorted(&self) -> Vec<&PackageRecord> {
        let mut records: Vec<_> = self.iter().collect();
        records.sort_by_key(|record| record.id);
        records
    }
}

impl FromIterator<PackageRecord> for PackageDirectory {
    fn from_iter<I: IntoIterator<Item = PackageRecord>>(iter: I) -> Self {
        let mut directory = Self::new();
        directory.extend(iter);
        directory
    }
}

impl Extend<PackageRecord> for PackageDirectory {
    fn extend<I: IntoIterator<Item = PackageRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Deadline, Location};
    use rstest::rstest;

    fn record(id: u32) -> PackageRecord {
        PackageRecord::new(
            PackageId::new(id).expect("positive"),
            Location::unlabelled(format!("{id} Main St"), "84100"),
            Deadline::EndOfDay,
            1.0,
        )
    }

    #[rstest]
    fn reinserting_replaces_record() {
        let mut directory: PackageDirectory = (1..=3).map(record).collect();
        let replacement = record(2).with_notes("Can only be on truck 2");
        let previous = directory.insert(replacement);
        assert!(previous.is_some_and(|old| old.notes.is_empty()));
        assert_eq!(directory.len(), 3);
        let id = PackageId::new(2).expect("positive");
        assert_eq!(
            directory.get(id).map(|r| r.notes.as_str()),
            Some("Can only be on truck 2")
        );
    }

    #[rstest]
    fn sorted_orders_by_id() {
        let directory: PackageDirectory = [40, 3, 17, 1].into_iter().map(record).collect();
        let ids: Vec<_> = directory.sorted().iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![1, 3, 17, 40]);
    }

    #[rstest]
    fn iteration_yields_each_record_once() {
        let directory: PackageDirectory = (1..=40).map(record).collect();
        let mut ids: Vec<_> = directory.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids.len(), directory.len());
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 40);
    }

    #[rstest]
    fn small_bucket_count_still_finds_everything() {
        let mut directory = PackageDirectory::with_buckets(3);
        directory.extend((1..=12).map(record));
        assert!((1..=12).all(|id| directory.contains(PackageId::new(id).expect("positive"))));
    }
}
