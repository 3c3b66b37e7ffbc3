use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault, DefaultHasher, Hash};

use super::iter::{IntoIter, Iter, IterMut};

/// Bucket count used by [`ChainingHashMap::new`].
///
/// Prime, and larger than the package count of a typical delivery day so
/// most buckets hold at most one entry.
pub const DEFAULT_BUCKETS: usize = 41;

/// Hash map resolving collisions by chaining entries inside fixed buckets.
///
/// The default hasher is unkeyed, so enumeration order is reproducible from
/// run to run. See the [module documentation](crate::table) for the order
/// contract.
///
/// # Examples
/// ```
/// use parcel_core::ChainingHashMap;
///
/// let mut map = ChainingHashMap::new();
/// assert_eq!(map.insert(7_u32, "seven"), None);
/// assert_eq!(map.insert(7, "SEVEN"), Some("seven"));
/// assert_eq!(map.get(&7), Some(&"SEVEN"));
/// assert_eq!(map.len(), 1);
/// assert_eq!(map.remove(&8), None);
/// ```
#[derive(Clone)]
pub struct ChainingHashMap<K, V, S = BuildHasherDefault<DefaultHasher>> {
    buckets: Vec<Vec<(K, V)>>,
    hasher: S,
}

impl<K, V> ChainingHashMap<K, V> {
    /// Construct an empty map with [`DEFAULT_BUCKETS`] buckets.
    #[must_use]
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_BUCKETS)
    }

    /// Construct an empty map with `count` buckets.
    ///
    /// A count of zero is raised to one so every key has a bucket.
    #[must_use]
    pub fn with_buckets(count: usize) -> Self {
        Self::with_buckets_and_hasher(count, BuildHasherDefault::default())
    }
}

impl<K, V, S> ChainingHashMap<K, V, S> {
    /// Construct an empty map with `count` buckets and a custom hasher.
    pub fn with_buckets_and_hasher(count: usize, hasher: S) -> Self {
        let buckets = std::iter::repeat_with(Vec::new).take(count.max(1)).collect();
        Self { buckets, hasher }
    }

    /// Number of buckets; fixed for the lifetime of the map.
    #[must_use]
    pub const fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of entries across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Returns `true` when no bucket holds an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Iterate entries in bucket order, then insertion order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.buckets, self.len())
    }

    /// Iterate entries mutably in the same order as [`Self::iter`].
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let len = self.len();
        IterMut::new(&mut self.buckets, len)
    }

    /// Keys in enumeration order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Values in enumeration order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }
}

impl<K, V, S> ChainingHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "bucket selection is the hash modulo the bucket count"
    )]
    fn bucket_index(&self, key: &K) -> usize {
        let count = u64::try_from(self.buckets.len()).unwrap_or(u64::MAX);
        usize::try_from(self.hasher.hash_one(key) % count).unwrap_or_default()
    }

    fn bucket(&self, key: &K) -> Option<&Vec<(K, V)>> {
        self.buckets.get(self.bucket_index(key))
    }

    fn bucket_mut(&mut self, key: &K) -> Option<&mut Vec<(K, V)>> {
        let index = self.bucket_index(key);
        self.buckets.get_mut(index)
    }

    /// Insert or update the value stored under `key`.
    ///
    /// An existing entry is overwritten in place, keeping its position in the
    /// bucket, and the previous value is returned. New keys are appended to
    /// the end of their bucket.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let bucket = self.bucket_mut(&key)?;
        if let Some((_, slot)) = bucket.iter_mut().find(|(existing, _)| *existing == key) {
            return Some(std::mem::replace(slot, value));
        }
        bucket.push((key, value));
        None
    }

    /// Value stored under `key`, or `None` when absent.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.bucket(key)?
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Mutable access to the value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.bucket_mut(key)?
            .iter_mut()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Returns `true` when `key` has an entry.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Remove the entry stored under `key` and return its value.
    ///
    /// Removing an absent key leaves the map untouched and returns `None`.
    /// The remaining entries in the bucket keep their relative order.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let bucket = self.bucket_mut(key)?;
        let position = bucket.iter().position(|(existing, _)| existing == key)?;
        Some(bucket.remove(position).1)
    }
}

impl<K, V> Default for ChainingHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ChainingHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for ChainingHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for ChainingHashMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainingHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut ChainingHashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for ChainingHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let len = self.len();
        IntoIter::new(self.buckets, len)
    }
}
