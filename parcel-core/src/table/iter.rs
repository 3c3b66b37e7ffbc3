//! Iterators over [`super::ChainingHashMap`] entries.
//!
//! All three walk bucket 0 first, then bucket 1, and so on, yielding the
//! entries of each bucket in insertion order.

use std::iter::{Flatten, FusedIterator};
use std::{slice, vec};

/// Borrowing iterator returned by [`super::ChainingHashMap::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    entries: Flatten<slice::Iter<'a, Vec<(K, V)>>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(super) fn new(buckets: &'a [Vec<(K, V)>], len: usize) -> Self {
        Self {
            entries: buckets.iter().flatten(),
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.entries.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Mutable iterator returned by [`super::ChainingHashMap::iter_mut`].
#[derive(Debug)]
pub struct IterMut<'a, K, V> {
    entries: Flatten<slice::IterMut<'a, Vec<(K, V)>>>,
    remaining: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(super) fn new(buckets: &'a mut [Vec<(K, V)>], len: usize) -> Self {
        Self {
            entries: buckets.iter_mut().flatten(),
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.entries.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some((&*key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Owning iterator produced by consuming a [`super::ChainingHashMap`].
#[derive(Debug)]
pub struct IntoIter<K, V> {
    entries: Flatten<vec::IntoIter<Vec<(K, V)>>>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(super) fn new(buckets: Vec<Vec<(K, V)>>, len: usize) -> Self {
        Self {
            entries: buckets.into_iter().flatten(),
            remaining: len,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}
