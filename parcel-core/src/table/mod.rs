//! A separate-chaining hash map with a documented enumeration order.
//!
//! [`ChainingHashMap`] hashes each key into one of a fixed number of buckets
//! and keeps colliding entries in insertion order inside the bucket.
//! Iteration walks buckets by index and entries by insertion order. That
//! order is an artefact of the hash function and bucket count: it is stable
//! for a given build but is not sorted by key.

mod iter;
mod map;

pub use iter::{IntoIter, Iter, IterMut};
pub use map::{ChainingHashMap, DEFAULT_BUCKETS};
