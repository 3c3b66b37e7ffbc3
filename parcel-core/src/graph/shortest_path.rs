//! Single-source shortest paths over an [`AddressGraph`].

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::Location;

use super::address::{AddressGraph, LocationId};

/// Result of a Dijkstra run from one source location.
///
/// The tentative distance and predecessor of every location live in this
/// value rather than on the locations themselves, so concurrent or repeated
/// searches over the same graph never observe each other's state.
///
/// # Examples
/// ```
/// use parcel_core::{AddressGraph, Location, ShortestPaths};
///
/// let a = Location::unlabelled("A St", "1");
/// let b = Location::unlabelled("B St", "1");
/// let c = Location::unlabelled("C St", "1");
/// let mut graph = AddressGraph::new();
/// graph.add_undirected_edge(&a, &b, 1.0);
/// graph.add_undirected_edge(&b, &c, 1.0);
/// graph.add_undirected_edge(&a, &c, 5.0);
///
/// let paths = ShortestPaths::compute(&graph, &a).expect("source is registered");
/// assert_eq!(paths.distance_to(&c), Some(2.0));
/// assert_eq!(paths.path_to(&c), Some(vec![a, b, c]));
/// ```
#[derive(Debug, Clone)]
pub struct ShortestPaths<'g> {
    graph: &'g AddressGraph,
    source: LocationId,
    distance: HashMap<LocationId, f64>,
    previous: HashMap<LocationId, LocationId>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Frontier {
    distance: f64,
    id: LocationId,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    // Reversed so `BinaryHeap` pops the closest location first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'g> ShortestPaths<'g> {
    /// Run Dijkstra from `source`.
    ///
    /// Returns `None` when `source` is not registered in `graph`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "path lengths accumulate floating-point mileage"
    )]
    pub fn compute(graph: &'g AddressGraph, source: &Location) -> Option<Self> {
        let source_id = graph.id_of(source)?;
        let mut distance = HashMap::from([(source_id, 0.0)]);
        let mut previous = HashMap::new();
        let mut frontier = BinaryHeap::from([Frontier {
            distance: 0.0,
            id: source_id,
        }]);

        while let Some(Frontier { distance: reached, id }) = frontier.pop() {
            if distance.get(&id).is_some_and(|best| reached > *best) {
                continue;
            }
            for &next in graph.neighbour_ids(id) {
                let Some(weight) = graph.weight(id, next) else {
                    continue;
                };
                let candidate = reached + weight;
                let improves = distance.get(&next).is_none_or(|best| candidate < *best);
                if improves {
                    distance.insert(next, candidate);
                    previous.insert(next, id);
                    frontier.push(Frontier {
                        distance: candidate,
                        id: next,
                    });
                }
            }
        }

        Some(Self {
            graph,
            source: source_id,
            distance,
            previous,
        })
    }

    /// Shortest distance to `target`, or `None` when unreachable.
    #[must_use]
    pub fn distance_to(&self, target: &Location) -> Option<f64> {
        let id = self.graph.id_of(target)?;
        self.distance.get(&id).copied()
    }

    /// Locations along the shortest path from the source to `target`,
    /// inclusive of both ends.
    #[must_use]
    pub fn path_to(&self, target: &Location) -> Option<Vec<Location>> {
        let mut cursor = self.graph.id_of(target)?;
        if !self.distance.contains_key(&cursor) {
            return None;
        }
        let mut ids = vec![cursor];
        while cursor != self.source {
            cursor = *self.previous.get(&cursor)?;
            ids.push(cursor);
        }
        ids.iter()
            .rev()
            .map(|id| self.graph.location(*id).cloned())
            .collect()
    }
}
