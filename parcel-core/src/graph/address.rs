//! Append-only weighted graph keyed by [`Location`].

use std::collections::HashMap;

use crate::Location;

use super::error::GraphError;

/// Dense handle for a location registered in an [`AddressGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationId(usize);

impl LocationId {
    /// Position of the location in registration order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Locations and the miles between them.
///
/// Locations are interned on first sight and never removed. Edges are
/// directed; [`AddressGraph::add_undirected_edge`] inserts both directions
/// with the same weight so the distance matrix stays symmetric.
///
/// # Examples
/// ```
/// use parcel_core::{AddressGraph, Location};
///
/// let hub = Location::new("Hub", "4001 South 700 East", "84107");
/// let stop = Location::unlabelled("1060 Dalton Ave S", "84104");
///
/// let mut graph = AddressGraph::new();
/// graph.add_undirected_edge(&hub, &stop, 7.2);
///
/// assert_eq!(graph.distance_between(&hub, &stop), Ok(7.2));
/// assert_eq!(graph.distance_between(&stop, &hub), Ok(7.2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AddressGraph {
    locations: Vec<Location>,
    index: HashMap<Location, LocationId>,
    adjacency: Vec<Vec<LocationId>>,
    weights: HashMap<(LocationId, LocationId), f64>,
}

impl AddressGraph {
    /// Construct an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `location`, returning its handle.
    ///
    /// Adding a location that is already present is a no-op and returns the
    /// existing handle; the first label seen is kept.
    pub fn add_location(&mut self, location: Location) -> LocationId {
        if let Some(existing) = self.index.get(&location) {
            return *existing;
        }
        let id = LocationId(self.locations.len());
        self.index.insert(location.clone(), id);
        self.locations.push(location);
        self.adjacency.push(Vec::new());
        id
    }

    /// Insert a one-way edge from `from` to `to`.
    ///
    /// Unknown endpoints are registered first. Re-inserting an existing edge
    /// replaces its weight without duplicating the adjacency entry.
    pub fn add_directed_edge(&mut self, from: &Location, to: &Location, weight: f64) {
        let from_id = self.add_location(from.clone());
        let to_id = self.add_location(to.clone());
        self.insert_edge(from_id, to_id, weight);
    }

    /// Insert an edge in both directions with the same weight.
    pub fn add_undirected_edge(&mut self, a: &Location, b: &Location, weight: f64) {
        let a_id = self.add_location(a.clone());
        let b_id = self.add_location(b.clone());
        self.insert_edge(a_id, b_id, weight);
        self.insert_edge(b_id, a_id, weight);
    }

    fn insert_edge(&mut self, from: LocationId, to: LocationId, weight: f64) {
        if self.weights.insert((from, to), weight).is_none()
            && let Some(neighbours) = self.adjacency.get_mut(from.0)
        {
            neighbours.push(to);
        }
    }

    /// Miles travelled from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MissingEdge`] when the ordered pair was never
    /// inserted, including when either location is unknown.
    pub fn distance_between(&self, from: &Location, to: &Location) -> Result<f64, GraphError> {
        self.id_of(from)
            .zip(self.id_of(to))
            .and_then(|(from_id, to_id)| self.weight(from_id, to_id))
            .ok_or_else(|| GraphError::MissingEdge {
                from: from.to_string(),
                to: to.to_string(),
            })
    }

    /// Weight of the edge between two handles, if present.
    #[must_use]
    pub fn weight(&self, from: LocationId, to: LocationId) -> Option<f64> {
        self.weights.get(&(from, to)).copied()
    }

    /// Handle for `location`, if it has been registered.
    #[must_use]
    pub fn id_of(&self, location: &Location) -> Option<LocationId> {
        self.index.get(location).copied()
    }

    /// Location registered under `id`.
    #[must_use]
    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(id.0)
    }

    /// Look up a registered location by address and zipcode.
    #[must_use]
    pub fn find_by_address(&self, address: &str, zipcode: &str) -> Option<&Location> {
        self.locations
            .iter()
            .find(|location| location.matches(address, zipcode))
    }

    /// Locations reachable from `location` in insertion order.
    pub fn neighbours(&self, location: &Location) -> impl Iterator<Item = &Location> + '_ {
        self.id_of(location)
            .and_then(|id| self.adjacency.get(id.0))
            .into_iter()
            .flatten()
            .filter_map(|id| self.locations.get(id.0))
    }

    pub(crate) fn neighbour_ids(&self, id: LocationId) -> &[LocationId] {
        self.adjacency.get(id.0).map_or(&[], Vec::as_slice)
    }

    /// All registered locations in registration order.
    pub fn locations(&self) -> impl ExactSizeIterator<Item = &Location> + '_ {
        self.locations.iter()
    }

    /// Number of registered locations.
    #[must_use]
    pub const fn location_count(&self) -> usize {
        self.locations.len()
    }

    /// Number of directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hub() -> Location {
        Location::new("Hub", "4001 South 700 East", "84107")
    }

    #[fixture]
    fn stop() -> Location {
        Location::unlabelled("1330 2100 S", "84106")
    }

    #[rstest]
    fn adding_existing_location_is_idempotent(hub: Location) {
        let mut graph = AddressGraph::new();
        let first = graph.add_location(hub.clone());
        let relabelled = Location::new("Depot", hub.address.clone(), hub.zipcode.clone());
        let second = graph.add_location(relabelled);
        assert_eq!(first, second);
        assert_eq!(graph.location_count(), 1);
        assert_eq!(graph.location(first).map(|l| l.label.as_str()), Some("Hub"));
    }

    #[rstest]
    fn directed_edge_is_one_way(hub: Location, stop: Location) {
        let mut graph = AddressGraph::new();
        graph.add_directed_edge(&hub, &stop, 3.5);
        assert_eq!(graph.distance_between(&hub, &stop), Ok(3.5));
        assert!(matches!(
            graph.distance_between(&stop, &hub),
            Err(GraphError::MissingEdge { .. })
        ));
    }

    #[rstest]
    fn unknown_location_reports_missing_edge(hub: Location, stop: Location) {
        let mut graph = AddressGraph::new();
        graph.add_location(hub.clone());
        let err = graph
            .distance_between(&hub, &stop)
            .expect_err("stop was never registered");
        assert_eq!(
            err,
            GraphError::MissingEdge {
                from: hub.to_string(),
                to: stop.to_string(),
            }
        );
    }

    #[rstest]
    fn reinserting_edge_overwrites_weight(hub: Location, stop: Location) {
        let mut graph = AddressGraph::new();
        graph.add_undirected_edge(&hub, &stop, 1.0);
        graph.add_undirected_edge(&hub, &stop, 2.0);
        assert_eq!(graph.distance_between(&stop, &hub), Ok(2.0));
        assert_eq!(graph.neighbours(&hub).count(), 1);
        assert_eq!(graph.edge_count(), 2);
    }

    #[rstest]
    fn neighbours_follow_insertion_order(hub: Location, stop: Location) {
        let other = Location::unlabelled("2530 S 500 E", "84106");
        let mut graph = AddressGraph::new();
        graph.add_directed_edge(&hub, &other, 1.0);
        graph.add_directed_edge(&hub, &stop, 2.0);
        let seen: Vec<_> = graph.neighbours(&hub).cloned().collect();
        assert_eq!(seen, vec![other, stop]);
    }

    #[rstest]
    fn find_by_address_ignores_label(hub: Location) {
        let mut graph = AddressGraph::new();
        graph.add_location(hub.clone());
        assert_eq!(
            graph.find_by_address("4001 South 700 East", "84107"),
            Some(&hub)
        );
        assert!(graph.find_by_address("4001 South 700 East", "84000").is_none());
    }
}
