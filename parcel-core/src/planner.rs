//! Choosing where a truck drives next.

use crate::{AddressGraph, Location, PackageRecord};

/// Pick the next stop for a truck.
///
/// Implementations must return `current` when `inventory` is empty and
/// otherwise one of the inventory destinations. Planners are shared across
/// trucks simulated on different threads, hence the `Send + Sync` bound.
///
/// # Examples
///
/// ```rust
/// use parcel_core::{AddressGraph, DispatchPlanner, Location, PackageRecord};
///
/// /// Visits destinations in loading order.
/// struct InOrder;
///
/// impl DispatchPlanner for InOrder {
///     fn next_stop<'a>(
///         &self,
///         _graph: &AddressGraph,
///         current: &'a Location,
///         inventory: &'a [PackageRecord],
///     ) -> &'a Location {
///         inventory.first().map_or(current, |record| &record.destination)
///     }
/// }
///
/// let hub = Location::new("Hub", "4001 South 700 East", "84107");
/// assert_eq!(InOrder.next_stop(&AddressGraph::new(), &hub, &[]), &hub);
/// ```
pub trait DispatchPlanner: Send + Sync {
    /// Return the location the truck should drive to from `current`.
    fn next_stop<'a>(
        &self,
        graph: &AddressGraph,
        current: &'a Location,
        inventory: &'a [PackageRecord],
    ) -> &'a Location;
}
