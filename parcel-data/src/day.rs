//! Loading everything needed to simulate one day.

use parcel_core::{AddressGraph, Location, PackageDirectory};
use parcel_dispatch::TruckAssignment;

use crate::{
    LoadError, LoaderConfig, apply_exceptions, load_distance_table, load_packages, load_schedule,
    reference_exceptions, reference_schedule,
};

/// Graph, packages and schedule for one delivery day.
#[derive(Debug, Clone)]
pub struct DeliveryDay {
    /// Mileage between every pair of stops.
    pub graph: AddressGraph,
    /// Start and end of every trip.
    pub hub: Location,
    /// Every package, with arrival exceptions applied.
    pub directory: PackageDirectory,
    /// Trips with their package lists.
    pub schedule: Vec<TruckAssignment>,
}

/// Read every input named by `config`.
///
/// Package destinations are replaced by the matching graph location so they
/// carry its label. Destinations absent from the table are kept as-is and
/// logged; the simulator handles the missing distances.
///
/// # Errors
///
/// Returns the first [`LoadError`] raised by any of the loaders.
pub fn load_day(config: &LoaderConfig) -> Result<DeliveryDay, LoadError> {
    let table = load_distance_table(&config.distance_table)?;
    let mut directory = load_packages(&config.package_file)?;
    apply_exceptions(&mut directory, &reference_exceptions());
    let ids: Vec<_> = directory.iter().map(|record| record.id).collect();
    for id in ids {
        let Some(record) = directory.get_mut(id) else {
            continue;
        };
        let Some(location) = table
            .graph
            .find_by_address(&record.destination.address, &record.destination.zipcode)
            .cloned()
        else {
            log::warn!(
                "package {} is addressed to {}, which is not in the distance table",
                record.id,
                record.destination
            );
            continue;
        };
        record.redirect(location);
    }
    let schedule = config
        .schedule
        .as_deref()
        .map_or_else(|| Ok(reference_schedule()), load_schedule)?;
    log::info!(
        "loaded {} packages, {} locations and {} trips",
        directory.len(),
        table.locations.len(),
        schedule.len()
    );
    Ok(DeliveryDay {
        graph: table.graph,
        hub: table.hub,
        directory,
        schedule,
    })
}
