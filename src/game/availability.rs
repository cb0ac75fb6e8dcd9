//! Availability index: which locations hold a collectible resource right now

use std::collections::BTreeSet;

use crate::core::types::{GameTime, Location};
use crate::game::state::Resource;

/// Distinct locations with at least one resource valid at `now`
///
/// Co-located resources collapse into one entry; units claim locations,
/// not individual resources.
pub fn available_locations(resources: &[Resource], now: GameTime) -> BTreeSet<Location> {
    resources
        .iter()
        .filter(|r| r.is_available(now))
        .map(Resource::location)
        .collect()
}
