//! Unit status classification
//!
//! A unit whose last planned location is an available resource location has
//! already claimed it. Claimed locations leave the pool before any idle unit
//! is assigned, so two units never converge on one resource.

use std::collections::BTreeSet;

use crate::core::error::{BotError, Result};
use crate::core::types::{Location, UnitIndex};
use crate::game::state::Unit;

/// Outcome of classifying every unit for one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Locations still free after claims
    pub available: BTreeSet<Location>,
    /// Units needing a new target, in unit order
    pub idle: Vec<UnitIndex>,
    /// Units that kept their current target
    pub satisfied: Vec<(UnitIndex, Location)>,
}

/// Classify `units` (index 0 is unit 1) against the available set
///
/// Units are visited in index order. When resources are scarce the
/// lower-numbered units claim first, so the order must stay stable.
pub fn classify_units(units: &[Unit], mut available: BTreeSet<Location>) -> Result<Classification> {
    let mut idle = Vec::new();
    let mut satisfied = Vec::new();

    for (i, unit) in units.iter().enumerate() {
        let index = UnitIndex::new(i as u32 + 1);
        let last = unit
            .last_move()
            .ok_or_else(|| BotError::Protocol(format!("unit {} has no planned moves", index)))?;
        let location = last.location();

        if available.remove(&location) {
            satisfied.push((index, location));
        } else {
            idle.push(index);
        }
    }

    Ok(Classification {
        available,
        idle,
        satisfied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::PlannedMove;

    fn unit_at(x: f64, y: f64) -> Unit {
        Unit {
            moves: vec![
                PlannedMove { x: 15.0, y: 15.0, t: 0 },
                PlannedMove { x, y, t: 10 },
            ],
        }
    }

    fn set(locs: &[(i32, i32)]) -> BTreeSet<Location> {
        locs.iter().map(|&(x, y)| Location::new(x, y)).collect()
    }

    #[test]
    fn test_unit_on_resource_claims_it() {
        let units = vec![unit_at(1.0, 1.0), unit_at(0.0, 0.0)];
        let result = classify_units(&units, set(&[(1, 1), (2, 2)])).unwrap();

        assert_eq!(result.idle, vec![UnitIndex::new(2)]);
        assert_eq!(result.satisfied, vec![(UnitIndex::new(1), Location::new(1, 1))]);
        assert_eq!(result.available, set(&[(2, 2)]));
    }

    #[test]
    fn test_only_first_unit_claims_shared_location() {
        let units = vec![unit_at(3.0, 3.0), unit_at(3.0, 3.0)];
        let result = classify_units(&units, set(&[(3, 3)])).unwrap();

        assert_eq!(result.satisfied.len(), 1);
        assert_eq!(result.satisfied[0].0, UnitIndex::new(1));
        assert_eq!(result.idle, vec![UnitIndex::new(2)]);
        assert!(result.available.is_empty());
    }

    #[test]
    fn test_fractional_position_truncates() {
        let units = vec![unit_at(5.9, 5.1)];
        let result = classify_units(&units, set(&[(5, 5)])).unwrap();
        assert!(result.idle.is_empty());
    }

    #[test]
    fn test_idle_order_follows_unit_index() {
        let units: Vec<Unit> = (0..5).map(|_| unit_at(0.0, 0.0)).collect();
        let result = classify_units(&units, BTreeSet::new()).unwrap();
        let expected: Vec<UnitIndex> = (1..=5).map(UnitIndex::new).collect();
        assert_eq!(result.idle, expected);
    }

    #[test]
    fn test_unit_without_moves_is_protocol_error() {
        let units = vec![Unit::default()];
        let result = classify_units(&units, BTreeSet::new());
        assert!(matches!(result, Err(BotError::Protocol(_))));
    }
}
