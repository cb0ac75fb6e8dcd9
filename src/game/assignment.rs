//! Assignment engine - pairs idle units with free resource locations
//!
//! Strategies see only the ordered idle list and the post-claim location
//! set. Whatever they return is dispatched verbatim, so every strategy must
//! keep targets unique and never return more pairings than either input.

use std::collections::BTreeSet;

use rand::Rng;

use crate::core::types::{Location, UnitIndex};

/// One unit sent to one location for the current tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub unit: UnitIndex,
    pub target: Location,
}

/// Decides where idle units go
pub trait AssignmentStrategy {
    fn assign<R: Rng + ?Sized>(
        &self,
        idle: &[UnitIndex],
        available: BTreeSet<Location>,
        rng: &mut R,
    ) -> Vec<Assignment>;
}

/// Each idle unit, in order, takes a uniformly random remaining location
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSample;

impl AssignmentStrategy for RandomSample {
    fn assign<R: Rng + ?Sized>(
        &self,
        idle: &[UnitIndex],
        mut available: BTreeSet<Location>,
        rng: &mut R,
    ) -> Vec<Assignment> {
        let mut assignments = Vec::with_capacity(idle.len().min(available.len()));

        for &unit in idle {
            if available.is_empty() {
                break;
            }
            let pick = rng.gen_range(0..available.len());
            let Some(target) = available.iter().nth(pick).copied() else {
                break;
            };
            available.remove(&target);
            assignments.push(Assignment { unit, target });
        }

        assignments
    }
}
