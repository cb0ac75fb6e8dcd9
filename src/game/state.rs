//! Game state snapshot and API response shapes
//!
//! These mirror the server's JSON exactly. A `GameState` is fetched once per
//! tick and never mutated; everything the bot decides is derived from it.

use serde::{Deserialize, Serialize};

use crate::core::error::{BotError, Result};
use crate::core::types::{GameTime, Location};

/// One planned waypoint of a unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannedMove {
    pub x: f64,
    pub y: f64,
    pub t: GameTime,
}

impl PlannedMove {
    /// Grid location of this waypoint, truncating toward zero
    pub fn location(&self) -> Location {
        Location::new(self.x as i32, self.y as i32)
    }
}

/// A collection unit and its move history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(rename = "move")]
    pub moves: Vec<PlannedMove>,
}

impl Unit {
    /// The most recent planned move: where the unit is, or is heading
    pub fn last_move(&self) -> Option<&PlannedMove> {
        self.moves.last()
    }
}

/// A collectible resource with a half-open validity window `[t0, t1)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: u32,
    pub x: i32,
    pub y: i32,
    pub t0: GameTime,
    pub t1: GameTime,
    #[serde(rename = "type")]
    pub kind: String,
    pub weight: i64,
}

impl Resource {
    pub fn location(&self) -> Location {
        Location::new(self.x, self.y)
    }

    /// Whether the resource can be collected at `now`
    pub fn is_available(&self, now: GameTime) -> bool {
        self.t0 <= now && now < self.t1
    }
}

/// A resource together with the amount collected from it so far
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceWithAmount {
    #[serde(flatten)]
    pub resource: Resource,
    pub amount: f64,
}

/// Accumulated amount of one resource type owned by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedResource {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
}

/// Snapshot returned by the game endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub status: String,
    /// Absent when the server replies with a bare status
    #[serde(default)]
    pub now: GameTime,
    #[serde(rename = "agent", default)]
    pub units: Vec<Unit>,
    #[serde(rename = "resource", default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub next_resource: u32,
    #[serde(rename = "owned_resource", default)]
    pub owned_resources: Vec<OwnedResource>,
}

impl GameState {
    /// The first `count` units, failing if the server sent fewer
    pub fn units_checked(&self, count: usize) -> Result<&[Unit]> {
        self.units.get(..count).ok_or_else(|| {
            BotError::Protocol(format!(
                "expected {} units, snapshot has {}",
                count,
                self.units.len()
            ))
        })
    }
}

/// Reply to `move` and `will_move`: the accepted plan for the unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub status: String,
    #[serde(default)]
    pub now: GameTime,
    #[serde(rename = "move", default)]
    pub moves: Vec<PlannedMove>,
}

/// Reply to `resources`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourcesResponse {
    pub status: String,
    #[serde(rename = "resource", default)]
    pub resources: Vec<ResourceWithAmount>,
}
