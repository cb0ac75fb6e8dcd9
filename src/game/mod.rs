//! Game model and per-tick decision logic
//!
//! Snapshot -> available locations -> unit classification -> assignments.
//! Nothing here performs I/O; the bot module feeds it and dispatches results.

pub mod assignment;
pub mod availability;
pub mod classify;
pub mod score;
pub mod state;

pub use assignment::{Assignment, AssignmentStrategy, RandomSample};
pub use availability::available_locations;
pub use classify::{classify_units, Classification};
pub use score::{score, status_line};
pub use state::{
    GameState, MoveResponse, OwnedResource, PlannedMove, Resource, ResourceWithAmount,
    ResourcesResponse, Unit,
};
