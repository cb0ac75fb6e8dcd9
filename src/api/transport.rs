//! The four game-server operations the bot depends on

use crate::core::error::Result;
use crate::core::types::{GameTime, Location, UnitIndex};
use crate::game::state::{GameState, MoveResponse, ResourcesResponse};

/// Game server operations. Token and endpoint belong to the implementor.
///
/// Implementations return the decoded body as-is; checking the `status`
/// field is the caller's job.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Current game snapshot
    async fn fetch_state(&self) -> Result<GameState>;

    /// Send `unit` toward `to` immediately
    async fn move_unit(&self, unit: UnitIndex, to: Location) -> Result<MoveResponse>;

    /// Schedule `unit` to head toward `to` starting at game time `at`
    async fn will_move(&self, unit: UnitIndex, to: Location, at: GameTime) -> Result<MoveResponse>;

    /// Detailed info, including collected amount, for specific resources
    async fn fetch_resources(&self, ids: &[u32]) -> Result<ResourcesResponse>;
}
