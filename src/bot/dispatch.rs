//! Command dispatch - turns assignments into move requests

use crate::api::transport::Transport;
use crate::core::error::{ensure_ok, Result};
use crate::game::assignment::Assignment;
use crate::game::state::MoveResponse;

/// Issue one move per assignment, in order, stopping at the first failure
///
/// A rejected move (status other than "ok") counts as a failure. Moves
/// already accepted before the failure stay in effect on the server.
pub async fn dispatch<T: Transport>(
    transport: &T,
    assignments: &[Assignment],
) -> Result<Vec<MoveResponse>> {
    let mut accepted = Vec::with_capacity(assignments.len());

    for assignment in assignments {
        let response = transport
            .move_unit(assignment.unit, assignment.target)
            .await?;
        ensure_ok(&response.status)?;
        tracing::info!("Unit {} heading to {}", assignment.unit, assignment.target);
        accepted.push(response);
    }

    Ok(accepted)
}
