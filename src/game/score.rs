//! Score evaluation over owned resources

use crate::game::state::OwnedResource;

/// Contest score: smallest amount, plus a tenth of the second smallest,
/// plus a hundredth of the third
///
/// Returns `None` when fewer than three resource types are owned.
pub fn score(owned: &[OwnedResource]) -> Option<f64> {
    let mut amounts: Vec<f64> = owned.iter().map(|o| o.amount).collect();
    if amounts.len() < 3 {
        return None;
    }
    amounts.sort_by(|a, b| a.total_cmp(b));
    Some(amounts[0] + 0.1 * amounts[1] + 0.01 * amounts[2])
}

/// One-line summary printed each tick, e.g. `A: 1.00 B: 2.50 Score: 1.25`
pub fn status_line(owned: &[OwnedResource]) -> String {
    let mut parts: Vec<String> = owned
        .iter()
        .map(|o| format!("{}: {:.2}", o.kind, o.amount))
        .collect();
    match score(owned) {
        Some(s) => parts.push(format!("Score: {:.2}", s)),
        None => parts.push("Score: n/a".to_string()),
    }
    parts.join(" ")
}
