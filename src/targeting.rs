//! Nearest-player selection for enemy AI.

use crate::entities::{Player, PlayerId};

/// The player an enemy is going after this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    pub player: PlayerId,
    /// Straight-line distance between centres.
    pub distance: f64,
    /// Offset from the enemy centre to the target centre.
    pub dx: f64,
    pub dy: f64,
}

/// Pick the nearer living player to `from`.  Equal distances go to player one.
/// Returns `None` when nobody is alive.
pub fn select_target(from: (f64, f64), players: &[Player; 2]) -> Option<Target> {
    players
        .iter()
        .filter(|p| p.is_alive())
        .map(|p| {
            let (px, py) = p.rect.center();
            let (dx, dy) = (px - from.0, py - from.1);
            Target {
                player: p.id,
                distance: dx.hypot(dy),
                dx,
                dy,
            }
        })
        // `reduce` keeps the earlier candidate on ties.
        .reduce(|best, next| if next.distance < best.distance { next } else { best })
}

/// Unit vector along `(dx, dy)`.  Lengths under one pixel are treated as one
/// so a target sitting on top of the enemy yields a short, finite step.
pub fn direction(dx: f64, dy: f64) -> (f64, f64) {
    let len = dx.hypot(dy).max(1.0);
    (dx / len, dy / len)
}
