//! Demo-mode controller
//!
//! Plays the game from snapshots alone: jump when the next obstacle is about
//! to reach the runner. Used by the headless driver and attract screens.

use super::snapshot::Snapshot;

/// Seconds before contact at which to take off
pub const LEAD_TIME: f32 = 0.17;

/// Whether a jump should be queued for the next tick
pub fn should_jump(snapshot: &Snapshot) -> bool {
    if !snapshot.is_running() || !snapshot.player.on_ground {
        return false;
    }

    let player = &snapshot.player.aabb;
    let Some(next) = snapshot
        .obstacles
        .iter()
        .find(|o| o.aabb.right() > player.pos.x)
    else {
        return false;
    };

    let gap = next.aabb.pos.x - player.right();
    gap <= LEAD_TIME * snapshot.speed
}
