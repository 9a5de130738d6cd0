//! Collision detection and resolution
//!
//! Everything in the runner is a rectangle, so collisions are plain axis-aligned
//! box overlaps. Obstacles end the run; pickups are consumed on contact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::{ObstacleKind, PickupKind, WorldEntities};

/// Axis-aligned bounding box (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap test: boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }
}

/// Result of one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionResult {
    /// Kind of the first obstacle overlapping the player, if any
    pub obstacle_hit: Option<ObstacleKind>,
    /// Pickups consumed this pass, in collection order
    pub collected: Vec<PickupKind>,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self::default()
    }
}

/// Resolve the player against every active entity.
///
/// Obstacles are checked first and the first hit stops the pass: the run is
/// over and pickups are left untouched. Otherwise every overlapping pickup is
/// removed and reported exactly once.
pub fn resolve_collisions(player: &Aabb, entities: &mut WorldEntities) -> CollisionResult {
    if let Some(obstacle) = entities
        .obstacles
        .iter()
        .find(|o| player.overlaps(&o.aabb()))
    {
        return CollisionResult {
            obstacle_hit: Some(obstacle.kind),
            collected: Vec::new(),
        };
    }

    let mut result = CollisionResult::miss();
    let mut i = 0;
    while i < entities.pickups.len() {
        if player.overlaps(&entities.pickups[i].aabb()) {
            if let Some(pickup) = entities.pickups.remove(i) {
                result.collected.push(pickup.kind);
            }
        } else {
            i += 1;
        }
    }
    result
}
