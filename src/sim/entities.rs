//! Obstacles, pickups, and the scrolling collections that hold them
//!
//! Entities are appended at the right edge and all scroll left at the same
//! speed, so spawn order is also left-to-right screen order. Pruning relies on
//! that: only the front of each queue ever needs checking.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Deadline,
    Exam,
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Course credit, worth the most points
    Ects,
    Coffee,
}

/// A ground hazard; touching one ends the run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A floating collectible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Pickup {
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Active entities in spawn (= left-to-right) order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldEntities {
    pub obstacles: VecDeque<Obstacle>,
    pub pickups: VecDeque<Pickup>,
}

impl WorldEntities {
    /// Scroll everything left by `speed * dt`
    pub fn advance(&mut self, speed: f32, dt: f32) {
        let dx = speed * dt;
        for obstacle in self.obstacles.iter_mut() {
            obstacle.pos.x -= dx;
        }
        for pickup in self.pickups.iter_mut() {
            pickup.pos.x -= dx;
        }
    }

    /// Drop entities whose right edge is left of `threshold`, front first.
    ///
    /// Returns how many obstacles and pickups were removed.
    pub fn prune(&mut self, threshold: f32) -> (usize, usize) {
        let mut obstacles = 0;
        while self
            .obstacles
            .front()
            .is_some_and(|o| o.aabb().right() < threshold)
        {
            self.obstacles.pop_front();
            obstacles += 1;
        }

        let mut pickups = 0;
        while self
            .pickups
            .front()
            .is_some_and(|p| p.aabb().right() < threshold)
        {
            self.pickups.pop_front();
            pickups += 1;
        }

        (obstacles, pickups)
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.pickups.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty() && self.pickups.is_empty()
    }
}
