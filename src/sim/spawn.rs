//! Obstacle and pickup spawning
//!
//! Two independent countdowns, each re-randomized after it fires, so the two
//! cadences never lock into a readable rhythm.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::{Obstacle, ObstacleKind, Pickup, PickupKind, WorldEntities};
use super::rng::RandomSource;
use crate::consts::SPAWN_MARGIN;
use crate::tuning::Tuning;

/// What a scheduler update produced
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpawnReport {
    pub obstacle: Option<ObstacleKind>,
    pub pickup: Option<PickupKind>,
}

/// Countdown timers for the two entity categories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnScheduler {
    /// Seconds until the next obstacle
    pub obstacle_timer: f32,
    /// Seconds until the next pickup roll
    pub pickup_timer: f32,
    next_id: u32,
}

impl Default for SpawnScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnScheduler {
    pub fn new() -> Self {
        Self {
            obstacle_timer: 0.0,
            pickup_timer: 0.0,
            next_id: 1,
        }
    }

    /// Zero both timers so the first tick of a run spawns immediately.
    /// Entity ids keep counting across runs.
    pub fn reset(&mut self) {
        self.obstacle_timer = 0.0;
        self.pickup_timer = 0.0;
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Count both timers down by `dt` and emit whatever came due
    pub fn update<R: RandomSource + ?Sized>(
        &mut self,
        dt: f32,
        tuning: &Tuning,
        rng: &mut R,
        entities: &mut WorldEntities,
    ) -> SpawnReport {
        let mut report = SpawnReport::default();

        self.obstacle_timer -= dt;
        self.pickup_timer -= dt;

        if self.obstacle_timer <= 0.0 {
            let obstacle = self.spawn_obstacle(tuning, rng);
            report.obstacle = Some(obstacle.kind);
            entities.obstacles.push_back(obstacle);
            self.obstacle_timer = rng.uniform(tuning.obstacle_interval);
        }

        if self.pickup_timer <= 0.0 {
            if rng.chance(tuning.pickup_chance) {
                let pickup = self.spawn_pickup(tuning, rng);
                report.pickup = Some(pickup.kind);
                entities.pickups.push_back(pickup);
            }
            self.pickup_timer = rng.uniform(tuning.pickup_interval);
        }

        report
    }

    fn spawn_obstacle<R: RandomSource + ?Sized>(
        &mut self,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Obstacle {
        let kind = if rng.chance(tuning.deadline_chance) {
            ObstacleKind::Deadline
        } else {
            ObstacleKind::Exam
        };
        let range = tuning.obstacle_size(kind);
        let height = rng.uniform(range.height);
        let width = rng.uniform(range.width);

        log::debug!("Spawning {kind:?} obstacle {width:.0}x{height:.0}");

        Obstacle {
            id: self.next_entity_id(),
            kind,
            // Base shares the player's ground-contact line
            pos: Vec2::new(
                tuning.world_width + SPAWN_MARGIN,
                tuning.ground_y + (tuning.player_height - height),
            ),
            size: Vec2::new(width, height),
        }
    }

    fn spawn_pickup<R: RandomSource + ?Sized>(
        &mut self,
        tuning: &Tuning,
        rng: &mut R,
    ) -> Pickup {
        let kind = if rng.chance(tuning.ects_chance) {
            PickupKind::Ects
        } else {
            PickupKind::Coffee
        };
        let size = tuning.pickup_size(kind);
        let lift = rng.uniform(tuning.pickup_lift);

        log::debug!("Spawning {kind:?} pickup {lift:.0}px above ground");

        Pickup {
            id: self.next_entity_id(),
            kind,
            pos: Vec2::new(tuning.world_width + SPAWN_MARGIN, tuning.ground_y - lift),
            size: Vec2::new(size.width, size.height),
        }
    }
}
