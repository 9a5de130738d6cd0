//! World progress and scoring

use serde::{Deserialize, Serialize};

use super::entities::PickupKind;
use crate::consts::{COFFEE_POINTS, DISTANCE_PER_POINT, ECTS_POINTS};
use crate::persistence::BestScoreStore;

/// Score for a given amount of progress
pub fn score_for(distance: f32, ects: u32, coffee: u32) -> u64 {
    (distance / DISTANCE_PER_POINT).floor().max(0.0) as u64
        + ects as u64 * ECTS_POINTS
        + coffee as u64 * COFFEE_POINTS
}

/// Per-run progress: scroll speed, distance, and collected counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    /// Scroll speed (px/s), grows linearly while running
    pub speed: f32,
    /// Total distance scrolled this run
    pub distance: f32,
    pub ects: u32,
    pub coffee: u32,
}

impl WorldState {
    pub fn new(start_speed: f32) -> Self {
        Self {
            speed: start_speed,
            distance: 0.0,
            ects: 0,
            coffee: 0,
        }
    }

    /// Cover ground at the current speed, then speed up
    pub fn advance(&mut self, dt: f32, acceleration: f32) {
        self.distance += self.speed * dt;
        self.speed += acceleration * dt;
    }

    pub fn collect(&mut self, kind: PickupKind) {
        match kind {
            PickupKind::Ects => self.ects += 1,
            PickupKind::Coffee => self.coffee += 1,
        }
    }

    pub fn score(&self) -> u64 {
        score_for(self.distance, self.ects, self.coffee)
    }
}

/// Best score across runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreTracker {
    pub best: u64,
}

impl ScoreTracker {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Settle a finished run. Returns true when it set a new best.
    ///
    /// The in-memory best is updated first; a failing store is logged and
    /// does not roll it back.
    pub fn finalize(&mut self, score: u64, store: &mut dyn BestScoreStore) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        log::info!("New best score: {score}");
        if let Err(err) = store.save_best(score) {
            log::warn!("Failed to persist best score {score}: {err}");
        }
        true
    }
}
