//! ATA Run - Warsaw semester sprint
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring, game state)
//! - `persistence`: Best-score storage collaborator
//! - `tuning`: Data-driven game balance

pub mod persistence;
pub mod sim;
pub mod tuning;

pub use persistence::{BestScoreStore, JsonFileStore, MemoryStore, PersistenceError, RunRecord};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Largest simulation step accepted by `tick` (seconds, ~30 Hz)
    pub const MAX_DT: f32 = 0.033;

    /// Distance units per score point
    pub const DISTANCE_PER_POINT: f32 = 10.0;
    /// Score bonus per collected ECTS
    pub const ECTS_POINTS: u64 = 100;
    /// Score bonus per collected coffee
    pub const COFFEE_POINTS: u64 = 50;

    /// Spawns appear this far past the right edge of the world
    pub const SPAWN_MARGIN: f32 = 40.0;
    /// Entities are pruned once their right edge is this far past the left edge
    pub const PRUNE_MARGIN: f32 = 40.0;
}
