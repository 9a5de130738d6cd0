//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Bounded timestep only
//! - Injected RNG only
//! - Spawn-ordered entity queues
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod entities;
pub mod player;
pub mod rng;
pub mod score;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::Clock;
pub use collision::{Aabb, CollisionResult, resolve_collisions};
pub use entities::{Obstacle, ObstacleKind, Pickup, PickupKind, WorldEntities};
pub use player::PlayerBody;
pub use rng::{RandomSource, SequenceSource, random_seed, seeded};
pub use score::{ScoreTracker, WorldState, score_for};
pub use snapshot::{EntityView, PlayerView, Snapshot};
pub use spawn::{SpawnReport, SpawnScheduler};
pub use state::{Character, GameEvent, GamePhase, GameWorld};
pub use tick::{TickInput, clamp_dt, tick};
