//! Read-only view of the world handed to renderers and UI
//!
//! Built once at the end of every tick, so a consumer never observes a
//! half-updated world.

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::entities::{ObstacleKind, PickupKind};
use super::rng::RandomSource;
use super::state::{Character, GameEvent, GamePhase, GameWorld};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub aabb: Aabb,
    pub character: Character,
    pub on_ground: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView<K> {
    pub id: u32,
    pub kind: K,
    pub aabb: Aabb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub player: PlayerView,
    /// Left to right
    pub obstacles: Vec<EntityView<ObstacleKind>>,
    /// Left to right
    pub pickups: Vec<EntityView<PickupKind>>,
    pub score: u64,
    pub ects: u32,
    pub coffee: u32,
    pub best: u64,
    pub distance: f32,
    pub speed: f32,
    /// Ticks simulated while running, across all runs
    pub ticks: u64,
    /// Events raised during the tick that produced this snapshot
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}

impl<R: RandomSource> GameWorld<R> {
    /// Capture the current state without draining pending events
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            player: PlayerView {
                aabb: self.player.aabb(),
                character: self.character,
                on_ground: self.player.on_ground,
            },
            obstacles: self
                .entities
                .obstacles
                .iter()
                .map(|o| EntityView {
                    id: o.id,
                    kind: o.kind,
                    aabb: o.aabb(),
                })
                .collect(),
            pickups: self
                .entities
                .pickups
                .iter()
                .map(|p| EntityView {
                    id: p.id,
                    kind: p.kind,
                    aabb: p.aabb(),
                })
                .collect(),
            score: self.score(),
            ects: self.world.ects,
            coffee: self.world.coffee,
            best: self.best(),
            distance: self.world.distance,
            speed: self.world.speed,
            ticks: self.time_ticks,
            events: self.events.clone(),
        }
    }
}
