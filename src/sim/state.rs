//! Game state and the run state machine
//!
//! `GameWorld` is the single aggregate a caller owns and passes to `tick`.
//! Nothing lives at module scope, so independent simulations can coexist.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{ObstacleKind, PickupKind, WorldEntities};
use super::player::PlayerBody;
use super::rng::{RandomSource, seeded};
use super::score::{ScoreTracker, WorldState};
use super::spawn::SpawnScheduler;
use crate::persistence::BestScoreStore;
use crate::tuning::Tuning;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start (or after a manual reset)
    #[default]
    Idle,
    /// Active simulation
    Running,
    /// Run ended on an obstacle, waiting for restart
    GameOver,
}

/// Selectable runner sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Character {
    #[default]
    Boy,
    Girl,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    ReturnedToIdle,
    CharacterChanged(Character),
    Jumped,
    ObstacleSpawned { kind: ObstacleKind },
    PickupSpawned { kind: PickupKind },
    PickupCollected { kind: PickupKind },
    GameOver {
        hit: ObstacleKind,
        score: u64,
        ects: u32,
        coffee: u32,
        new_best: bool,
    },
}

/// Complete simulation state
///
/// Fields are crate-private: outside callers observe the world through
/// `snapshot()` and change it only through `tick`.
#[derive(Debug, Clone)]
pub struct GameWorld<R: RandomSource = Pcg32> {
    pub(crate) tuning: Tuning,
    pub(crate) phase: GamePhase,
    pub(crate) character: Character,
    pub(crate) player: PlayerBody,
    pub(crate) world: WorldState,
    pub(crate) entities: WorldEntities,
    pub(crate) spawner: SpawnScheduler,
    pub(crate) scores: ScoreTracker,
    /// Ticks simulated while running, across all runs
    pub(crate) time_ticks: u64,
    pub(crate) rng: R,
    pub(crate) events: Vec<GameEvent>,
}

impl GameWorld<Pcg32> {
    /// World driven by a seeded PCG stream
    pub fn with_seed(tuning: Tuning, seed: u64, best: u64) -> Self {
        Self::new(tuning, seeded(seed), best)
    }
}

impl<R: RandomSource> GameWorld<R> {
    pub fn new(tuning: Tuning, rng: R, best: u64) -> Self {
        Self {
            player: PlayerBody::new(&tuning),
            world: WorldState::new(tuning.start_speed),
            entities: WorldEntities::default(),
            spawner: SpawnScheduler::new(),
            scores: ScoreTracker::new(best),
            phase: GamePhase::Idle,
            character: Character::default(),
            time_ticks: 0,
            tuning,
            rng,
            events: Vec::new(),
        }
    }

    pub fn score(&self) -> u64 {
        self.world.score()
    }

    pub fn best(&self) -> u64 {
        self.scores.best
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn character(&self) -> Character {
        self.character
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Reinitialize everything a run mutates. Best score and entity ids survive.
    fn reset_run(&mut self) {
        self.world = WorldState::new(self.tuning.start_speed);
        self.player.reset();
        self.entities.clear();
        self.spawner.reset();
    }

    /// Idle -> Running
    pub(crate) fn start(&mut self) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        self.begin_run();
        true
    }

    /// GameOver -> Running
    pub(crate) fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.begin_run();
        true
    }

    fn begin_run(&mut self) {
        self.reset_run();
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::RunStarted);
        log::info!("Run started as {:?}", self.character);
    }

    /// Any phase -> Idle, with a fresh world
    pub(crate) fn reset_to_idle(&mut self) {
        self.reset_run();
        self.phase = GamePhase::Idle;
        self.events.push(GameEvent::ReturnedToIdle);
    }

    /// Pick a runner. From Idle this starts a run, from GameOver it restarts.
    pub(crate) fn choose_character(&mut self, character: Character) {
        if self.character != character {
            self.character = character;
            self.events.push(GameEvent::CharacterChanged(character));
        }
        match self.phase {
            GamePhase::Idle => {
                self.start();
            }
            GamePhase::GameOver => {
                self.restart();
            }
            GamePhase::Running => {}
        }
    }

    /// Jump request, honoured only while running and standing
    pub(crate) fn jump(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        let jumped = self.player.request_jump();
        if jumped {
            self.events.push(GameEvent::Jumped);
        }
        jumped
    }

    /// Running -> GameOver on an obstacle hit
    pub(crate) fn end_run(&mut self, hit: ObstacleKind, store: &mut dyn BestScoreStore) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::GameOver;
        let score = self.score();
        let new_best = self.scores.finalize(score, store);
        log::info!(
            "Game over ({hit:?}): score {score}, {} ECTS, {} coffee",
            self.world.ects,
            self.world.coffee
        );
        self.events.push(GameEvent::GameOver {
            hit,
            score,
            ects: self.world.ects,
            coffee: self.world.coffee,
            new_best,
        });
    }
}
