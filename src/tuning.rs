//! Data-driven game balance
//!
//! Every number that shapes a run lives here so balance can be tweaked from a
//! JSON file without touching the simulation. Defaults reproduce the shipped game.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Half-open `[min, max)` range sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    fn is_ordered(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Size envelope for one obstacle kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    pub width: Range,
    pub height: Range,
}

/// Fixed pickup dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickupSize {
    pub width: f32,
    pub height: f32,
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    /// Player's top edge when standing
    pub ground_y: f32,

    // === Player ===
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_impulse: f32,

    // === Scroll ===
    /// World speed at run start (px/s)
    pub start_speed: f32,
    /// Linear speed-up (px/s²)
    pub acceleration: f32,

    // === Obstacles ===
    /// Chance a spawned obstacle is a Deadline (otherwise an Exam)
    pub deadline_chance: f32,
    pub deadline_size: SizeRange,
    pub exam_size: SizeRange,
    /// Delay between obstacle spawns (s)
    pub obstacle_interval: Range,

    // === Pickups ===
    /// Chance a due pickup timer actually spawns something
    pub pickup_chance: f32,
    /// Chance a spawned pickup is ECTS (otherwise coffee)
    pub ects_chance: f32,
    pub ects_size: PickupSize,
    pub coffee_size: PickupSize,
    /// How far above the ground line a pickup floats
    pub pickup_lift: Range,
    /// Delay between pickup rolls (s)
    pub pickup_interval: Range,
}

impl Default for Tuning {
    fn default() -> Self {
        let world_height = 540.0;
        Self {
            world_width: 960.0,
            world_height,
            ground_y: world_height - 70.0,

            player_x: 110.0,
            player_width: 64.0,
            player_height: 70.0,
            gravity: 1600.0,
            jump_impulse: -640.0,

            start_speed: 320.0,
            acceleration: 6.0,

            deadline_chance: 0.55,
            deadline_size: SizeRange {
                width: Range::new(62.0, 78.0),
                height: Range::new(48.0, 62.0),
            },
            exam_size: SizeRange {
                width: Range::new(64.0, 82.0),
                height: Range::new(52.0, 66.0),
            },
            obstacle_interval: Range::new(1.0, 1.6),

            pickup_chance: 0.65,
            ects_chance: 0.6,
            ects_size: PickupSize {
                width: 64.0,
                height: 64.0,
            },
            coffee_size: PickupSize {
                width: 46.0,
                height: 60.0,
            },
            pickup_lift: Range::new(90.0, 150.0),
            pickup_interval: Range::new(1.0, 1.8),
        }
    }
}

/// Why a tuning file could not be used
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Io(err) => write!(f, "failed to read tuning: {err}"),
            TuningError::Parse(err) => write!(f, "malformed tuning JSON: {err}"),
            TuningError::Invalid(reason) => write!(f, "invalid tuning: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Io(err) => Some(err),
            TuningError::Parse(err) => Some(err),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(err: std::io::Error) -> Self {
        TuningError::Io(err)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON (missing fields keep their defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject configurations that break simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        let ranges = [
            ("deadline_size.width", self.deadline_size.width),
            ("deadline_size.height", self.deadline_size.height),
            ("exam_size.width", self.exam_size.width),
            ("exam_size.height", self.exam_size.height),
            ("obstacle_interval", self.obstacle_interval),
            ("pickup_lift", self.pickup_lift),
            ("pickup_interval", self.pickup_interval),
        ];
        for (name, range) in ranges {
            if !range.is_ordered() {
                return Err(invalid(format!("{name} must satisfy min <= max")));
            }
        }

        let chances = [
            ("deadline_chance", self.deadline_chance),
            ("pickup_chance", self.pickup_chance),
            ("ects_chance", self.ects_chance),
        ];
        for (name, p) in chances {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(format!("{name} must be within [0, 1], got {p}")));
            }
        }

        let extents = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("ground_y", self.ground_y),
            ("player_x", self.player_x),
            ("start_speed", self.start_speed),
        ];
        for (name, value) in extents {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{name} must be finite and positive, got {value}")));
            }
        }
        if !(self.acceleration.is_finite() && self.acceleration >= 0.0) {
            return Err(invalid(format!(
                "acceleration must be finite and non-negative, got {}",
                self.acceleration
            )));
        }
        if !(self.pickup_lift.min > 0.0) {
            return Err(invalid("pickup_lift must keep pickups above the ground".into()));
        }

        if !(self.gravity > 0.0) {
            return Err(invalid("gravity must be positive".into()));
        }
        if !(self.jump_impulse < 0.0) {
            return Err(invalid("jump_impulse must be negative (upward)".into()));
        }
        if !(self.player_width > 0.0 && self.player_height > 0.0) {
            return Err(invalid("player dimensions must be positive".into()));
        }
        if !(self.obstacle_interval.min > 0.0 && self.pickup_interval.min > 0.0) {
            return Err(invalid("spawn intervals must be positive".into()));
        }

        let tallest = self
            .deadline_size
            .height
            .max
            .max(self.exam_size.height.max);
        if tallest >= self.player_height {
            return Err(invalid(format!(
                "obstacles up to {tallest} tall are not shorter than the player ({})",
                self.player_height
            )));
        }

        Ok(())
    }

    /// Size envelope for an obstacle kind
    pub fn obstacle_size(&self, kind: crate::sim::ObstacleKind) -> SizeRange {
        match kind {
            crate::sim::ObstacleKind::Deadline => self.deadline_size,
            crate::sim::ObstacleKind::Exam => self.exam_size,
        }
    }

    /// Dimensions for a pickup kind
    pub fn pickup_size(&self, kind: crate::sim::PickupKind) -> PickupSize {
        match kind {
            crate::sim::PickupKind::Ects => self.ects_size,
            crate::sim::PickupKind::Coffee => self.coffee_size,
        }
    }
}

fn invalid(reason: String) -> TuningError {
    TuningError::Invalid(reason)
}
