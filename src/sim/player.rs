//! Player vertical kinematics
//!
//! The runner never moves horizontally; the world scrolls past it. Only the
//! vertical axis is simulated: gravity, a single jump impulse, and a ground clamp.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::tuning::Tuning;

/// The player's body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    /// Top-left corner (x fixed, y varies)
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (px/s, positive is down)
    pub vy: f32,
    pub on_ground: bool,
    /// Top edge when standing; `pos.y` never exceeds it
    pub ground_y: f32,
    gravity: f32,
    jump_impulse: f32,
}

impl PlayerBody {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.ground_y),
            size: Vec2::new(tuning.player_width, tuning.player_height),
            vy: 0.0,
            on_ground: true,
            ground_y: tuning.ground_y,
            gravity: tuning.gravity,
            jump_impulse: tuning.jump_impulse,
        }
    }

    /// Put the body back on the ground at rest
    pub fn reset(&mut self) {
        self.pos.y = self.ground_y;
        self.vy = 0.0;
        self.on_ground = true;
    }

    /// Apply gravity, then velocity, then clamp to the ground
    pub fn integrate(&mut self, dt: f32) {
        self.vy += self.gravity * dt;
        self.pos.y += self.vy * dt;

        if self.pos.y >= self.ground_y {
            self.pos.y = self.ground_y;
            self.vy = 0.0;
            self.on_ground = true;
        }
    }

    /// Jump if standing. Returns whether the jump happened (no air jumps).
    pub fn request_jump(&mut self) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vy = self.jump_impulse;
        self.on_ground = false;
        true
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}
