//! Target state and scene geometry
//!
//! A target is one duck: position, velocity, facing and lifecycle phase.
//! Positions are top-left anchors in scene coordinates (y grows downward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, GameResult};

/// Lifecycle phase of a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Moving under its flight policy, hit-testable
    Flying,
    /// Hit this click; immediately promoted to `Falling` by the level
    Shot,
    /// Dropping straight down, then resting at the bottom
    Falling,
    /// Retired by presentation cleanup
    Removed,
}

/// Flight policy, fixed at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementMode {
    /// Constant horizontal speed with a small vertical wobble
    Horizontal,
    /// Constant diagonal speed bouncing off all four edges
    Diagonal,
}

/// Playfield geometry shared by all targets of a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene width and height
    pub size: Vec2,
    /// Sprite width and height
    pub sprite: Vec2,
    /// Unscaled-by-level target speed per motion tick
    pub base_speed: f32,
}

impl Scene {
    /// Scene at scale 1.0 with the given dimensions
    pub fn new(width: f32, height: f32) -> GameResult<Self> {
        Self::scaled(width, height, 1.0)
    }

    /// Scene whose sprites and speeds are multiplied by `scale`
    pub fn scaled(width: f32, height: f32, scale: f32) -> GameResult<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) || !valid(scale) {
            return Err(GameError::InvalidScene { width, height });
        }
        Ok(Self {
            size: Vec2::new(width, height),
            sprite: BASE_SPRITE_SIZE * scale,
            base_speed: BASE_SPEED * scale,
        })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }
}

/// A shootable duck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    /// Top-left corner
    pub pos: Vec2,
    /// Signed displacement per motion tick
    pub vel: Vec2,
    /// Sprite width and height (hit box)
    pub size: Vec2,
    /// Sprite drawn unmirrored when true
    pub facing_right: bool,
    /// Sprite rotation in degrees
    pub rotation_deg: f32,
    pub mode: MovementMode,
    pub phase: Phase,
    /// Index into the flying or falling sprite sequence, depending on phase
    pub frame: u32,
    /// Horizontal-flight wobble counter; its parity picks up or down
    pub wobble: u32,
}

impl Target {
    /// Spawn a flying target heading right.
    ///
    /// Diagonal targets start climbing; horizontal targets use `vel.y` only as
    /// the wobble amplitude.
    pub fn new(mode: MovementMode, pos: Vec2, size: Vec2, speed: f32, wobble: u32) -> Self {
        let vy = match mode {
            MovementMode::Horizontal => speed,
            MovementMode::Diagonal => -speed,
        };
        Self {
            pos,
            vel: Vec2::new(speed, vy),
            size,
            facing_right: true,
            rotation_deg: 0.0,
            mode,
            phase: Phase::Flying,
            frame: 0,
            wobble,
        }
    }

    /// Only flying targets can be hit
    #[inline]
    pub fn is_hittable(&self) -> bool {
        self.phase == Phase::Flying
    }

    /// Sprite is drawn mirrored horizontally
    #[inline]
    pub fn mirrored(&self) -> bool {
        !self.facing_right
    }

    /// Box containment, or a touch by the 1x1 pixel at `point`
    pub fn contains_point(&self, point: Vec2) -> bool {
        let min = self.pos;
        let max = self.pos + self.size;

        let inside = point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y;
        let touches = point.x < max.x
            && point.x + 1.0 > min.x
            && point.y < max.y
            && point.y + 1.0 > min.y;
        inside || touches
    }

    /// `Flying -> Shot`. Returns false (no change) for any other phase.
    pub fn shoot(&mut self) -> bool {
        if self.phase != Phase::Flying {
            return false;
        }
        self.phase = Phase::Shot;
        self.frame = 0;
        self.rotation_deg = 0.0;
        true
    }

    /// `Shot -> Falling`
    pub fn begin_falling(&mut self) {
        if self.phase == Phase::Shot {
            self.phase = Phase::Falling;
        }
    }

    /// `Falling -> Removed`. Returns false for any other phase.
    pub fn remove(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        self.phase = Phase::Removed;
        true
    }

    /// Resting at the bottom after a fall
    pub fn is_settled(&self) -> bool {
        self.phase == Phase::Falling && self.vel.y == 0.0
    }

    /// Flying frames wrap around
    pub fn advance_wing_frame(&mut self) {
        self.frame = (self.frame + 1) % FLYING_FRAME_COUNT;
    }

    /// Falling frames stop on the last one
    pub fn advance_falling_frame(&mut self) {
        self.frame = (self.frame + 1).min(FALLING_FRAME_COUNT - 1);
    }
}
