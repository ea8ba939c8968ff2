//! Duck Hunt - a six-level arcade shooting game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (target physics, timers, level bookkeeping)
//! - `session`: Menu/level flow and the event outbox consumed by presentation
//! - `settings`: Launch options and options-screen selections
//! - `error`: Error type shared by the fallible constructors
//!
//! Rendering, audio and window management live outside this crate. A
//! presentation layer feeds the session with elapsed time, key input and
//! pointer clicks, and drains [`session::GameEvent`]s to play sounds and
//! swap screens.

pub mod error;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{GameError, GameResult};
pub use session::{GameEvent, Input, Session, SessionState};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Motion and animation tick period while flying (ms)
    pub const FLIGHT_TICK_MS: u32 = 150;
    /// Motion and animation tick period while falling (ms)
    pub const FALL_TICK_MS: u32 = 100;
    /// Number of falling cycles before a shot target's schedule expires
    pub const FALL_CYCLES: u32 = 30;

    /// Wing-flap frames while flying (wraps)
    pub const FLYING_FRAME_COUNT: u32 = 3;
    /// Frames while falling (saturates on the last one)
    pub const FALLING_FRAME_COUNT: u32 = 2;

    /// Target speed per motion tick at scale 1.0
    pub const BASE_SPEED: f32 = 10.0;

    /// Playfield size at scale 1.0
    pub const BASE_SCENE_SIZE: Vec2 = Vec2::new(256.0, 240.0);
    /// Duck sprite size at scale 1.0
    pub const BASE_SPRITE_SIZE: Vec2 = Vec2::new(32.0, 32.0);

    /// Spawn rectangle as fractions of the scene (x: 5-85%, y: 5-40%)
    pub const SPAWN_MIN_X: f32 = 0.05;
    pub const SPAWN_MAX_X: f32 = 0.85;
    pub const SPAWN_MIN_Y: f32 = 0.05;
    pub const SPAWN_MAX_Y: f32 = 0.40;

    /// Bottom bounce line for diagonal flight, as a fraction of scene height
    pub const BOTTOM_BOUNCE_FRACTION: f32 = 0.99;

    /// Levels run 1..=LEVEL_COUNT
    pub const LEVEL_COUNT: u8 = 6;
    /// Shots granted per target
    pub const AMMO_PER_TARGET: u32 = 3;

    /// Options screen catalogue sizes
    pub const BACKGROUND_COUNT: usize = 6;
    pub const CROSSHAIR_COUNT: usize = 7;
}
