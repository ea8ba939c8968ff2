//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time advances only through explicit ticks or elapsed-ms updates
//! - Seeded RNG only (injected by the caller)
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod clock;
pub mod flight;
pub mod level;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::{DueSteps, Regime, RepeatingTimer, TargetSchedule};
pub use level::{Level, LevelIndex, LevelParams, ShotReport, TargetSpec, Verdict};
pub use spawn::{SpawnRect, spawn_points};
pub use state::{MovementMode, Phase, Scene, Target};
pub use tick::{TickKind, run_due, tick};
