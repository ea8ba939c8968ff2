//! Tick dispatch
//!
//! A tick is one motion or animation step for one target. What it does is
//! picked from the target's phase (and, while flying, its movement mode).

use serde::{Deserialize, Serialize};

use super::clock::{DueSteps, Regime, TargetSchedule};
use super::flight;
use super::state::{Phase, Scene, Target};

/// Which of a target's two schedules fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickKind {
    /// Position update
    Motion,
    /// Sprite frame update
    Animation,
}

/// Apply a single step to a target
pub fn tick(target: &mut Target, kind: TickKind, scene: &Scene) {
    match (target.phase, kind) {
        (Phase::Flying, TickKind::Motion) => flight::fly(target, scene),
        (Phase::Flying, TickKind::Animation) => target.advance_wing_frame(),
        (Phase::Shot | Phase::Falling, TickKind::Motion) => flight::fall(target, scene),
        (Phase::Shot | Phase::Falling, TickKind::Animation) => target.advance_falling_frame(),
        (Phase::Removed, _) => {}
    }
}

/// Advance a target's schedule by `dt_ms` and run every step that came due.
///
/// Steps that share an instant run animation first, then motion. A schedule
/// armed for a different phase than the target is in never fires.
pub fn run_due(
    target: &mut Target,
    schedule: &mut TargetSchedule,
    scene: &Scene,
    dt_ms: u32,
) -> DueSteps {
    if !armed_for(target.phase, schedule.regime) {
        return DueSteps::default();
    }

    let due = schedule.advance(dt_ms);
    for i in 0..due.motion.max(due.animation) {
        if i < due.animation {
            tick(target, TickKind::Animation, scene);
        }
        if i < due.motion {
            tick(target, TickKind::Motion, scene);
        }
    }
    due
}

fn armed_for(phase: Phase, regime: Regime) -> bool {
    matches!(
        (phase, regime),
        (Phase::Flying, Regime::Flight) | (Phase::Shot | Phase::Falling, Regime::Fall)
    )
}
