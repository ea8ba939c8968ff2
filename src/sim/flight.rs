//! Per-tick motion policies
//!
//! Two flight policies (horizontal drift, diagonal bounce) plus the straight
//! drop used once a target has been shot. Boundary handling is purely
//! position-driven: every check runs every tick, so a target in a corner
//! reverses both axes in the same tick.

use super::state::{MovementMode, Scene, Target};
use crate::consts::BOTTOM_BOUNCE_FRACTION;

/// Advance a flying target one motion tick under its own policy
pub fn fly(target: &mut Target, scene: &Scene) {
    match target.mode {
        MovementMode::Horizontal => fly_horizontal(target, scene),
        MovementMode::Diagonal => fly_diagonal(target, scene),
    }
}

/// Horizontal drift: constant `vx`, vertical wobble of `vy / 2` whose
/// direction alternates with the wobble counter. Side walls reverse `vx`
/// and mirror the sprite; rotation is never used.
pub fn fly_horizontal(target: &mut Target, scene: &Scene) {
    target.pos.x += target.vel.x;

    let half_step = target.vel.y / 2.0;
    if target.wobble % 2 == 0 {
        target.pos.y += half_step;
    } else {
        target.pos.y -= half_step;
    }
    target.wobble = target.wobble.wrapping_add(1);

    let left = target.size.x / 10.0;
    let right = scene.width() - target.size.x;
    if target.pos.x >= right || target.pos.x <= left {
        target.vel.x = -target.vel.x;
        target.facing_right = !target.facing_right;
        target.pos.x = target.pos.x.min(right).max(left);
        log::trace!("horizontal bounce at x={:.1}", target.pos.x);
    }
}

/// Diagonal bounce: constant `(vx, vy)` with four independent edge checks
/// (top, bottom, left, right, in that order). Each check reads the velocity
/// as left by the checks before it.
///
/// Poses depend only on the new heading: climbing targets fly level (0°),
/// descending ones are tipped ±90° toward the direction of travel.
pub fn fly_diagonal(target: &mut Target, scene: &Scene) {
    target.pos += target.vel;

    let w = target.size.x;
    let h = target.size.y;

    // Top: reverse, nudge down so the next tick starts clear of the edge
    if target.pos.y < h / 10.0 {
        target.vel.y = -target.vel.y;
        target.pos.y += target.vel.y.abs();
        if target.vel.x < 0.0 {
            set_pose(target, false, -90.0);
        } else if target.vel.x > 0.0 {
            set_pose(target, true, 90.0);
        }
        log::trace!("diagonal bounce: top");
    }

    // Bottom
    if target.pos.y + h >= scene.height() * BOTTOM_BOUNCE_FRACTION {
        target.vel.y = -target.vel.y;
        if target.vel.x < 0.0 {
            set_pose(target, false, 0.0);
        } else if target.vel.x > 0.0 {
            set_pose(target, true, 0.0);
        }
        log::trace!("diagonal bounce: bottom");
    }

    // Left
    if target.pos.x <= w / 10.0 {
        target.vel.x = -target.vel.x;
        if target.vel.y < 0.0 {
            set_pose(target, true, 0.0);
        } else if target.vel.y > 0.0 {
            set_pose(target, true, 90.0);
        }
        log::trace!("diagonal bounce: left");
    }

    // Right: clamp back inside
    if target.pos.x + w >= scene.width() {
        target.vel.x = -target.vel.x;
        target.pos.x = scene.width() - w;
        if target.vel.y < 0.0 {
            set_pose(target, false, 0.0);
        } else if target.vel.y > 0.0 {
            set_pose(target, false, -90.0);
        }
        log::trace!("diagonal bounce: right");
    }
}

/// Straight drop at `|vy|` per tick. On passing the floor (or going
/// negative) the target stops and is clamped back inside the scene.
pub fn fall(target: &mut Target, scene: &Scene) {
    target.rotation_deg = 0.0;
    target.pos.y += target.vel.y.abs();

    let floor = (scene.height() - target.size.y).max(0.0);
    if target.pos.y > floor || target.pos.y < 0.0 {
        target.vel.y = 0.0;
        target.pos.y = target.pos.y.clamp(0.0, floor);
    }
}

#[inline]
fn set_pose(target: &mut Target, facing_right: bool, rotation_deg: f32) {
    target.facing_right = facing_right;
    target.rotation_deg = rotation_deg;
}
