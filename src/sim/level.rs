//! Level state machine
//!
//! A level owns its targets, their timer schedules and the ammo/target
//! counters. Counters change only through [`Level::resolve_shot`]. A level is
//! never reset in place: advancing or restarting builds a new one.

use std::fmt;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::clock::TargetSchedule;
use super::spawn::spawn_points;
use super::state::{MovementMode, Phase, Scene, Target};
use super::tick::{self, TickKind};
use crate::consts::*;
use crate::error::{GameError, GameResult};

/// Validated level number in `1..=6`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LevelIndex(u8);

impl LevelIndex {
    pub const FIRST: Self = Self(1);
    pub const LAST: Self = Self(LEVEL_COUNT);

    pub fn new(index: u8) -> GameResult<Self> {
        if (1..=LEVEL_COUNT).contains(&index) {
            Ok(Self(index))
        } else {
            Err(GameError::InvalidLevelIndex { index })
        }
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// Following level, `None` after the last one
    pub fn next(self) -> Option<Self> {
        Self::new(self.0 + 1).ok()
    }
}

impl fmt::Display for LevelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, LEVEL_COUNT)
    }
}

/// How one target of a level flies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub mode: MovementMode,
    /// Multiplier on the scene's base speed (1.0-1.75)
    pub speed_multiplier: f32,
}

impl TargetSpec {
    const fn new(mode: MovementMode, speed_multiplier: f32) -> Self {
        Self {
            mode,
            speed_multiplier,
        }
    }
}

/// Fixed per-level difficulty table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelParams {
    pub index: LevelIndex,
    /// `floor(index / 2.5) + 1`
    pub target_count: u32,
    /// Three shots per target
    pub ammo_budget: u32,
    /// One entry per target, in spawn order
    pub targets: Vec<TargetSpec>,
}

impl LevelParams {
    pub fn for_level(index: LevelIndex) -> Self {
        use MovementMode::{Diagonal as D, Horizontal as H};

        // floor(i / 2.5) == floor(2i / 5)
        let target_count = u32::from(index.get()) * 2 / 5 + 1;
        let targets = match index.get() {
            1 => vec![TargetSpec::new(H, 1.0)],
            2 => vec![TargetSpec::new(D, 1.0)],
            3 => vec![TargetSpec::new(H, 1.0), TargetSpec::new(H, 1.0)],
            4 => vec![TargetSpec::new(D, 1.0), TargetSpec::new(D, 1.0)],
            5 => vec![
                TargetSpec::new(D, 1.0),
                TargetSpec::new(D, 1.10),
                TargetSpec::new(H, 1.15),
            ],
            _ => vec![
                TargetSpec::new(D, 1.25),
                TargetSpec::new(D, 1.5),
                TargetSpec::new(D, 1.75),
            ],
        };
        debug_assert_eq!(targets.len() as u32, target_count);

        Self {
            index,
            target_count,
            ammo_budget: target_count * AMMO_PER_TARGET,
            targets,
        }
    }
}

/// Outcome of an accepted shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Ammo and targets both remain
    Continue,
    /// The last target was hit
    LevelClear,
    /// Ammo ran out with targets still flying
    OutOfAmmo,
}

/// What an accepted click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotReport {
    /// Index of the target hit, if any
    pub hit: Option<usize>,
    pub verdict: Verdict,
    pub ammo_remaining: u32,
    pub targets_remaining: u32,
}

/// One playthrough unit
#[derive(Debug, Clone)]
pub struct Level {
    params: LevelParams,
    scene: Scene,
    ammo_remaining: u32,
    targets_remaining: u32,
    /// Spawn order; indices are stable for the level's lifetime
    targets: Vec<Target>,
    /// Parallel to `targets`
    schedules: Vec<TargetSchedule>,
}

impl Level {
    /// Build a level from raw inputs, rejecting bad indices and scenes
    pub fn construct<R: Rng + ?Sized>(
        index: u8,
        width: f32,
        height: f32,
        rng: &mut R,
    ) -> GameResult<Self> {
        let index = LevelIndex::new(index)?;
        let scene = Scene::new(width, height)?;
        Ok(Self::new(index, scene, rng))
    }

    /// Spawn the level's targets and arm their flight schedules
    pub fn new<R: Rng + ?Sized>(index: LevelIndex, scene: Scene, rng: &mut R) -> Self {
        let params = LevelParams::for_level(index);
        let points = spawn_points(params.targets.len(), &scene, rng);

        let targets: Vec<Target> = params
            .targets
            .iter()
            .zip(points)
            .map(|(spec, pos)| {
                let speed = scene.base_speed * spec.speed_multiplier;
                let wobble = rng.random_range(0..2u32);
                Target::new(spec.mode, pos, scene.sprite, speed, wobble)
            })
            .collect();
        let schedules = vec![TargetSchedule::flight(); targets.len()];

        log::info!(
            "Level {}: {} targets, {} ammo",
            index,
            params.target_count,
            params.ammo_budget
        );

        Self {
            ammo_remaining: params.ammo_budget,
            targets_remaining: params.target_count,
            params,
            scene,
            targets,
            schedules,
        }
    }

    pub fn index(&self) -> LevelIndex {
        self.params.index
    }

    pub fn params(&self) -> &LevelParams {
        &self.params
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn ammo_remaining(&self) -> u32 {
        self.ammo_remaining
    }

    pub fn targets_remaining(&self) -> u32 {
        self.targets_remaining
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn target(&self, index: usize) -> GameResult<&Target> {
        self.targets.get(index).ok_or(GameError::InvalidTargetIndex {
            index,
            count: self.targets.len(),
        })
    }

    pub fn is_cleared(&self) -> bool {
        self.targets_remaining == 0
    }

    pub fn is_out_of_ammo(&self) -> bool {
        self.ammo_remaining == 0 && self.targets_remaining > 0
    }

    /// Process a click at `pointer`.
    ///
    /// Returns `None` (and changes nothing) when there is no ammo or no
    /// target left. Otherwise spends exactly one round, hits at most the
    /// first flying target under the pointer, and reports the verdict.
    pub fn resolve_shot(&mut self, pointer: Vec2) -> Option<ShotReport> {
        if self.ammo_remaining == 0 || self.targets_remaining == 0 {
            log::debug!("shot at {:?} ignored: level already decided", pointer);
            return None;
        }
        self.ammo_remaining -= 1;

        let hit = self
            .targets
            .iter()
            .position(|t| t.is_hittable() && t.contains_point(pointer));

        if let Some(i) = hit {
            let target = &mut self.targets[i];
            target.shoot();
            // Swap in the fall schedule before the target can fall
            self.schedules[i] = TargetSchedule::fall();
            target.begin_falling();
            self.targets_remaining -= 1;
        }

        let verdict = if self.targets_remaining == 0 {
            Verdict::LevelClear
        } else if self.ammo_remaining == 0 {
            Verdict::OutOfAmmo
        } else {
            Verdict::Continue
        };

        log::debug!(
            "shot at ({:.1}, {:.1}): hit={:?} ammo={} targets={} -> {:?}",
            pointer.x,
            pointer.y,
            hit,
            self.ammo_remaining,
            self.targets_remaining,
            verdict
        );

        Some(ShotReport {
            hit,
            verdict,
            ammo_remaining: self.ammo_remaining,
            targets_remaining: self.targets_remaining,
        })
    }

    /// Apply one step to one target, for callers that run their own timers
    pub fn tick(&mut self, index: usize, kind: TickKind) -> GameResult<()> {
        let count = self.targets.len();
        let target = self
            .targets
            .get_mut(index)
            .ok_or(GameError::InvalidTargetIndex { index, count })?;
        tick::tick(target, kind, &self.scene);
        Ok(())
    }

    /// Let `dt_ms` of game time pass for every target
    pub fn advance(&mut self, dt_ms: u32) {
        for (target, schedule) in self.targets.iter_mut().zip(self.schedules.iter_mut()) {
            tick::run_due(target, schedule, &self.scene, dt_ms);
        }
    }

    /// Retire a falling target. Returns false if it was not falling.
    pub fn remove_target(&mut self, index: usize) -> GameResult<bool> {
        let count = self.targets.len();
        let target = self
            .targets
            .get_mut(index)
            .ok_or(GameError::InvalidTargetIndex { index, count })?;
        Ok(target.remove())
    }

    /// Retire every falling target whose fall schedule has run out.
    /// Returns the indices retired by this call.
    pub fn sweep_settled(&mut self) -> Vec<usize> {
        let mut retired = Vec::new();
        for (i, (target, schedule)) in self
            .targets
            .iter_mut()
            .zip(self.schedules.iter())
            .enumerate()
        {
            if target.phase == Phase::Falling && schedule.is_expired() && target.remove() {
                retired.push(i);
            }
        }
        retired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn level(index: u8) -> Level {
        let mut rng = Pcg32::seed_from_u64(1234);
        Level::construct(index, 256.0, 240.0, &mut rng).unwrap()
    }

    fn center(t: &Target) -> Vec2 {
        t.pos + t.size / 2.0
    }

    /// A point no target covers
    fn miss_point() -> Vec2 {
        Vec2::new(-100.0, -100.0)
    }

    #[test]
    fn test_level_index_bounds() {
        assert!(LevelIndex::new(0).is_err());
        assert!(LevelIndex::new(7).is_err());
        assert_eq!(LevelIndex::new(6).unwrap(), LevelIndex::LAST);
        assert_eq!(LevelIndex::FIRST.next(), Some(LevelIndex::new(2).unwrap()));
        assert_eq!(LevelIndex::LAST.next(), None);
        assert_eq!(LevelIndex::new(3).unwrap().to_string(), "3/6");
    }

    #[test]
    fn test_params_table() {
        let expected = [(1, 1, 3), (2, 1, 3), (3, 2, 6), (4, 2, 6), (5, 3, 9), (6, 3, 9)];
        for (index, count, ammo) in expected {
            let params = LevelParams::for_level(LevelIndex::new(index).unwrap());
            assert_eq!(params.target_count, count, "level {}", index);
            assert_eq!(params.ammo_budget, ammo, "level {}", index);
            assert_eq!(params.targets.len() as u32, count);
        }
    }

    #[test]
    fn test_movement_modes_per_level() {
        let modes = |i| {
            LevelParams::for_level(LevelIndex::new(i).unwrap())
                .targets
                .iter()
                .map(|s| s.mode)
                .collect::<Vec<_>>()
        };
        use MovementMode::*;
        assert_eq!(modes(1), vec![Horizontal]);
        assert_eq!(modes(2), vec![Diagonal]);
        assert_eq!(modes(3), vec![Horizontal, Horizontal]);
        assert_eq!(modes(4), vec![Diagonal, Diagonal]);
        assert_eq!(modes(5), vec![Diagonal, Diagonal, Horizontal]);
        assert_eq!(modes(6), vec![Diagonal, Diagonal, Diagonal]);
    }

    #[test]
    fn test_construct_rejects_bad_input() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(matches!(
            Level::construct(0, 256.0, 240.0, &mut rng),
            Err(GameError::InvalidLevelIndex { index: 0 })
        ));
        assert!(matches!(
            Level::construct(1, -1.0, 240.0, &mut rng),
            Err(GameError::InvalidScene { .. })
        ));
    }

    #[test]
    fn test_level6_speeds() {
        let l = level(6);
        let speeds: Vec<f32> = l.targets().iter().map(|t| t.vel.x).collect();
        assert_eq!(speeds, vec![12.5, 15.0, 17.5]);
    }

    #[test]
    fn test_hit_on_first_click_clears_level1() {
        let mut l = level(1);
        assert_eq!(l.targets().len(), 1);
        assert_eq!(l.targets()[0].mode, MovementMode::Horizontal);
        assert_eq!(l.ammo_remaining(), 3);

        let aim = center(&l.targets()[0]);
        let report = l.resolve_shot(aim).unwrap();
        assert_eq!(report.hit, Some(0));
        assert_eq!(report.verdict, Verdict::LevelClear);
        assert_eq!(l.ammo_remaining(), 2);
        assert_eq!(l.targets()[0].phase, Phase::Falling);
        assert!(l.is_cleared());

        // Level decided: further clicks are no-ops
        assert_eq!(l.resolve_shot(aim), None);
        assert_eq!(l.ammo_remaining(), 2);
    }

    #[test]
    fn test_three_misses_run_out_of_ammo() {
        let mut l = level(1);
        assert_eq!(l.resolve_shot(miss_point()).unwrap().verdict, Verdict::Continue);
        assert_eq!(l.resolve_shot(miss_point()).unwrap().verdict, Verdict::Continue);
        let last = l.resolve_shot(miss_point()).unwrap();
        assert_eq!(last.verdict, Verdict::OutOfAmmo);
        assert_eq!(last.ammo_remaining, 0);
        assert!(l.is_out_of_ammo());
        assert_eq!(l.resolve_shot(miss_point()), None);
    }

    #[test]
    fn test_last_round_hit_on_last_target_clears() {
        let mut l = level(1);
        l.ammo_remaining = 1;
        let report = l.resolve_shot(center(&l.targets()[0])).unwrap();
        assert_eq!(report.verdict, Verdict::LevelClear);
        assert_eq!(report.ammo_remaining, 0);
    }

    #[test]
    fn test_last_round_miss_with_two_targets_is_out_of_ammo() {
        let mut l = level(3);
        l.ammo_remaining = 1;
        let report = l.resolve_shot(miss_point()).unwrap();
        assert_eq!(report.verdict, Verdict::OutOfAmmo);
        assert_eq!(report.targets_remaining, 2);
    }

    #[test]
    fn test_second_click_on_shot_target_only_costs_ammo() {
        let mut l = level(3);
        // Park target 1 away so only target 0 is under the pointer
        l.targets[1].pos = Vec2::new(200.0, 10.0);
        l.targets[0].pos = Vec2::new(20.0, 100.0);
        let aim = center(&l.targets()[0]);

        let first = l.resolve_shot(aim).unwrap();
        assert_eq!(first.hit, Some(0));
        assert_eq!(first.ammo_remaining, 5);

        let second = l.resolve_shot(aim).unwrap();
        assert_eq!(second.hit, None);
        assert_eq!(second.ammo_remaining, 4);
        assert_eq!(second.targets_remaining, 1);
    }

    #[test]
    fn test_overlapping_targets_hit_in_spawn_order() {
        let mut l = level(3);
        l.targets[0].pos = Vec2::new(50.0, 50.0);
        l.targets[1].pos = Vec2::new(50.0, 50.0);
        let report = l.resolve_shot(Vec2::new(60.0, 60.0)).unwrap();
        assert_eq!(report.hit, Some(0));
        assert_eq!(l.targets()[1].phase, Phase::Flying);
        assert_eq!(report.targets_remaining, 1);
    }

    #[test]
    fn test_advance_moves_flying_and_falling_targets() {
        let mut l = level(1);
        let start = l.targets()[0].pos;
        l.advance(FLIGHT_TICK_MS);
        assert_ne!(l.targets()[0].pos.x, start.x);

        let aim = center(&l.targets()[0]);
        l.resolve_shot(aim).unwrap();
        let shot_at = l.targets()[0].pos;

        // Fall runs on its own 100 ms cadence
        l.advance(FALL_TICK_MS);
        let t = &l.targets()[0];
        assert_eq!(t.pos.x, shot_at.x);
        assert!(t.pos.y > shot_at.y);
        assert_eq!(t.rotation_deg, 0.0);
    }

    #[test]
    fn test_first_falling_frame_holds_for_a_full_cycle() {
        let mut l = level(1);
        l.advance(FLIGHT_TICK_MS);
        assert_eq!(l.targets()[0].frame, 1);

        l.resolve_shot(center(&l.targets()[0])).unwrap();
        assert_eq!(l.targets()[0].phase, Phase::Falling);
        assert_eq!(l.targets()[0].frame, 0);

        l.advance(FALL_TICK_MS - 1);
        assert_eq!(l.targets()[0].frame, 0);
        l.advance(1);
        assert_eq!(l.targets()[0].frame, 1);
    }

    #[test]
    fn test_fall_schedule_expires_and_sweeps() {
        let mut l = level(1);
        l.resolve_shot(center(&l.targets()[0])).unwrap();
        assert!(l.sweep_settled().is_empty());

        l.advance(FALL_TICK_MS * FALL_CYCLES);
        assert!(l.targets()[0].is_settled());
        assert_eq!(l.sweep_settled(), vec![0]);
        assert_eq!(l.targets()[0].phase, Phase::Removed);
        assert!(l.sweep_settled().is_empty());
    }

    #[test]
    fn test_explicit_tick_and_remove() {
        let mut l = level(2);
        l.targets[0].pos = Vec2::new(100.0, 100.0);
        l.tick(0, TickKind::Motion).unwrap();
        assert_eq!(l.targets()[0].pos, Vec2::new(110.0, 90.0));
        assert!(l.tick(5, TickKind::Motion).is_err());

        assert!(!l.remove_target(0).unwrap());
        l.resolve_shot(center(&l.targets()[0])).unwrap();
        assert!(l.remove_target(0).unwrap());
        assert!(l.remove_target(9).is_err());
    }
}
