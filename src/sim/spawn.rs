//! Spawn placement
//!
//! Spawn points are drawn uniformly from a rectangle given in scene
//! fractions. After each spawn the rectangle is cut at the previous target's
//! position on both axes, keeping the side facing the scene centre. This
//! spreads simultaneous spawns out without guaranteeing they never overlap.

use glam::Vec2;
use rand::Rng;

use super::state::Scene;
use crate::consts::*;

/// Spawn region as fractions of the scene size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for SpawnRect {
    fn default() -> Self {
        Self {
            min: Vec2::new(SPAWN_MIN_X, SPAWN_MIN_Y),
            max: Vec2::new(SPAWN_MAX_X, SPAWN_MAX_Y),
        }
    }
}

impl SpawnRect {
    /// Uniform point inside the rectangle (scene fractions)
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let t = Vec2::new(rng.random::<f32>(), rng.random::<f32>());
        self.min + t * (self.max - self.min)
    }

    /// Cut each axis at `previous` (scene fractions) and keep the far side
    /// from the nearer scene edge: below 0.5 the previous position becomes
    /// the new minimum, otherwise the new maximum.
    pub fn split_away_from(&self, previous: Vec2) -> Self {
        let mut next = *self;
        if previous.x < 0.5 {
            next.min.x = previous.x.clamp(self.min.x, self.max.x);
        } else {
            next.max.x = previous.x.clamp(self.min.x, self.max.x);
        }
        if previous.y < 0.5 {
            next.min.y = previous.y.clamp(self.min.y, self.max.y);
        } else {
            next.max.y = previous.y.clamp(self.min.y, self.max.y);
        }
        next
    }

    pub fn contains(&self, fraction: Vec2) -> bool {
        fraction.cmpge(self.min).all() && fraction.cmple(self.max).all()
    }
}

/// Top-left spawn positions (scene coordinates) for `count` targets
pub fn spawn_points<R: Rng + ?Sized>(count: usize, scene: &Scene, rng: &mut R) -> Vec<Vec2> {
    let mut rect = SpawnRect::default();
    let mut points = Vec::with_capacity(count);
    for i in 0..count {
        if i > 0 {
            let previous = points[i - 1] / scene.size;
            rect = rect.split_away_from(previous);
        }
        let fraction = rect.sample(rng);
        log::debug!(
            "spawn {}: rect x {:.3}..{:.3} y {:.3}..{:.3} -> ({:.3}, {:.3})",
            i,
            rect.min.x,
            rect.max.x,
            rect.min.y,
            rect.max.y,
            fraction.x,
            fraction.y
        );
        points.push(fraction * scene.size);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_sample_stays_inside() {
        let mut rng = Pcg32::seed_from_u64(7);
        let rect = SpawnRect::default();
        for _ in 0..500 {
            assert!(rect.contains(rect.sample(&mut rng)));
        }
    }

    #[test]
    fn test_split_left_top_moves_min() {
        let rect = SpawnRect::default().split_away_from(Vec2::new(0.2, 0.1));
        assert_eq!(rect.min, Vec2::new(0.2, 0.1));
        assert_eq!(rect.max, Vec2::new(0.85, 0.40));
    }

    #[test]
    fn test_split_right_moves_max() {
        let rect = SpawnRect::default().split_away_from(Vec2::new(0.7, 0.3));
        assert_eq!(rect.min, Vec2::new(0.05, 0.3));
        assert_eq!(rect.max, Vec2::new(0.7, 0.40));
    }

    #[test]
    fn test_split_is_cumulative() {
        let rect = SpawnRect::default()
            .split_away_from(Vec2::new(0.2, 0.1))
            .split_away_from(Vec2::new(0.6, 0.2));
        assert_eq!(rect.min, Vec2::new(0.2, 0.2));
        assert_eq!(rect.max, Vec2::new(0.6, 0.40));
    }

    #[test]
    fn test_second_spawn_lands_beyond_first() {
        let scene = Scene::new(256.0, 240.0).unwrap();
        for seed in 0..500 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let points = spawn_points(2, &scene, &mut rng);
            let first = points[0] / scene.size;
            let second = points[1] / scene.size;

            if first.x < 0.5 {
                assert!(second.x >= first.x - 1e-4, "seed {}: {} left of {}", seed, second.x, first.x);
            } else {
                assert!(second.x <= first.x + 1e-4, "seed {}: {} right of {}", seed, second.x, first.x);
            }
            // Spawn band is the top 40%, so every later spawn sits lower
            assert!(second.y >= first.y - 1e-4);
            assert!(second.x <= SPAWN_MAX_X + 1e-4 && second.y <= SPAWN_MAX_Y + 1e-4);
        }
    }

    #[test]
    fn test_spawn_is_seed_deterministic() {
        let scene = Scene::new(256.0, 240.0).unwrap();
        let a = spawn_points(3, &scene, &mut Pcg32::seed_from_u64(9));
        let b = spawn_points(3, &scene, &mut Pcg32::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
