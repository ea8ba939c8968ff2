//! Per-target repeating timers
//!
//! Each target owns two independent schedules: motion and animation. They
//! are replaced wholesale when the target is shot, so nothing armed for
//! flight can fire after the transition.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Fixed-period timer fed with elapsed milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatingTimer {
    pub period_ms: u32,
    elapsed_ms: u32,
    /// `None` repeats forever
    cycles_left: Option<u32>,
}

impl RepeatingTimer {
    /// Fires every `period_ms` forever
    pub fn repeating(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            elapsed_ms: 0,
            cycles_left: None,
        }
    }

    /// Fires every `period_ms`, `cycles` times in total
    pub fn limited(period_ms: u32, cycles: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            elapsed_ms: 0,
            cycles_left: Some(cycles),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.cycles_left == Some(0)
    }

    /// Accumulate `dt_ms` and return how many times the timer fired
    pub fn advance(&mut self, dt_ms: u32) -> u32 {
        if self.is_expired() {
            return 0;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        let mut fired = self.elapsed_ms / self.period_ms;
        self.elapsed_ms %= self.period_ms;

        if let Some(left) = self.cycles_left.as_mut() {
            fired = fired.min(*left);
            *left -= fired;
            if *left == 0 {
                self.elapsed_ms = 0;
            }
        }
        fired
    }
}

/// Which phase a schedule was armed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Regime {
    Flight,
    Fall,
}

/// Steps due for one target after an `advance`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueSteps {
    pub motion: u32,
    pub animation: u32,
}

/// The motion + animation timer pair of one target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSchedule {
    pub regime: Regime,
    pub motion: RepeatingTimer,
    pub animation: RepeatingTimer,
}

impl TargetSchedule {
    /// Endless 150 ms motion and wing-flap timers
    pub fn flight() -> Self {
        Self {
            regime: Regime::Flight,
            motion: RepeatingTimer::repeating(FLIGHT_TICK_MS),
            animation: RepeatingTimer::repeating(FLIGHT_TICK_MS),
        }
    }

    /// 100 ms fall timers, limited to `FALL_CYCLES` cycles
    pub fn fall() -> Self {
        Self {
            regime: Regime::Fall,
            motion: RepeatingTimer::limited(FALL_TICK_MS, FALL_CYCLES),
            animation: RepeatingTimer::limited(FALL_TICK_MS, FALL_CYCLES),
        }
    }

    pub fn advance(&mut self, dt_ms: u32) -> DueSteps {
        DueSteps {
            motion: self.motion.advance(dt_ms),
            animation: self.animation.advance(dt_ms),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.motion.is_expired() && self.animation.is_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeating_timer_cadence() {
        let mut timer = RepeatingTimer::repeating(150);
        assert_eq!(timer.advance(100), 0);
        assert_eq!(timer.advance(50), 1);
        assert_eq!(timer.advance(449), 2);
        assert_eq!(timer.advance(1), 1);
        assert!(!timer.is_expired());
    }

    #[test]
    fn test_limited_timer_expires() {
        let mut timer = RepeatingTimer::limited(100, 3);
        assert_eq!(timer.advance(250), 2);
        assert_eq!(timer.advance(1000), 1);
        assert!(timer.is_expired());
        assert_eq!(timer.advance(1000), 0);
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let mut timer = RepeatingTimer::repeating(0);
        assert_eq!(timer.period_ms, 1);
        assert_eq!(timer.advance(5), 5);
    }

    #[test]
    fn test_schedule_replacement() {
        let mut schedule = TargetSchedule::flight();
        assert_eq!(schedule.advance(300), DueSteps { motion: 2, animation: 2 });

        schedule = TargetSchedule::fall();
        assert_eq!(schedule.regime, Regime::Fall);
        assert_eq!(schedule.advance(300), DueSteps { motion: 3, animation: 3 });
        schedule.advance(FALL_TICK_MS * FALL_CYCLES);
        assert!(schedule.is_expired());
    }
}
