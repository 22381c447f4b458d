//! Fixed-tick scheduler
//!
//! Wall time reported by the host loop is accumulated, and every full tick
//! interval in the accumulator is paid out as one simulation tick. The tick
//! interval comes from a speed ratio in `[0, 1]` linearly interpolated from
//! the slow bound (ratio near 0) to the fast bound (ratio 1). A ratio of
//! exactly 0 freezes the simulation.

use crate::config::validate_tick_bounds;
use crate::error::{Result, SimulationError};
use log::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// Frozen or never advanced; nothing accumulated
    Idle,
    /// Collecting elapsed time towards the next tick
    Accumulating,
}

/// Converts elapsed time into a number of ticks to run
#[derive(Clone, Debug)]
pub struct SimulationScheduler {
    state: SchedulerState,
    /// Kept in f64 so paying out ticks stays exact for long stalls
    accumulated_time: f64,
    slow_tick: f32,
    fast_tick: f32,
    speed: f32,
}

impl SimulationScheduler {
    /// Create a scheduler with the given interval bounds and initial speed
    pub fn new(slow_tick: f32, fast_tick: f32, speed: f32) -> Result<Self> {
        validate_tick_bounds(slow_tick, fast_tick)?;
        let mut scheduler = Self {
            state: SchedulerState::Idle,
            accumulated_time: 0.0,
            slow_tick,
            fast_tick,
            speed: 0.0,
        };
        scheduler.set_speed(speed)?;
        Ok(scheduler)
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn accumulated_time(&self) -> f32 {
        self.accumulated_time as f32
    }

    /// Set the speed ratio, clamped to `[0, 1]`
    ///
    /// Takes effect on the next call to [`advance`](Self::advance). Setting 0
    /// drops any partially accumulated time.
    pub fn set_speed(&mut self, ratio: f32) -> Result<()> {
        if ratio.is_nan() {
            return Err(SimulationError::InvalidSpeed(ratio));
        }
        self.speed = ratio.clamp(0.0, 1.0);
        if self.is_frozen() {
            self.state = SchedulerState::Idle;
            self.accumulated_time = 0.0;
        }
        Ok(())
    }

    pub fn is_frozen(&self) -> bool {
        self.speed == 0.0
    }

    /// Current tick interval in seconds, `None` while frozen
    ///
    /// Higher speed means a shorter interval.
    pub fn tick_interval(&self) -> Option<f32> {
        if self.is_frozen() {
            None
        } else {
            Some(self.slow_tick + (self.fast_tick - self.slow_tick) * self.speed)
        }
    }

    /// Add `delta_time` seconds and return how many ticks are now due
    ///
    /// The caller runs each due tick to completion before the next one.
    /// Non-finite deltas are ignored and the count saturates at `u32::MAX`.
    pub fn advance(&mut self, delta_time: f32) -> u32 {
        let Some(interval) = self.tick_interval() else {
            return 0;
        };

        self.state = SchedulerState::Accumulating;
        if !delta_time.is_finite() {
            warn!("Ignoring non-finite frame delta {}", delta_time);
            return 0;
        }
        self.accumulated_time += f64::from(delta_time.max(0.0));

        let interval = f64::from(interval);
        let due = (self.accumulated_time / interval).floor();
        self.accumulated_time = (self.accumulated_time - due * interval).max(0.0);
        due.min(f64::from(u32::MAX)) as u32
    }

    /// Drop accumulated time and return to `Idle`
    pub fn reset(&mut self) {
        self.accumulated_time = 0.0;
        self.state = SchedulerState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler(speed: f32) -> SimulationScheduler {
        SimulationScheduler::new(0.5, 0.1, speed).unwrap()
    }

    #[test]
    fn test_speed_zero_never_ticks() {
        let mut s = scheduler(0.0);
        for _ in 0..100 {
            assert_eq!(s.advance(10.0), 0);
        }
        assert_eq!(s.state(), SchedulerState::Idle);
        assert_eq!(s.accumulated_time(), 0.0);
    }

    #[test]
    fn test_interval_shrinks_with_speed() {
        let fast = scheduler(1.0).tick_interval().unwrap();
        assert!((fast - 0.1).abs() < 1e-6);
        let slow = scheduler(0.01).tick_interval().unwrap();
        let mid = scheduler(0.5).tick_interval().unwrap();
        assert!(slow > mid);
        assert!((mid - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_accumulates_and_fires_multiple_ticks() {
        let mut s = scheduler(1.0);
        assert_eq!(s.advance(0.05), 0);
        assert_eq!(s.state(), SchedulerState::Accumulating);
        assert_eq!(s.advance(0.06), 1);
        // 0.01 left over, plus 0.3 is three more intervals
        assert_eq!(s.advance(0.3), 3);
        assert!(s.accumulated_time() < 0.1);
    }

    #[test]
    fn test_speed_change_applies_to_next_advance() {
        let mut s = scheduler(1.0);
        assert_eq!(s.advance(0.25), 2);
        s.set_speed(0.0).unwrap();
        assert_eq!(s.advance(5.0), 0);
        s.set_speed(1.0).unwrap();
        // frozen time was not banked
        assert_eq!(s.advance(0.05), 0);
    }

    #[test]
    fn test_long_stall_pays_out_in_one_step() {
        let mut s = SimulationScheduler::new(0.5, 0.016, 1.0).unwrap();
        let due = s.advance(1.0e7);
        // 1e7 / 0.016 is about 6.25e8; f32 bounds make the exact figure fuzzy
        assert!((624_000_000..=626_000_000).contains(&due));
        assert!(s.accumulated_time() < 0.016);
        assert_eq!(s.advance(0.0), 0);
    }

    #[test]
    fn test_non_finite_delta_is_ignored() {
        let mut s = scheduler(1.0);
        assert_eq!(s.advance(f32::INFINITY), 0);
        assert_eq!(s.advance(f32::NAN), 0);
        assert_eq!(s.accumulated_time(), 0.0);
        assert_eq!(s.advance(0.15), 1);
    }

    #[test]
    fn test_speed_is_clamped_and_nan_rejected() {
        let mut s = scheduler(0.5);
        s.set_speed(4.0).unwrap();
        assert_eq!(s.speed(), 1.0);
        s.set_speed(-1.0).unwrap();
        assert!(s.is_frozen());
        assert!(s.set_speed(f32::NAN).is_err());
    }
}
