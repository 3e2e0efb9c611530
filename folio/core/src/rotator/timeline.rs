//! Virtual Timeline
//!
//! Drives a [`Rotator`] against simulated time, so the loop can be stepped
//! and inspected without waiting on real timers.

use std::time::Duration;

use super::Rotator;

/// A rotator plus a virtual clock holding exactly one pending deadline
#[derive(Clone, Debug)]
pub struct Timeline {
    rotator: Rotator,
    /// Simulated time since mount
    elapsed: Duration,
    /// Simulated time at which the pending tick fires
    next_tick_at: Duration,
}

impl Timeline {
    /// Mount a rotator at t = 0 with its first tick pending
    pub fn new(rotator: Rotator) -> Self {
        let next_tick_at = rotator.initial_delay();
        Self {
            rotator,
            elapsed: Duration::ZERO,
            next_tick_at,
        }
    }

    /// Advance the clock, firing every tick whose deadline falls inside the
    /// window. Returns the number of ticks fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        let target = self.elapsed + by;
        let mut fired = 0;

        while self.next_tick_at <= target {
            self.elapsed = self.next_tick_at;
            let delay = self.rotator.tick();
            self.next_tick_at = self.elapsed + delay;
            fired += 1;
        }

        self.elapsed = target;
        fired
    }

    /// Jump straight to the pending tick and fire it; returns the delay it
    /// scheduled
    pub fn step(&mut self) -> Duration {
        self.elapsed = self.next_tick_at;
        let delay = self.rotator.tick();
        self.next_tick_at = self.elapsed + delay;
        delay
    }

    /// Fire `n` ticks back to back
    pub fn step_n(&mut self, n: usize) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Time remaining until the pending tick
    pub fn until_next_tick(&self) -> Duration {
        self.next_tick_at.saturating_sub(self.elapsed)
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn rotator(&self) -> &Rotator {
        &self.rotator
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotator::{Phase, RoleList, RotatorTiming};

    fn timeline(roles: &[&str]) -> Timeline {
        let roles = RoleList::new(roles.iter().copied()).unwrap();
        Timeline::new(Rotator::new(roles, RotatorTiming::from_millis(10, 5, 100)))
    }

    #[test]
    fn test_first_tick_after_type_speed() {
        let mut t = timeline(&["Hi"]);
        assert_eq!(t.advance(Duration::from_millis(9)), 0);
        assert_eq!(t.rotator().display_text(), "");
        assert_eq!(t.advance(Duration::from_millis(1)), 1);
        assert_eq!(t.rotator().display_text(), "H");
    }

    #[test]
    fn test_no_char_change_during_pause() {
        let mut t = timeline(&["Hi"]);
        t.advance(Duration::from_millis(30));
        assert_eq!(t.rotator().phase(), Phase::Pausing);
        assert_eq!(t.until_next_tick(), Duration::from_millis(100));

        assert_eq!(t.advance(Duration::from_millis(99)), 0);
        assert_eq!(t.rotator().display_text(), "Hi");
        assert_eq!(t.rotator().phase(), Phase::Pausing);

        t.advance(Duration::from_millis(1));
        assert_eq!(t.rotator().phase(), Phase::Deleting);
        assert_eq!(t.rotator().display_text(), "Hi");
    }

    #[test]
    fn test_step_reports_scheduled_delay() {
        let mut t = timeline(&["A"]);
        assert_eq!(t.step(), Duration::from_millis(10));
        assert_eq!(t.step(), Duration::from_millis(100));
        assert_eq!(t.elapsed(), Duration::from_millis(20));
    }

    #[test]
    fn test_large_advance_fires_many_ticks() {
        let mut t = timeline(&["Hi"]);
        let fired = t.advance(Duration::from_millis(145));
        assert_eq!(fired, 7);
        assert_eq!(t.rotator().current_index(), 0);
        assert_eq!(t.rotator().phase(), Phase::Typing);
    }

    #[test]
    fn test_zero_timing_advance_terminates() {
        let roles = RoleList::new(["Hi"]).unwrap();
        let mut t = Timeline::new(Rotator::new(roles, RotatorTiming::from_millis(0, 0, 0)));

        // Speeds floor at 1ms: "H" at 1, "Hi" at 2, then the pause and the
        // switch to deleting share t=3
        let fired = t.advance(Duration::from_millis(3));
        assert_eq!(fired, 4);
        assert_eq!(t.rotator().display_text(), "Hi");
        assert_eq!(t.rotator().phase(), Phase::Deleting);
        assert_eq!(t.until_next_tick(), Duration::from_millis(1));
    }
}
