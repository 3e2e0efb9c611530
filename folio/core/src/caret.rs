//! Blinking Caret
//!
//! The caret fades in over one half-period and back out over the next,
//! forever. It is a pure function of elapsed time and shares no state with
//! the rotator, so the view can sample it on whatever frame clock it has.

use std::time::Duration;

/// Default fade duration (one direction)
pub const DEFAULT_CARET_HALF_PERIOD_MS: u64 = 500;

/// Glyph drawn while the caret is visible
pub const CARET_GLYPH: &str = "▍";

/// Opacity at or above which the caret counts as visible
const VISIBLE_THRESHOLD: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Caret {
    half_period: Duration,
}

impl Caret {
    /// A zero half-period is bumped to 1ms so the wave stays defined
    pub fn new(half_period: Duration) -> Self {
        Self {
            half_period: half_period.max(Duration::from_millis(1)),
        }
    }

    pub fn half_period(&self) -> Duration {
        self.half_period
    }

    /// Triangle wave: 0.0 at t = 0, 1.0 at one half-period, 0.0 again at two
    pub fn opacity_at(&self, elapsed: Duration) -> f32 {
        let half = self.half_period.as_nanos();
        let phase = elapsed.as_nanos() % (half * 2);

        let ramp = if phase <= half {
            phase
        } else {
            half * 2 - phase
        };
        (ramp as f64 / half as f64) as f32
    }

    pub fn is_visible_at(&self, elapsed: Duration) -> bool {
        self.opacity_at(elapsed) >= VISIBLE_THRESHOLD
    }

    /// Glyph to draw at `elapsed`; a blank of the same width when hidden
    pub fn glyph_at(&self, elapsed: Duration) -> &'static str {
        if self.is_visible_at(elapsed) {
            CARET_GLYPH
        } else {
            " "
        }
    }
}

impl Default for Caret {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_CARET_HALF_PERIOD_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_opacity_wave() {
        let caret = Caret::default();
        assert_eq!(caret.opacity_at(ms(0)), 0.0);
        assert_eq!(caret.opacity_at(ms(250)), 0.5);
        assert_eq!(caret.opacity_at(ms(500)), 1.0);
        assert_eq!(caret.opacity_at(ms(750)), 0.5);
        assert_eq!(caret.opacity_at(ms(1000)), 0.0);
    }

    #[test]
    fn test_periodic() {
        let caret = Caret::new(ms(300));
        for t in [0, 120, 300, 410, 599] {
            assert_eq!(caret.opacity_at(ms(t)), caret.opacity_at(ms(t + 600)));
        }
    }

    #[test]
    fn test_visibility() {
        let caret = Caret::default();
        assert!(!caret.is_visible_at(ms(100)));
        assert!(caret.is_visible_at(ms(500)));
        assert_eq!(caret.glyph_at(ms(500)), CARET_GLYPH);
        assert_eq!(caret.glyph_at(ms(0)), " ");
    }

    #[test]
    fn test_zero_half_period_is_clamped() {
        let caret = Caret::new(Duration::ZERO);
        assert_eq!(caret.half_period(), ms(1));
    }
}
