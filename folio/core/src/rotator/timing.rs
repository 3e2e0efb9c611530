//! Rotator Timing
//!
//! Per-phase delays for the typewriter loop.

use std::time::Duration;

use super::RotatorError;

/// Default delay per character while typing
pub const DEFAULT_TYPE_SPEED_MS: u64 = 100;

/// Default delay per character while deleting (faster than typing)
pub const DEFAULT_DELETE_SPEED_MS: u64 = 50;

/// Default dwell on the fully typed role
pub const DEFAULT_PAUSE_MS: u64 = 2000;

/// Shortest per-character delay a rotator will schedule
pub const MIN_STEP: Duration = Duration::from_millis(1);

/// Delays used by [`super::Rotator::tick`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotatorTiming {
    /// Delay per character while typing
    pub type_speed: Duration,
    /// Delay per character while deleting
    pub delete_speed: Duration,
    /// Dwell time at the full role before deleting
    pub pause: Duration,
}

impl RotatorTiming {
    /// Checked constructor: typing and deleting must take time, the pause
    /// may be zero
    pub fn new(
        type_speed: Duration,
        delete_speed: Duration,
        pause: Duration,
    ) -> Result<Self, RotatorError> {
        if type_speed.is_zero() {
            return Err(RotatorError::ZeroSpeed("type_speed"));
        }
        if delete_speed.is_zero() {
            return Err(RotatorError::ZeroSpeed("delete_speed"));
        }
        Ok(Self {
            type_speed,
            delete_speed,
            pause,
        })
    }

    /// Unchecked; [`super::Rotator::new`] bumps zero speeds to [`MIN_STEP`]
    #[must_use]
    pub const fn from_millis(type_speed_ms: u64, delete_speed_ms: u64, pause_ms: u64) -> Self {
        Self {
            type_speed: Duration::from_millis(type_speed_ms),
            delete_speed: Duration::from_millis(delete_speed_ms),
            pause: Duration::from_millis(pause_ms),
        }
    }

    /// Time to type, dwell on, and erase a role of `chars` characters,
    /// including the advance tick
    #[must_use]
    pub fn cycle_duration(&self, chars: usize) -> Duration {
        let steps = u32::try_from(chars)
            .ok()
            .and_then(|c| c.checked_add(1))
            .unwrap_or(u32::MAX);
        self.type_speed
            .saturating_mul(steps)
            .saturating_add(self.pause)
            .saturating_add(self.delete_speed.saturating_mul(steps))
    }

    /// Zero typing or deleting speeds raised to [`MIN_STEP`], so every
    /// non-pause tick moves the clock forward
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            type_speed: self.type_speed.max(MIN_STEP),
            delete_speed: self.delete_speed.max(MIN_STEP),
            pause: self.pause,
        }
    }
}

impl Default for RotatorTiming {
    fn default() -> Self {
        Self::from_millis(DEFAULT_TYPE_SPEED_MS, DEFAULT_DELETE_SPEED_MS, DEFAULT_PAUSE_MS)
    }
}
