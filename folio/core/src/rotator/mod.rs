//! Typewriter Role Rotator
//!
//! Cycles through a fixed list of role labels, revealing each one character
//! at a time, dwelling at the full label, erasing it, then moving on to the
//! next label. Loops forever.
//!
//! # Design
//!
//! The rotator is a pure state machine. [`Rotator::tick`] applies exactly one
//! step and returns how long to wait before the next one; it never reads a
//! clock and never sleeps. Something else owns the timer:
//!
//! ```text
//! Rotator (state + transitions)
//!     │
//!     ├─→ RotatorDriver (tokio task, one pending sleep, cancel on dispose)
//!     └─→ Timeline      (virtual clock, deterministic stepping)
//! ```
//!
//! # Cycle
//!
//! ```text
//! Typing ──(full)──→ Pausing ──→ Deleting ──(empty)──→ Typing (next role)
//! ```
//!
//! There is no dwell after deleting; the next role starts typing one
//! `type_speed` later.

pub mod driver;
pub mod timeline;
pub mod timing;

pub use driver::{RotatorDriver, RotatorHandle};
pub use timeline::Timeline;
pub use timing::RotatorTiming;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Errors raised while building a rotator
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RotatorError {
    /// The role list had no entries; the index could never advance
    #[error("role list must contain at least one entry")]
    EmptyRoleList,

    /// Typing or deleting with no delay would never let the clock advance
    #[error("{0} must be greater than zero")]
    ZeroSpeed(&'static str),
}

// ============================================================================
// Role List
// ============================================================================

/// Ordered, non-empty, read-only list of role labels
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleList {
    roles: Vec<String>,
}

impl RoleList {
    /// Build a role list, rejecting an empty sequence
    pub fn new<I, S>(roles: I) -> Result<Self, RotatorError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roles: Vec<String> = roles.into_iter().map(Into::into).collect();
        if roles.is_empty() {
            return Err(RotatorError::EmptyRoleList);
        }
        Ok(Self { roles })
    }

    /// Number of roles (always at least one)
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// A role list is never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.roles.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(String::as_str)
    }
}

impl Default for RoleList {
    /// The labels shown on the original hero section
    fn default() -> Self {
        Self {
            roles: vec![
                "Backend Engineer".to_string(),
                "Software Engineer".to_string(),
                "DevOps Engineer".to_string(),
            ],
        }
    }
}

// ============================================================================
// State
// ============================================================================

/// Rotator sub-state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Revealing characters of the current role
    #[default]
    Typing,
    /// Dwelling on the fully revealed role
    Pausing,
    /// Erasing characters of the current role
    Deleting,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Typing => "typing",
            Self::Pausing => "pausing",
            Self::Deleting => "deleting",
        }
    }
}

/// Mutable state of a rotator
///
/// The displayed text is never stored; it is derived from `revealed` so it
/// can only ever be a prefix of the current role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct RotatorState {
    /// Index into the role list
    pub current_index: usize,
    /// Number of chars of the current role that are visible
    pub revealed: usize,
    /// Current phase
    pub phase: Phase,
}

/// Snapshot of a rotator, published to the view
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RotatorFrame {
    /// Visible prefix of the current role
    pub text: String,
    /// Index of the current role
    pub index: usize,
    /// Phase at the time of the snapshot
    pub phase: Phase,
    /// Number of ticks applied so far
    pub tick: u64,
}

// ============================================================================
// Rotator
// ============================================================================

/// The typewriter state machine
#[derive(Clone, Debug)]
pub struct Rotator {
    roles: RoleList,
    timing: RotatorTiming,
    state: RotatorState,
    ticks: u64,
}

impl Rotator {
    /// Create a rotator in its mount state: first role, nothing typed.
    /// Zero typing or deleting speeds are raised to [`timing::MIN_STEP`].
    pub fn new(roles: RoleList, timing: RotatorTiming) -> Self {
        let clamped = timing.clamped();
        if clamped != timing {
            tracing::warn!("zero rotator speed raised to {:?}", timing::MIN_STEP);
        }
        Self {
            roles,
            timing: clamped,
            state: RotatorState::default(),
            ticks: 0,
        }
    }

    pub fn with_defaults(roles: RoleList) -> Self {
        Self::new(roles, RotatorTiming::default())
    }

    /// Delay between mount and the first tick
    pub fn initial_delay(&self) -> Duration {
        self.timing.type_speed
    }

    /// Apply one step and return the delay before the next tick
    pub fn tick(&mut self) -> Duration {
        self.ticks += 1;
        let target_len = self.current_role().chars().count();

        match self.state.phase {
            Phase::Typing if self.state.revealed < target_len => {
                self.state.revealed += 1;
                self.timing.type_speed
            }
            Phase::Typing => {
                self.state.phase = Phase::Pausing;
                tracing::debug!(index = self.state.current_index, "role fully typed");
                self.timing.pause
            }
            Phase::Pausing => {
                self.state.phase = Phase::Deleting;
                self.timing.delete_speed
            }
            Phase::Deleting if self.state.revealed > 0 => {
                self.state.revealed -= 1;
                self.timing.delete_speed
            }
            Phase::Deleting => {
                self.state.current_index = (self.state.current_index + 1) % self.roles.len();
                self.state.phase = Phase::Typing;
                tracing::debug!(index = self.state.current_index, "advanced to next role");
                self.timing.type_speed
            }
        }
    }

    /// Replace the role list and restart from the mount state
    pub fn reset_roles(&mut self, roles: RoleList) {
        self.roles = roles;
        self.state = RotatorState::default();
    }

    /// Visible prefix of the current role
    pub fn display_text(&self) -> &str {
        let role = self.current_role();
        match role.char_indices().nth(self.state.revealed) {
            Some((end, _)) => &role[..end],
            None => role,
        }
    }

    /// The role currently being typed or deleted
    pub fn current_role(&self) -> &str {
        // current_index is kept in range by the modulo in tick/reset
        self.roles.get(self.state.current_index).unwrap_or_default()
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn state(&self) -> RotatorState {
        self.state
    }

    pub fn roles(&self) -> &RoleList {
        &self.roles
    }

    pub fn timing(&self) -> &RotatorTiming {
        &self.timing
    }

    /// Ticks applied since creation (not reset by `reset_roles`)
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn frame(&self) -> RotatorFrame {
        RotatorFrame {
            text: self.display_text().to_string(),
            index: self.state.current_index,
            phase: self.state.phase,
            tick: self.ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fast_timing() -> RotatorTiming {
        RotatorTiming::from_millis(10, 5, 100)
    }

    fn rotator(roles: &[&str]) -> Rotator {
        Rotator::new(RoleList::new(roles.iter().copied()).unwrap(), fast_timing())
    }

    #[test]
    fn test_empty_role_list_rejected() {
        let err = RoleList::new(Vec::<String>::new()).unwrap_err();
        assert_eq!(err, RotatorError::EmptyRoleList);
    }

    #[test]
    fn test_mount_state() {
        let r = rotator(&["Hi"]);
        assert_eq!(r.current_index(), 0);
        assert_eq!(r.display_text(), "");
        assert_eq!(r.phase(), Phase::Typing);
        assert_eq!(r.initial_delay(), Duration::from_millis(10));
    }

    #[test]
    fn test_single_role_cycle() {
        let mut r = rotator(&["Hi"]);

        assert_eq!(r.tick(), Duration::from_millis(10));
        assert_eq!(r.display_text(), "H");
        r.tick();
        assert_eq!(r.display_text(), "Hi");

        // Full: schedule the dwell, no char change
        assert_eq!(r.tick(), Duration::from_millis(100));
        assert_eq!(r.phase(), Phase::Pausing);
        assert_eq!(r.display_text(), "Hi");

        assert_eq!(r.tick(), Duration::from_millis(5));
        assert_eq!(r.phase(), Phase::Deleting);

        r.tick();
        r.tick();
        assert_eq!(r.display_text(), "");
        assert_eq!(r.phase(), Phase::Deleting);

        // Empty while deleting: wrap to itself
        assert_eq!(r.tick(), Duration::from_millis(10));
        assert_eq!(r.current_index(), 0);
        assert_eq!(r.phase(), Phase::Typing);
    }

    #[test]
    fn test_advances_to_next_role() {
        let mut r = rotator(&["A", "BB"]);
        // type A, pause, start deleting, delete A, advance
        for _ in 0..5 {
            r.tick();
        }
        assert_eq!(r.current_index(), 1);
        assert_eq!(r.display_text(), "");

        r.tick();
        assert_eq!(r.display_text(), "B");
        r.tick();
        assert_eq!(r.display_text(), "BB");
    }

    #[test]
    fn test_empty_role_goes_straight_to_pause() {
        let mut r = rotator(&["", "x"]);
        assert_eq!(r.tick(), Duration::from_millis(100));
        assert_eq!(r.phase(), Phase::Pausing);
        assert_eq!(r.display_text(), "");
    }

    #[test]
    fn test_multibyte_roles_reveal_on_char_boundaries() {
        let mut r = rotator(&["héllo ✨"]);
        r.tick();
        r.tick();
        assert_eq!(r.display_text(), "hé");
        for _ in 0..5 {
            r.tick();
        }
        assert_eq!(r.display_text(), "héllo ✨");
    }

    #[test]
    fn test_reset_roles_restarts() {
        let mut r = rotator(&["abc", "def"]);
        for _ in 0..4 {
            r.tick();
        }
        r.reset_roles(RoleList::new(["xyz"]).unwrap());
        assert_eq!(r.state(), RotatorState::default());
        assert_eq!(r.current_role(), "xyz");
        assert_eq!(r.display_text(), "");
    }

    #[test]
    fn test_frame_snapshot() {
        let mut r = rotator(&["ab"]);
        r.tick();
        let frame = r.frame();
        assert_eq!(frame.text, "a");
        assert_eq!(frame.index, 0);
        assert_eq!(frame.phase, Phase::Typing);
        assert_eq!(frame.tick, 1);
    }

    #[test]
    fn test_default_roles() {
        let roles = RoleList::default();
        assert_eq!(roles.len(), 3);
        assert_eq!(roles.get(0), Some("Backend Engineer"));
    }
}
