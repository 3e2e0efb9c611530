//! Rotator Behaviour Tests
//!
//! End-to-end checks of the typewriter loop through the public API, using
//! the virtual [`Timeline`] for exact timing and the tokio driver with a
//! paused clock for the cancellation contract.
//!
//! # Test Coverage
//!
//! 1. **Prefix invariant**: visible text is always a prefix of the current role
//! 2. **Cycle**: type, pause, delete, advance, in that order only
//! 3. **Wrapping**: single-role lists retype the same role
//! 4. **Disposal**: no tick after teardown
//! 5. **Configuration**: empty role lists never reach the loop

use std::sync::atomic::Ordering;
use std::time::Duration;

use pretty_assertions::assert_eq;

use folio_core::{
    FolioConfig, Phase, RoleList, Rotator, RotatorDriver, RotatorError, RotatorTiming, Timeline,
};

fn timing() -> RotatorTiming {
    RotatorTiming::from_millis(10, 5, 100)
}

fn timeline(roles: &[&str]) -> Timeline {
    Timeline::new(Rotator::new(
        RoleList::new(roles.iter().copied()).unwrap(),
        timing(),
    ))
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_display_text_is_always_a_prefix() {
    let role_lists: &[&[&str]] = &[
        &["Backend Engineer", "Software Engineer", "DevOps Engineer"],
        &["Hi"],
        &["", "a", ""],
        &["naïve café", "日本語", "🦀 Rust"],
    ];
    let steps = [1, 3, 7, 50, 101, 999];

    for roles in role_lists {
        for step in steps {
            let mut t = timeline(roles);
            for _ in 0..400 {
                t.advance(Duration::from_millis(step));
                let r = t.rotator();
                assert!(r.current_index() < roles.len());
                assert!(
                    roles[r.current_index()].starts_with(r.display_text()),
                    "{:?} is not a prefix of {:?}",
                    r.display_text(),
                    roles[r.current_index()]
                );
            }
        }
    }
}

#[test]
fn test_phase_follows_fixed_cycle() {
    let mut t = timeline(&["abc", "de"]);
    let mut last = t.rotator().phase();

    for _ in 0..200 {
        let index_before = t.rotator().current_index();
        t.step();
        let phase = t.rotator().phase();

        if phase != last {
            let expected = match last {
                Phase::Typing => Phase::Pausing,
                Phase::Pausing => Phase::Deleting,
                Phase::Deleting => Phase::Typing,
            };
            assert_eq!(phase, expected);
        }

        // The index only moves on the Deleting -> Typing edge, with nothing shown
        if t.rotator().current_index() != index_before {
            assert_eq!(last, Phase::Deleting);
            assert_eq!(phase, Phase::Typing);
            assert_eq!(t.rotator().display_text(), "");
        }
        last = phase;
    }
}

// ============================================================================
// Cycles
// ============================================================================

#[test]
fn test_first_role_cycle_advances_index() {
    let roles = ["Backend Engineer", "Software Engineer", "DevOps Engineer"];
    let mut t = timeline(&roles);

    let cycle = timing().cycle_duration(roles[0].chars().count());
    t.advance(cycle);

    assert_eq!(t.rotator().current_index(), 1 % roles.len());
    assert_eq!(t.rotator().display_text(), "");
    assert_eq!(t.rotator().phase(), Phase::Typing);
}

#[test]
fn test_single_role_hi() {
    let mut t = timeline(&["Hi"]);

    t.step_n(2);
    assert_eq!(t.rotator().display_text(), "Hi");

    // Pause tick, then the dwell, then two deletes
    t.step();
    assert_eq!(t.rotator().phase(), Phase::Pausing);
    t.step();
    t.step_n(2);
    assert_eq!(t.rotator().display_text(), "");
    assert_eq!(t.rotator().current_index(), 0);

    // Advance tick wraps to itself and retypes
    t.step();
    assert_eq!(t.rotator().current_index(), 0);
    t.step();
    assert_eq!(t.rotator().display_text(), "H");
}

#[test]
fn test_two_roles_next_sequence_grows_toward_bb() {
    let mut t = timeline(&["A", "BB"]);
    t.advance(timing().cycle_duration(1));
    assert_eq!(t.rotator().current_index(), 1);

    let mut seen = Vec::new();
    for _ in 0..2 {
        t.step();
        seen.push(t.rotator().display_text().to_string());
    }
    assert_eq!(seen, vec!["B", "BB"]);
}

#[test]
fn test_no_pause_before_retyping() {
    let mut t = timeline(&["A", "B"]);
    t.advance(timing().cycle_duration(1));
    assert_eq!(t.rotator().current_index(), 1);
    assert_eq!(t.until_next_tick(), timing().type_speed);
}

// ============================================================================
// Disposal
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_no_tick_after_disposal() {
    let rotator = Rotator::new(RoleList::new(["Software Engineer"]).unwrap(), timing());
    let handle = RotatorDriver::spawn(rotator);
    let spy = handle.tick_counter();

    tokio::time::sleep(Duration::from_millis(55)).await;
    let frame = handle.frame();
    assert_eq!(frame.text, "Softw");
    let ticks = spy.load(Ordering::SeqCst);
    assert_eq!(ticks, 5);

    handle.dispose();
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(spy.load(Ordering::SeqCst), ticks);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_empty_role_list_is_a_configuration_error() {
    assert_eq!(
        RoleList::new(Vec::<&str>::new()).unwrap_err(),
        RotatorError::EmptyRoleList
    );

    let mut config = FolioConfig::default();
    config.rotator.roles.clear();
    assert!(config.role_list().is_err());
}
