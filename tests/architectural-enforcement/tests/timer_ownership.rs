//! Integration Test: Timer Ownership
//!
//! **Policy**: The rotator is a pure state machine. It is stepped by whoever
//! owns the timer and never reads a clock or sleeps itself. Exactly one place
//! owns the timer in production: the driver's select loop, with a single
//! `sleep` call. The TUI may sleep only to pace frames.

use architectural_enforcement::{
    fail_on_violations, is_clock_read, is_sleep_call, production_lines, rust_files, SourceLine,
};

/// Headless modules that must stay clock-free
const PURE_DIRS: &[&str] = &["folio/core/src"];

/// The one file allowed to own a timer
const DRIVER_FILE: &str = "rotator/driver.rs";

#[test]
fn test_no_clock_or_sleep_in_state_machine() {
    let mut violations = Vec::new();

    for dir in PURE_DIRS {
        for path in rust_files(dir) {
            if path.ends_with(DRIVER_FILE) {
                continue;
            }
            violations.extend(
                production_lines(&path)
                    .into_iter()
                    .filter(|l| is_sleep_call(&l.code) || is_clock_read(&l.code)),
            );
        }
    }

    fail_on_violations(
        "CRITICAL: clock reads or sleeps in headless core code!",
        &[
            "tokio::time::sleep in rotator/driver.rs (the single pending timer)",
            "Test code after #[cfg(test)]",
        ],
        &violations,
    );
}

#[test]
fn test_driver_holds_single_timer() {
    let driver = rust_files("folio/core/src")
        .into_iter()
        .find(|p| p.ends_with(DRIVER_FILE))
        .expect("driver source present");

    let lines = production_lines(&driver);
    let sleeps: Vec<&SourceLine> = lines.iter().filter(|l| is_sleep_call(&l.code)).collect();
    assert_eq!(
        sleeps.len(),
        1,
        "driver must have exactly one sleep call site, found: {:?}",
        sleeps.iter().map(|l| l.to_string()).collect::<Vec<_>>()
    );

    let clock: Vec<String> = lines
        .iter()
        .filter(|l| is_clock_read(&l.code))
        .map(|l| l.to_string())
        .collect();
    assert!(clock.is_empty(), "driver reads a wall clock: {:?}", clock);
}

#[test]
fn test_tui_sleeps_only_for_frames() {
    let mut violations = Vec::new();

    for path in rust_files("tui/src") {
        let lines = production_lines(&path);
        for (idx, line) in lines.iter().enumerate() {
            if is_sleep_call(&line.code) && !is_frame_pacing(&lines, idx) {
                violations.push(line.clone());
            }
        }
    }

    fail_on_violations(
        "CRITICAL: sleep calls in the TUI outside frame pacing!",
        &["tokio::time::sleep(FRAME_INTERVAL) in the event loop"],
        &violations,
    );
}

/// Sleep on a frame interval constant
fn is_frame_pacing(lines: &[SourceLine], idx: usize) -> bool {
    let code = lines[idx].code.to_lowercase();
    code.contains("frame")
}
