//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - The rotator state machine never reads a clock and never sleeps
//! - Only the rotator driver owns a timer, and it holds exactly one
//! - The TUI sleeps only to pace frames
//!
//! The helpers below walk workspace sources and hand back production lines
//! (comments stripped, `#[cfg(test)]` modules cut off).

use std::fs;
use std::path::{Path, PathBuf};

/// A production source line
#[derive(Debug, Clone)]
pub struct SourceLine {
    pub path: PathBuf,
    /// 1-based
    pub number: usize,
    /// Line with any `//` comment removed
    pub code: String,
    /// Original line, trimmed, for reports
    pub raw: String,
}

impl std::fmt::Display for SourceLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} - {}", self.path.display(), self.number, self.raw)
    }
}

/// Workspace root (two levels above this package)
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

/// All `.rs` files under `dir` (relative to the workspace root)
pub fn rust_files(dir: &str) -> Vec<PathBuf> {
    let root = workspace_root().join(dir);
    assert!(root.exists(), "missing source directory: {}", root.display());

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Production lines of one file: everything before the first `#[cfg(test)]`
pub fn production_lines(path: &Path) -> Vec<SourceLine> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };
    production_lines_of(path, &content)
}

pub fn production_lines_of(path: &Path, content: &str) -> Vec<SourceLine> {
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| !line.trim_start().starts_with("#[cfg(test)]"))
        .map(|(idx, line)| SourceLine {
            path: path.to_path_buf(),
            number: idx + 1,
            code: line.split("//").next().unwrap_or(line).to_string(),
            raw: line.trim().to_string(),
        })
        .collect()
}

/// Does this code call a sleep?
pub fn is_sleep_call(code: &str) -> bool {
    code.contains("::sleep(") || code.contains(".sleep(") || code.contains(" sleep(")
}

/// Does this code read a wall clock?
pub fn is_clock_read(code: &str) -> bool {
    code.contains("Instant::now(") || code.contains("SystemTime::now(")
}

/// Print a report and fail when `violations` is non-empty
pub fn fail_on_violations(title: &str, allowed: &[&str], violations: &[SourceLine]) {
    if violations.is_empty() {
        return;
    }

    eprintln!("\n❌ {}\n", title);
    for violation in violations {
        eprintln!("  ❌ {}", violation);
    }
    if !allowed.is_empty() {
        eprintln!("\n✅ ACCEPTABLE:");
        for rule in allowed {
            eprintln!("  - {}", rule);
        }
    }

    panic!("\nFound {} violation(s).\nFix these before merging!", violations.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_modules_are_cut_off() {
        let code = "fn a() {}\n// tokio::time::sleep(x)\n#[cfg(test)]\nmod tests {\n    sleep(x);\n}\n";
        let lines = production_lines_of(Path::new("x.rs"), code);
        assert_eq!(lines.len(), 2);
        assert!(!lines.iter().any(|l| is_sleep_call(&l.code)));
    }

    #[test]
    fn test_detectors() {
        assert!(is_sleep_call("    tokio::time::sleep(delay).await;"));
        assert!(is_sleep_call("    std::thread::sleep(d);"));
        assert!(!is_sleep_call("    let asleep = true;"));
        assert!(is_clock_read("let now = Instant::now();"));
        assert!(is_clock_read("SystemTime::now()"));
        assert!(!is_clock_read("started: Instant,"));
    }

    #[test]
    fn test_workspace_root_has_manifest() {
        assert!(workspace_root().join("Cargo.toml").exists());
    }
}
