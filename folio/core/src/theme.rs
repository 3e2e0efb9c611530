//! Theme Preference
//!
//! The only state folio persists: whether the page is shown dark or light.
//! It is read once at startup, flipped by a single toggle action, and written
//! back on every toggle under the fixed key `theme`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the preference document inside the folio config dir
pub const PREFERENCES_FILE: &str = "preferences.toml";

/// Dark or light page theme
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
}

impl ThemePreference {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

/// Errors reading or writing the preference
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("failed to access preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preference file {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Get/set persistence for the theme flag
pub trait PreferenceStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet
    fn load_theme(&self) -> Result<Option<ThemePreference>, PreferenceError>;

    fn save_theme(&self, theme: ThemePreference) -> Result<(), PreferenceError>;
}

// ============================================================================
// File store
// ============================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferenceDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<ThemePreference>,
}

/// TOML-file backed store
#[derive(Clone, Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/folio/preferences.toml`, if the platform has a config dir
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("folio").join(PREFERENCES_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PreferenceError {
        PreferenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load_theme(&self) -> Result<Option<ThemePreference>, PreferenceError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let doc: PreferenceDocument =
            toml::from_str(&raw).map_err(|source| PreferenceError::Parse {
                path: self.path.clone(),
                source,
            })?;
        Ok(doc.theme)
    }

    fn save_theme(&self, theme: ThemePreference) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let doc = PreferenceDocument { theme: Some(theme) };
        let encoded = toml::to_string(&doc)?;
        fs::write(&self.path, encoded).map_err(|e| self.io_error(e))
    }
}

// ============================================================================
// Memory store
// ============================================================================

/// In-process store; nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    theme: Mutex<Option<ThemePreference>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(theme: ThemePreference) -> Self {
        Self {
            theme: Mutex::new(Some(theme)),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load_theme(&self) -> Result<Option<ThemePreference>, PreferenceError> {
        Ok(*self.theme.lock().unwrap_or_else(|e| e.into_inner()))
    }

    fn save_theme(&self, theme: ThemePreference) -> Result<(), PreferenceError> {
        *self.theme.lock().unwrap_or_else(|e| e.into_inner()) = Some(theme);
        Ok(())
    }
}

// ============================================================================
// Theme state
// ============================================================================

/// Current theme plus the store it is written back to
pub struct ThemeState {
    current: ThemePreference,
    store: Box<dyn PreferenceStore>,
}

impl ThemeState {
    /// Read the stored theme. Missing or unreadable preferences fall back to
    /// dark.
    pub fn load(store: Box<dyn PreferenceStore>) -> Self {
        let current = match store.load_theme() {
            Ok(Some(theme)) => theme,
            Ok(None) => ThemePreference::default(),
            Err(e) => {
                tracing::warn!("ignoring stored theme: {}", e);
                ThemePreference::default()
            }
        };
        tracing::debug!(theme = current.as_str(), "theme loaded");

        Self { current, store }
    }

    pub fn current(&self) -> ThemePreference {
        self.current
    }

    /// Flip the theme and persist it. A failed write is logged; the toggle
    /// still applies for this session.
    pub fn toggle(&mut self) -> ThemePreference {
        self.current = self.current.toggled();
        if let Err(e) = self.store.save_theme(self.current) {
            tracing::warn!("failed to persist theme: {}", e);
        }
        self.current
    }
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
