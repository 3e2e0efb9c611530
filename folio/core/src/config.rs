//! Folio Configuration
//!
//! Resolution order, later wins:
//!
//! 1. Built-in defaults
//! 2. `config.toml` (explicit path, or `<config dir>/folio/config.toml` if present)
//! 3. `FOLIO_*` environment variables
//!
//! ```toml
//! content = "/home/me/portfolio.toml"
//! preferences = "/tmp/folio-preferences.toml"
//!
//! [rotator]
//! roles = ["Backend Engineer", "Software Engineer", "DevOps Engineer"]
//! type_speed_ms = 100
//! delete_speed_ms = 50
//! pause_ms = 2000
//!
//! [caret]
//! half_period_ms = 500
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::caret::{Caret, DEFAULT_CARET_HALF_PERIOD_MS};
use crate::rotator::timing::{DEFAULT_DELETE_SPEED_MS, DEFAULT_PAUSE_MS, DEFAULT_TYPE_SPEED_MS};
use crate::rotator::{RoleList, RotatorError, RotatorTiming};
use crate::theme::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};

/// File name of the config document inside the folio config dir
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroTiming(&'static str),

    #[error(transparent)]
    Rotator(#[from] RotatorError),
}

/// `[rotator]` table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotatorConfig {
    pub roles: Vec<String>,
    pub type_speed_ms: u64,
    pub delete_speed_ms: u64,
    pub pause_ms: u64,
}

impl Default for RotatorConfig {
    fn default() -> Self {
        Self {
            roles: RoleList::default().iter().map(str::to_string).collect(),
            type_speed_ms: DEFAULT_TYPE_SPEED_MS,
            delete_speed_ms: DEFAULT_DELETE_SPEED_MS,
            pause_ms: DEFAULT_PAUSE_MS,
        }
    }
}

/// `[caret]` table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaretConfig {
    pub half_period_ms: u64,
}

impl Default for CaretConfig {
    fn default() -> Self {
        Self {
            half_period_ms: DEFAULT_CARET_HALF_PERIOD_MS,
        }
    }
}

/// Top-level configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FolioConfig {
    /// Portfolio content document; the built-in one when unset
    pub content: Option<PathBuf>,
    /// Theme preference file; the platform config dir when unset
    pub preferences: Option<PathBuf>,
    /// Keep the theme in memory only
    pub no_persist: bool,
    pub rotator: RotatorConfig,
    pub caret: CaretConfig,
}

impl FolioConfig {
    /// `<config dir>/folio/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("folio").join(CONFIG_FILE))
    }

    pub fn from_toml(raw: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw, path)
    }

    /// Full resolution: file (explicit, else default location if it exists),
    /// then process environment, then validation
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => {
                    tracing::debug!("using config file {}", path.display());
                    Self::load(&path)?
                }
                None => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `FOLIO_*` overrides from `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(roles) = lookup("FOLIO_ROLES") {
            self.rotator.roles = split_roles(&roles);
        }
        if let Some(v) = parse_ms(&lookup, "FOLIO_TYPE_SPEED_MS")? {
            self.rotator.type_speed_ms = v;
        }
        if let Some(v) = parse_ms(&lookup, "FOLIO_DELETE_SPEED_MS")? {
            self.rotator.delete_speed_ms = v;
        }
        if let Some(v) = parse_ms(&lookup, "FOLIO_PAUSE_MS")? {
            self.rotator.pause_ms = v;
        }
        if let Some(v) = parse_ms(&lookup, "FOLIO_CARET_MS")? {
            self.caret.half_period_ms = v;
        }
        if let Some(path) = lookup("FOLIO_CONTENT") {
            self.content = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("FOLIO_PREFERENCES") {
            self.preferences = Some(PathBuf::from(path));
        }
        Ok(())
    }

    /// Reject configurations the rotator cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.role_list()?;
        self.timing()?;
        if self.caret.half_period_ms == 0 {
            return Err(ConfigError::ZeroTiming("caret.half_period_ms"));
        }
        Ok(())
    }

    pub fn role_list(&self) -> Result<RoleList, ConfigError> {
        Ok(RoleList::new(self.rotator.roles.iter().cloned())?)
    }

    /// Typing and deleting delays must be non-zero; the pause may be zero
    pub fn timing(&self) -> Result<RotatorTiming, ConfigError> {
        if self.rotator.type_speed_ms == 0 {
            return Err(ConfigError::ZeroTiming("rotator.type_speed_ms"));
        }
        if self.rotator.delete_speed_ms == 0 {
            return Err(ConfigError::ZeroTiming("rotator.delete_speed_ms"));
        }
        Ok(RotatorTiming::from_millis(
            self.rotator.type_speed_ms,
            self.rotator.delete_speed_ms,
            self.rotator.pause_ms,
        ))
    }

    pub fn caret(&self) -> Caret {
        Caret::new(Duration::from_millis(self.caret.half_period_ms))
    }

    /// Where the theme flag is kept
    pub fn preference_store(&self) -> Box<dyn PreferenceStore> {
        if self.no_persist {
            return Box::new(MemoryPreferenceStore::new());
        }
        let file = match &self.preferences {
            Some(path) => Some(FilePreferenceStore::new(path)),
            None => FilePreferenceStore::default_location(),
        };
        match file {
            Some(store) => Box::new(store),
            None => {
                tracing::warn!("no config directory on this platform; theme will not persist");
                Box::new(MemoryPreferenceStore::new())
            }
        }
    }
}

/// Comma separated, trimmed; empty segments dropped
pub fn split_roles(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_ms<F>(lookup: &F, key: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { key, value }),
        None => Ok(None),
    }
}
