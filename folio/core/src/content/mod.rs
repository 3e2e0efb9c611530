//! Portfolio Content
//!
//! The data behind every page section: profile/hero, projects, skills,
//! experience, contact. A default document is compiled in; a TOML file with
//! the same shape replaces it wholesale.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Content shipped with the binary
const DEFAULT_PORTFOLIO: &str = include_str!("default_portfolio.toml");

/// Query string appended to Loom embed urls
const LOOM_EMBED_PARAMS: &str = "hide_owner=true&hide_share=true&hide_title=true&hide_embed_params=true";

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read content file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid portfolio content: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A labelled outbound link
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// Hero section data
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub headline: String,
    pub bio: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub timezone: String,
    /// Short "currently doing" line
    #[serde(default)]
    pub status: String,
    /// Shows the "Available for work" badge
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub resume: Option<String>,
    #[serde(default)]
    pub socials: Vec<Link>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub demo: Option<String>,
    /// Loom share url for the preview modal
    #[serde(default)]
    pub video: Option<String>,
}

impl Project {
    pub fn has_video(&self) -> bool {
        self.video.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// Embeddable player url for the project's video
    ///
    /// `https://www.loom.com/share/<id>` becomes
    /// `https://www.loom.com/embed/<id>?hide_owner=true&...`.
    pub fn video_embed_url(&self) -> Option<String> {
        let video = self.video.as_deref().filter(|v| !v.is_empty())?;
        let id = video.trim_end_matches('/').rsplit('/').next()?;
        Some(format!(
            "https://www.loom.com/embed/{}?{}",
            id, LOOM_EMBED_PARAMS
        ))
    }
}

/// One entry of the experience accordion
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub location: String,
    pub period: String,
    #[serde(default)]
    pub points: Vec<String>,
    #[serde(default)]
    pub tech: Vec<String>,
    /// Marks the ongoing position
    #[serde(default)]
    pub current: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub heading: String,
    pub blurb: String,
    pub email: String,
    /// Booking page for the "Schedule a Call" action
    #[serde(default)]
    pub schedule: Option<String>,
}

impl Contact {
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }
}

/// Everything rendered on the page
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    pub profile: Profile,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    pub contact: Contact,
}

impl Portfolio {
    /// Parse a portfolio document
    pub fn from_toml(raw: &str) -> Result<Self, ContentError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let raw = fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    /// The compiled-in document
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_toml(DEFAULT_PORTFOLIO)
    }

    /// Content from `path` when given, otherwise the compiled-in document
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, ContentError> {
        match path {
            Some(path) => {
                tracing::info!("loading portfolio content from {}", path.display());
                Self::load(path)
            }
            None => Self::builtin(),
        }
    }
}
