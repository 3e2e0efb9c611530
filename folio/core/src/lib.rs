//! Folio Core - Headless Portfolio Logic
//!
//! Everything in folio that has behaviour, independent of any rendering
//! surface. The terminal UI (`folio-tui`) is a thin client over this crate.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         folio-tui                            │
//! │   event loop · section rendering · compositor · palettes    │
//! └───────────────┬───────────────────────────┬──────────────────┘
//!                 │ RotatorFrame (watch)      │ PageState / Portfolio
//! ┌───────────────┴───────────────────────────┴──────────────────┐
//! │                        FOLIO CORE                            │
//! │  ┌───────────┐  ┌────────┐  ┌────────┐  ┌─────────┐  ┌──────┐ │
//! │  │  Rotator  │  │ Caret  │  │ Theme  │  │ Content │  │ View │ │
//! │  │ + Driver  │  │        │  │ Store  │  │         │  │State │ │
//! │  └───────────┘  └────────┘  └────────┘  └─────────┘  └──────┘ │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Rotator`]: the typewriter state machine (Typing, Pausing, Deleting)
//! - [`RotatorDriver`] / [`RotatorHandle`]: runs a rotator on tokio timers and
//!   cancels it on disposal
//! - [`Timeline`]: steps a rotator against a virtual clock
//! - [`Caret`]: blinking cursor, a pure function of elapsed time
//! - [`ThemeState`]: dark/light flag backed by a [`PreferenceStore`]
//! - [`FolioConfig`]: file + environment configuration
//! - [`Portfolio`]: section content
//!
//! # Quick Start
//!
//! ```ignore
//! use folio_core::{FolioConfig, Rotator, RotatorDriver};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = FolioConfig::resolve(None)?;
//!     let rotator = Rotator::new(config.role_list()?, config.timing()?);
//!
//!     let handle = RotatorDriver::spawn(rotator);
//!     let mut frames = handle.subscribe();
//!     while frames.changed().await.is_ok() {
//!         println!("{}", frames.borrow().text);
//!     }
//!     Ok(())
//! }
//! ```

pub mod caret;
pub mod config;
pub mod content;
pub mod rotator;
pub mod theme;
pub mod view;

pub use caret::Caret;
pub use config::{ConfigError, FolioConfig};
pub use content::{ContentError, Portfolio};
pub use rotator::{
    Phase, RoleList, Rotator, RotatorDriver, RotatorError, RotatorFrame, RotatorHandle,
    RotatorState, RotatorTiming, Timeline,
};
pub use theme::{PreferenceStore, ThemePreference, ThemeState};
pub use view::{Focus, PageState};
