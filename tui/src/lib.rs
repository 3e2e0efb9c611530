//! Folio TUI - Terminal portfolio
//!
//! A full-screen rendition of a personal portfolio page: hero with a
//! typewriter role rotator, projects with video previews, skills, an
//! experience accordion and contact links.
//!
//! # Architecture
//!
//! - **Compositor**: Layered rendering with z-ordering for the preview modal
//! - **Sections**: Portfolio content to wrapped, styled page lines
//! - **Widgets**: Scrollable page view and the rotator line
//! - **Theme**: Dark and light palettes

pub mod app;
pub mod compositor;
pub mod sections;
pub mod theme;
pub mod widgets;

pub use app::App;
