//! Theme and Colors
//!
//! Two palettes, one per [`ThemePreference`]. Dark is a near-black page with
//! soft grey text; light inverts it. Accents are shared so the rotator and
//! badges read the same in both.

use folio_core::ThemePreference;
use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Shared accents
// ============================================================================

/// "Available for work" / "current" badges
pub const BADGE_GREEN: Color = Color::Rgb(74, 222, 128);

/// Play marker on projects with a video
pub const VIDEO_CORAL: Color = Color::Rgb(255, 127, 127);

// ============================================================================
// Dark palette
// ============================================================================

pub const DARK_BACKGROUND: Color = Color::Rgb(10, 10, 10);
pub const DARK_FOREGROUND: Color = Color::Rgb(237, 237, 237);
pub const DARK_MUTED: Color = Color::Rgb(140, 140, 140);
pub const DARK_BORDER: Color = Color::Rgb(60, 60, 60);
/// Rotator text and caret
pub const DARK_PRIMARY: Color = Color::Rgb(250, 250, 250);
pub const DARK_SELECTION: Color = Color::Rgb(38, 38, 38);

// ============================================================================
// Light palette
// ============================================================================

pub const LIGHT_BACKGROUND: Color = Color::Rgb(255, 255, 255);
pub const LIGHT_FOREGROUND: Color = Color::Rgb(23, 23, 23);
pub const LIGHT_MUTED: Color = Color::Rgb(115, 115, 115);
pub const LIGHT_BORDER: Color = Color::Rgb(212, 212, 212);
pub const LIGHT_PRIMARY: Color = Color::Rgb(10, 10, 10);
pub const LIGHT_SELECTION: Color = Color::Rgb(235, 235, 235);

/// Resolved colors for one theme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub primary: Color,
    pub selection: Color,
}

impl Palette {
    pub fn for_theme(theme: ThemePreference) -> Self {
        match theme {
            ThemePreference::Dark => Self {
                background: DARK_BACKGROUND,
                foreground: DARK_FOREGROUND,
                muted: DARK_MUTED,
                border: DARK_BORDER,
                primary: DARK_PRIMARY,
                selection: DARK_SELECTION,
            },
            ThemePreference::Light => Self {
                background: LIGHT_BACKGROUND,
                foreground: LIGHT_FOREGROUND,
                muted: LIGHT_MUTED,
                border: LIGHT_BORDER,
                primary: LIGHT_PRIMARY,
                selection: LIGHT_SELECTION,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.foreground)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn heading(&self) -> Style {
        self.text().add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn primary(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn badge(&self) -> Style {
        Style::default().fg(BADGE_GREEN)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.foreground)
            .bg(self.selection)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_differ() {
        let dark = Palette::for_theme(ThemePreference::Dark);
        let light = Palette::for_theme(ThemePreference::Light);
        assert_ne!(dark.background, light.background);
        assert_eq!(dark.badge(), light.badge());
    }
}
