//! RoleRotator Widget
//!
//! Renders the rotator's current text followed by the blinking caret. The
//! text comes from the latest [`RotatorFrame`]; the caret is sampled from
//! elapsed time on its own, so the two animations never share a clock.

use std::time::Duration;

use folio_core::{Caret, RotatorFrame};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

pub struct RoleRotator<'a> {
    frame: &'a RotatorFrame,
    caret: Caret,
    /// Time since the caret started blinking
    elapsed: Duration,
    text_style: Style,
    caret_style: Style,
}

impl<'a> RoleRotator<'a> {
    pub fn new(frame: &'a RotatorFrame, caret: Caret, elapsed: Duration) -> Self {
        Self {
            frame,
            caret,
            elapsed,
            text_style: Style::default(),
            caret_style: Style::default(),
        }
    }

    pub fn text_style(mut self, style: Style) -> Self {
        self.text_style = style;
        self
    }

    pub fn caret_style(mut self, style: Style) -> Self {
        self.caret_style = style;
        self
    }

    /// The rendered value: typed text, one cell of gap, caret glyph
    pub fn line(&self) -> Line<'a> {
        Line::from(vec![
            Span::styled(self.frame.text.as_str(), self.text_style),
            Span::raw(" "),
            Span::styled(self.caret.glyph_at(self.elapsed), self.caret_style),
        ])
    }
}

impl Widget for RoleRotator<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = self.line();
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
