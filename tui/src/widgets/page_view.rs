//! PageView Widget
//!
//! A borderless, vertically scrollable list of pre-wrapped lines.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::StatefulWidget;

/// Scroll state for a page view
#[derive(Debug, Default)]
pub struct PageViewState {
    /// Scroll offset (lines from top)
    pub scroll_offset: usize,
    /// Total content lines
    pub total_lines: usize,
    /// Height of the last render area
    pub viewport: usize,
}

impl PageViewState {
    /// Scroll by delta (positive = down)
    pub fn scroll(&mut self, delta: i32) {
        let new_offset = self.scroll_offset as i64 + delta as i64;
        self.scroll_offset = (new_offset.max(0) as usize).min(self.max_scroll());
    }

    pub fn page_size(&self) -> i32 {
        (self.viewport / 2).max(1) as i32
    }

    /// Scroll the minimum amount needed to bring `line` on screen
    pub fn ensure_visible(&mut self, line: usize) {
        if self.viewport == 0 {
            return;
        }
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset + self.viewport {
            self.scroll_offset = line + 1 - self.viewport;
        }
    }

    /// Put `line` at the top of the viewport, as far as the content allows
    pub fn scroll_to(&mut self, line: usize) {
        self.scroll_offset = line.min(self.max_scroll());
    }

    fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.viewport)
    }
}

/// A borderless, scrollable page
pub struct PageView<'a> {
    lines: &'a [Line<'a>],
    style: Style,
}

impl<'a> PageView<'a> {
    pub fn new(lines: &'a [Line<'a>]) -> Self {
        Self {
            lines,
            style: Style::default(),
        }
    }

    /// Base style patched under every line
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl<'a> StatefulWidget for PageView<'a> {
    type State = PageViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        buf.set_style(area, self.style);

        state.total_lines = self.lines.len();
        state.viewport = area.height as usize;

        // Clamp scroll
        state.scroll_offset = state.scroll_offset.min(state.max_scroll());

        // Render visible lines
        for (i, line) in self
            .lines
            .iter()
            .skip(state.scroll_offset)
            .take(area.height as usize)
            .enumerate()
        {
            let y = area.y + i as u16;
            buf.set_line(area.x, y, line, area.width);
        }
    }
}
