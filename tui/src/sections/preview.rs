//! Video Preview Modal
//!
//! A terminal cannot play the embedded video, so the modal shows the project
//! with its embed link and the usual demo/source links.

use folio_core::content::Project;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthStr;

use crate::theme::{Palette, VIDEO_CORAL};

const CLOSE_HINT: &str = " Esc to close ";

/// Render the preview into `area` of `buf` (usually the whole modal layer)
pub fn render_preview(buf: &mut Buffer, area: Rect, project: &Project, palette: Palette) {
    if area.width < 12 || area.height < 5 {
        return;
    }

    buf.set_style(area, palette.base());
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            buf[(x, y)].set_symbol(" ");
        }
    }
    draw_border(buf, area, palette.border());

    // Title, centered on the top border
    let title = format!(" ▶ {} ", project.title);
    let title_x = area.x + area.width.saturating_sub(title.width() as u16) / 2;
    buf.set_stringn(
        title_x,
        area.y,
        &title,
        area.width.saturating_sub(2) as usize,
        Style::default().fg(VIDEO_CORAL),
    );

    let inner = Rect::new(
        area.x + 2,
        area.y + 1,
        area.width.saturating_sub(4),
        area.height.saturating_sub(2),
    );
    let width = inner.width as usize;
    let bottom = inner.y + inner.height;
    let mut y = inner.y + 1;

    for row in textwrap::wrap(&project.description, width) {
        if y >= bottom {
            return;
        }
        buf.set_stringn(inner.x, y, row, width, palette.muted());
        y += 1;
    }
    y += 1;

    let embed = project.video_embed_url();
    let links = [
        ("Video", embed.as_deref()),
        ("Demo", project.demo.as_deref()),
        ("Source", project.github.as_deref()),
    ];
    for (label, url) in links {
        let Some(url) = url else { continue };
        if y >= bottom {
            return;
        }
        buf.set_stringn(inner.x, y, format!("{:<8}", label), width, palette.muted());
        buf.set_stringn(
            inner.x + 8,
            y,
            url,
            width.saturating_sub(8),
            palette.primary(),
        );
        y += 1;
    }

    let hint_x = area.x + area.width.saturating_sub(CLOSE_HINT.width() as u16 + 2);
    buf.set_string(
        hint_x,
        area.y + area.height - 1,
        CLOSE_HINT,
        palette.muted(),
    );
}

fn draw_border(buf: &mut Buffer, area: Rect, style: Style) {
    let rule = "─".repeat(area.width.saturating_sub(2) as usize);

    buf.set_string(area.x, area.y, format!("╭{}╮", rule), style);
    for y in (area.y + 1)..(area.y + area.height.saturating_sub(1)) {
        buf.set_string(area.x, y, "│", style);
        buf.set_string(area.x + area.width.saturating_sub(1), y, "│", style);
    }
    buf.set_string(
        area.x,
        area.y + area.height.saturating_sub(1),
        format!("╰{}╯", rule),
        style,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{Portfolio, ThemePreference};

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_preview_shows_embed_link() {
        let portfolio = Portfolio::builtin().unwrap();
        let area = Rect::new(0, 0, 100, 12);
        let mut buf = Buffer::empty(area);

        render_preview(
            &mut buf,
            area,
            &portfolio.projects[0],
            Palette::for_theme(ThemePreference::Dark),
        );

        let rows: Vec<String> = (0..area.height).map(|y| row(&buf, y)).collect();
        assert!(rows[0].starts_with('╭'));
        assert!(rows[0].contains("▶ Mindly"));
        assert!(rows.iter().any(|r| r.contains("loom.com/embed/")));
        assert!(rows[11].contains("Esc to close"));
    }

    #[test]
    fn test_tiny_area_draws_nothing() {
        let portfolio = Portfolio::builtin().unwrap();
        let area = Rect::new(0, 0, 8, 3);
        let mut buf = Buffer::empty(area);
        render_preview(
            &mut buf,
            area,
            &portfolio.projects[0],
            Palette::for_theme(ThemePreference::Dark),
        );
        assert_eq!(row(&buf, 0), " ".repeat(8));
    }
}
