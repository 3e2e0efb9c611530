//! Main Application
//!
//! The App struct manages the TUI lifecycle:
//! - Event loop (keyboard, mouse, resize)
//! - The rotator driver, whose frames arrive over a watch channel
//! - Page state (focus, accordion, gallery) and the persisted theme
//! - Layered rendering through the compositor
//!
//! # Layers
//!
//! ```text
//! z=100  modal   video preview, opaque, hidden unless open
//! z=10   status  key hints and theme, bottom row
//! z=0    page    the scrolling portfolio
//! ```

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use folio_core::view::Focus;
use folio_core::{
    Caret, FolioConfig, PageState, Portfolio, Rotator, RotatorDriver, RotatorFrame,
    RotatorHandle, ThemePreference, ThemeState,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::widgets::StatefulWidget;
use ratatui::Terminal;
use tokio::sync::watch;
use unicode_width::UnicodeWidthStr;

use crate::compositor::{Compositor, LayerId};
use crate::sections::{self, PageContext};
use crate::theme::Palette;
use crate::widgets::{PageView, PageViewState, RoleRotator};

/// Status bar height (lines)
const STATUS_HEIGHT: u16 = 1;

/// Blank columns either side of the page
const PAGE_MARGIN: u16 = 2;

/// Redraw interval while idle; keeps the caret blinking
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Lines per mouse wheel notch
const WHEEL_STEP: i32 = 3;

const MODAL_MAX_WIDTH: u16 = 90;
const MODAL_MAX_HEIGHT: u16 = 14;

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    portfolio: Portfolio,
    page: PageState,
    theme: ThemeState,

    // === Rotator ===
    /// Running driver; `None` once disposed
    rotator: Option<RotatorHandle>,
    /// Frame updates from the driver
    frames: watch::Receiver<RotatorFrame>,
    /// False once the driver has gone away
    frames_open: bool,
    /// Last frame received
    frame: RotatorFrame,
    caret: Caret,

    // === UI Components ===
    /// The layered compositor
    compositor: Compositor,
    /// Layer assignments
    layers: AppLayers,
    page_view: PageViewState,
    /// Bring the keyboard selection on screen at the next render
    follow_focus: bool,
    /// Scroll the contact section to the top at the next render
    jump_to_contact: bool,

    // === Misc State ===
    /// Caret clock origin
    started: Instant,
    /// Terminal size
    size: (u16, u16),
}

/// Layer IDs for UI regions
struct AppLayers {
    page: LayerId,
    status: LayerId,
    modal: LayerId,
}

impl App {
    /// Create a new App and start the rotator. Must be called from within a
    /// tokio runtime.
    pub fn new(config: &FolioConfig, portfolio: Portfolio, size: (u16, u16)) -> anyhow::Result<Self> {
        let rotator = Rotator::new(config.role_list()?, config.timing()?);
        let handle = RotatorDriver::spawn(rotator);
        let mut frames = handle.subscribe();
        let frame = frames.borrow_and_update().clone();

        let area = Rect::new(0, 0, size.0, size.1);
        let mut compositor = Compositor::new(area);

        let page = compositor.create_layer(page_bounds(area), 0);
        let status = compositor.create_layer(status_bounds(area), 10);
        let modal = compositor.create_layer(modal_bounds(area), 100);
        compositor.set_opaque(page, true);
        compositor.set_opaque(status, true);
        compositor.set_opaque(modal, true);
        compositor.set_visible(modal, false);

        let theme = ThemeState::load(config.preference_store());
        tracing::info!(
            roles = config.rotator.roles.len(),
            theme = theme.current().as_str(),
            "app started"
        );

        Ok(Self {
            running: true,
            page: PageState::for_portfolio(&portfolio),
            portfolio,
            theme,
            rotator: Some(handle),
            frames,
            frames_open: true,
            frame,
            caret: config.caret(),
            compositor,
            layers: AppLayers {
                page,
                status,
                modal,
            },
            page_view: PageViewState::default(),
            follow_focus: false,
            jump_to_contact: false,
            started: Instant::now(),
            size,
        })
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        // Create async event stream for non-blocking terminal events
        let mut event_stream = EventStream::new();

        // Render initial frame immediately so user sees UI
        self.render(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(e)) => tracing::warn!("terminal event error: {}", e),
                    None => self.running = false,
                },

                // New rotator text
                changed = self.frames.changed(), if self.frames_open => {
                    if changed.is_ok() {
                        self.frame = self.frames.borrow_and_update().clone();
                    } else {
                        tracing::debug!("rotator driver stopped");
                        self.frames_open = false;
                    }
                }

                // Idle tick for the caret
                _ = tokio::time::sleep(FRAME_INTERVAL) => {}
            }

            self.render(terminal)?;
        }

        self.shutdown();
        Ok(())
    }

    /// Take the latest rotator frame without waiting; returns whether it
    /// changed
    pub fn sync_frame(&mut self) -> bool {
        match self.frames.has_changed() {
            Ok(true) => {
                self.frame = self.frames.borrow_and_update().clone();
                true
            }
            Ok(false) => false,
            Err(_) => {
                self.frames_open = false;
                false
            }
        }
    }

    /// Stop the rotator. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.rotator.take() {
            tracing::debug!(ticks = handle.tick_count(), "disposing rotator");
            handle.dispose();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme.current()
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    fn palette(&self) -> Palette {
        Palette::for_theme(self.theme.current())
    }

    // ========================================================================
    // Input
    // ========================================================================

    pub fn handle_event(&mut self, event: Event) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(w, h) => self.handle_resize(w, h),
            _ => {}
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyEvent) {
        let modal_open = self.page.projects.is_preview_open();

        match key.code {
            // Quit
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Esc if modal_open => self.page.projects.close_preview(),
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,

            KeyCode::Char('t') => {
                let theme = self.theme.toggle();
                tracing::debug!(theme = theme.as_str(), "theme toggled");
            }

            // Everything below belongs to the page, not the modal
            _ if modal_open => {}

            KeyCode::Tab => {
                self.page.cycle_focus();
                self.follow_focus = true;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.page.select_next();
                self.follow_focus = true;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.page.select_previous();
                self.follow_focus = true;
            }
            KeyCode::Enter => self.page.activate(&self.portfolio),

            // Page scrolling
            KeyCode::PageUp => {
                let page_size = self.page_view.page_size();
                self.page_view.scroll(-page_size);
            }
            KeyCode::PageDown => {
                let page_size = self.page_view.page_size();
                self.page_view.scroll(page_size);
            }
            KeyCode::Home => self.page_view.scroll_offset = 0,
            KeyCode::Char('c') => self.jump_to_contact = true,
            KeyCode::End => self.page_view.scroll(i32::MAX),

            _ => {}
        }
    }

    /// Handle mouse input
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            // The open preview locks the page
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
                if self.page.projects.is_preview_open() => {}
            MouseEventKind::ScrollUp => self.page_view.scroll(-WHEEL_STEP),
            MouseEventKind::ScrollDown => self.page_view.scroll(WHEEL_STEP),
            // Clicking the backdrop closes the preview
            MouseEventKind::Down(MouseButton::Left) if self.page.projects.is_preview_open() => {
                self.sync_modal();
                if self.compositor.layer_at(mouse.column, mouse.row) != Some(self.layers.modal) {
                    self.page.projects.close_preview();
                }
            }
            _ => {}
        }
    }

    /// Handle terminal resize
    fn handle_resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        let area = Rect::new(0, 0, width, height);

        self.compositor.resize(area);
        for (id, bounds) in [
            (self.layers.page, page_bounds(area)),
            (self.layers.status, status_bounds(area)),
            (self.layers.modal, modal_bounds(area)),
        ] {
            self.compositor.move_layer(id, bounds.x, bounds.y);
            self.compositor.resize_layer(id, bounds.width, bounds.height);
        }
        self.follow_focus = true;
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    fn render(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
        terminal.draw(|frame| {
            let output = self.compose();
            let area = frame.area();
            let buf = frame.buffer_mut();

            for y in 0..area.height.min(output.area.height) {
                for x in 0..area.width.min(output.area.width) {
                    let idx = output.index_of(x, y);
                    if idx < output.content.len() {
                        buf[(x, y)] = output.content[idx].clone();
                    }
                }
            }
        })?;

        Ok(())
    }

    /// Render every layer and composite them
    pub fn compose(&mut self) -> &Buffer {
        self.sync_modal();
        self.render_page();
        self.render_status();
        self.render_modal();
        self.compositor.composite()
    }

    fn sync_modal(&mut self) {
        self.compositor
            .set_visible(self.layers.modal, self.page.projects.is_preview_open());
    }

    /// Render page layer
    fn render_page(&mut self) {
        let palette = self.palette();
        let width = self.size.0.saturating_sub(PAGE_MARGIN * 2);
        let height = self.size.1.saturating_sub(STATUS_HEIGHT);

        let rotator = RoleRotator::new(&self.frame, self.caret, self.started.elapsed())
            .text_style(palette.primary().add_modifier(Modifier::BOLD))
            .caret_style(palette.primary());

        let built = sections::build_page(PageContext {
            portfolio: &self.portfolio,
            page: &self.page,
            palette,
            rotator: rotator.line(),
            width: width as usize,
        });

        self.page_view.total_lines = built.lines.len();
        self.page_view.viewport = height as usize;
        if self.follow_focus {
            if let Some(line) = built.focus_line {
                self.page_view.ensure_visible(line);
            }
            self.follow_focus = false;
        }
        if self.jump_to_contact {
            self.page_view.scroll_to(built.contact_line);
            self.jump_to_contact = false;
        }

        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.page) {
            let layer_area = buf.area;
            buf.reset();
            buf.set_style(layer_area, palette.base());

            let view_area = Rect::new(PAGE_MARGIN, 0, width, layer_area.height);
            PageView::new(&built.lines)
                .style(palette.base())
                .render(view_area, buf, &mut self.page_view);
        }
    }

    /// Render status bar layer
    fn render_status(&mut self) {
        let palette = self.palette();
        let theme = self.theme.current();

        let hints = if self.page.projects.is_preview_open() {
            " Esc close  t theme  q quit".to_string()
        } else {
            let focus = match self.page.focus {
                Focus::Projects => "projects",
                Focus::Experience => "experience",
            };
            format!(" Tab {}  ↑↓ select  Enter open  t theme  q quit", focus)
        };
        let badge = format!("{} ", theme.as_str());

        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.status) {
            let area = buf.area;
            buf.reset();
            buf.set_style(area, palette.selected().remove_modifier(Modifier::BOLD));

            buf.set_stringn(0, 0, &hints, area.width as usize, palette.muted());
            let badge_x = area.width.saturating_sub(badge.width() as u16);
            if badge_x as usize > hints.width() {
                buf.set_string(badge_x, 0, &badge, palette.primary());
            }
        }
    }

    /// Render the video preview layer, when open
    fn render_modal(&mut self) {
        let palette = self.palette();
        let Some(project) = self.page.projects.preview(&self.portfolio.projects) else {
            return;
        };

        if let Some(buf) = self.compositor.layer_buffer_mut(self.layers.modal) {
            let area = buf.area;
            buf.reset();
            sections::render_preview(buf, area, project, palette);
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ============================================================================
// Layout
// ============================================================================

fn page_bounds(area: Rect) -> Rect {
    Rect::new(0, 0, area.width, area.height.saturating_sub(STATUS_HEIGHT))
}

fn status_bounds(area: Rect) -> Rect {
    Rect::new(0, area.height.saturating_sub(STATUS_HEIGHT), area.width, STATUS_HEIGHT)
}

/// Centered box, clamped to leave a border of page visible
fn modal_bounds(area: Rect) -> Rect {
    let width = area.width.saturating_sub(4).min(MODAL_MAX_WIDTH);
    let height = area.height.saturating_sub(2).min(MODAL_MAX_HEIGHT);
    Rect::new(
        (area.width - width) / 2,
        (area.height - height) / 2,
        width,
        height,
    )
}
