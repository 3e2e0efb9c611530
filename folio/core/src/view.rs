//! Page View State
//!
//! Local UI state for the interactive sections: which experience entries are
//! expanded, which project is selected, and whether the video preview is
//! open. None of it is shared between sections or persisted.

use crate::content::{Portfolio, Project};

/// Section receiving list navigation keys
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Projects,
    Experience,
}

impl Focus {
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Projects => Self::Experience,
            Self::Experience => Self::Projects,
        }
    }
}

/// Move `index` by one in a list of `len`, wrapping at both ends
fn wrap_step(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

// ============================================================================
// Experience accordion
// ============================================================================

/// Expanded/collapsed flag per experience entry; the first is open by default
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExperienceAccordion {
    expanded: Vec<bool>,
    selected: usize,
}

impl ExperienceAccordion {
    pub fn new(entries: usize) -> Self {
        Self {
            expanded: (0..entries).map(|i| i == 0).collect(),
            selected: 0,
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.get(index).copied().unwrap_or(false)
    }

    /// Flip one entry; out-of-range indices are ignored
    pub fn toggle(&mut self, index: usize) {
        if let Some(flag) = self.expanded.get_mut(index) {
            *flag = !*flag;
        }
    }

    pub fn toggle_selected(&mut self) {
        self.toggle(self.selected);
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn next(&mut self) {
        self.selected = wrap_step(self.selected, self.expanded.len(), true);
    }

    pub fn previous(&mut self) {
        self.selected = wrap_step(self.selected, self.expanded.len(), false);
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

// ============================================================================
// Project gallery
// ============================================================================

/// Selected project and the video preview modal
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectGallery {
    len: usize,
    selected: usize,
    preview: Option<usize>,
}

impl ProjectGallery {
    pub fn new(projects: usize) -> Self {
        Self {
            len: projects,
            selected: 0,
            preview: None,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn next(&mut self) {
        self.selected = wrap_step(self.selected, self.len, true);
    }

    pub fn previous(&mut self) {
        self.selected = wrap_step(self.selected, self.len, false);
    }

    /// Open the preview for the selected project. Projects without a video
    /// have nothing to preview; returns whether the modal opened.
    pub fn open_preview(&mut self, projects: &[Project]) -> bool {
        match projects.get(self.selected) {
            Some(project) if project.has_video() => {
                self.preview = Some(self.selected);
                true
            }
            _ => false,
        }
    }

    pub fn close_preview(&mut self) {
        self.preview = None;
    }

    pub fn is_preview_open(&self) -> bool {
        self.preview.is_some()
    }

    /// The project shown in the open modal
    pub fn preview<'a>(&self, projects: &'a [Project]) -> Option<&'a Project> {
        projects.get(self.preview?)
    }
}

// ============================================================================
// Page
// ============================================================================

/// All interactive state of the page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageState {
    pub focus: Focus,
    pub experience: ExperienceAccordion,
    pub projects: ProjectGallery,
}

impl PageState {
    pub fn for_portfolio(portfolio: &Portfolio) -> Self {
        Self {
            focus: Focus::default(),
            experience: ExperienceAccordion::new(portfolio.experience.len()),
            projects: ProjectGallery::new(portfolio.projects.len()),
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn select_next(&mut self) {
        match self.focus {
            Focus::Projects => self.projects.next(),
            Focus::Experience => self.experience.next(),
        }
    }

    pub fn select_previous(&mut self) {
        match self.focus {
            Focus::Projects => self.projects.previous(),
            Focus::Experience => self.experience.previous(),
        }
    }

    /// Enter on the focused section: expand/collapse an experience entry or
    /// open the selected project's preview
    pub fn activate(&mut self, portfolio: &Portfolio) {
        match self.focus {
            Focus::Projects => {
                if !self.projects.open_preview(&portfolio.projects) {
                    tracing::debug!(
                        project = self.projects.selected(),
                        "selected project has no video"
                    );
                }
            }
            Focus::Experience => self.experience.toggle_selected(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_entry_open_by_default() {
        let accordion = ExperienceAccordion::new(3);
        assert!(accordion.is_expanded(0));
        assert!(!accordion.is_expanded(1));
        assert!(!accordion.is_expanded(2));
        assert!(!accordion.is_expanded(7));
    }

    #[test]
    fn test_toggle_entries_independently() {
        let mut accordion = ExperienceAccordion::new(3);
        accordion.toggle(0);
        accordion.toggle(2);
        assert!(!accordion.is_expanded(0));
        assert!(accordion.is_expanded(2));
        accordion.toggle(9);
        assert_eq!(accordion.len(), 3);
    }

    #[test]
    fn test_selection_wraps() {
        let mut accordion = ExperienceAccordion::new(3);
        accordion.previous();
        assert_eq!(accordion.selected(), 2);
        accordion.next();
        assert_eq!(accordion.selected(), 0);
        accordion.next();
        accordion.toggle_selected();
        assert!(accordion.is_expanded(1));
    }

    #[test]
    fn test_empty_lists_do_not_panic() {
        let mut accordion = ExperienceAccordion::new(0);
        accordion.next();
        accordion.previous();
        accordion.toggle_selected();
        assert!(accordion.is_empty());

        let mut gallery = ProjectGallery::new(0);
        gallery.next();
        assert!(!gallery.open_preview(&[]));
    }

    #[test]
    fn test_preview_requires_video() {
        let mut portfolio = Portfolio::builtin().unwrap();
        portfolio.projects[1].video = None;

        let mut page = PageState::for_portfolio(&portfolio);
        page.activate(&portfolio);
        assert!(page.projects.is_preview_open());
        assert_eq!(
            page.projects.preview(&portfolio.projects).map(|p| p.title.as_str()),
            Some("Mindly")
        );

        page.projects.close_preview();
        page.select_next();
        page.activate(&portfolio);
        assert!(!page.projects.is_preview_open());
    }

    #[test]
    fn test_focus_routes_navigation() {
        let portfolio = Portfolio::builtin().unwrap();
        let mut page = PageState::for_portfolio(&portfolio);

        page.cycle_focus();
        assert_eq!(page.focus, Focus::Experience);
        page.select_next();
        page.activate(&portfolio);
        assert!(page.experience.is_expanded(1));
        assert_eq!(page.projects.selected(), 0);
    }
}
