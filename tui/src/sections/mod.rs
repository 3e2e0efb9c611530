//! Page Sections
//!
//! Turns [`Portfolio`] content plus [`PageState`] into the wrapped, styled
//! lines of the scrolling page: hero, projects, skills, experience, contact,
//! footer. Pure functions of their inputs; the app decides when to rebuild.

mod preview;

pub use preview::render_preview;

use folio_core::content::{Experience, Project};
use folio_core::view::Focus;
use folio_core::{PageState, Portfolio};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use textwrap::Options;

use crate::theme::{Palette, VIDEO_CORAL};

/// Indent for content under a list item
const ITEM_INDENT: &str = "    ";

/// Built page plus where the keyboard selection landed
pub struct PageLines<'a> {
    pub lines: Vec<Line<'a>>,
    /// Line of the selected item in the focused section
    pub focus_line: Option<usize>,
    /// Header line of the contact section
    pub contact_line: usize,
}

/// Inputs for one page build
pub struct PageContext<'a> {
    pub portfolio: &'a Portfolio,
    pub page: &'a PageState,
    pub palette: Palette,
    /// Rendered rotator (text + caret)
    pub rotator: Line<'a>,
    /// Content width in cells
    pub width: usize,
}

pub fn build_page<'a>(ctx: PageContext<'a>) -> PageLines<'a> {
    let mut builder = Builder {
        lines: Vec::new(),
        focus_line: None,
        contact_line: 0,
        width: ctx.width.max(10),
        palette: ctx.palette,
    };

    builder.hero(ctx.portfolio, ctx.rotator);
    builder.projects(&ctx.portfolio.projects, ctx.page);
    builder.skills(&ctx.portfolio.skills);
    builder.experience(&ctx.portfolio.experience, ctx.page);
    builder.contact(ctx.portfolio);

    PageLines {
        lines: builder.lines,
        focus_line: builder.focus_line,
        contact_line: builder.contact_line,
    }
}

struct Builder<'a> {
    lines: Vec<Line<'a>>,
    focus_line: Option<usize>,
    contact_line: usize,
    width: usize,
    palette: Palette,
}

impl<'a> Builder<'a> {
    fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    /// Word-wrapped paragraph, every line indented by `indent`
    fn paragraph(&mut self, text: &str, indent: &'static str, style: Style) {
        self.wrapped(text, indent, indent, style);
    }

    fn wrapped(&mut self, text: &str, first: &'static str, rest: &'static str, style: Style) {
        let options = Options::new(self.width)
            .initial_indent(first)
            .subsequent_indent(rest);
        for row in textwrap::wrap(text, options) {
            self.lines
                .push(Line::from(Span::styled(row.into_owned(), style)));
        }
    }

    fn section_header(&mut self, badge: &'static str, title: &'static str) {
        self.blank();
        self.blank();
        self.push(Line::from(vec![
            Span::styled("● ", self.palette.badge()),
            Span::styled(badge, self.palette.muted()),
            Span::raw("  "),
            Span::styled(title, self.palette.heading()),
        ]));
        self.push(Line::from(Span::styled(
            "─".repeat(self.width),
            self.palette.border(),
        )));
    }

    fn links(&mut self, links: Vec<(&'a str, &'a str)>, indent: &'static str) {
        for (label, url) in links {
            self.push(Line::from(vec![
                Span::raw(indent),
                Span::styled(format!("{:<9}", label), self.palette.muted()),
                Span::styled(url, self.palette.text().add_modifier(Modifier::UNDERLINED)),
            ]));
        }
    }

    // ------------------------------------------------------------------------

    fn hero(&mut self, portfolio: &'a Portfolio, rotator: Line<'a>) {
        let profile = &portfolio.profile;

        if profile.available {
            self.push(Line::from(Span::styled(
                "● Available for work",
                self.palette.badge(),
            )));
            self.blank();
        }

        self.push(Line::from(Span::styled(
            profile.name.as_str(),
            self.palette.heading(),
        )));
        self.push(Line::from(Span::styled(
            profile.headline.as_str(),
            self.palette.muted(),
        )));

        let mut role_line = vec![Span::styled("I'm a ", self.palette.muted())];
        role_line.extend(rotator.spans);
        self.push(Line::from(role_line));
        self.blank();

        if !profile.status.is_empty() {
            self.paragraph(&profile.status, "", self.palette.muted());
        }
        let place: Vec<&str> = [profile.location.as_str(), profile.timezone.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect();
        if !place.is_empty() {
            self.paragraph(&place.join(" • "), "", self.palette.muted());
        }
        self.blank();

        self.paragraph(&profile.bio, "", self.palette.text());
        self.blank();

        let mut links: Vec<(&'a str, &'a str)> = Vec::new();
        if let Some(resume) = &profile.resume {
            links.push(("Resume", resume.as_str()));
        }
        for social in &profile.socials {
            links.push((social.label.as_str(), social.url.as_str()));
        }
        self.links(links, "");
    }

    fn projects(&mut self, projects: &'a [Project], page: &PageState) {
        if projects.is_empty() {
            return;
        }
        self.section_header("My Projects", "Selected Work");

        let focused = page.focus == Focus::Projects;
        for (i, project) in projects.iter().enumerate() {
            self.blank();
            let selected = focused && page.projects.selected() == i;
            if selected {
                self.focus_line = Some(self.lines.len());
            }

            let title_style = if selected {
                self.palette.selected()
            } else {
                self.palette.heading()
            };
            let mut title = vec![
                Span::styled(if selected { "▸ " } else { "  " }, title_style),
                Span::styled(project.title.as_str(), title_style),
            ];
            if project.has_video() {
                title.push(Span::styled("  ▶ preview", Style::default().fg(VIDEO_CORAL)));
            }
            self.push(Line::from(title));

            self.paragraph(&project.description, ITEM_INDENT, self.palette.muted());
            if !project.tags.is_empty() {
                self.paragraph(&project.tags.join(" · "), ITEM_INDENT, self.palette.border());
            }

            let mut links = Vec::new();
            if let Some(demo) = &project.demo {
                links.push(("Demo", demo.as_str()));
            }
            if let Some(github) = &project.github {
                links.push(("Source", github.as_str()));
            }
            self.links(links, ITEM_INDENT);
        }
    }

    fn skills(&mut self, skills: &'a [String]) {
        if skills.is_empty() {
            return;
        }
        self.section_header("Technical Skills", "My Toolkit");
        self.blank();

        self.paragraph(&skills.join("  ·  "), "", self.palette.text());
    }

    fn experience(&mut self, entries: &'a [Experience], page: &PageState) {
        if entries.is_empty() {
            return;
        }
        self.section_header("Journey", "My Experience");

        let focused = page.focus == Focus::Experience;
        for (i, exp) in entries.iter().enumerate() {
            self.blank();
            let selected = focused && page.experience.selected() == i;
            let expanded = page.experience.is_expanded(i);
            if selected {
                self.focus_line = Some(self.lines.len());
            }

            let role_style = if selected {
                self.palette.selected()
            } else {
                self.palette.heading()
            };
            let mut header = vec![
                Span::styled(if expanded { "▾ " } else { "▸ " }, role_style),
                Span::styled(exp.role.as_str(), role_style),
            ];
            if exp.current {
                header.push(Span::styled("  ● current", self.palette.badge()));
            }
            self.push(Line::from(header));

            let place = if exp.location.is_empty() {
                exp.company.clone()
            } else {
                format!("{} • {}", exp.company, exp.location)
            };
            self.paragraph(&place, "  ", self.palette.muted());
            self.paragraph(&exp.period, "  ", self.palette.border());

            if expanded {
                for point in &exp.points {
                    self.wrapped(point, "    • ", "      ", self.palette.muted());
                }
                if !exp.tech.is_empty() {
                    let tech = exp.tech.join(" · ").to_uppercase();
                    self.paragraph(&tech, ITEM_INDENT, self.palette.border());
                }
            }
        }
    }

    fn contact(&mut self, portfolio: &'a Portfolio) {
        let contact = &portfolio.contact;
        self.section_header("Connect", "Get in touch");
        // Header sits above the rule
        self.contact_line = self.lines.len() - 2;
        self.blank();

        self.paragraph(&contact.heading, "", self.palette.heading());
        self.blank();
        self.paragraph(&contact.blurb, "", self.palette.muted());
        self.blank();

        self.push(Line::from(vec![
            Span::styled(format!("{:<9}", "Email"), self.palette.muted()),
            Span::styled(contact.mailto(), self.palette.primary()),
        ]));
        let mut links = Vec::new();
        if let Some(schedule) = &contact.schedule {
            links.push(("Call", schedule.as_str()));
        }
        self.links(links, "");

        self.blank();
        self.push(Line::from(Span::styled(
            "─".repeat(self.width),
            self.palette.border(),
        )));
        self.paragraph(
            &format!("© {}. Built with love and a lot of caffeine.", portfolio.profile.name),
            "",
            self.palette.border(),
        );
    }
}
