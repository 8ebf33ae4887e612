//! Rendering logic for the application
//!
//! Header on top, the command prompt when visible, the list and detail
//! panes side by side, and a one-line footer.

use super::core::App;
use crate::tui::constants::{FOOTER_HEIGHT, HEADER_HEIGHT, LIST_PANE_PERCENT, PROMPT_HEIGHT};
use crate::tui::views::*;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

impl App {
    /// Main render entry point
    pub fn render(&mut self, f: &mut Frame) {
        let prompt_height = if self.display.prompt.is_visible() {
            PROMPT_HEIGHT
        } else {
            0
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(prompt_height),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(f.area());

        render_header(f, chunks[0], self.display.status(), &self.theme);

        if self.display.prompt.is_visible() {
            render_prompt(f, chunks[1], &self.display.prompt, &self.theme);
        }

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(LIST_PANE_PERCENT),
                Constraint::Percentage(100 - LIST_PANE_PERCENT),
            ])
            .split(chunks[2]);

        match (self.display.current(), self.display.current_page()) {
            (Some(view), Some(pane)) => render_resource_list(
                f,
                body[0],
                view,
                pane,
                &mut self.list_scroll,
                &self.theme,
                self.config.ui.no_icons,
            ),
            _ => helpers::render_empty_state(f, body[0], " Resources ", "No view selected", &self.theme),
        }

        render_detail(f, body[1], &self.display.detail, &self.theme);

        render_footer(
            f,
            chunks[3],
            self.mode,
            self.display.notice(),
            &self.theme,
        );
    }
}
