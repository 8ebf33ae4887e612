//! Theme and styling definitions
//!
//! Centralizes every color the views use so widgets never hard-code styles.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    // Header colors
    pub header_title: Color,
    pub header_legend: Color,
    pub header_clock: Color,
    pub header_project: Color,

    // List colors
    pub list_selected: Color,
    pub list_selected_bg: Color,
    pub list_normal: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_label: Color,
    pub text_value: Color,

    // Command/Input colors
    pub command_prompt: Color,
    pub command_autocomplete: Color,

    // Footer colors
    pub footer_key: Color,
    pub footer_text: Color,
    pub notice_info: Color,
    pub notice_error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header_title: Color::Cyan,
            header_legend: Color::White,
            header_clock: Color::Yellow,
            header_project: Color::Green,

            list_selected: Color::Black,
            list_selected_bg: Color::Cyan,
            list_normal: Color::White,

            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_label: Color::Cyan,
            text_value: Color::White,

            command_prompt: Color::Yellow,
            command_autocomplete: Color::DarkGray,

            footer_key: Color::Yellow,
            footer_text: Color::Gray,
            notice_info: Color::Green,
            notice_error: Color::Red,
        }
    }
}

impl Theme {
    /// Style for the highlighted list row
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.list_selected)
            .bg(self.list_selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for a notice in the footer
    pub fn notice_style(&self, is_error: bool) -> Style {
        let color = if is_error {
            self.notice_error
        } else {
            self.notice_info
        };
        Style::default().fg(color)
    }
}
