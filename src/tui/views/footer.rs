//! Footer view rendering

use crate::tui::app::InputMode;
use crate::tui::display::Notice;
use crate::tui::keybindings::{
    NavigationCommand, get_command_mode_commands, get_navigation_commands,
};
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

fn hint_spans(commands: &[NavigationCommand], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (idx, cmd) in commands.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::styled(cmd.key, Style::default().fg(theme.footer_key)));
        spans.push(Span::styled(
            format!(" {}", cmd.label),
            Style::default().fg(theme.footer_text),
        ));
    }
    spans
}

/// Render the footer: a pending notice wins over the key hints
pub fn render_footer(
    f: &mut Frame,
    area: Rect,
    mode: InputMode,
    notice: Option<&Notice>,
    theme: &Theme,
) {
    let line = match notice {
        Some(notice) => Line::from(Span::styled(
            notice.text.clone(),
            theme.notice_style(notice.is_error),
        )),
        None => {
            let commands = match mode {
                InputMode::Shortcut => get_navigation_commands(),
                InputMode::Command => get_command_mode_commands(),
            };
            Line::from(hint_spans(&commands, theme))
        }
    };
    f.render_widget(Paragraph::new(line), area);
}
