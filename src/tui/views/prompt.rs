//! Command prompt rendering

use crate::tui::display::PromptField;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the command input with its autocomplete suggestions
pub fn render_prompt(f: &mut Frame, area: Rect, prompt: &PromptField, theme: &Theme) {
    let mut spans = vec![
        Span::styled(
            ":",
            Style::default()
                .fg(theme.command_prompt)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(prompt.text().to_string()),
        Span::raw("_"),
    ];

    let suggestions = prompt.suggestions();
    if !suggestions.is_empty() {
        spans.push(Span::raw("  ["));
        spans.push(Span::styled(
            suggestions.join(" "),
            Style::default().fg(theme.command_autocomplete),
        ));
        spans.push(Span::raw("]"));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.command_prompt)),
    );
    f.render_widget(paragraph, area);
}
