//! Header view rendering

use crate::tui::display::{StatusLine, format_status_row};
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status line: shortcut legend with the clock right-aligned,
/// then the active project
pub fn render_header(f: &mut Frame, area: Rect, status: &StatusLine, theme: &Theme) {
    let block = crate::tui::views::helpers::create_themed_block(" lazystack ", theme)
        .title_style(
            Style::default()
                .fg(theme.header_title)
                .add_modifier(Modifier::BOLD),
        );
    let inner_width = area.width.saturating_sub(2) as usize;

    let row = format_status_row(&status.legend, &status.clock, inner_width);
    let split = row.len().saturating_sub(status.clock.len());
    let (legend, clock) = row.split_at(split);

    let lines = vec![
        Line::from(vec![
            Span::styled(legend.to_string(), Style::default().fg(theme.header_legend)),
            Span::styled(clock.to_string(), Style::default().fg(theme.header_clock)),
        ]),
        Line::from(vec![
            Span::styled("Project: ", Style::default().fg(theme.text_label)),
            Span::styled(
                status.project.clone(),
                Style::default().fg(theme.header_project),
            ),
        ]),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}
