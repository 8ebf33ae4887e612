//! Resource detail view rendering

use crate::tui::display::DetailPane;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

/// Split `Label: value` lines so the label can be styled
fn styled_line<'a>(line: &'a str, theme: &Theme) -> Line<'a> {
    match line.split_once(": ") {
        Some((label, value)) if !label.trim().is_empty() => Line::from(vec![
            Span::styled(format!("{}: ", label), Style::default().fg(theme.text_label)),
            Span::styled(value, Style::default().fg(theme.text_value)),
        ]),
        _ => match line.strip_suffix(':') {
            Some(section) => Line::from(Span::styled(
                format!("{}:", section),
                Style::default().fg(theme.text_label),
            )),
            None => Line::from(Span::styled(line, Style::default().fg(theme.text_value))),
        },
    }
}

/// Render the shared detail pane
pub fn render_detail(f: &mut Frame, area: Rect, detail: &DetailPane, theme: &Theme) {
    let block = crate::tui::views::helpers::create_themed_block(" Details ", theme);

    if detail.text().is_empty() {
        let message = if detail.is_loading() {
            "Loading..."
        } else {
            "Select an entry with Enter"
        };
        let paragraph = Paragraph::new(message)
            .block(block)
            .style(Style::default().fg(theme.text_secondary));
        f.render_widget(paragraph, area);
        return;
    }

    let lines: Vec<Line> = detail
        .text()
        .lines()
        .map(|line| styled_line(line, theme))
        .collect();
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
