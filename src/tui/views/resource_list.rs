//! Resource list view rendering

use crate::models::ViewId;
use crate::tui::display::ListPane;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the list pane of `view`
pub fn render_resource_list(
    f: &mut Frame,
    area: Rect,
    view: ViewId,
    pane: &ListPane,
    scroll_offset: &mut usize,
    theme: &Theme,
    no_icons: bool,
) {
    let title = format!(" {} ({}) ", view.title(), pane.entries().len());

    if pane.is_empty() {
        let message = if pane.is_loading() {
            "Loading..."
        } else {
            "No resources found"
        };
        crate::tui::views::helpers::render_empty_state(f, area, &title, message, theme);
        return;
    }

    let visible_height = (area.height as usize).saturating_sub(2);
    let selected = pane.selected().unwrap_or(0);
    crate::tui::views::helpers::update_scroll_offset(selected, visible_height, scroll_offset);

    let marker = if no_icons { "> " } else { "▶ " };
    let lines: Vec<Line> = pane
        .labels()
        .into_iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, label)| {
            if idx == selected {
                Line::from(Span::styled(
                    format!("{}{}", marker, label),
                    theme.selected_style(),
                ))
            } else {
                Line::from(Span::styled(
                    format!("  {}", label),
                    Style::default().fg(theme.list_normal),
                ))
            }
        })
        .collect();

    let block = crate::tui::views::helpers::create_themed_block(&title, theme);
    f.render_widget(Paragraph::new(lines).block(block), area);
}
