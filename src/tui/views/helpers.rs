//! Common helper functions for view rendering
//!
//! This module provides reusable functions to reduce duplication across views.

use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

/// Update scroll offset so the selected index stays visible
pub fn update_scroll_offset(selected_index: usize, visible_height: usize, scroll_offset: &mut usize) {
    if visible_height == 0 {
        return;
    }
    if selected_index >= *scroll_offset + visible_height {
        *scroll_offset = selected_index + 1 - visible_height;
    }
    if selected_index < *scroll_offset {
        *scroll_offset = selected_index;
    }
}

/// Render an empty state message
///
/// Shows a consistent empty state message across all views.
pub fn render_empty_state(f: &mut Frame, area: Rect, title: &str, message: &str, theme: &Theme) {
    let paragraph = Paragraph::new(vec![Line::from(message)])
        .block(create_themed_block(title, theme))
        .style(Style::default().fg(theme.text_secondary));
    f.render_widget(paragraph, area);
}

/// Create a block with title and borders using theme
pub fn create_themed_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.text_label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_follows_selection_down_and_up() {
        let mut offset = 0;
        update_scroll_offset(4, 3, &mut offset);
        assert_eq!(offset, 2);
        update_scroll_offset(3, 3, &mut offset);
        assert_eq!(offset, 2);
        update_scroll_offset(0, 3, &mut offset);
        assert_eq!(offset, 0);
    }
}
