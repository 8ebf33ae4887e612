//! Display model
//!
//! Plain state behind the ratatui widgets: one list page per registered
//! view, the shared detail pane, the command prompt, the status line and
//! the footer notice. Only the UI loop owns a `Display`; background work
//! reaches it through `UiEvent`s.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::models::ViewId;
use crate::tui::binder::ListEntry;
use crate::tui::commands;
use crate::tui::constants::NOTICE_TIMEOUT_SECS;
use crate::tui::registry::VIEW_REGISTRY;

/// List pane of one view
#[derive(Debug, Default)]
pub struct ListPane {
    entries: Vec<ListEntry>,
    selected: usize,
    loading: bool,
}

impl ListPane {
    pub fn clear(&mut self) {
        self.entries.clear();
        self.selected = 0;
    }

    /// Replace all entries at once
    pub fn replace(&mut self, entries: Vec<ListEntry>) {
        self.clear();
        self.entries = entries;
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(ListEntry::label).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the highlighted entry, `None` when the pane is empty
    pub fn selected(&self) -> Option<usize> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.selected)
        }
    }

    pub fn selected_entry(&self) -> Option<&ListEntry> {
        self.entries.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

/// Shared detail pane
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DetailPane {
    text: String,
    loading: bool,
}

impl DetailPane {
    pub fn clear(&mut self) {
        self.text.clear();
        self.loading = false;
    }

    /// Append text to the pane
    pub fn write(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

/// Command input field
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PromptField {
    visible: bool,
    text: String,
}

impl PromptField {
    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn pop(&mut self) {
        self.text.pop();
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Read and clear the accumulated text
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    /// Autocomplete suggestions for the current text
    pub fn suggestions(&self) -> Vec<&'static str> {
        commands::autocomplete(&self.text)
    }
}

/// Content of the status line refreshed by the ticker
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub legend: String,
    pub clock: String,
    pub project: String,
}

/// Lay out `legend` left-aligned and `clock` right-aligned within `width`
/// columns, truncating the legend when both do not fit
pub fn format_status_row(legend: &str, clock: &str, width: usize) -> String {
    let clock_len = clock.chars().count();
    let legend_room = width.saturating_sub(clock_len + 1);
    let legend: String = legend.chars().take(legend_room).collect();
    let pad = width.saturating_sub(legend.chars().count() + clock_len);
    format!("{}{}{}", legend, " ".repeat(pad), clock)
}

/// Transient footer message
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
    pub since: Instant,
}

/// The whole screen model
#[derive(Debug)]
pub struct Display {
    pages: BTreeMap<ViewId, ListPane>,
    current: Option<ViewId>,
    pub detail: DetailPane,
    pub prompt: PromptField,
    status: StatusLine,
    notice: Option<Notice>,
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

impl Display {
    /// A display with one page per registered view
    pub fn new() -> Self {
        let mut display = Self {
            pages: BTreeMap::new(),
            current: None,
            detail: DetailPane::default(),
            prompt: PromptField::default(),
            status: StatusLine::default(),
            notice: None,
        };
        for def in VIEW_REGISTRY {
            display.add_page(def.view);
        }
        display
    }

    pub fn add_page(&mut self, view: ViewId) {
        self.pages.entry(view).or_default();
    }

    /// Make `view` the visible page; unknown pages are ignored
    pub fn switch_to(&mut self, view: ViewId) {
        if self.pages.contains_key(&view) {
            self.current = Some(view);
        } else {
            tracing::warn!("No page registered for view {}", view);
        }
    }

    pub fn current(&self) -> Option<ViewId> {
        self.current
    }

    pub fn page(&self, view: ViewId) -> Option<&ListPane> {
        self.pages.get(&view)
    }

    pub fn page_mut(&mut self, view: ViewId) -> Option<&mut ListPane> {
        self.pages.get_mut(&view)
    }

    pub fn current_page(&self) -> Option<&ListPane> {
        self.current.and_then(|v| self.pages.get(&v))
    }

    pub fn current_page_mut(&mut self) -> Option<&mut ListPane> {
        let view = self.current?;
        self.pages.get_mut(&view)
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn set_status(&mut self, status: StatusLine) {
        self.status = status;
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, text: impl Into<String>, is_error: bool) {
        self.notice = Some(Notice {
            text: text.into(),
            is_error,
            since: Instant::now(),
        });
    }

    /// Drop the notice once it has been shown long enough
    pub fn expire_notice(&mut self, now: Instant) {
        let expired = self.notice.as_ref().is_some_and(|notice| {
            now.duration_since(notice.since) >= Duration::from_secs(NOTICE_TIMEOUT_SECS)
        });
        if expired {
            self.notice = None;
        }
    }
}
