//! Event handling for the application
//!
//! Keyboard input is interpreted in exactly one mode at a time. In command
//! mode every key goes to the prompt; shortcut keys are never consulted.

use super::core::App;
use super::state::InputMode;
use crate::tui::commands;
use crate::tui::keybindings::{ShortcutAction, shortcut_action};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

impl App {
    /// Main keyboard event handler
    ///
    /// Returns Some(true) to quit, None for normal continuation
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<bool> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(true);
        }

        match self.mode {
            InputMode::Command => self.handle_command_key(key),
            InputMode::Shortcut => self.handle_shortcut_key(key),
        }
    }

    fn handle_shortcut_key(&mut self, key: KeyEvent) -> Option<bool> {
        match key.code {
            KeyCode::Char(c) => {
                if let Some(action) = shortcut_action(c) {
                    return self.run_shortcut(action);
                }
                match c {
                    'j' => self.move_selection(1),
                    'k' => self.move_selection(-1),
                    _ => {}
                }
                None
            }
            KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Enter => {
                self.activate_selected();
                None
            }
            _ => None,
        }
    }

    fn run_shortcut(&mut self, action: ShortcutAction) -> Option<bool> {
        match action {
            ShortcutAction::Quit => return Some(true),
            ShortcutAction::EnterCommand => {
                self.mode = InputMode::Command;
                self.display.prompt.show();
            }
            ShortcutAction::Activate(view) => self.activate_view(view),
            ShortcutAction::Ssh => self.request_ssh(),
        }
        None
    }

    fn move_selection(&mut self, delta: i32) {
        if let Some(page) = self.display.current_page_mut() {
            if delta > 0 {
                page.select_next();
            } else {
                page.select_prev();
            }
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) -> Option<bool> {
        match key.code {
            KeyCode::Esc => {
                self.display.prompt.take();
                self.leave_command_mode();
            }
            KeyCode::Tab => self.autocomplete_command(),
            KeyCode::Enter => self.execute_command(),
            KeyCode::Backspace => self.display.prompt.pop(),
            KeyCode::Char(c) => self.display.prompt.push(c),
            _ => {}
        }
        None
    }

    fn leave_command_mode(&mut self) {
        self.display.prompt.hide();
        self.mode = InputMode::Shortcut;
    }

    fn autocomplete_command(&mut self) {
        if let Some(first) = self.display.prompt.suggestions().first() {
            self.display.prompt.set_text(first);
        }
    }

    fn execute_command(&mut self) {
        let text = self.display.prompt.take();
        match commands::resolve(&text) {
            Some(view) => self.activate_view(view),
            None => tracing::debug!("Ignoring unknown command {:?}", text),
        }
        self.leave_command_mode();
    }
}
