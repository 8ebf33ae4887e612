//! Centralized keybindings
//!
//! Single source of truth for shortcut-mode keys, the header legend and the
//! footer hints.

use crate::models::ViewId;
use crate::tui::registry::{VIEW_REGISTRY, view_for_shortcut};

/// Key that switches to command mode
pub const COMMAND_KEY: char = ':';
/// Key that quits the application
pub const QUIT_KEY: char = 'q';
/// Key that opens an SSH session to the selected server
pub const SSH_KEY: char = 'x';

/// What a key means in shortcut mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Activate(ViewId),
    EnterCommand,
    Ssh,
    Quit,
}

/// Resolve a shortcut-mode key
pub fn shortcut_action(key: char) -> Option<ShortcutAction> {
    match key {
        COMMAND_KEY => Some(ShortcutAction::EnterCommand),
        QUIT_KEY => Some(ShortcutAction::Quit),
        SSH_KEY => Some(ShortcutAction::Ssh),
        other => view_for_shortcut(other).map(ShortcutAction::Activate),
    }
}

/// Header legend; the SSH entry only appears when it would fire
pub fn legend(ssh_available: bool) -> String {
    let mut legend = VIEW_REGISTRY
        .iter()
        .map(|def| def.legend_entry())
        .collect::<Vec<_>>()
        .join(" ");
    legend.push_str(" (q)uit");
    if ssh_available {
        legend.push_str(" (x)ssh");
    }
    legend
}

/// Navigation command with keybinding and label
#[derive(Debug, Clone)]
pub struct NavigationCommand {
    pub key: &'static str,
    pub label: &'static str,
}

impl NavigationCommand {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Footer hints in shortcut mode
pub fn get_navigation_commands() -> Vec<NavigationCommand> {
    vec![
        NavigationCommand::new(":", "Command"),
        NavigationCommand::new("j/k", "Navigate"),
        NavigationCommand::new("Enter", "Details"),
        NavigationCommand::new("q", "Quit"),
    ]
}

/// Footer hints in command mode
pub fn get_command_mode_commands() -> Vec<NavigationCommand> {
    vec![
        NavigationCommand::new("Tab", "Complete"),
        NavigationCommand::new("Enter", "Run"),
        NavigationCommand::new("Esc", "Cancel"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_without_ssh() {
        assert_eq!(
            legend(false),
            "(a)ggregates (p)rojects (d)ns (i)mages (f)lavors (h)ypervisors \
             (l)oadbalancers (s)ervers (n)etworks (v)olumes (q)uit"
        );
    }

    #[test]
    fn test_legend_with_ssh() {
        assert!(legend(true).ends_with("(q)uit (x)ssh"));
    }

    #[test]
    fn test_shortcut_actions() {
        assert_eq!(shortcut_action(':'), Some(ShortcutAction::EnterCommand));
        assert_eq!(shortcut_action('q'), Some(ShortcutAction::Quit));
        assert_eq!(shortcut_action('x'), Some(ShortcutAction::Ssh));
        assert_eq!(
            shortcut_action('v'),
            Some(ShortcutAction::Activate(ViewId::Volumes))
        );
        assert_eq!(shortcut_action('z'), None);
        assert_eq!(shortcut_action('S'), None);
    }
}
