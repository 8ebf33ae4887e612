//! View registry
//!
//! A fixed catalog with one entry per view: its single-key shortcut and the
//! order it appears in the header legend. Every `ViewId` has exactly one
//! entry; the table never changes at runtime.

use crate::models::ViewId;

/// Registration of one view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewDefinition {
    pub view: ViewId,
    /// Shortcut key, always the first letter of the command name
    pub shortcut: char,
}

impl ViewDefinition {
    /// Legend entry such as `(a)ggregates`
    pub fn legend_entry(&self) -> String {
        let name = self.view.as_str();
        let rest = name.get(self.shortcut.len_utf8()..).unwrap_or_default();
        format!("({}){}", self.shortcut, rest)
    }
}

/// All views, in header legend order
pub const VIEW_REGISTRY: &[ViewDefinition] = &[
    ViewDefinition {
        view: ViewId::Aggregates,
        shortcut: 'a',
    },
    ViewDefinition {
        view: ViewId::Projects,
        shortcut: 'p',
    },
    ViewDefinition {
        view: ViewId::Dns,
        shortcut: 'd',
    },
    ViewDefinition {
        view: ViewId::Images,
        shortcut: 'i',
    },
    ViewDefinition {
        view: ViewId::Flavors,
        shortcut: 'f',
    },
    ViewDefinition {
        view: ViewId::Hypervisors,
        shortcut: 'h',
    },
    ViewDefinition {
        view: ViewId::LoadBalancers,
        shortcut: 'l',
    },
    ViewDefinition {
        view: ViewId::Servers,
        shortcut: 's',
    },
    ViewDefinition {
        view: ViewId::Networks,
        shortcut: 'n',
    },
    ViewDefinition {
        view: ViewId::Volumes,
        shortcut: 'v',
    },
];

/// Look up the view bound to a shortcut key
pub fn view_for_shortcut(key: char) -> Option<ViewId> {
    VIEW_REGISTRY
        .iter()
        .find(|def| def.shortcut == key)
        .map(|def| def.view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_view_registered_exactly_once() {
        let registered: Vec<ViewId> = VIEW_REGISTRY.iter().map(|d| d.view).collect();
        let unique: HashSet<_> = registered.iter().collect();
        assert_eq!(registered.len(), ViewId::all().len());
        assert_eq!(unique.len(), registered.len());
        for view in ViewId::all() {
            assert!(registered.contains(view), "{} is not registered", view);
        }
    }

    #[test]
    fn test_shortcut_is_first_letter_of_command() {
        for def in VIEW_REGISTRY {
            assert!(def.view.as_str().starts_with(def.shortcut));
        }
    }

    #[test]
    fn test_legend_entry() {
        assert_eq!(VIEW_REGISTRY[0].legend_entry(), "(a)ggregates");
        assert_eq!(VIEW_REGISTRY[6].legend_entry(), "(l)oadbalancers");
    }

    #[test]
    fn test_view_for_shortcut() {
        assert_eq!(view_for_shortcut('s'), Some(ViewId::Servers));
        assert_eq!(view_for_shortcut('d'), Some(ViewId::Dns));
        assert_eq!(view_for_shortcut('x'), None);
        assert_eq!(view_for_shortcut('q'), None);
    }
}
