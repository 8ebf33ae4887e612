//! Command vocabulary and autocomplete
//!
//! The vocabulary is exactly the set of view command names. Matching is
//! case-sensitive and never trims: a command is valid only when it equals a
//! view name character for character.

use crate::models::ViewId;

/// Command names in vocabulary order
pub fn vocabulary() -> Vec<&'static str> {
    ViewId::all().iter().map(ViewId::as_str).collect()
}

/// Suggestions for `text` drawn from `vocabulary`
///
/// Empty input yields nothing, and a command that already equals the input is
/// not suggested back.
pub fn autocomplete_in<'a>(text: &str, vocabulary: &[&'a str]) -> Vec<&'a str> {
    if text.is_empty() {
        return Vec::new();
    }
    vocabulary
        .iter()
        .copied()
        .filter(|cmd| *cmd != text && cmd.starts_with(text))
        .collect()
}

/// Suggestions for `text` from the view vocabulary
pub fn autocomplete(text: &str) -> Vec<&'static str> {
    autocomplete_in(text, &vocabulary())
}

/// Resolve submitted command text to a view; anything but an exact name is `None`
pub fn resolve(text: &str) -> Option<ViewId> {
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_match() {
        let vocab = ["servers", "images", "flavors", "projects"];
        assert_eq!(autocomplete_in("ser", &vocab), vec!["servers"]);
        assert_eq!(autocomplete_in("", &vocab), Vec::<&str>::new());
    }

    #[test]
    fn test_exact_command_not_suggested() {
        assert!(autocomplete("servers").is_empty());
        assert!(autocomplete("dns").is_empty());
    }

    #[test]
    fn test_case_sensitive() {
        assert!(autocomplete("Ser").is_empty());
        assert_eq!(resolve("Servers"), None);
    }

    #[test]
    fn test_single_letter_prefixes() {
        assert_eq!(autocomplete("n"), vec!["networks"]);
        assert_eq!(autocomplete("h"), vec!["hypervisors"]);
        assert_eq!(autocomplete("s"), vec!["servers"]);
    }

    #[test]
    fn test_resolve_exact_only() {
        assert_eq!(resolve("images"), Some(ViewId::Images));
        assert_eq!(resolve("loadbalancers"), Some(ViewId::LoadBalancers));
        assert_eq!(resolve("image"), None);
        assert_eq!(resolve("images "), None);
        assert_eq!(resolve(""), None);
    }

    #[test]
    fn test_vocabulary_order() {
        assert_eq!(
            vocabulary(),
            vec![
                "servers",
                "aggregates",
                "hypervisors",
                "images",
                "flavors",
                "projects",
                "volumes",
                "loadbalancers",
                "dns",
                "networks"
            ]
        );
    }
}
