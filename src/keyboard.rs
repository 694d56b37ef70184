// ABOUTME: Keyboard shortcut mapping for the deck-slides library
// ABOUTME: Translates key names into navigation actions with config overrides

use crate::errors::{DeckError, Result};
use std::collections::HashMap;

/// Navigation action a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Next,
    Prev,
    First,
    Last,
    Pause,
    Fullscreen,
    Overview,
    Escape,
}

impl Action {
    pub fn from_name(name: &str) -> Result<Action> {
        match name {
            "next" => Ok(Action::Next),
            "prev" => Ok(Action::Prev),
            "first" => Ok(Action::First),
            "last" => Ok(Action::Last),
            "pause" => Ok(Action::Pause),
            "fullscreen" => Ok(Action::Fullscreen),
            "overview" => Ok(Action::Overview),
            "escape" => Ok(Action::Escape),
            other => Err(DeckError::ConfigError(format!(
                "Unknown keyboard action: {}",
                other
            ))),
        }
    }
}

const DEFAULT_BINDINGS: &[(&str, Action)] = &[
    ("ArrowRight", Action::Next),
    ("ArrowDown", Action::Next),
    ("ArrowLeft", Action::Prev),
    ("ArrowUp", Action::Prev),
    ("Space", Action::Next),
    ("PageDown", Action::Next),
    ("PageUp", Action::Prev),
    ("Home", Action::First),
    ("End", Action::Last),
    ("f", Action::Fullscreen),
    ("F", Action::Fullscreen),
    ("o", Action::Overview),
    ("O", Action::Overview),
    ("p", Action::Pause),
    ("P", Action::Pause),
    ("Escape", Action::Escape),
];

/// Pure key-name to action mapping; input capture belongs to the host.
#[derive(Debug, Clone)]
pub struct KeyboardMap {
    bindings: HashMap<String, Action>,
}

impl Default for KeyboardMap {
    fn default() -> Self {
        let bindings = DEFAULT_BINDINGS
            .iter()
            .map(|(key, action)| ((*key).to_string(), *action))
            .collect();
        Self { bindings }
    }
}

impl KeyboardMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the default map with user overrides applied on top. An unknown
    /// action name in the overrides is a configuration error.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Result<Self> {
        let mut map = Self::default();
        for (key, action_name) in overrides {
            let action = Action::from_name(action_name)?;
            map.bindings.insert(key.clone(), action);
        }
        Ok(map)
    }

    pub fn resolve(&self, key: &str) -> Option<Action> {
        self.bindings.get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings_cover_the_navigation_keys() {
        let map = KeyboardMap::new();
        assert_eq!(map.resolve("ArrowRight"), Some(Action::Next));
        assert_eq!(map.resolve("PageUp"), Some(Action::Prev));
        assert_eq!(map.resolve("Home"), Some(Action::First));
        assert_eq!(map.resolve("End"), Some(Action::Last));
        assert_eq!(map.resolve("x"), None);
    }

    #[test]
    fn overrides_replace_and_extend_defaults() {
        let mut overrides = HashMap::new();
        overrides.insert("j".to_string(), "next".to_string());
        overrides.insert("Space".to_string(), "pause".to_string());

        let map = KeyboardMap::with_overrides(&overrides).unwrap();
        assert_eq!(map.resolve("j"), Some(Action::Next));
        assert_eq!(map.resolve("Space"), Some(Action::Pause));
        assert_eq!(map.resolve("ArrowRight"), Some(Action::Next));
    }

    #[test]
    fn unknown_action_names_are_config_errors() {
        let mut overrides = HashMap::new();
        overrides.insert("j".to_string(), "teleport".to_string());
        assert!(KeyboardMap::with_overrides(&overrides).unwrap_err().is_config());
    }
}
