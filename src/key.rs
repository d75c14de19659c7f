//! Key bindings and help text for keyboard-driven components.
//!
//! A [`Binding`] groups the key codes that trigger one action together with
//! the short help shown to the user. Components expose their bindings
//! through the [`KeyMap`] trait so a single help line can be rendered for any
//! of them.

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// Help text attached to a binding: the key label and what it does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Key label, e.g. `"←/h"`.
    pub key: String,
    /// Action description, e.g. `"prev page"`.
    pub desc: String,
}

/// A set of keys bound to one action.
///
/// # Examples
///
/// ```rust
/// use backoffice_widgets::key::Binding;
/// use crossterm::event::KeyCode;
///
/// let delete = Binding::new(vec![KeyCode::Char('x'), KeyCode::Delete])
///     .with_help("x/del", "delete");
/// assert_eq!(delete.help().desc, "delete");
/// ```
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyCode>,
    modifiers: KeyModifiers,
    help: Help,
    enabled: bool,
}

impl Binding {
    /// Creates a binding for the given key codes without modifiers.
    pub fn new(keys: Vec<KeyCode>) -> Self {
        Self {
            keys,
            modifiers: KeyModifiers::NONE,
            help: Help::default(),
            enabled: true,
        }
    }

    /// Requires the given modifiers to be held (builder pattern).
    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Sets the help text (builder pattern).
    pub fn with_help(mut self, key: &str, desc: &str) -> Self {
        self.help = Help {
            key: key.to_string(),
            desc: desc.to_string(),
        };
        self
    }

    /// Enables or disables the binding. Disabled bindings never match and
    /// are left out of help output.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns whether the binding is enabled.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the help text.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Returns the bound key codes.
    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    /// Reports whether a key message triggers this binding.
    ///
    /// Shift is ignored for character keys since the character itself
    /// already carries the case.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if !self.enabled || !self.keys.contains(&msg.key) {
            return false;
        }
        let mut held = msg.modifiers;
        if matches!(msg.key, KeyCode::Char(_)) {
            held.remove(KeyModifiers::SHIFT);
        }
        held == self.modifiers
    }
}

/// Implemented by components that publish key bindings for help output.
pub trait KeyMap {
    /// Bindings shown in the compact one-line help.
    fn short_help(&self) -> Vec<&Binding>;

    /// All bindings, grouped in columns.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

/// Renders the short help of a key map as `key desc • key desc`.
pub fn short_help_view<K: KeyMap + ?Sized>(keymap: &K) -> String {
    keymap
        .short_help()
        .into_iter()
        .filter(|b| b.enabled() && !b.help().key.is_empty())
        .map(|b| format!("{} {}", b.help().key, b.help().desc))
        .collect::<Vec<_>>()
        .join(" • ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_matches_listed_keys_only() {
        let binding = Binding::new(vec![KeyCode::Left, KeyCode::Char('h')]);
        assert!(binding.matches(&key(KeyCode::Left)));
        assert!(binding.matches(&key(KeyCode::Char('h'))));
        assert!(!binding.matches(&key(KeyCode::Right)));
    }

    #[test]
    fn test_modifiers_must_match() {
        let binding = Binding::new(vec![KeyCode::Char('u')]).with_modifiers(KeyModifiers::CONTROL);
        assert!(!binding.matches(&key(KeyCode::Char('u'))));
        assert!(binding.matches(&KeyMsg {
            key: KeyCode::Char('u'),
            modifiers: KeyModifiers::CONTROL,
        }));
    }

    #[test]
    fn test_shift_ignored_for_characters() {
        let binding = Binding::new(vec![KeyCode::Char('G')]);
        assert!(binding.matches(&KeyMsg {
            key: KeyCode::Char('G'),
            modifiers: KeyModifiers::SHIFT,
        }));
    }

    #[test]
    fn test_disabled_binding_is_hidden() {
        struct Map(Binding, Binding);
        impl KeyMap for Map {
            fn short_help(&self) -> Vec<&Binding> {
                vec![&self.0, &self.1]
            }
            fn full_help(&self) -> Vec<Vec<&Binding>> {
                vec![self.short_help()]
            }
        }

        let mut hidden = Binding::new(vec![KeyCode::Char('x')]).with_help("x", "delete");
        hidden.set_enabled(false);
        let map = Map(
            Binding::new(vec![KeyCode::Char('/')]).with_help("/", "search"),
            hidden,
        );
        assert!(!map.1.matches(&key(KeyCode::Char('x'))));
        assert_eq!(short_help_view(&map), "/ search");
    }
}
