use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use projdash_core::config::KeymapConfig;

use crate::input::Action;

/// Key code plus the modifiers that must be held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<KeyEvent> for KeyBinding {
    fn from(key: KeyEvent) -> Self {
        Self {
            code: key.code,
            modifiers: key.modifiers,
        }
    }
}

/// Table actions bound to keys
///
/// Only the `gg` two-key sequence is supported; it is tracked separately
/// because a single `g` has to wait for the second press.
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
    sequence_action: Option<Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut keymap = Self {
            bindings: HashMap::new(),
            sequence_action: None,
        };

        let configured = [
            (&config.quit, Action::Quit),
            (&config.move_down, Action::MoveDown),
            (&config.move_up, Action::MoveUp),
            (&config.jump_to_top, Action::JumpToTop),
            (&config.jump_to_bottom, Action::JumpToBottom),
            (&config.column_picker, Action::OpenColumnPicker),
            (&config.show_all_columns, Action::ShowAllColumns),
            (&config.filter, Action::StartFilter),
            (&config.open_repository, Action::OpenRepository),
            (&config.toggle_motion, Action::ToggleMotion),
            (&config.reload, Action::Reload),
            (&config.help, Action::Help),
        ];
        for (notation, action) in configured {
            keymap.bind(notation, action);
        }

        // Always available, whatever the config says
        keymap.bindings.insert(
            KeyBinding {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
            },
            Action::Quit,
        );
        keymap.bindings.insert(KeyBinding::plain(KeyCode::Esc), Action::ExitMode);
        for (code, action) in [
            (KeyCode::Up, Action::MoveUp),
            (KeyCode::Down, Action::MoveDown),
            (KeyCode::Home, Action::JumpToTop),
            (KeyCode::End, Action::JumpToBottom),
        ] {
            keymap.bindings.entry(KeyBinding::plain(code)).or_insert(action);
        }

        keymap
    }

    /// Bind one configured key; the first binding of a key wins
    fn bind(&mut self, notation: &str, action: Action) {
        if notation == "gg" {
            self.sequence_action = Some(action);
            return;
        }

        let Some(binding) = parse_key_binding(notation) else {
            tracing::warn!("Invalid key binding '{}' for {:?}, ignoring", notation, action);
            return;
        };

        if let Some(existing) = self.bindings.get(&binding) {
            tracing::warn!(
                "Key '{}' already bound to {:?}, ignoring {:?}",
                notation,
                existing,
                action
            );
            return;
        }

        // Terminals report '?' and friends with SHIFT held
        if let KeyCode::Char(c) = binding.code {
            if binding.modifiers.is_empty() && c.is_ascii_punctuation() {
                let shifted = KeyBinding {
                    code: binding.code,
                    modifiers: KeyModifiers::SHIFT,
                };
                self.bindings.entry(shifted).or_insert(action.clone());
            }
        }
        self.bindings.insert(binding, action);
    }

    pub fn action_for(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }

    /// Action of the completed `gg` sequence
    pub fn sequence_action(&self) -> Option<&Action> {
        self.sequence_action.as_ref()
    }

    /// Whether `binding` is the first key of the `gg` sequence
    pub fn starts_sequence(&self, binding: &KeyBinding) -> bool {
        self.sequence_action.is_some() && *binding == KeyBinding::plain(KeyCode::Char('g'))
    }
}

/// Parse a key in config notation
///
/// A single character binds that key (uppercase implies Shift). `<C-x>`
/// binds Ctrl+x, and `<CR>`, `<Esc>`, `<Tab>`, `<Space>` name the keys
/// that cannot be typed directly.
pub fn parse_key_binding(notation: &str) -> Option<KeyBinding> {
    let notation = notation.trim();

    if let Some(inner) = notation
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .filter(|inner| !inner.is_empty())
    {
        if let Some(key) = inner.strip_prefix("C-") {
            let c = single_char(key)?;
            return Some(KeyBinding {
                code: KeyCode::Char(c.to_ascii_lowercase()),
                modifiers: KeyModifiers::CONTROL,
            });
        }
        let code = match inner.to_ascii_lowercase().as_str() {
            "cr" | "enter" => KeyCode::Enter,
            "esc" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "space" => KeyCode::Char(' '),
            _ => return None,
        };
        return Some(KeyBinding::plain(code));
    }

    let c = single_char(notation)?;
    let modifiers = if c.is_ascii_uppercase() {
        KeyModifiers::SHIFT
    } else {
        KeyModifiers::NONE
    };
    Some(KeyBinding {
        code: KeyCode::Char(c),
        modifiers,
    })
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(code: KeyCode, modifiers: KeyModifiers) -> KeyBinding {
        KeyBinding { code, modifiers }
    }

    #[test]
    fn test_parse_notation() {
        assert_eq!(
            parse_key_binding("j"),
            Some(binding(KeyCode::Char('j'), KeyModifiers::NONE))
        );
        assert_eq!(
            parse_key_binding("G"),
            Some(binding(KeyCode::Char('G'), KeyModifiers::SHIFT))
        );
        assert_eq!(
            parse_key_binding("<C-R>"),
            Some(binding(KeyCode::Char('r'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            parse_key_binding("<Space>"),
            Some(binding(KeyCode::Char(' '), KeyModifiers::NONE))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_notation() {
        for notation in ["", "xyz", "<>", "<Hyper-x>", "<C-ab>"] {
            assert_eq!(parse_key_binding(notation), None, "{:?}", notation);
        }
    }

    #[test]
    fn test_default_keymap() {
        let keymap = Keymap::default();
        let plain = |c| binding(KeyCode::Char(c), KeyModifiers::NONE);

        assert_eq!(keymap.action_for(&plain('q')), Some(&Action::Quit));
        assert_eq!(keymap.action_for(&plain('c')), Some(&Action::OpenColumnPicker));
        assert_eq!(
            keymap.action_for(&binding(KeyCode::Char('?'), KeyModifiers::SHIFT)),
            Some(&Action::Help)
        );
        assert_eq!(keymap.sequence_action(), Some(&Action::JumpToTop));
        assert!(keymap.starts_sequence(&plain('g')));
        assert_eq!(
            keymap.action_for(&binding(KeyCode::Home, KeyModifiers::NONE)),
            Some(&Action::JumpToTop)
        );
    }

    #[test]
    fn test_conflicting_binding_keeps_first() {
        let config = KeymapConfig {
            reload: "q".to_string(),
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(
            keymap.action_for(&binding(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(&Action::Quit)
        );
    }
}
