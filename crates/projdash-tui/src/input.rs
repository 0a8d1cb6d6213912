use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for second 'g'
    OpenColumnPicker,
    ToggleColumn(usize), // 1-7: registry index
    ToggleColumnAtCursor,
    ShowAllColumns,
    StartFilter,
    OpenRepository,
    ToggleMotion,
    Reload,
    Help,
    ExitMode,
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    // Handle input mode (filter)
    if app.is_input_mode() {
        return handle_input_mode(key);
    }

    match &app.mode {
        Mode::Help => return Action::ExitMode,
        Mode::ColumnPicker => return handle_column_picker_mode(key, keymap),
        _ => {}
    }

    if let Some(action) = column_digit(key) {
        return action;
    }

    let binding = KeyBinding::from(key);

    // gg requires double press
    if keymap.starts_sequence(&binding) {
        return if app.pending_key == Some('g') {
            keymap.sequence_action().cloned().unwrap_or(Action::None)
        } else {
            Action::PendingG
        };
    }

    keymap.action_for(&binding).cloned().unwrap_or(Action::None)
}

/// Digits 1-7 toggle the matching registry column
fn column_digit(key: KeyEvent) -> Option<Action> {
    match (key.code, key.modifiers) {
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            let index = c.to_digit(10)? as usize - 1;
            Some(Action::ToggleColumn(index))
        }
        _ => None,
    }
}

/// Handle key events in input mode (filter)
fn handle_input_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    }
}

/// Handle key events in the column picker popup
fn handle_column_picker_mode(key: KeyEvent, keymap: &Keymap) -> Action {
    if let Some(action) = column_digit(key) {
        return action;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char(' '), KeyModifiers::NONE) | (KeyCode::Enter, KeyModifiers::NONE) => {
            Action::ToggleColumnAtCursor
        }
        (KeyCode::Esc, KeyModifiers::NONE) => Action::ExitMode,
        _ => match keymap.action_for(&KeyBinding::from(key)) {
            Some(Action::Quit) => Action::ExitMode,
            Some(
                action @ (Action::MoveDown
                | Action::MoveUp
                | Action::OpenColumnPicker
                | Action::ShowAllColumns),
            ) => action.clone(),
            _ => Action::None,
        },
    }
}
