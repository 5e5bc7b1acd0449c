//! Keyboard routing.
//!
//! Keys resolve against the current overlay first (confirm dialog, settings
//! panel), then the chat bindings; anything left over is an edit for the
//! input textarea.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::{Input as TAInput, Key as TAKey};

use crate::core::app::{AppAction, Overlay, UiState};

/// Rows moved by PageUp/PageDown.
pub const PAGE_SCROLL_LINES: u16 = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum KeyRoute {
    Action(AppAction),
    /// Forward to the textarea.
    Edit(TAInput),
    Ignored,
}

fn newline_input() -> TAInput {
    TAInput {
        key: TAKey::Enter,
        ctrl: false,
        alt: false,
        shift: false,
    }
}

fn route_confirm_key(key: &KeyEvent) -> KeyRoute {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            KeyRoute::Action(AppAction::ConfirmClearTranscript)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            KeyRoute::Action(AppAction::CancelClearTranscript)
        }
        _ => KeyRoute::Ignored,
    }
}

/// Panel navigation. `None` lets the key fall through to the chat bindings
/// so typing keeps working while the panel is open.
fn route_settings_key(key: &KeyEvent) -> Option<KeyRoute> {
    let action = match key.code {
        KeyCode::Esc => AppAction::CloseSettings,
        KeyCode::Up | KeyCode::BackTab => AppAction::SettingsFocusPrevious,
        KeyCode::Down | KeyCode::Tab => AppAction::SettingsFocusNext,
        KeyCode::Left => AppAction::AdjustSetting { forward: false },
        KeyCode::Right => AppAction::AdjustSetting { forward: true },
        _ => return None,
    };
    Some(KeyRoute::Action(action))
}

fn route_chat_key(key: &KeyEvent) -> KeyRoute {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::F(2) => KeyRoute::Action(AppAction::ToggleSettings),
        KeyCode::Char('t') if ctrl => KeyRoute::Action(AppAction::ToggleTheme),
        KeyCode::Char('d') if ctrl => KeyRoute::Action(AppAction::RequestClearTranscript),
        KeyCode::Enter if alt || shift => KeyRoute::Edit(newline_input()),
        KeyCode::Enter => KeyRoute::Action(AppAction::SubmitInput),
        KeyCode::PageUp => KeyRoute::Action(AppAction::ScrollUp {
            lines: PAGE_SCROLL_LINES,
        }),
        KeyCode::PageDown => KeyRoute::Action(AppAction::ScrollDown {
            lines: PAGE_SCROLL_LINES,
        }),
        KeyCode::Up if ctrl => KeyRoute::Action(AppAction::ScrollUp { lines: 1 }),
        KeyCode::Down if ctrl => KeyRoute::Action(AppAction::ScrollDown { lines: 1 }),
        KeyCode::End if ctrl => KeyRoute::Action(AppAction::ScrollToBottom),
        KeyCode::Esc => KeyRoute::Action(AppAction::ClearStatus),
        _ => KeyRoute::Edit(TAInput::from(*key)),
    }
}

pub fn route_key_event(ui: &UiState, key: KeyEvent) -> KeyRoute {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyRoute::Action(AppAction::Quit);
    }

    match ui.overlay {
        Overlay::ConfirmClear => route_confirm_key(&key),
        Overlay::Settings { .. } => {
            route_settings_key(&key).unwrap_or_else(|| route_chat_key(&key))
        }
        Overlay::None => route_chat_key(&key),
    }
}
