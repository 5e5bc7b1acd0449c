mod exchange;
mod panel;

use std::time::Duration;

use tokio::sync::mpsc;
use tui_textarea::Input as TAInput;

use super::App;
use crate::api::{GenerateOutcome, GenerateRequest};
use crate::core::app::ui_state::SettingsField;
use crate::core::message::ExchangeId;
use crate::core::persistence::PersistenceError;

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// A keystroke for the input box. Queued with every other action so a
    /// submit only sees what was typed before it.
    EditInput {
        input: TAInput,
    },
    InsertIntoInput {
        text: String,
    },
    /// Send whatever is in the input box.
    SubmitInput,
    /// The UI-feel delay elapsed: show the typing indicator and start the
    /// request.
    ShowTypingIndicator {
        exchange: ExchangeId,
        message: String,
    },
    ResponseReceived {
        exchange: ExchangeId,
        outcome: GenerateOutcome,
    },
    ToggleTheme,
    ToggleSettings,
    CloseSettings,
    FocusSettingsField {
        field: SettingsField,
    },
    SettingsFocusNext,
    SettingsFocusPrevious,
    AdjustSetting {
        forward: bool,
    },
    RequestClearTranscript,
    ConfirmClearTranscript,
    CancelClearTranscript,
    ScrollUp {
        lines: u16,
    },
    ScrollDown {
        lines: u16,
    },
    ScrollToBottom,
    ClearStatus,
    Quit,
}

/// Side effects the chat loop performs on behalf of an action.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Dispatch [`AppAction::ShowTypingIndicator`] after `delay`.
    ScheduleTypingIndicator {
        exchange: ExchangeId,
        message: String,
        delay: Duration,
    },
    /// Run the request and dispatch [`AppAction::ResponseReceived`].
    SpawnRequest {
        exchange: ExchangeId,
        request: GenerateRequest,
    },
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppAction>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppAction>) -> Self {
        Self { tx }
    }

    pub fn dispatch(&self, action: AppAction) {
        let _ = self.tx.send(action);
    }

    pub fn dispatch_many<I>(&self, actions: I)
    where
        I: IntoIterator<Item = AppAction>,
    {
        for action in actions {
            self.dispatch(action);
        }
    }
}

pub fn apply_actions(
    app: &mut App,
    actions: impl IntoIterator<Item = AppAction>,
) -> Result<Vec<AppCommand>, PersistenceError> {
    let mut commands = Vec::new();
    for action in actions {
        if let Some(cmd) = apply_action(app, action)? {
            commands.push(cmd);
        }
    }
    Ok(commands)
}

/// Apply one action. Storage failures are returned to the caller untouched.
pub fn apply_action(
    app: &mut App,
    action: AppAction,
) -> Result<Option<AppCommand>, PersistenceError> {
    match action {
        AppAction::EditInput { input } => {
            app.ui.apply_textarea_edit(|ta| {
                ta.input(input);
            });
            Ok(None)
        }
        AppAction::InsertIntoInput { text } => {
            app.ui.insert_text(&text);
            Ok(None)
        }
        AppAction::SubmitInput => Ok(exchange::submit_input(app)),
        AppAction::ShowTypingIndicator { exchange, message } => {
            Ok(exchange::show_typing_indicator(app, exchange, message))
        }
        AppAction::ResponseReceived { exchange, outcome } => {
            exchange::response_received(app, exchange, outcome)?;
            Ok(None)
        }

        AppAction::ToggleTheme
        | AppAction::ToggleSettings
        | AppAction::CloseSettings
        | AppAction::FocusSettingsField { .. }
        | AppAction::SettingsFocusNext
        | AppAction::SettingsFocusPrevious
        | AppAction::AdjustSetting { .. }
        | AppAction::RequestClearTranscript
        | AppAction::ConfirmClearTranscript
        | AppAction::CancelClearTranscript => {
            panel::handle_panel_action(app, action)?;
            Ok(None)
        }

        AppAction::ScrollUp { lines } => {
            app.ui.scroll_up(lines);
            Ok(None)
        }
        AppAction::ScrollDown { lines } => {
            app.ui.scroll_down(lines);
            Ok(None)
        }
        AppAction::ScrollToBottom => {
            app.ui.scroll_to_bottom();
            Ok(None)
        }
        AppAction::ClearStatus => {
            app.ui.clear_status();
            Ok(None)
        }
        AppAction::Quit => {
            app.ui.exit_requested = true;
            Ok(None)
        }
    }
}
