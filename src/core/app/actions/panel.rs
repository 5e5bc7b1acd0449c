use tracing::{debug, info};

use super::{App, AppAction};
use crate::core::app::ui_state::{Overlay, SettingsField};
use crate::core::persistence::PersistenceError;
use crate::core::settings::format_slider_value;

pub(super) fn handle_panel_action(app: &mut App, action: AppAction) -> Result<(), PersistenceError> {
    match action {
        AppAction::ToggleTheme => toggle_theme(app),
        AppAction::ToggleSettings => {
            app.ui.overlay = match app.ui.overlay {
                Overlay::Settings { .. } => Overlay::None,
                _ => Overlay::Settings {
                    focus: SettingsField::default(),
                },
            };
            Ok(())
        }
        AppAction::CloseSettings => {
            if app.ui.settings_open() {
                app.ui.overlay = Overlay::None;
            }
            Ok(())
        }
        AppAction::FocusSettingsField { field } => {
            set_focus(app, |_| field);
            Ok(())
        }
        AppAction::SettingsFocusNext => {
            set_focus(app, SettingsField::next);
            Ok(())
        }
        AppAction::SettingsFocusPrevious => {
            set_focus(app, SettingsField::previous);
            Ok(())
        }
        AppAction::AdjustSetting { forward } => adjust_setting(app, forward),
        AppAction::RequestClearTranscript => {
            app.ui.overlay = Overlay::ConfirmClear;
            Ok(())
        }
        AppAction::ConfirmClearTranscript => clear_transcript(app),
        AppAction::CancelClearTranscript => {
            if app.ui.overlay == Overlay::ConfirmClear {
                app.ui.overlay = Overlay::None;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn toggle_theme(app: &mut App) -> Result<(), PersistenceError> {
    app.settings.theme = app.settings.theme.toggled();
    debug!(theme = app.settings.theme.storage_label(), "theme toggled");
    app.persistence.save_theme(app.settings.theme)
}

fn set_focus(app: &mut App, f: impl FnOnce(SettingsField) -> SettingsField) {
    if let Overlay::Settings { focus } = app.ui.overlay {
        app.ui.overlay = Overlay::Settings { focus: f(focus) };
    }
}

/// Move the focused control one notch and write the settings through.
fn adjust_setting(app: &mut App, forward: bool) -> Result<(), PersistenceError> {
    let Some(field) = app.ui.settings_focus() else {
        return Ok(());
    };
    match field {
        SettingsField::Model => app.settings.cycle_model(&app.models, forward),
        SettingsField::Temperature => app.settings.step_temperature(forward),
        SettingsField::TopP => app.settings.step_top_p(forward),
    }
    debug!(
        model = %app.settings.model,
        temperature = %format_slider_value(app.settings.temperature),
        top_p = %format_slider_value(app.settings.top_p),
        "settings changed"
    );
    app.persistence.save_settings(&app.settings)
}

fn clear_transcript(app: &mut App) -> Result<(), PersistenceError> {
    if app.ui.overlay != Overlay::ConfirmClear {
        return Ok(());
    }
    app.ui.overlay = Overlay::None;
    let removed = app.transcript.len();
    app.transcript.clear();
    app.ui.scroll_offset = 0;
    app.ui.scroll_to_bottom();
    app.ui.set_status("Chats deleted");
    info!(removed, "transcript cleared");
    app.persistence.clear_transcript()
}
