//! Mouse routing against the hit regions recorded by the last frame.

use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::core::app::{AppAction, HitRegions, Overlay, SettingsField, UiState};

pub const WHEEL_SCROLL_LINES: u16 = 3;

fn route_click(ui: &UiState, at: Position) -> Vec<AppAction> {
    let regions = &ui.regions;

    if ui.overlay == Overlay::ConfirmClear {
        return Vec::new();
    }

    // The tool button toggles; the same click must not also count as a click
    // outside the panel.
    if HitRegions::hit(regions.tool_button, at) {
        return vec![AppAction::ToggleSettings];
    }

    let mut actions = Vec::new();
    if ui.settings_open() {
        if HitRegions::hit(regions.settings_close, at) {
            return vec![AppAction::CloseSettings];
        }
        if HitRegions::hit(regions.settings_panel, at) {
            let row = regions
                .settings_rows
                .iter()
                .position(|row| HitRegions::hit(*row, at));
            if let Some(index) = row {
                actions.push(AppAction::FocusSettingsField {
                    field: SettingsField::ALL[index],
                });
            }
            return actions;
        }
        actions.push(AppAction::CloseSettings);
    }

    if HitRegions::hit(regions.theme_button, at) {
        actions.push(AppAction::ToggleTheme);
    } else if HitRegions::hit(regions.delete_button, at) {
        actions.push(AppAction::RequestClearTranscript);
    }
    actions
}

pub fn route_mouse_event(ui: &UiState, event: MouseEvent) -> Vec<AppAction> {
    let at = Position::new(event.column, event.row);
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => route_click(ui, at),
        MouseEventKind::ScrollUp => vec![AppAction::ScrollUp {
            lines: WHEEL_SCROLL_LINES,
        }],
        MouseEventKind::ScrollDown => vec![AppAction::ScrollDown {
            lines: WHEEL_SCROLL_LINES,
        }],
        _ => Vec::new(),
    }
}
