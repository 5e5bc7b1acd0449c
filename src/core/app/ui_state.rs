use std::time::Instant;

use ratatui::layout::{Position, Rect};
use tui_textarea::{CursorMove, TextArea};

/// Tallest the input box grows before it starts scrolling.
pub const MAX_INPUT_LINES: u16 = 6;

/// Whether any exchange is still waiting for its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiPhase {
    Idle,
    AwaitingResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsField {
    #[default]
    Model,
    Temperature,
    TopP,
}

impl SettingsField {
    pub const ALL: [SettingsField; 3] = [
        SettingsField::Model,
        SettingsField::Temperature,
        SettingsField::TopP,
    ];

    pub fn next(self) -> Self {
        match self {
            SettingsField::Model => SettingsField::Temperature,
            SettingsField::Temperature => SettingsField::TopP,
            SettingsField::TopP => SettingsField::Model,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            SettingsField::Model => SettingsField::TopP,
            SettingsField::Temperature => SettingsField::Model,
            SettingsField::TopP => SettingsField::Temperature,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SettingsField::Model => "Model",
            SettingsField::Temperature => "Temperature",
            SettingsField::TopP => "Top P",
        }
    }
}

/// Modal surface drawn over the chat, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Settings {
        focus: SettingsField,
    },
    ConfirmClear,
}

/// Screen areas of the clickable controls, as laid out by the last frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitRegions {
    pub tool_button: Option<Rect>,
    pub theme_button: Option<Rect>,
    pub delete_button: Option<Rect>,
    pub settings_panel: Option<Rect>,
    pub settings_close: Option<Rect>,
    /// One row per settings field, in [`SettingsField::ALL`] order.
    pub settings_rows: [Option<Rect>; 3],
}

impl HitRegions {
    pub fn hit(region: Option<Rect>, position: Position) -> bool {
        region.is_some_and(|rect| rect.contains(position))
    }
}

#[derive(Debug, Clone)]
pub struct UiState {
    textarea: TextArea<'static>,
    pub overlay: Overlay,
    pub status: Option<String>,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    pub regions: HitRegions,
    pub pulse_start: Instant,
    pub exit_requested: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            textarea: TextArea::default(),
            overlay: Overlay::None,
            status: None,
            scroll_offset: 0,
            auto_scroll: true,
            regions: HitRegions::default(),
            pulse_start: Instant::now(),
            exit_requested: false,
        }
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn textarea_mut(&mut self) -> &mut TextArea<'static> {
        &mut self.textarea
    }

    pub fn input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn input_line_count(&self) -> usize {
        self.textarea.lines().len()
    }

    /// Rows the input box needs, between one line and [`MAX_INPUT_LINES`].
    pub fn input_height(&self) -> u16 {
        (self.input_line_count() as u16).clamp(1, MAX_INPUT_LINES)
    }

    pub fn set_input(&mut self, text: &str) {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        self.textarea = TextArea::new(lines);
        self.textarea.move_cursor(CursorMove::Bottom);
        self.textarea.move_cursor(CursorMove::End);
    }

    pub fn insert_text(&mut self, text: &str) {
        self.textarea.insert_str(text);
    }

    /// Empty the input and shrink it back to one line.
    pub fn reset_input(&mut self) {
        self.textarea = TextArea::default();
    }

    pub fn apply_textarea_edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut TextArea<'static>),
    {
        f(&mut self.textarea);
    }

    pub fn settings_open(&self) -> bool {
        matches!(self.overlay, Overlay::Settings { .. })
    }

    pub fn settings_focus(&self) -> Option<SettingsField> {
        match self.overlay {
            Overlay::Settings { focus } => Some(focus),
            _ => None,
        }
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// The renderer clamps the offset and re-enables auto-scroll once the
    /// bottom is reached.
    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.auto_scroll = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_height_tracks_lines_with_a_ceiling() {
        let mut ui = UiState::new();
        assert_eq!(ui.input_height(), 1);

        ui.set_input("one\ntwo\nthree");
        assert_eq!(ui.input_height(), 3);
        assert_eq!(ui.input_text(), "one\ntwo\nthree");

        ui.set_input(&"line\n".repeat(20));
        assert_eq!(ui.input_height(), MAX_INPUT_LINES);

        ui.reset_input();
        assert_eq!(ui.input_height(), 1);
        assert_eq!(ui.input_text(), "");
    }

    #[test]
    fn inserted_text_lands_at_the_cursor() {
        let mut ui = UiState::new();
        ui.set_input("Hello");
        ui.insert_text(", world");
        assert_eq!(ui.input_text(), "Hello, world");
    }

    #[test]
    fn settings_fields_cycle() {
        let mut field = SettingsField::Model;
        for _ in 0..3 {
            field = field.next();
        }
        assert_eq!(field, SettingsField::Model);
        assert_eq!(field.previous(), SettingsField::TopP);
    }

    #[test]
    fn scrolling_up_detaches_from_bottom() {
        let mut ui = UiState::new();
        ui.scroll_offset = 10;
        ui.scroll_up(3);
        assert!(!ui.auto_scroll);
        assert_eq!(ui.scroll_offset, 7);
        ui.scroll_to_bottom();
        assert!(ui.auto_scroll);
    }
}
