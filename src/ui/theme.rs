use ratatui::style::{Color, Modifier, Style};

use crate::core::settings::ThemeMode;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,

    // Chat message styles
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub assistant_prefix_style: Style,
    pub assistant_text_style: Style,
    pub error_text_style: Style,
    pub typing_indicator_style: Style,
    pub welcome_style: Style,

    // Chrome
    pub title_style: Style,
    pub button_style: Style,
    pub button_active_style: Style,
    pub status_style: Style,

    // Settings panel and dialogs
    pub panel_border_style: Style,
    pub panel_label_style: Style,
    pub panel_focus_style: Style,
    pub slider_fill_style: Style,

    // Input area
    pub input_border_style: Style,
    pub input_title_style: Style,
    pub input_text_style: Style,
    pub input_cursor_style: Style,
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Theme {
            background_color: Color::Rgb(0x34, 0x35, 0x41),
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            assistant_prefix_style: Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
            assistant_text_style: Style::default().fg(Color::White),
            error_text_style: Style::default().fg(Color::LightRed),
            typing_indicator_style: Style::default().fg(Color::Gray),
            welcome_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            title_style: Style::default().fg(Color::Gray),
            button_style: Style::default().fg(Color::Gray),
            button_active_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD),
            status_style: Style::default().fg(Color::Yellow),

            panel_border_style: Style::default().fg(Color::Gray),
            panel_label_style: Style::default().fg(Color::Gray),
            panel_focus_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            slider_fill_style: Style::default().fg(Color::LightGreen),

            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),
            input_text_style: Style::default().fg(Color::White),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    pub fn light() -> Self {
        Theme {
            background_color: Color::White,
            user_prefix_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Blue),
            assistant_prefix_style: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            assistant_text_style: Style::default().fg(Color::Black),
            error_text_style: Style::default().fg(Color::Red),
            typing_indicator_style: Style::default().fg(Color::DarkGray),
            welcome_style: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            title_style: Style::default().fg(Color::DarkGray),
            button_style: Style::default().fg(Color::DarkGray),
            button_active_style: Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            status_style: Style::default().fg(Color::Magenta),

            panel_border_style: Style::default().fg(Color::DarkGray),
            panel_label_style: Style::default().fg(Color::DarkGray),
            panel_focus_style: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            slider_fill_style: Style::default().fg(Color::Green),

            input_border_style: Style::default().fg(Color::Black),
            input_title_style: Style::default().fg(Color::DarkGray),
            input_text_style: Style::default().fg(Color::Black),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}
