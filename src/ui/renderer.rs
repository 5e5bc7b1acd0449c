use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::layout::build_transcript_lines;
use super::settings_panel::{render_confirm_clear, render_settings_panel};
use super::theme::Theme;
use crate::core::app::{App, HitRegions, Overlay, UiPhase};

pub const SETTINGS_BUTTON: &str = "[settings]";
pub const DELETE_BUTTON: &str = "[delete]";

const INPUT_TITLE: &str =
    "Enter a prompt here (Enter send, Alt+Enter newline, F2 settings, Ctrl+T theme, Ctrl+D delete, Ctrl+C quit)";

/// Header button rectangles, right-aligned in `header`: settings, theme
/// toggle, delete. Buttons that do not fit are `None`.
pub fn layout_header_buttons(header: Rect, theme_label: &str) -> [Option<Rect>; 3] {
    let labels = [SETTINGS_BUTTON.len(), theme_label.len() + 2, DELETE_BUTTON.len()];
    let total: usize = labels.iter().sum::<usize>() + labels.len() - 1;
    if total > usize::from(header.width) {
        return [None; 3];
    }

    let mut x = header.x + header.width - total as u16;
    let mut rects = [None; 3];
    for (slot, width) in rects.iter_mut().zip(labels) {
        let width = width as u16;
        *slot = Some(Rect::new(x, header.y, width, 1));
        x += width + 1;
    }
    rects
}

fn render_header(f: &mut Frame, app: &mut App, theme: &Theme, area: Rect) {
    let theme_label = app.settings.theme.toggle_label();
    let [tool, toggle, delete] = layout_header_buttons(area, theme_label);

    let title = format!("multichat · {}", app.settings.model);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(title, theme.title_style))),
        area,
    );

    let tool_style = if app.ui.settings_open() {
        theme.button_active_style
    } else {
        theme.button_style
    };
    let buttons = [
        (tool, SETTINGS_BUTTON.to_string(), tool_style),
        (toggle, format!("[{theme_label}]"), theme.button_style),
        (delete, DELETE_BUTTON.to_string(), theme.button_style),
    ];
    for (rect, label, style) in buttons {
        if let Some(rect) = rect {
            f.render_widget(Paragraph::new(Span::styled(label, style)), rect);
        }
    }

    app.ui.regions.tool_button = tool;
    app.ui.regions.theme_button = toggle;
    app.ui.regions.delete_button = delete;
}

fn render_transcript(f: &mut Frame, app: &mut App, theme: &Theme, area: Rect) {
    let lines = build_transcript_lines(
        &app.transcript,
        theme,
        area.width,
        app.ui.pulse_start.elapsed(),
    );

    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_offset = total.saturating_sub(area.height);
    let offset = if app.ui.auto_scroll {
        max_offset
    } else {
        app.ui.scroll_offset.min(max_offset)
    };
    app.ui.scroll_offset = offset;
    if offset == max_offset {
        app.ui.auto_scroll = true;
    }

    f.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
}

fn render_input(f: &mut Frame, app: &mut App, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.input_border_style)
        .title(Span::styled(INPUT_TITLE, theme.input_title_style));
    let textarea = app.ui.textarea_mut();
    textarea.set_block(block);
    textarea.set_style(theme.input_text_style);
    textarea.set_cursor_style(theme.input_cursor_style);
    textarea.set_cursor_line_style(Style::default());
    f.render_widget(app.ui.textarea(), area);
}

fn status_text(app: &App) -> Option<String> {
    if let Some(status) = &app.ui.status {
        return Some(status.clone());
    }
    match app.phase() {
        UiPhase::Idle => None,
        UiPhase::AwaitingResponse => {
            let count = app.outstanding_exchanges();
            let noun = if count == 1 { "response" } else { "responses" };
            Some(format!("Waiting for {count} {noun}…"))
        }
    }
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let theme = Theme::for_mode(app.settings.theme);
    let area = f.area();
    app.ui.regions = HitRegions::default();

    f.render_widget(
        Block::default().style(Style::default().bg(theme.background_color)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(app.ui.input_height() + 2), // +2 for borders
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, app, &theme, chunks[0]);
    render_transcript(f, app, &theme, chunks[1]);
    render_input(f, app, &theme, chunks[2]);

    if let Some(status) = status_text(app) {
        f.render_widget(
            Paragraph::new(Span::styled(status, theme.status_style)),
            chunks[3],
        );
    }

    match app.ui.overlay {
        Overlay::None => {}
        Overlay::Settings { .. } => render_settings_panel(f, app, &theme, area),
        Overlay::ConfirmClear => render_confirm_clear(f, &theme, area),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app::{apply_action, AppAction};
    use crate::core::message::ExchangeId;
    use crate::ui::layout::WELCOME_TITLE;
    use crate::utils::test_utils::create_test_app;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn draw(app: &mut App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal.draw(|f| ui(f, app)).expect("draw");
        terminal.backend().buffer().clone()
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn header_buttons_are_right_aligned() {
        let header = Rect::new(0, 0, 80, 1);
        let [tool, toggle, delete] = layout_header_buttons(header, "light_mode");
        assert_eq!(tool, Some(Rect::new(48, 0, 10, 1)));
        assert_eq!(toggle, Some(Rect::new(59, 0, 12, 1)));
        assert_eq!(delete, Some(Rect::new(72, 0, 8, 1)));
    }

    #[test]
    fn header_buttons_need_room() {
        assert_eq!(
            layout_header_buttons(Rect::new(0, 0, 10, 1), "light_mode"),
            [None; 3]
        );
    }

    #[test]
    fn first_frame_shows_welcome_and_records_buttons() {
        let mut app = create_test_app();
        let text = buffer_text(&draw(&mut app, 100, 24));
        assert!(text.contains(WELCOME_TITLE));
        assert!(text.contains("[light_mode]"));
        assert!(app.ui.regions.tool_button.is_some());
        assert!(app.ui.regions.settings_panel.is_none());
    }

    #[test]
    fn theme_toggle_relabels_the_header() {
        let mut app = create_test_app();
        apply_action(&mut app, AppAction::ToggleTheme).expect("toggle");
        let text = buffer_text(&draw(&mut app, 100, 24));
        assert!(text.contains("[dark_mode]"));
    }

    #[test]
    fn settings_panel_records_hit_regions() {
        let mut app = create_test_app();
        apply_action(&mut app, AppAction::ToggleSettings).expect("open");
        let text = buffer_text(&draw(&mut app, 100, 24));
        assert!(text.contains("Temperature"));
        assert!(text.contains("gemini-1.5-flash"));
        let panel = app.ui.regions.settings_panel.expect("panel region");
        assert!(app.ui.regions.settings_rows.iter().all(|row| row
            .is_some_and(|r| panel.contains(r.as_position()))));
        assert!(app.ui.regions.settings_close.is_some());
    }

    #[test]
    fn confirm_dialog_is_drawn() {
        let mut app = create_test_app();
        apply_action(&mut app, AppAction::RequestClearTranscript).expect("request");
        let text = buffer_text(&draw(&mut app, 100, 24));
        assert!(text.contains("delete all the chats?"));
    }

    #[test]
    fn transcript_follows_the_bottom_until_scrolled_up() {
        let mut app = create_test_app();
        for n in 0..20 {
            app.transcript.push_user(format!("message {n}"), ExchangeId(n + 1));
        }
        let text = buffer_text(&draw(&mut app, 80, 20));
        assert!(text.contains("message 19"));
        let bottom = app.ui.scroll_offset;
        assert!(bottom > 0);

        apply_action(&mut app, AppAction::ScrollUp { lines: 5 }).expect("scroll");
        draw(&mut app, 80, 20);
        assert_eq!(app.ui.scroll_offset, bottom - 5);
        assert!(!app.ui.auto_scroll);

        apply_action(&mut app, AppAction::ScrollDown { lines: 50 }).expect("scroll");
        draw(&mut app, 80, 20);
        assert_eq!(app.ui.scroll_offset, bottom);
        assert!(app.ui.auto_scroll);
    }

    #[test]
    fn waiting_status_counts_outstanding_exchanges() {
        let mut app = create_test_app();
        app.ui.set_input("Hello");
        apply_action(&mut app, AppAction::SubmitInput).expect("submit");
        let text = buffer_text(&draw(&mut app, 100, 24));
        assert!(text.contains("Waiting for 1 response"));
    }
}
