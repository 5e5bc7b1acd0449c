//! Settings panel overlay and the delete confirmation dialog.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::theme::Theme;
use crate::core::app::{App, SettingsField};
use crate::core::settings::{format_slider_value, SLIDER_MAX, SLIDER_MIN};

const PANEL_WIDTH: u16 = 46;
const PANEL_HEIGHT: u16 = 9;
const SLIDER_CELLS: usize = 10;
const LABEL_WIDTH: usize = 13;
const CLOSE_LABEL: &str = "[x]";

pub const CONFIRM_CLEAR_PROMPT: &str = "Are you sure you want to delete all the chats?";

/// Panel rectangle: top-right corner of `area`, just below the header row.
pub fn panel_area(area: Rect) -> Rect {
    let width = PANEL_WIDTH.min(area.width);
    let height = PANEL_HEIGHT.min(area.height.saturating_sub(1));
    Rect {
        x: area.x + area.width - width,
        y: area.y + area.height.min(1),
        width,
        height,
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Filled-cell count for a slider value. Out-of-range stored values are
/// shown pinned to the nearest end.
fn slider_fill(value: f64) -> usize {
    let ratio = ((value - SLIDER_MIN) / (SLIDER_MAX - SLIDER_MIN)).clamp(0.0, 1.0);
    (ratio * SLIDER_CELLS as f64).round() as usize
}

fn slider_spans(value: f64, theme: &Theme) -> Vec<Span<'static>> {
    let filled = slider_fill(value);
    vec![
        Span::raw("["),
        Span::styled("■".repeat(filled), theme.slider_fill_style),
        Span::raw("·".repeat(SLIDER_CELLS - filled)),
        Span::raw("] "),
        Span::raw(format_slider_value(value)),
    ]
}

fn field_line(app: &App, field: SettingsField, focused: bool, theme: &Theme) -> Line<'static> {
    let label_style = if focused {
        theme.panel_focus_style
    } else {
        theme.panel_label_style
    };
    let marker = if focused { "› " } else { "  " };
    let mut spans = vec![
        Span::styled(marker, label_style),
        Span::styled(format!("{:<width$}", field.label(), width = LABEL_WIDTH), label_style),
    ];
    match field {
        SettingsField::Model => {
            spans.push(Span::raw("< "));
            spans.push(Span::styled(app.settings.model.clone(), label_style));
            spans.push(Span::raw(" >"));
        }
        SettingsField::Temperature => spans.extend(slider_spans(app.settings.temperature, theme)),
        SettingsField::TopP => spans.extend(slider_spans(app.settings.top_p, theme)),
    }
    Line::from(spans)
}

/// Draw the panel over `area` and record its clickable regions.
pub fn render_settings_panel(f: &mut Frame, app: &mut App, theme: &Theme, area: Rect) {
    let Some(focus) = app.ui.settings_focus() else {
        return;
    };
    let panel = panel_area(area);
    if panel.width < 3 || panel.height < 3 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border_style)
        .title(Span::styled(" Settings ", theme.title_style))
        .title(
            Line::from(Span::styled(CLOSE_LABEL, theme.button_style)).alignment(Alignment::Right),
        );
    let inner = block.inner(panel);

    let mut lines = Vec::with_capacity(SettingsField::ALL.len() + 2);
    let mut rows = [None; 3];
    for (index, field) in SettingsField::ALL.into_iter().enumerate() {
        let y = inner.y + index as u16 * 2;
        if y < inner.y + inner.height {
            rows[index] = Some(Rect::new(inner.x, y, inner.width, 1));
        }
        if index > 0 {
            lines.push(Line::default());
        }
        lines.push(field_line(app, field, field == focus, theme));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "↑/↓ select  ←/→ adjust  Esc close",
        theme.panel_label_style,
    )));

    f.render_widget(Clear, panel);
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(ratatui::style::Style::default().bg(theme.background_color)),
        panel,
    );

    let close_width = CLOSE_LABEL.len() as u16;
    app.ui.regions.settings_panel = Some(panel);
    app.ui.regions.settings_close = Some(Rect::new(
        panel.x + panel.width.saturating_sub(close_width + 1),
        panel.y,
        close_width,
        1,
    ));
    app.ui.regions.settings_rows = rows;
}

pub fn render_confirm_clear(f: &mut Frame, theme: &Theme, area: Rect) {
    let width = (CONFIRM_CLEAR_PROMPT.len() as u16 + 4).min(area.width);
    let dialog = centered(area, width, 5);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border_style)
        .title(Span::styled(" Delete chats ", theme.title_style));
    let lines = vec![
        Line::from(Span::styled(CONFIRM_CLEAR_PROMPT, theme.panel_focus_style)),
        Line::default(),
        Line::from(Span::styled("[y] Yes    [n] No", theme.panel_label_style)),
    ];

    f.render_widget(Clear, dialog);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block)
            .style(ratatui::style::Style::default().bg(theme.background_color)),
        dialog,
    );
}
