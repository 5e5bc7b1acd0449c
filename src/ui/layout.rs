//! Projection of the transcript into pre-wrapped terminal lines.
//!
//! Wrapping happens here, once, at the width of the transcript area, so the
//! renderer's scroll math counts exactly the rows that get drawn.

use std::time::Duration;

use ratatui::layout::Alignment;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::Theme;
use crate::core::message::{Message, MessageStatus, TranscriptRole};
use crate::core::transcript::Transcript;

pub const WELCOME_TITLE: &str = "Multi-Model ChatBot";
pub const WELCOME_BODY: [&str; 2] = [
    "Start a conversation and explore the power of AI.",
    "Your messages are saved until you delete them.",
];

const MESSAGE_INDENT: &str = "  ";
const TYPING_FRAMES: [&str; 4] = ["·  ", "·· ", "···", " ··"];
const TYPING_FRAME_MS: u128 = 300;

/// Animation frame of the typing indicator `elapsed` after the UI started.
pub fn typing_frame(elapsed: Duration) -> &'static str {
    let index = (elapsed.as_millis() / TYPING_FRAME_MS) as usize % TYPING_FRAMES.len();
    TYPING_FRAMES[index]
}

fn role_label(role: TranscriptRole) -> &'static str {
    match role {
        TranscriptRole::User => "You",
        TranscriptRole::Assistant => "Assistant",
    }
}

/// Greedy word wrap by display width. Words wider than `width` are broken
/// across rows; explicit newlines are kept, and an empty line stays one row.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for paragraph in text.split('\n') {
        let mut row = String::new();
        let mut row_width = 0usize;

        for word in paragraph.split(' ') {
            let word_width = word.width();
            let gap = usize::from(!row.is_empty());

            if row_width + gap + word_width <= width {
                if gap == 1 {
                    row.push(' ');
                }
                row.push_str(word);
                row_width += gap + word_width;
                continue;
            }

            if !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }

            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if row_width + ch_width > width && !row.is_empty() {
                    rows.push(std::mem::take(&mut row));
                    row_width = 0;
                }
                row.push(ch);
                row_width += ch_width;
            }
        }

        rows.push(row);
    }

    rows
}

fn message_lines(
    message: &Message,
    theme: &Theme,
    width: usize,
    elapsed: Duration,
) -> Vec<Line<'static>> {
    let (prefix_style, text_style) = match (message.role, message.status) {
        (TranscriptRole::User, _) => (theme.user_prefix_style, theme.user_text_style),
        (TranscriptRole::Assistant, MessageStatus::Error) => {
            (theme.assistant_prefix_style, theme.error_text_style)
        }
        (TranscriptRole::Assistant, MessageStatus::Pending) => {
            (theme.assistant_prefix_style, theme.typing_indicator_style)
        }
        (TranscriptRole::Assistant, MessageStatus::Delivered) => {
            (theme.assistant_prefix_style, theme.assistant_text_style)
        }
    };

    let mut lines = vec![Line::from(Span::styled(
        role_label(message.role),
        prefix_style,
    ))];

    if message.is_pending() {
        lines.push(Line::from(vec![
            Span::raw(MESSAGE_INDENT),
            Span::styled(typing_frame(elapsed), text_style),
        ]));
        return lines;
    }

    let body_width = width.saturating_sub(MESSAGE_INDENT.len());
    for row in wrap_text(&message.content, body_width) {
        lines.push(Line::from(vec![
            Span::raw(MESSAGE_INDENT),
            Span::styled(row, text_style),
        ]));
    }
    lines
}

fn welcome_lines(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(WELCOME_TITLE, theme.welcome_style)).alignment(Alignment::Center),
        Line::default(),
    ];
    lines.extend(
        WELCOME_BODY
            .iter()
            .map(|text| Line::from(Span::styled(*text, theme.title_style)).alignment(Alignment::Center)),
    );
    lines
}

/// Lines for the transcript area at `width` columns; the welcome text when
/// the transcript is empty.
pub fn build_transcript_lines(
    transcript: &Transcript,
    theme: &Theme,
    width: u16,
    elapsed: Duration,
) -> Vec<Line<'static>> {
    if transcript.is_empty() {
        return welcome_lines(theme);
    }

    let width = usize::from(width);
    let mut lines = Vec::new();
    for (index, message) in transcript.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.extend(message_lines(message, theme, width, elapsed));
    }
    lines
}
