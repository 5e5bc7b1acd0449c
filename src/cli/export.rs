//! Printing of the stored transcript and settings.

use clap::ValueEnum;

use crate::core::message::{MessageStatus, TranscriptRole};
use crate::core::settings::{format_slider_value, Settings};
use crate::core::transcript::Transcript;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
}

pub fn format_transcript(
    transcript: &Transcript,
    format: ExportFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ExportFormat::Json => serde_json::to_string_pretty(transcript),
        ExportFormat::Text => Ok(format_transcript_text(transcript)),
    }
}

fn format_transcript_text(transcript: &Transcript) -> String {
    let mut out = String::new();
    for message in transcript.iter() {
        let label = match (message.role, message.status) {
            (TranscriptRole::User, _) => "You",
            (TranscriptRole::Assistant, MessageStatus::Error) => "Assistant (error)",
            (TranscriptRole::Assistant, _) => "Assistant",
        };
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!(
            "[{}] {label}:\n{}\n",
            message.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            message.content
        ));
    }
    out
}

pub fn format_settings(settings: &Settings) -> String {
    format!(
        "Stored settings:\n  model: {}\n  temperature: {}\n  top-p: {}\n  theme: {}\n",
        settings.model,
        format_slider_value(settings.temperature),
        format_slider_value(settings.top_p),
        settings.theme.storage_label(),
    )
}
