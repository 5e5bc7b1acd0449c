//! `multichat set` / `multichat unset` for the configuration file.

use std::path::PathBuf;

use crate::core::config::Config;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SettingError {
    #[error("Unknown config key: {0}")]
    UnknownKey(String),
    #[error("Missing value. Example: {example}")]
    MissingValue { example: &'static str },
    #[error("Invalid value for {key}: {input} (expected a whole number)")]
    InvalidNumber { key: &'static str, input: String },
}

/// Configuration keys accepted on the command line.
pub const CONFIG_KEYS: [&str; 5] = [
    "api-url",
    "models",
    "response-delay-ms",
    "request-timeout-secs",
    "storage-path",
];

fn parse_number(key: &'static str, input: &str) -> Result<u64, SettingError> {
    input.trim().parse().map_err(|_| SettingError::InvalidNumber {
        key,
        input: input.to_string(),
    })
}

/// Apply `multichat set <key> <value...>` to `config`, returning the message
/// to print.
pub fn set_config_value(
    config: &mut Config,
    key: &str,
    values: &[String],
) -> Result<String, SettingError> {
    let joined = values.join(" ");
    if joined.trim().is_empty() {
        let example = match key {
            "api-url" => "multichat set api-url https://example.com/api/generate",
            "models" => "multichat set models gemini-1.5-flash gpt-4o-mini deepseek",
            "response-delay-ms" => "multichat set response-delay-ms 250",
            "request-timeout-secs" => "multichat set request-timeout-secs 60",
            "storage-path" => "multichat set storage-path ~/chats.toml",
            other => return Err(SettingError::UnknownKey(other.to_string())),
        };
        return Err(SettingError::MissingValue { example });
    }

    match key {
        "api-url" => config.api_url = Some(joined.trim().to_string()),
        "models" => {
            config.models = values
                .iter()
                .flat_map(|v| v.split([',', ' ']))
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect();
        }
        "response-delay-ms" => {
            config.response_delay_ms = Some(parse_number("response-delay-ms", &joined)?)
        }
        "request-timeout-secs" => {
            config.request_timeout_secs = Some(parse_number("request-timeout-secs", &joined)?)
        }
        "storage-path" => config.storage_path = Some(PathBuf::from(joined.trim())),
        other => return Err(SettingError::UnknownKey(other.to_string())),
    }
    Ok(format!("✅ Set {key} to: {}", joined.trim()))
}

pub fn unset_config_value(config: &mut Config, key: &str) -> Result<String, SettingError> {
    match key {
        "api-url" => config.api_url = None,
        "models" => config.models.clear(),
        "response-delay-ms" => config.response_delay_ms = None,
        "request-timeout-secs" => config.request_timeout_secs = None,
        "storage-path" => config.storage_path = None,
        other => return Err(SettingError::UnknownKey(other.to_string())),
    }
    Ok(format!("✅ Unset {key}"))
}
