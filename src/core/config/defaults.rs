use std::path::PathBuf;
use std::time::Duration;

use crate::core::config::data::Config;
use crate::core::config::io::{project_dirs, ConfigError};
use crate::core::settings::DEFAULT_MODEL;

pub const DEFAULT_API_URL: &str = "https://api.aigora.cloud/api/generate";
pub const DEFAULT_RESPONSE_DELAY_MS: u64 = 500;
pub const DEFAULT_MODELS: [&str; 3] = [DEFAULT_MODEL, "gpt-4o-mini", "deepseek"];
pub const STORAGE_FILE_NAME: &str = "storage.toml";

impl Config {
    pub fn api_url(&self) -> &str {
        self.api_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_API_URL)
    }

    pub fn models(&self) -> Vec<String> {
        if self.models.is_empty() {
            DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()
        } else {
            self.models.clone()
        }
    }

    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(
            self.response_delay_ms
                .unwrap_or(DEFAULT_RESPONSE_DELAY_MS),
        )
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn storage_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.storage_path {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join(STORAGE_FILE_NAME)),
        }
    }
}
