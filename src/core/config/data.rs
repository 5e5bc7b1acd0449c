use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Endpoint that receives `POST {message, model, temperature, top_p}`
    pub api_url: Option<String>,
    /// Models offered by the settings panel, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<String>,
    /// Delay between showing the user's message and starting the request
    pub response_delay_ms: Option<u64>,
    /// Whole-request timeout; unset means requests may wait forever
    pub request_timeout_secs: Option<u64>,
    /// Location of the key-value store (transcript and preferences)
    pub storage_path: Option<PathBuf>,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
