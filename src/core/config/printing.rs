use std::path::Path;

use crate::core::config::data::{path_display, Config};

impl Config {
    pub fn print_all(&self, config_path: &Path) {
        println!("Current configuration ({}):", path_display(config_path));
        match &self.api_url {
            Some(url) => println!("  api-url: {url}"),
            None => println!("  api-url: {} (default)", self.api_url()),
        }
        if self.models.is_empty() {
            println!("  models: {} (default)", self.models().join(", "));
        } else {
            println!("  models: {}", self.models.join(", "));
        }
        println!(
            "  response-delay-ms: {}",
            self.response_delay().as_millis()
        );
        match self.request_timeout_secs {
            Some(secs) => println!("  request-timeout-secs: {secs}"),
            None => println!("  request-timeout-secs: (none)"),
        }
        match self.storage_path() {
            Ok(path) => println!("  storage-path: {}", path_display(path)),
            Err(err) => println!("  storage-path: ({err})"),
        }
    }
}
