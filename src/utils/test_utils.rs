use std::time::Duration;

use crate::core::app::App;
use crate::core::config::defaults::DEFAULT_MODELS;
use crate::core::persistence::{KeyValueStore, MemoryStore, Persistence};

pub fn test_models() -> Vec<String> {
    DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()
}

pub fn create_test_app() -> App {
    create_test_app_with_store(MemoryStore::new())
}

pub fn create_test_app_with_store(store: impl KeyValueStore + 'static) -> App {
    App::new(Persistence::new(store), test_models(), Duration::ZERO).expect("test app")
}
