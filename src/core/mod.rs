pub mod app;
pub mod config;
pub mod message;
pub mod persistence;
pub mod settings;
pub mod transcript;
