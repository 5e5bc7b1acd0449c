//! multichat is a terminal chat client for remote text-generation APIs.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`api`] defines the generate request/response payloads, the tagged
//!   outcome of an exchange, and the HTTP client behind [`api::client::ResponseSource`].
//! - [`core`] owns the transcript, settings, persistence, configuration, and
//!   the application state machine driven by actions.
//! - [`ui`] renders the terminal interface and runs the interactive event loop.
//! - [`utils`] holds input sanitising and logging setup.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`], which
//! loads configuration and dispatches into [`ui::chat_loop`] for interactive
//! sessions.

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
