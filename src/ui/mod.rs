//! Terminal UI layer.
//!
//! - [`chat_loop`]: the event loop, key and mouse routing, terminal setup.
//! - [`renderer`], [`layout`], [`settings_panel`]: frame composition.
//! - [`theme`]: the light and dark palettes.
//!
//! This layer presents state and turns input into actions; [`crate::core`]
//! owns the state and what the actions do.

pub mod chat_loop;
pub mod layout;
pub mod renderer;
pub mod settings_panel;
pub mod theme;
