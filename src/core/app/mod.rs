//! Application state and the actions that mutate it.
//!
//! [`App`] is owned by the chat loop. Input handlers never touch it directly:
//! they produce [`AppAction`]s, and [`apply_action`] turns each one into a
//! state change plus, at most, one [`AppCommand`] for the loop to execute
//! (a timer or a network request). Commands report back as further actions.

pub mod actions;
pub mod ui_state;


use std::collections::BTreeSet;
use std::time::Duration;

pub use actions::{apply_action, apply_actions, AppAction, AppActionDispatcher, AppCommand};
pub use ui_state::{HitRegions, Overlay, SettingsField, UiPhase, UiState};

use crate::core::message::ExchangeId;
use crate::core::persistence::{Persistence, PersistenceError};
use crate::core::settings::Settings;
use crate::core::transcript::Transcript;

pub struct App {
    pub transcript: Transcript,
    pub settings: Settings,
    /// Models offered by the settings panel.
    pub models: Vec<String>,
    /// Pause between the user's message appearing and the typing indicator.
    pub response_delay: Duration,
    pub ui: UiState,
    persistence: Persistence,
    /// Exchanges submitted but not yet resolved.
    outstanding: BTreeSet<ExchangeId>,
    next_exchange: u64,
}

impl App {
    /// Restore the saved transcript and settings from `persistence`.
    pub fn new(
        persistence: Persistence,
        models: Vec<String>,
        response_delay: Duration,
    ) -> Result<Self, PersistenceError> {
        let transcript = persistence.load()?.unwrap_or_default();
        let settings = persistence.load_settings()?;
        let next_exchange = transcript
            .iter()
            .filter_map(|m| m.exchange)
            .map(|id| id.0 + 1)
            .max()
            .unwrap_or(1);

        Ok(Self {
            transcript,
            settings,
            models,
            response_delay,
            ui: UiState::new(),
            persistence,
            outstanding: BTreeSet::new(),
            next_exchange,
        })
    }

    pub fn phase(&self) -> UiPhase {
        if self.outstanding.is_empty() {
            UiPhase::Idle
        } else {
            UiPhase::AwaitingResponse
        }
    }

    pub fn outstanding_exchanges(&self) -> usize {
        self.outstanding.len()
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    pub(crate) fn open_exchange(&mut self) -> ExchangeId {
        let id = ExchangeId(self.next_exchange);
        self.next_exchange += 1;
        self.outstanding.insert(id);
        id
    }

    pub(crate) fn close_exchange(&mut self, id: ExchangeId) -> bool {
        self.outstanding.remove(&id)
    }
}
