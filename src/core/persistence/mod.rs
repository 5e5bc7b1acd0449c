//! Local persistence of the transcript and user preferences.
//!
//! Everything is stored as strings in a [`KeyValueStore`] under a handful of
//! fixed keys. The transcript is a JSON array of structured records; each
//! setting has its own key so a bad value only resets that one field.

mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore};

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::core::settings::{
    Settings, ThemeMode, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TOP_P,
};
use crate::core::transcript::Transcript;

pub const THEME_KEY: &str = "themeColor";
pub const TRANSCRIPT_KEY: &str = "all-chats";
pub const MODEL_KEY: &str = "currentModel";
pub const TEMPERATURE_KEY: &str = "currentTemperature";
pub const TOP_P_KEY: &str = "currentTopP";

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Failed to read storage at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse storage at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write storage at {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode storage: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("Failed to encode transcript: {0}")]
    Transcript(#[from] serde_json::Error),
}

pub struct Persistence {
    store: Box<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Saved transcript, or `None` when nothing was saved. A transcript that
    /// no longer decodes is treated as absent.
    pub fn load(&self) -> Result<Option<Transcript>, PersistenceError> {
        let Some(raw) = self.store.get(TRANSCRIPT_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str::<Transcript>(&raw) {
            Ok(transcript) => Ok(Some(transcript)),
            Err(err) => {
                warn!(error = %err, "ignoring undecodable saved transcript");
                Ok(None)
            }
        }
    }

    /// Write the settled transcript (placeholders of in-flight exchanges are
    /// left out).
    pub fn save(&mut self, transcript: &Transcript) -> Result<(), PersistenceError> {
        let settled = transcript.settled();
        let encoded = serde_json::to_string(&settled)?;
        debug!(messages = settled.len(), "saving transcript");
        self.store.set(TRANSCRIPT_KEY, &encoded)
    }

    pub fn clear_transcript(&mut self) -> Result<(), PersistenceError> {
        self.store.remove(TRANSCRIPT_KEY)
    }

    /// Stored settings; missing or unparseable fields fall back to their
    /// defaults. Numbers are not range-checked.
    pub fn load_settings(&self) -> Result<Settings, PersistenceError> {
        let model = self
            .store
            .get(MODEL_KEY)?
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let temperature = self.load_number(TEMPERATURE_KEY, DEFAULT_TEMPERATURE)?;
        let top_p = self.load_number(TOP_P_KEY, DEFAULT_TOP_P)?;
        Ok(Settings {
            model,
            temperature,
            top_p,
            theme: self.load_theme()?,
        })
    }

    /// Write the generation parameters. The theme has its own key, see
    /// [`Persistence::save_theme`].
    pub fn save_settings(&mut self, settings: &Settings) -> Result<(), PersistenceError> {
        self.store.set(MODEL_KEY, &settings.model)?;
        self.store
            .set(TEMPERATURE_KEY, &settings.temperature.to_string())?;
        self.store.set(TOP_P_KEY, &settings.top_p.to_string())
    }

    pub fn load_theme(&self) -> Result<ThemeMode, PersistenceError> {
        let label = self.store.get(THEME_KEY)?;
        Ok(ThemeMode::from_storage_label(label.as_deref()))
    }

    pub fn save_theme(&mut self, mode: ThemeMode) -> Result<(), PersistenceError> {
        self.store.set(THEME_KEY, mode.storage_label())
    }

    /// Remove everything, settings included.
    pub fn clear(&mut self) -> Result<(), PersistenceError> {
        self.store.clear()
    }

    fn load_number(&self, key: &str, default: f64) -> Result<f64, PersistenceError> {
        let value = self
            .store
            .get(key)?
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .unwrap_or(default);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GenerateOutcome;
    use crate::core::message::ExchangeId;
    use tempfile::TempDir;

    fn sample_transcript() -> Transcript {
        let mut transcript = Transcript::new();
        transcript.push_user("Hello", ExchangeId(1));
        transcript.begin_pending(ExchangeId(1));
        transcript.resolve(
            ExchangeId(1),
            &GenerateOutcome::Success {
                message: "Hi there!".into(),
            },
        );
        transcript.push_user("<b>markup</b> & \"quotes\"", ExchangeId(2));
        transcript.begin_pending(ExchangeId(2));
        transcript.resolve(
            ExchangeId(2),
            &GenerateOutcome::TransportError {
                detail: "HTTP error! status: 500".into(),
            },
        );
        transcript
    }

    #[test]
    fn nothing_saved_loads_as_none() {
        let persistence = Persistence::in_memory();
        assert_eq!(persistence.load().expect("load"), None);
    }

    #[test]
    fn saved_transcript_reloads_identically() {
        let mut persistence = Persistence::in_memory();
        let transcript = sample_transcript();
        persistence.save(&transcript).expect("save");
        assert_eq!(persistence.load().expect("load"), Some(transcript));
    }

    #[test]
    fn saved_transcript_survives_a_new_file_store() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("storage.toml");
        let transcript = sample_transcript();

        let mut persistence = Persistence::new(FileStore::open(&path).expect("open"));
        persistence.save(&transcript).expect("save");

        let reloaded = Persistence::new(FileStore::open(&path).expect("reopen"));
        assert_eq!(reloaded.load().expect("load"), Some(transcript));
    }

    #[test]
    fn pending_placeholders_are_not_saved() {
        let mut persistence = Persistence::in_memory();
        let mut transcript = sample_transcript();
        transcript.push_user("still waiting", ExchangeId(3));
        transcript.begin_pending(ExchangeId(3));

        persistence.save(&transcript).expect("save");
        let loaded = persistence.load().expect("load").expect("transcript");
        assert_eq!(loaded.pending_count(), 0);
        assert_eq!(loaded.len(), transcript.len() - 1);
    }

    #[test]
    fn undecodable_transcript_is_ignored() {
        let mut store = MemoryStore::new();
        store
            .set(TRANSCRIPT_KEY, "<div class=\"chat outgoing\">old markup</div>")
            .expect("set");
        let persistence = Persistence::new(store);
        assert_eq!(persistence.load().expect("load"), None);
    }

    #[test]
    fn settings_default_when_unset() {
        let persistence = Persistence::in_memory();
        assert_eq!(persistence.load_settings().expect("load"), Settings::default());
    }

    #[test]
    fn settings_round_trip() {
        let mut persistence = Persistence::in_memory();
        let settings = Settings {
            model: "gpt-4".to_string(),
            temperature: 0.7,
            top_p: 0.3,
            theme: ThemeMode::Light,
        };
        persistence.save_settings(&settings).expect("save");
        persistence.save_theme(settings.theme).expect("save theme");
        assert_eq!(persistence.load_settings().expect("load"), settings);
    }

    #[test]
    fn bad_numbers_fall_back_per_field() {
        let mut store = MemoryStore::new();
        store.set(TEMPERATURE_KEY, "warm").expect("set");
        store.set(TOP_P_KEY, "1.5").expect("set");
        store.set(MODEL_KEY, "deepseek").expect("set");
        let settings = Persistence::new(store).load_settings().expect("load");
        assert_eq!(settings.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(settings.top_p, 1.5);
        assert_eq!(settings.model, "deepseek");
    }

    #[test]
    fn theme_is_stored_as_label() {
        let mut store = MemoryStore::new();
        store.set(THEME_KEY, "light_mode").expect("set");
        let mut persistence = Persistence::new(store);
        assert_eq!(persistence.load_theme().expect("load"), ThemeMode::Light);

        persistence.save_theme(ThemeMode::Dark).expect("save");
        assert_eq!(persistence.load_theme().expect("load"), ThemeMode::Dark);
    }

    #[test]
    fn clear_transcript_keeps_settings() {
        let mut persistence = Persistence::in_memory();
        persistence.save(&sample_transcript()).expect("save");
        persistence
            .save_settings(&Settings {
                model: "deepseek".into(),
                ..Settings::default()
            })
            .expect("save settings");

        persistence.clear_transcript().expect("clear");
        assert_eq!(persistence.load().expect("load"), None);
        assert_eq!(persistence.load_settings().expect("load").model, "deepseek");

        persistence.clear().expect("clear all");
        assert_eq!(persistence.load_settings().expect("load"), Settings::default());
    }
}
