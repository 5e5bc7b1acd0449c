use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_TEMPERATURE: f64 = 0.1;
pub const DEFAULT_TOP_P: f64 = 0.1;

pub const SLIDER_MIN: f64 = 0.0;
pub const SLIDER_MAX: f64 = 1.0;
pub const SLIDER_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Value stored under the theme key.
    pub fn storage_label(self) -> &'static str {
        match self {
            ThemeMode::Light => "light_mode",
            ThemeMode::Dark => "dark_mode",
        }
    }

    /// Anything other than the light label (including nothing) means dark.
    pub fn from_storage_label(label: Option<&str>) -> Self {
        match label {
            Some("light_mode") => ThemeMode::Light,
            _ => ThemeMode::Dark,
        }
    }

    /// Label of the theme toggle: it names the mode a press switches to.
    pub fn toggle_label(self) -> &'static str {
        self.toggled().storage_label()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub model: String,
    pub temperature: f64,
    pub top_p: f64,
    pub theme: ThemeMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            theme: ThemeMode::default(),
        }
    }
}

impl Settings {
    pub fn step_temperature(&mut self, forward: bool) {
        self.temperature = slider_step(self.temperature, forward);
    }

    pub fn step_top_p(&mut self, forward: bool) {
        self.top_p = slider_step(self.top_p, forward);
    }

    /// Move to the next/previous entry of `models`. A model that is not in the
    /// list jumps to the first (forward) or last (backward) entry.
    pub fn cycle_model(&mut self, models: &[String], forward: bool) {
        if models.is_empty() {
            return;
        }
        let next = match models.iter().position(|m| *m == self.model) {
            Some(index) if forward => (index + 1) % models.len(),
            Some(0) => models.len() - 1,
            Some(index) => index - 1,
            None if forward => 0,
            None => models.len() - 1,
        };
        self.model = models[next].clone();
    }
}

/// One slider notch, kept inside the slider's range and rounded to two
/// decimals so stored values stay short ("0.7", not "0.7000000000000001").
pub fn slider_step(value: f64, forward: bool) -> f64 {
    let delta = if forward { SLIDER_STEP } else { -SLIDER_STEP };
    let stepped = (value + delta).clamp(SLIDER_MIN, SLIDER_MAX);
    (stepped * 100.0).round() / 100.0
}

pub fn format_slider_value(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn models() -> Vec<String> {
        ["gemini-1.5-flash", "gpt-4o-mini", "deepseek"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn defaults_match_first_run() {
        let settings = Settings::default();
        assert_eq!(settings.model, "gemini-1.5-flash");
        assert_eq!(settings.temperature, 0.1);
        assert_eq!(settings.top_p, 0.1);
        assert_eq!(settings.theme, ThemeMode::Dark);
    }

    #[test]
    fn toggling_twice_restores_label() {
        let mode = ThemeMode::Dark;
        assert_eq!(mode.toggle_label(), "light_mode");
        assert_eq!(mode.toggled().toggle_label(), "dark_mode");
        assert_eq!(mode.toggled().toggled(), mode);
        assert_eq!(mode.toggled().toggled().toggle_label(), mode.toggle_label());
    }

    #[test]
    fn storage_label_round_trips() {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            assert_eq!(ThemeMode::from_storage_label(Some(mode.storage_label())), mode);
        }
        assert_eq!(ThemeMode::from_storage_label(None), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_storage_label(Some("sepia")), ThemeMode::Dark);
    }

    #[test]
    fn slider_steps_stay_clean_and_bounded() {
        let mut settings = Settings::default();
        for _ in 0..6 {
            settings.step_temperature(true);
        }
        assert_eq!(settings.temperature, 0.7);
        assert_eq!(format_slider_value(settings.temperature), "0.7");

        for _ in 0..20 {
            settings.step_top_p(false);
        }
        assert_eq!(settings.top_p, 0.0);
        for _ in 0..20 {
            settings.step_top_p(true);
        }
        assert_eq!(settings.top_p, 1.0);
        assert_eq!(format_slider_value(settings.top_p), "1");
    }

    #[test]
    fn model_cycling_wraps_in_both_directions() {
        let models = models();
        let mut settings = Settings::default();
        settings.cycle_model(&models, true);
        assert_eq!(settings.model, "gpt-4o-mini");
        settings.cycle_model(&models, false);
        settings.cycle_model(&models, false);
        assert_eq!(settings.model, "deepseek");
        settings.cycle_model(&models, true);
        assert_eq!(settings.model, "gemini-1.5-flash");
    }

    #[test]
    fn unknown_model_jumps_into_the_list() {
        let models = models();
        let mut settings = Settings {
            model: "gpt-4".to_string(),
            ..Settings::default()
        };
        settings.cycle_model(&models, true);
        assert_eq!(settings.model, "gemini-1.5-flash");

        settings.model = "gpt-4".to_string();
        settings.cycle_model(&models, false);
        assert_eq!(settings.model, "deepseek");

        settings.cycle_model(&[], true);
        assert_eq!(settings.model, "deepseek");
    }
}
