use crate::models::DeckTuning;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub api: ApiSettings,
    #[serde(default)]
    pub deck: DeckSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
    pub session_token: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeckSettings {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_rotation_domain")]
    pub rotation_domain: f64,
    #[serde(default = "default_max_rotation")]
    pub max_rotation_deg: f64,
    #[serde(default = "default_stack_offset")]
    pub stack_offset_deg: f64,
    #[serde(default = "default_indicator_domain")]
    pub indicator_domain: f64,
    #[serde(default = "default_back_card_scale")]
    pub back_card_scale: f64,
    #[serde(default)]
    pub preview: bool,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            rotation_domain: default_rotation_domain(),
            max_rotation_deg: default_max_rotation(),
            stack_offset_deg: default_stack_offset(),
            indicator_domain: default_indicator_domain(),
            back_card_scale: default_back_card_scale(),
            preview: false,
        }
    }
}

impl DeckSettings {
    pub fn tuning(&self) -> DeckTuning {
        DeckTuning {
            threshold: self.threshold,
            rotation_domain: self.rotation_domain,
            max_rotation_deg: self.max_rotation_deg,
            stack_offset_deg: self.stack_offset_deg,
            indicator_domain: self.indicator_domain,
            back_card_scale: self.back_card_scale,
        }
    }
}

fn default_threshold() -> f64 { 100.0 }
fn default_rotation_domain() -> f64 { 150.0 }
fn default_max_rotation() -> f64 { 12.0 }
fn default_stack_offset() -> f64 { 3.0 }
fn default_indicator_domain() -> f64 { 100.0 }
fn default_back_card_scale() -> f64 { 0.95 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with SWIPE_DECK__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Development overrides
            .add_source(File::with_name("config/local").required(false))
            // e.g., SWIPE_DECK__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SWIPE_DECK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SWIPE_DECK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the short-form overrides API_BASE_URL and SESSION_TOKEN
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let base_url = env::var("API_BASE_URL").ok();
    let session_token = env::var("SESSION_TOKEN").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(url) = base_url {
        builder = builder.set_override("api.base_url", url)?;
    }
    if let Some(token) = session_token {
        builder = builder.set_override("api.session_token", token)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_deck_settings() {
        let deck = DeckSettings::default();
        assert_eq!(deck.threshold, 100.0);
        assert_eq!(deck.rotation_domain, 150.0);
        assert!(!deck.preview);
        assert_eq!(deck.tuning(), DeckTuning::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("swipe-deck-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "[server]\nhost = \"127.0.0.1\"\nport = 8088\n\n[api]\nbase_url = \"http://localhost:7777\"\n\n[deck]\nthreshold = 120.0\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 8088);
        assert_eq!(settings.api.base_url, "http://localhost:7777");
        assert_eq!(settings.deck.threshold, 120.0);
        assert_eq!(settings.deck.max_rotation_deg, 12.0);
        assert_eq!(settings.logging.format, "json");
    }
}
