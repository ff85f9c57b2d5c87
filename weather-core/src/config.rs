use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_CITY: &str = "Stockholm";
pub const DEFAULT_TIMEZONE: &str = "Europe/Stockholm";
pub const API_KEY_ENV: &str = "WEATHER_API_KEY";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_city = "Gothenburg"
/// timezone = "Europe/Stockholm"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub default_city: String,
    /// IANA name of the zone sunrise/sunset are displayed in.
    pub timezone: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            default_city: DEFAULT_CITY.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Validated settings the HTTP client is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub api_key: String,
    pub base_url: String,
    pub timezone: Tz,
    pub timeout: Duration,
}

impl ClientSettings {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timezone: chrono_tz::Europe::Stockholm,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet, then
    /// apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;
        cfg.apply_env_override(std::env::var(API_KEY_ENV).ok());
        Ok(cfg)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-dashboard", "weather-dash")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// A non-empty environment value replaces the stored API key.
    pub fn apply_env_override(&mut self, api_key: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn display_timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("Invalid timezone '{}' in configuration: {e}", self.timezone))
    }

    pub fn client_settings(&self) -> Result<ClientSettings> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No API key configured.\n\
                     Hint: run `weather-dash configure` or set {API_KEY_ENV}."
                )
            })?;

        Ok(ClientSettings {
            api_key: api_key.to_string(),
            base_url: self.base_url.trim_end_matches('/').to_string(),
            timezone: self.display_timezone()?,
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_settings_errors_without_api_key() {
        let cfg = Config::default();
        let err = cfg.client_settings().unwrap_err();

        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn client_settings_from_defaults() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());

        let settings = cfg.client_settings().expect("settings must build");

        assert_eq!(settings.api_key, "KEY");
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.timezone, chrono_tz::Europe::Stockholm);
        assert_eq!(settings.timeout, Duration::from_secs(10));
    }

    #[test]
    fn invalid_timezone_is_reported() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.timezone = "Mars/Olympus".into();

        let err = cfg.client_settings().unwrap_err();
        assert!(err.to_string().contains("Invalid timezone 'Mars/Olympus'"));
    }

    #[test]
    fn env_override_replaces_stored_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".into());

        cfg.apply_env_override(Some("ENV_KEY".into()));
        assert_eq!(cfg.api_key.as_deref(), Some("ENV_KEY"));

        cfg.apply_env_override(Some("  ".into()));
        cfg.apply_env_override(None);
        assert_eq!(cfg.api_key.as_deref(), Some("ENV_KEY"));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg: Config = toml::from_str(r#"default_city = "Malmö""#).expect("valid toml");

        assert_eq!(cfg.default_city, "Malmö");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timezone, DEFAULT_TIMEZONE);
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn save_and_load_round_trip_on_disk() {
        let dir = std::env::temp_dir().join(format!("weather-dash-config-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.default_city = "Umeå".into();
        cfg.save_to(&path).expect("save must succeed");

        let loaded = Config::load_from(&path).expect("load must succeed");
        assert_eq!(loaded, cfg);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = std::env::temp_dir().join("weather-dash-does-not-exist/config.toml");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.base_url = "http://localhost:8080/".into();

        assert_eq!(cfg.client_settings().unwrap().base_url, "http://localhost:8080");
    }
}
