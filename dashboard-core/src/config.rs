use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::PathBuf};

use crate::{backend::BackendKind, model::Coordinates};

/// Base URL of the dashboard service when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Credentials for a direct weather provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which backend answers weather requests: "service" or "openweather".
    pub backend: Option<String>,

    /// Base URL of the dashboard service.
    pub api_base_url: Option<String>,

    /// When false, "use my location" is always refused.
    pub location_access: bool,

    /// Position reported for "use my location".
    pub home: Option<Coordinates>,

    /// Example TOML:
    /// [providers.openweather]
    /// api_key = "..."
    pub providers: HashMap<String, ProviderConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: None,
            api_base_url: None,
            location_access: true,
            home: None,
            providers: HashMap::new(),
        }
    }
}

impl Config {
    /// Configured backend, defaulting to the dashboard service.
    pub fn backend_kind(&self) -> Result<BackendKind> {
        match self.backend.as_deref() {
            Some(s) => BackendKind::try_from(s),
            None => Ok(BackendKind::Service),
        }
    }

    pub fn set_backend(&mut self, kind: BackendKind) {
        self.backend = Some(kind.as_str().to_string());
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn set_home(&mut self, home: Coordinates) {
        self.home = Some(home);
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if let Some(home) = cfg.home {
            home.validate()
                .with_context(|| format!("Invalid [home] position in {}", path.display()))?;
        }

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
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
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Set or replace a provider API key.
    pub fn upsert_provider_api_key(&mut self, kind: BackendKind, api_key: String) {
        self.providers.insert(kind.as_str().to_string(), ProviderConfig { api_key });
    }

    /// Returns API key for a provider, if present.
    pub fn provider_api_key(&self, kind: BackendKind) -> Option<&str> {
        self.providers.get(kind.as_str()).map(|cfg| cfg.api_key.as_str())
    }
}

pub(crate) fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "weather-dashboard", "weather-dashboard")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_service_backend_on_localhost() {
        let cfg = Config::default();

        assert_eq!(cfg.backend_kind().unwrap(), BackendKind::Service);
        assert_eq!(cfg.api_base_url(), "http://localhost:8000");
        assert!(cfg.location_access);
        assert!(cfg.home.is_none());
    }

    #[test]
    fn unknown_backend_is_an_error() {
        let cfg = Config {
            backend: Some("darksky".into()),
            ..Config::default()
        };

        let err = cfg.backend_kind().unwrap_err();
        assert!(err.to_string().contains("Unknown backend"));
    }

    #[test]
    fn set_api_key_for_provider() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(BackendKind::OpenWeather, "OPEN_KEY".into());
        cfg.set_backend(BackendKind::OpenWeather);

        assert_eq!(cfg.provider_api_key(BackendKind::OpenWeather), Some("OPEN_KEY"));
        assert_eq!(cfg.backend_kind().unwrap(), BackendKind::OpenWeather);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config {
            api_base_url: Some("http://weather.internal:9000".into()),
            location_access: false,
            ..Config::default()
        };
        cfg.set_home(Coordinates::new(51.5072, -0.1276).unwrap());
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_base_url(), "http://weather.internal:9000");
        assert!(!loaded.location_access);
        assert_eq!(loaded.home, cfg.home);
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.api_base_url(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn out_of_range_home_is_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[home]\nlatitude = 95.0\nlongitude = 0.0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Latitude 95"));
    }
}
