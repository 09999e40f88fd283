//! Durable user preferences.
//!
//! Preferences live in a small JSON object on disk, one key per setting.
//! Only the dark-mode flag is stored today, under [`DARK_MODE_KEY`].

use std::{
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::warn;

pub const DARK_MODE_KEY: &str = "darkMode";

pub trait PreferenceStore: Send + Sync + Debug {
    /// Stored dark-mode flag; `false` when nothing usable is stored.
    fn load_dark_mode(&self) -> bool;

    fn save_dark_mode(&self, enabled: bool) -> Result<()>;
}

/// Preferences stored as a JSON object in a file.
#[derive(Debug, Clone)]
pub struct JsonFilePreferences {
    path: PathBuf,
}

impl JsonFilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `preferences.json` in the platform data directory.
    pub fn open_default() -> Result<Self> {
        let dirs = crate::config::project_dirs()?;
        Ok(Self::new(dirs.data_dir().join("preferences.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_object(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read preferences: {}", self.path.display()))?;

        match serde_json::from_str::<Value>(&contents)
            .with_context(|| format!("Failed to parse preferences: {}", self.path.display()))?
        {
            Value::Object(map) => Ok(map),
            _ => anyhow::bail!(
                "Preferences file is not a JSON object: {}",
                self.path.display()
            ),
        }
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn load_dark_mode(&self) -> bool {
        match self.read_object() {
            Ok(map) => map
                .get(DARK_MODE_KEY)
                .and_then(Value::as_bool)
                .unwrap_or(false),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "ignoring unreadable preferences");
                false
            }
        }
    }

    fn save_dark_mode(&self, enabled: bool) -> Result<()> {
        // Keep other keys; start over if the file is unreadable.
        let mut map = self.read_object().unwrap_or_default();
        map.insert(DARK_MODE_KEY.to_string(), Value::Bool(enabled));

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preferences directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(&Value::Object(map))
            .context("Failed to serialize preferences")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write preferences: {}", self.path.display()))?;

        Ok(())
    }
}

/// Process-local preferences that are gone when the process exits.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    dark_mode: Mutex<bool>,
}

impl MemoryPreferences {
    pub fn new(dark_mode: bool) -> Self {
        Self {
            dark_mode: Mutex::new(dark_mode),
        }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load_dark_mode(&self) -> bool {
        self.dark_mode.lock().map(|v| *v).unwrap_or(false)
    }

    fn save_dark_mode(&self, enabled: bool) -> Result<()> {
        let mut guard = self
            .dark_mode
            .lock()
            .map_err(|_| anyhow::anyhow!("preference lock poisoned"))?;
        *guard = enabled;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_light_mode() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = JsonFilePreferences::new(dir.path().join("preferences.json"));
        assert!(!prefs.load_dark_mode());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = JsonFilePreferences::new(dir.path().join("nested/preferences.json"));

        prefs.save_dark_mode(true).unwrap();
        assert!(prefs.load_dark_mode());

        prefs.save_dark_mode(false).unwrap();
        assert!(!prefs.load_dark_mode());
    }

    #[test]
    fn stored_as_json_under_fixed_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        let prefs = JsonFilePreferences::new(&path);

        prefs.save_dark_mode(true).unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["darkMode"], Value::Bool(true));
    }

    #[test]
    fn other_keys_survive_a_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{"units":"metric","darkMode":false}"#).unwrap();

        JsonFilePreferences::new(&path).save_dark_mode(true).unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["units"], "metric");
        assert_eq!(value["darkMode"], true);
    }

    #[test]
    fn corrupt_file_reads_as_light_mode_and_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "not json").unwrap();
        let prefs = JsonFilePreferences::new(&path);

        assert!(!prefs.load_dark_mode());
        prefs.save_dark_mode(true).unwrap();
        assert!(prefs.load_dark_mode());
    }

    #[test]
    fn non_boolean_value_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{"darkMode":"yes"}"#).unwrap();

        assert!(!JsonFilePreferences::new(&path).load_dark_mode());
    }

    #[test]
    fn memory_store() {
        let prefs = MemoryPreferences::new(true);
        assert!(prefs.load_dark_mode());
        prefs.save_dark_mode(false).unwrap();
        assert!(!prefs.load_dark_mode());
    }
}
