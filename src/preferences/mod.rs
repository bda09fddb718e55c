//! Persisted site preferences
//!
//! The color scheme preference lives in an explicit [`ThemeState`] that is
//! loaded from and saved to a [`PreferenceStore`]. The generator reads it to
//! pick the default scheme of generated pages; a reader's own choice, kept
//! by the browser, still takes precedence.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

/// Preference file, relative to the site root
pub const PREFERENCES_FILE: &str = ".folio/preferences.json";

/// Key-value persistence for preferences
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Preferences kept in a JSON object on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store for the site rooted at `base_dir`
    pub fn for_site(base_dir: &Path) -> Self {
        Self::new(base_dir.join(PREFERENCES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or unreadable file counts as empty
    fn read_all(&self) -> BTreeMap<String, String> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        match serde_json::from_str(&content) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!("Ignoring corrupt preferences {:?}: {}", self.path, e);
                BTreeMap::new()
            }
        }
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all().remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all();
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        tracing::debug!("Saved preference {}={} to {:?}", key, value, self.path);
        Ok(())
    }
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| anyhow::anyhow!("preference store poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow::anyhow!("preference store poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Light or dark color scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            other => bail!("Unknown theme: {}. Available: light, dark", other),
        }
    }
}

/// Application state for the color scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemeState {
    preference: ThemePreference,
}

impl ThemeState {
    /// Key under which the preference is stored
    pub const KEY: &'static str = "theme";

    /// Load from `store`; absent or unrecognized values fall back to light
    pub fn load(store: &dyn PreferenceStore) -> Result<Self> {
        let preference = match store.get(Self::KEY)? {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{}; using light", e);
                ThemePreference::default()
            }),
            None => ThemePreference::default(),
        };
        Ok(Self { preference })
    }

    /// Persist the current preference
    pub fn save(&self, store: &dyn PreferenceStore) -> Result<()> {
        store.set(Self::KEY, self.preference.as_str())
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    pub fn set(&mut self, preference: ThemePreference) {
        self.preference = preference;
    }

    /// Flip between light and dark, returning the new preference
    pub fn toggle(&mut self) -> ThemePreference {
        self.preference = self.preference.toggled();
        self.preference
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_to_light() {
        let store = MemoryStore::default();
        let state = ThemeState::load(&store).unwrap();
        assert_eq!(state.preference(), ThemePreference::Light);
    }

    #[test]
    fn test_toggle_and_save() {
        let store = MemoryStore::default();
        let mut state = ThemeState::load(&store).unwrap();
        assert_eq!(state.toggle(), ThemePreference::Dark);
        state.save(&store).unwrap();

        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(
            ThemeState::load(&store).unwrap().preference(),
            ThemePreference::Dark
        );
    }

    #[test]
    fn test_unknown_value_falls_back() {
        let store = MemoryStore::default();
        store.set("theme", "sepia").unwrap();
        assert_eq!(
            ThemeState::load(&store).unwrap().preference(),
            ThemePreference::Light
        );
    }

    #[test]
    fn test_json_file_store() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::for_site(dir.path());
        assert_eq!(store.get("theme").unwrap(), None);

        store.set("theme", "dark").unwrap();
        store.set("other", "kept").unwrap();
        assert!(store.path().exists());

        let reopened = JsonFileStore::for_site(dir.path());
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("kept"));
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::for_site(dir.path());
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn test_parse_preference() {
        assert_eq!("Dark".parse::<ThemePreference>().unwrap(), ThemePreference::Dark);
        assert!("blue".parse::<ThemePreference>().is_err());
    }
}
