use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

/// User-facing toggles that survive restarts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Preference {
    HideStatusBar,
}

impl Preference {
    pub fn default_value(&self) -> bool {
        match self {
            Self::HideStatusBar => false,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::HideStatusBar => "Hide Status Bar",
        }
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to determine data directory")]
    DataDirNotFound,
    #[error("Settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed settings file: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait SettingsStore {
    fn get(&self, key: Preference) -> bool;

    fn set(&mut self, key: Preference, value: bool) -> Result<(), SettingsError>;

    /// Picks up changes made outside this process.
    fn reload(&mut self) -> Result<(), SettingsError> {
        Ok(())
    }

    fn toggle(&mut self, key: Preference) -> Result<bool, SettingsError> {
        let value = !self.get(key);
        self.set(key, value)?;
        Ok(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
struct Values(BTreeMap<Preference, bool>);

impl Values {
    fn get(&self, key: Preference) -> bool {
        self.0.get(&key).copied().unwrap_or_else(|| key.default_value())
    }
}

/// Keeps preferences for the lifetime of the process only.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    values: Values,
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: Preference) -> bool {
        self.values.get(key)
    }

    fn set(&mut self, key: Preference, value: bool) -> Result<(), SettingsError> {
        self.values.0.insert(key, value);
        Ok(())
    }
}

/// Preferences stored as a small JSON object, written on every change.
#[derive(Debug, Clone)]
pub struct JsonSettings {
    path: PathBuf,
    values: Values,
}

impl JsonSettings {
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let dirs =
            ProjectDirs::from("org", "troia", "dial-lock").ok_or(SettingsError::DataDirNotFound)?;
        Ok(dirs.data_dir().join("settings.json"))
    }

    /// Reads `path`, starting from defaults when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let values = match fs_err::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Values::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs_err::create_dir_all(parent)?;
        }
        fs_err::write(&self.path, serde_json::to_string_pretty(&self.values)?)?;
        Ok(())
    }
}

impl SettingsStore for JsonSettings {
    fn get(&self, key: Preference) -> bool {
        self.values.get(key)
    }

    fn set(&mut self, key: Preference, value: bool) -> Result<(), SettingsError> {
        self.values.0.insert(key, value);
        self.save()
    }

    fn reload(&mut self) -> Result<(), SettingsError> {
        *self = Self::open(self.path.clone())?;
        Ok(())
    }
}

/// Every preference with its current value, in declaration order.
pub fn snapshot(store: &impl SettingsStore) -> Vec<(Preference, bool)> {
    Preference::iter().map(|p| (p, store.get(p))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("dial-lock-test-{}-{name}", std::process::id()))
            .join("settings.json")
    }

    #[test]
    fn test_preference_names() {
        assert_eq!(Preference::HideStatusBar.to_string(), "hide_status_bar");
        assert_eq!(
            Preference::from_str("hide_status_bar").unwrap(),
            Preference::HideStatusBar
        );
        let json = serde_json::to_string(&Preference::HideStatusBar).unwrap();
        assert_eq!(json, "\"hide_status_bar\"");
    }

    #[test]
    fn test_memory_store_defaults_and_toggle() {
        let mut store = MemorySettings::default();
        assert!(!store.get(Preference::HideStatusBar));
        assert!(store.toggle(Preference::HideStatusBar).unwrap());
        assert!(store.get(Preference::HideStatusBar));
        assert_eq!(snapshot(&store), vec![(Preference::HideStatusBar, true)]);
    }

    #[test]
    fn test_json_store_persists() {
        let path = temp_path("persist");
        let _ = fs_err::remove_file(&path);

        let mut store = JsonSettings::open(&path).unwrap();
        assert!(!store.get(Preference::HideStatusBar));
        store.set(Preference::HideStatusBar, true).unwrap();

        let reopened = JsonSettings::open(&path).unwrap();
        assert!(reopened.get(Preference::HideStatusBar));

        let raw = fs_err::read_to_string(&path).unwrap();
        assert!(raw.contains("\"hide_status_bar\": true"));

        let _ = fs_err::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_json_store_rejects_garbage() {
        let path = temp_path("garbage");
        fs_err::create_dir_all(path.parent().unwrap()).unwrap();
        fs_err::write(&path, "not json").unwrap();

        assert!(matches!(
            JsonSettings::open(&path),
            Err(SettingsError::Json(_))
        ));

        let _ = fs_err::remove_dir_all(path.parent().unwrap());
    }
}
