use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use rotary::dial::{DEFAULT_RANGE, MAX_RANGE};
use rotary::passcode::DEFAULT_CODE_LENGTH;
use rotary::scene::DEFAULT_LABEL_EVERY;
use rotary::settings::JsonSettings;
use rotary::{DialConfig, DialRange};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::PathBuf;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

/// What the dial does when the selected number changes under the indicator.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    #[default]
    #[strum(serialize = "none", serialize = "off", serialize = "0")]
    None,
    #[strum(serialize = "bell", serialize = "on", serialize = "1")]
    Bell,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DialSection {
    pub range: i64,
    pub show_numbers: bool,
    pub label_every: u32,
    pub snap: bool,
    pub feedback: Feedback,
}

impl Default for DialSection {
    fn default() -> Self {
        Self {
            range: i64::from(DEFAULT_RANGE),
            show_numbers: true,
            label_every: DEFAULT_LABEL_EVERY,
            snap: true,
            feedback: Feedback::None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PasscodeSection {
    pub code_length: usize,
}

impl Default for PasscodeSection {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub dial: DialSection,
    #[serde(default)]
    pub passcode: PasscodeSection,
}

impl Config {
    pub fn dial_config(&self) -> DialConfig {
        if self.dial.range < 1 {
            log::warn!("dial range {} is below 1, using a single position", self.dial.range);
        } else if self.dial.range > i64::from(MAX_RANGE) {
            log::warn!(
                "dial range {} is above {}, using {}",
                self.dial.range,
                MAX_RANGE,
                MAX_RANGE
            );
        }
        DialConfig {
            range: DialRange::new(self.dial.range),
            snap: self.dial.snap,
            show_numbers: self.dial.show_numbers,
        }
    }

    pub fn code_length(&self) -> usize {
        self.passcode.code_length.max(1)
    }
}

/// Values given on the command line. They win over the file and the
/// environment, including after a live reload.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub range: Option<i64>,
    pub code_length: Option<usize>,
    pub no_snap: bool,
    pub hide_numbers: bool,
}

impl Overrides {
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(range) = self.range {
            config.dial.range = range;
        }
        if let Some(code_length) = self.code_length {
            config.passcode.code_length = code_length;
        }
        if self.no_snap {
            config.dial.snap = false;
        }
        if self.hide_numbers {
            config.dial.show_numbers = false;
        }
        config
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "troia", "dial-lock").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("DIAL_LOCK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Watches the config file and the settings file, forwarding changes to the UI.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let settings_path = JsonSettings::default_path().ok();

    let watched = [Some(&config_path), settings_path.as_ref()]
        .into_iter()
        .flatten()
        .filter_map(|p| p.parent())
        .map(PathBuf::from)
        .collect::<Vec<_>>();

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    for dir in &watched {
        if let Err(e) = fs_err::create_dir_all(dir) {
            log::error!("Failed to create directory for watching: {}", e);
            continue;
        }
        if let Err(e) = watcher.watch(dir, RecursiveMode::NonRecursive) {
            log::error!("Failed to watch {}: {}", dir.display(), e);
        }
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );
                if !meaningful_event {
                    continue;
                }

                let app_event = if event.paths.iter().any(|p| p == &config_path) {
                    Some(AppEvent::ConfigReload)
                } else if event.paths.iter().any(|p| Some(p) == settings_path.as_ref()) {
                    Some(AppEvent::SettingsReload)
                } else {
                    None
                };

                if let Some(app_event) = app_event
                    && tx.send(app_event).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_deserialization() {
        let cases = vec![
            ("\"none\"", Feedback::None),
            ("\"None\"", Feedback::None),
            ("\"off\"", Feedback::None),
            ("\"0\"", Feedback::None),
            ("\"bell\"", Feedback::Bell),
            ("\"BELL\"", Feedback::Bell),
            ("\"on\"", Feedback::Bell),
        ];

        for (json, expected) in cases {
            let deserialized: Feedback = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<Feedback>("\"buzz\"").is_err());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = serde_json::from_str(r#"{ "dial": { "range": 60 } }"#).unwrap();
        assert_eq!(config.dial.range, 60);
        assert!(config.dial.snap);
        assert_eq!(config.dial.label_every, DEFAULT_LABEL_EVERY);
        assert_eq!(config.code_length(), DEFAULT_CODE_LENGTH);
    }

    #[test]
    fn test_bad_values_are_clamped() {
        let config: Config = serde_json::from_str(
            r#"{ "dial": { "range": -5, "snap": false }, "passcode": { "code_length": 0 } }"#,
        )
        .unwrap();
        let dial = config.dial_config();
        assert_eq!(*dial.range, 1);
        assert!(!dial.snap);
        assert_eq!(config.code_length(), 1);
    }

    #[test]
    fn test_huge_range_is_capped() {
        let overrides = Overrides {
            range: Some(1_000_000_000),
            ..Overrides::default()
        };
        let config = overrides.apply(Config::default());
        assert_eq!(*config.dial_config().range, MAX_RANGE);
    }

    #[test]
    fn test_overrides_win() {
        let overrides = Overrides {
            range: Some(12),
            code_length: None,
            no_snap: true,
            hide_numbers: false,
        };
        let config = overrides.apply(Config::default());
        assert_eq!(config.dial.range, 12);
        assert!(!config.dial.snap);
        assert!(config.dial.show_numbers);
        assert_eq!(config.passcode.code_length, DEFAULT_CODE_LENGTH);
    }

    #[test]
    fn test_default_config_file_parses() {
        let parsed: Config = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(parsed.dial.range, i64::from(DEFAULT_RANGE));
        assert_eq!(parsed.dial.feedback, Feedback::None);
        assert_eq!(parsed.passcode.code_length, DEFAULT_CODE_LENGTH);
    }
}
