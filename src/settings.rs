use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::{
    composting::StageTimings,
    waste::{ALERT_CONTACT, ALERT_MESSAGE},
};

/// Who gets the "bin is full" message, and what it says.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AlertSettings {
    pub contact: String,
    pub message: String,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            contact: ALERT_CONTACT.into(),
            message: ALERT_MESSAGE.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UserSettings {
    pub alert: AlertSettings,
    /// Divides every composting stage duration; `1` is real time.
    pub stage_time_scale: u32,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            alert: AlertSettings::default(),
            stage_time_scale: 1,
        }
    }
}

impl UserSettings {
    pub fn stage_timings(&self) -> StageTimings {
        StageTimings::scaled(self.stage_time_scale)
    }
}

/// JSON-backed settings. A missing or unreadable file yields defaults.
pub struct SettingsStore {
    path: Option<PathBuf>,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log::warn!("Ignoring malformed settings in {}: {err}", path.display());
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path: Some(path),
            data: RwLock::new(data),
        })
    }

    /// Settings that are never written to disk.
    pub fn in_memory(data: UserSettings) -> Self {
        Self {
            path: None,
            data: RwLock::new(data),
        }
    }

    pub fn current(&self) -> UserSettings {
        self.read().clone()
    }

    pub fn alert(&self) -> AlertSettings {
        self.read().alert.clone()
    }

    pub fn update_alert(&self, alert: AlertSettings) -> Result<()> {
        let mut guard = self.write();
        guard.alert = alert;
        self.persist(&guard)
    }

    /// `WTRASH_DEBUG=1` turns stage minutes into seconds for demos.
    pub fn apply_env_overrides(&self) {
        let debug_mode = std::env::var("WTRASH_DEBUG")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        if debug_mode {
            log::info!("WTRASH_DEBUG set");
            self.enable_fast_stages();
        }
    }

    /// Runs composting stages 60x faster. Not persisted.
    pub fn enable_fast_stages(&self) {
        log::info!("Composting stages run 60x faster");
        self.write().stage_time_scale = 60;
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(path, serialized)
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }

    fn read(&self) -> RwLockReadGuard<'_, UserSettings> {
        match self.data.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, UserSettings> {
        match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();
        assert_eq!(store.current(), UserSettings::default());
        assert_eq!(store.alert().contact, ALERT_CONTACT);
    }

    #[test]
    fn updates_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = SettingsStore::new(path.clone()).unwrap();
        store
            .update_alert(AlertSettings {
                contact: "6289999".into(),
                message: "Kosongkan ya".into(),
            })
            .unwrap();

        let reloaded = SettingsStore::new(path).unwrap();
        assert_eq!(reloaded.alert().contact, "6289999");
        assert_eq!(reloaded.current().stage_time_scale, 1);
    }

    #[test]
    fn partial_files_keep_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "stage_time_scale": 60 }"#).unwrap();

        let store = SettingsStore::new(path).unwrap();
        assert_eq!(store.current().stage_time_scale, 60);
        assert_eq!(store.alert(), AlertSettings::default());
        assert_eq!(store.current().stage_timings().cooling.as_secs(), 2);
    }

    #[test]
    fn partial_alert_keeps_the_default_message_and_scale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{ "alert": { "contact": "628555" }, "stage_time_scale": 60 }"#,
        )
        .unwrap();

        let store = SettingsStore::new(path).unwrap();
        assert_eq!(store.alert().contact, "628555");
        assert_eq!(store.alert().message, ALERT_MESSAGE);
        assert_eq!(store.current().stage_time_scale, 60);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let store = SettingsStore::new(path).unwrap();
        assert_eq!(store.current(), UserSettings::default());
    }
}
