//! Settings persistence.
//!
//! One JSON file under the user's config directory holds the values the
//! frontend saves explicitly: GitHub token, repository URL, OpenAI key,
//! model, temperature and max-token budget. The file is read once at
//! startup and rewritten on save; a missing or unreadable file falls back
//! to `Settings::default()` per field.

use std::fs;
use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::models::Settings;

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn at_default_location() -> Self {
        let mut path = dirs::config_dir().unwrap_or_else(std::env::temp_dir);
        path.push("repo-env-viewer");
        path.push("settings.json");
        Self { path }
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Settings {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => Settings::default(),
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| AppError::Settings(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| AppError::Settings(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| AppError::Settings(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::{DEFAULT_MODEL, DEFAULT_REPO_URL};

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(dir.path().join("settings.json"));

        let settings = store.load();
        assert_eq!(settings.repo_url, DEFAULT_REPO_URL);
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert!(settings.github_token.is_empty());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(dir.path().join("nested/settings.json"));

        let settings = Settings {
            github_token: "ghp_test".to_string(),
            temperature: 0.2,
            ..Settings::default()
        };
        store.save(&settings).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.github_token, "ghp_test");
        assert_eq!(loaded.temperature, 0.2);
    }

    #[test]
    fn partial_file_fills_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"github_token": "ghp_partial"}"#).unwrap();

        let loaded = SettingsStore::at(path).load();
        assert_eq!(loaded.github_token, "ghp_partial");
        assert_eq!(loaded.model, DEFAULT_MODEL);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let loaded = SettingsStore::at(path).load();
        assert_eq!(loaded.repo_url, DEFAULT_REPO_URL);
    }
}
