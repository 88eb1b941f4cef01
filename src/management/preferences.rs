use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{config, types::SongPreferences};

pub const DEFAULT_PLAYLIST_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StoredPreferences {
    preferences: SongPreferences,
    playlist_size: usize,
}

impl Default for StoredPreferences {
    fn default() -> Self {
        Self {
            preferences: SongPreferences::default(),
            playlist_size: DEFAULT_PLAYLIST_SIZE,
        }
    }
}

/// Default song preferences and playlist size, kept between runs.
pub struct PreferencesManager {
    stored: StoredPreferences,
}

impl PreferencesManager {
    pub fn new(preferences: SongPreferences, playlist_size: usize) -> Self {
        Self {
            stored: StoredPreferences {
                preferences,
                playlist_size,
            },
        }
    }

    /// Loads the saved defaults, or the built-in ones when nothing was saved yet.
    pub async fn load() -> Result<Self, String> {
        let path = Self::path();
        if !path.is_file() {
            return Ok(Self {
                stored: StoredPreferences::default(),
            });
        }

        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let stored: StoredPreferences =
            serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { stored })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.stored).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    pub fn preferences(&self) -> &SongPreferences {
        &self.stored.preferences
    }

    pub fn playlist_size(&self) -> usize {
        self.stored.playlist_size
    }

    pub fn set_preferences(&mut self, preferences: SongPreferences) -> &mut Self {
        self.stored.preferences = preferences;
        self
    }

    pub fn set_playlist_size(&mut self, playlist_size: usize) -> &mut Self {
        self.stored.playlist_size = playlist_size;
        self
    }

    fn path() -> PathBuf {
        config::data_path("preferences.json")
    }
}
