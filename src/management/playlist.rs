use std::path::PathBuf;

use crate::{config, types::Playlist};

/// The most recently assembled playlist, cached until it is exported.
pub struct PlaylistManager {
    playlist: Playlist,
}

impl PlaylistManager {
    pub fn new(playlist: Playlist) -> Self {
        Self { playlist }
    }

    pub async fn load() -> Result<Self, String> {
        let content = async_fs::read_to_string(Self::cache_path())
            .await
            .map_err(|e| e.to_string())?;
        let playlist: Playlist = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { playlist })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::cache_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.playlist).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    fn cache_path() -> PathBuf {
        config::data_path("cache/last-playlist.json")
    }
}
