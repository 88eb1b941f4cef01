use crate::{
    error, info,
    management::{DEFAULT_PLAYLIST_SIZE, PreferencesManager},
    success,
    types::SongPreferences,
    warning,
};

pub async fn preferences(size: Option<usize>, preferences: Option<SongPreferences>, clear: bool) {
    let mut mgr = match PreferencesManager::load().await {
        Ok(mgr) => mgr,
        Err(e) => {
            warning!("Saved preferences are unreadable and will be replaced. Err: {}", e);
            PreferencesManager::new(SongPreferences::default(), DEFAULT_PLAYLIST_SIZE)
        }
    };

    let mut changed = false;
    if clear {
        mgr.set_preferences(SongPreferences::default());
        changed = true;
    }
    if let Some(preferences) = preferences {
        mgr.set_preferences(preferences);
        changed = true;
    }
    if let Some(size) = size {
        if size == 0 {
            error!("Playlist size must be greater than zero");
        }
        mgr.set_playlist_size(size);
        changed = true;
    }

    if changed {
        if let Err(e) = mgr.persist().await {
            error!("Failed to save preferences: {}", e);
        }
        success!("Preferences saved");
    }

    info!("Playlist size: {}", mgr.playlist_size());
    info!("Preferences: {}", mgr.preferences());
}
