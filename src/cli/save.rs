use crate::{
    error, info,
    management::PlaylistManager,
    spotify::{self, playlist::MAX_TRACKS_PER_REQUEST},
    success,
    types::Playlist,
    utils, warning,
};

pub async fn save(title: String) {
    let playlist = match PlaylistManager::load().await {
        Ok(mgr) => mgr.playlist().clone(),
        Err(e) => error!(
            "No playlist to save. Run tunethatname create first.\n Error: {}",
            e
        ),
    };

    export(&playlist, &title).await;
}

/// Creates `title` on the Spotify account and fills it with the playlist.
pub async fn export(playlist: &Playlist, title: &str) {
    if playlist.is_empty() {
        warning!("Playlist is empty, nothing to save");
        return;
    }

    match spotify::playlist::exists(title).await {
        Ok(true) => {
            warning!("Playlist {} already exists, pick another name with --title", title);
            return;
        }
        Ok(false) => {}
        Err(e) => warning!("Failed to check if playlist exists: {}", e),
    }

    info!("Create playlist {}", title);
    let playlist_id = match spotify::playlist::create(
        title.to_string(),
        utils::playlist_description(playlist),
    )
    .await
    {
        Ok(resp) => resp.id,
        Err(e) => error!("Failed to create playlist: {}", e),
    };

    let uris = playlist.uris();
    for chunk in uris.chunks(MAX_TRACKS_PER_REQUEST) {
        if let Err(e) = spotify::playlist::add_tracks(&playlist_id, chunk).await {
            error!("Failed to add tracks to playlist: {}", e);
        }
    }

    success!("Saved {} songs to playlist {}", uris.len(), title);
}
