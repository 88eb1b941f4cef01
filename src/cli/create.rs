use std::{path::PathBuf, sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    cli::save,
    config::{self, EngineSettings},
    contacts::FileContactsProvider,
    engine::PlaylistAssemblyEngine,
    error,
    error::PlaylistError,
    info,
    management::{PlaylistManager, PreferencesManager},
    search::MetadataSearchClient,
    success,
    types::SongPreferences,
    utils, warning,
};

pub async fn create(
    size: Option<usize>,
    preferences: Option<SongPreferences>,
    names: Vec<String>,
    contacts: Option<PathBuf>,
    save_as: Option<String>,
) {
    let defaults = match PreferencesManager::load().await {
        Ok(mgr) => Some(mgr),
        Err(e) => {
            warning!("Failed to load saved preferences, using defaults. Err: {}", e);
            None
        }
    };
    let number_of_songs = size
        .or_else(|| defaults.as_ref().map(|d| d.playlist_size()))
        .unwrap_or(crate::management::DEFAULT_PLAYLIST_SIZE);
    let preferences = preferences
        .or_else(|| defaults.as_ref().map(|d| d.preferences().clone()))
        .unwrap_or_default();

    let source = match MetadataSearchClient::from_env() {
        Ok(client) => client,
        Err(e) => error!("Cannot set up song search. Err: {}", e),
    };
    let contacts_path = contacts.unwrap_or_else(config::contacts_file);

    let engine = PlaylistAssemblyEngine::new(
        Arc::new(FileContactsProvider::new(contacts_path.clone())),
        Arc::new(source),
        EngineSettings::from_env(),
    )
    .with_locale(config::locale());

    info!(
        "Building a playlist of {} songs (preferences: {})",
        number_of_songs, preferences
    );

    let pb = ProgressBar::new_spinner();
    pb.set_message("Matching names to songs...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = if names.is_empty() {
        engine.create_playlist(number_of_songs, &preferences).await
    } else {
        engine
            .create_playlist_from_names(&names, number_of_songs, &preferences)
            .await
    };
    pb.finish_and_clear();

    let playlist = match result {
        Ok(playlist) => playlist,
        Err(PlaylistError::NoContactsAvailable) => error!(
            "None of your contacts has a first name to search for. Add contacts or pass --name."
        ),
        Err(PlaylistError::ContactsAccessDenied(reason)) => error!(
            "Cannot read contacts from {}. Err: {}",
            contacts_path.display(),
            reason
        ),
        Err(PlaylistError::AggregateSearchFailure { last, .. }) => error!(
            "Too many song searches failed, please try again later. Last error: {}",
            last
        ),
        Err(PlaylistError::NotEnoughSongs { requested, filled }) => error!(
            "Only found {} of {} songs. Try a smaller playlist or different preferences.",
            filled,
            requested
        ),
        Err(e) => error!("Cannot create playlist. Err: {}", e),
    };

    println!("{}", Table::new(utils::playlist_rows(&playlist)));
    success!("Playlist with {} songs created", playlist.len());

    if let Err(e) = PlaylistManager::new(playlist.clone()).persist().await {
        warning!("Failed to cache playlist: {}", e);
    }

    if let Some(title) = save_as {
        save::export(&playlist, &title).await;
    } else {
        info!("Run tunethatname save to add it to your Spotify account");
    }
}
