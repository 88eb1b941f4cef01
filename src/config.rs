//! Configuration management for Tune That Name.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Process environment always wins over
//! the file because `dotenv` never overrides variables that are already set.
//!
//! The lookup order is:
//! 1. Environment variables
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, str::FromStr};

/// Directory name used below the platform's local data directory.
pub const APP_DIR: &str = "tunethatname";

/// Returns `<data_local_dir>/tunethatname/<relative>`.
///
/// Falls back to the current directory when the platform has no local data
/// directory.
pub fn data_path(relative: &str) -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path.push(relative);
    path
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the application directory if needed. A missing `.env` file is not
/// an error, every setting can also come straight from the environment.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/tunethatname/.env`
/// - macOS: `~/Library/Application Support/tunethatname/.env`
/// - Windows: `%LOCALAPPDATA%/tunethatname/.env`
///
/// # Errors
///
/// Returns an error if the directory cannot be created or an existing `.env`
/// file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_path(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn required(key: &str) -> Result<String, String> {
    env::var(key).map_err(|_| format!("{} must be set", key))
}

fn optional<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.trim().parse().ok())
}

/// Address and port the local OAuth callback server binds to, e.g. `127.0.0.1:8080`.
pub fn server_addr() -> Result<String, String> {
    required("SERVER_ADDRESS")
}

/// Spotify user that owns exported playlists.
pub fn spotify_user() -> Result<String, String> {
    required("SPOTIFY_USER_ID")
}

pub fn spotify_client_id() -> Result<String, String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Must match the redirect URI registered for the Spotify application.
pub fn spotify_redirect_uri() -> Result<String, String> {
    required("SPOTIFY_API_REDIRECT_URI")
}

/// Permissions requested during login, e.g. `playlist-modify-private playlist-read-private`.
pub fn spotify_scope() -> Result<String, String> {
    required("SPOTIFY_API_AUTH_SCOPE")
}

/// e.g. `https://accounts.spotify.com/authorize`
pub fn spotify_apiauth_url() -> Result<String, String> {
    required("SPOTIFY_API_AUTH_URL")
}

/// e.g. `https://api.spotify.com/v1`
pub fn spotify_apiurl() -> Result<String, String> {
    required("SPOTIFY_API_URL")
}

/// e.g. `https://accounts.spotify.com/api/token`
pub fn spotify_apitoken_url() -> Result<String, String> {
    required("SPOTIFY_API_TOKEN_URL")
}

/// Base URL of the song metadata service. The client appends `/song/search`.
pub fn metadata_api_url() -> Result<String, String> {
    required("METADATA_API_URL")
}

pub fn metadata_api_key() -> Result<String, String> {
    required("METADATA_API_KEY")
}

/// Path of the JSON contacts export used as the address book.
pub fn contacts_file() -> PathBuf {
    env::var("TTN_CONTACTS_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| data_path("contacts.json"))
}

/// Optional locale hint forwarded to the metadata service.
pub fn locale() -> Option<String> {
    env::var("TTN_LOCALE").ok().filter(|l| !l.trim().is_empty())
}

/// Tuning constants for playlist assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    /// Candidates requested per name for small playlists.
    pub base_search_size: usize,
    /// Upper bound for the per-name request size.
    pub max_search_size: usize,
    /// Assembly aborts once failed searches reach this share of all attempts.
    pub failure_threshold_percent: usize,
    /// Weight of the song-level discovery metric against the artist-level one.
    pub song_discovery_weight: f64,
    /// Largest playlist a single request may ask for.
    pub max_playlist_size: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            base_search_size: 20,
            max_search_size: 100,
            failure_threshold_percent: 20,
            song_discovery_weight: 250.0,
            max_playlist_size: 500,
        }
    }
}

impl EngineSettings {
    /// Defaults overridden by any `TTN_*` variables that parse.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_search_size: defaults.base_search_size,
            max_search_size: optional("TTN_MAX_SEARCH_SIZE").unwrap_or(defaults.max_search_size),
            failure_threshold_percent: optional("TTN_FAILURE_THRESHOLD_PERCENT")
                .unwrap_or(defaults.failure_threshold_percent),
            song_discovery_weight: optional("TTN_SONG_DISCOVERY_WEIGHT")
                .unwrap_or(defaults.song_discovery_weight),
            max_playlist_size: optional("TTN_MAX_PLAYLIST_SIZE")
                .unwrap_or(defaults.max_playlist_size),
        }
    }

    /// Candidates to request per name search.
    ///
    /// Larger playlists are more likely to need substitutes, so they ask for
    /// twice the base batch to cut down on repeat calls.
    pub fn search_size(&self, number_of_songs: usize) -> usize {
        if number_of_songs > self.base_search_size / 2 {
            (self.base_search_size * 2).min(self.max_search_size)
        } else {
            self.base_search_size.min(self.max_search_size)
        }
    }

    /// Whether a playlist of `number_of_songs` may be assembled at all.
    pub fn accepts_size(&self, number_of_songs: usize) -> bool {
        (1..=self.max_playlist_size).contains(&number_of_songs)
    }

    /// Whether `failures` out of `attempts` meets the abort threshold.
    pub fn failure_threshold_reached(&self, failures: usize, attempts: usize) -> bool {
        failures > 0 && failures * 100 >= attempts * self.failure_threshold_percent
    }
}
