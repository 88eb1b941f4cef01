mod auth;
mod playlist;
mod preferences;

pub use auth::TokenManager;
pub use playlist::PlaylistManager;
pub use preferences::DEFAULT_PLAYLIST_SIZE;
pub use preferences::PreferencesManager;
