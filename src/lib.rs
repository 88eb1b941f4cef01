//! Tune That Name
//!
//! Builds playlists by matching the first names of your contacts to song
//! titles, then exports them to a Spotify account.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Environment configuration and engine tuning
//! - `contacts` - Address-book access and search-name planning
//! - `engine` - Concurrent playlist assembly
//! - `error` - Error types
//! - `http` - Retrying request sender shared by the HTTP clients
//! - `management` - Local persistence (token, preferences, last playlist)
//! - `search` - Song search, ranking and title rules
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client
//! - `types` - Data structures
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tunethatname::{config, contacts, engine, search, types};
//!
//! #[tokio::main]
//! async fn main() -> tunethatname::Res<()> {
//!     config::load_env().await?;
//!     let engine = engine::PlaylistAssemblyEngine::new(
//!         Arc::new(contacts::FileContactsProvider::new(config::contacts_file())),
//!         Arc::new(search::MetadataSearchClient::from_env()?),
//!         config::EngineSettings::from_env(),
//!     );
//!     let playlist = engine
//!         .create_playlist(10, &types::SongPreferences::default())
//!         .await?;
//!     println!("{} songs", playlist.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod contacts;
pub mod engine;
pub mod error;
pub mod http;
pub mod management;
pub mod search;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the I/O edges of the application (Spotify calls, the callback
/// server, the binary). The playlist core returns typed errors instead.
///
/// # Example
///
/// ```
/// use tunethatname::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational line with a blue bullet.
///
/// ```
/// info!("Building a playlist of {} songs", size);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success line with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error line with a red exclamation mark and exits with status 1.
///
/// Only for failures the command cannot recover from. Code after the macro
/// does not run, so it can stand in for a value in `match` arms:
///
/// ```
/// let client = match MetadataSearchClient::from_env() {
///     Ok(client) => client,
///     Err(e) => error!("Cannot set up song search. Err: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning line with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
