//! # Spotify Integration
//!
//! Exports assembled playlists to the user's Spotify account.
//!
//! ```text
//! CLI (save, auth)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE, token refresh)
//!     └── Playlist Operations (lookup by name, create, add tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## API Coverage
//!
//! - `GET /me/playlists` - the user's playlists, to avoid duplicate names
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `POST /playlists/{playlist_id}/tracks` - add up to 100 tracks per call
//! - `POST /api/token` - code exchange and token refresh
//!
//! ## Retries
//!
//! Requests are retried a few times on `502 Bad Gateway`. On
//! `429 Too Many Requests` the `Retry-After` header is honoured for pauses up
//! to two minutes.

pub mod auth;
pub mod playlist;

use std::time::Duration;

use crate::http::RetryPolicy;

/// Spotify asks for long pauses under load; 502s usually clear within seconds.
pub(crate) const SPOTIFY_RETRY: RetryPolicy =
    RetryPolicy::new(4, Duration::from_secs(10), Duration::from_secs(120));
