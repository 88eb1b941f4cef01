//! # API Module
//!
//! Endpoints of the short-lived local server used during `tunethatname auth`.
//!
//! - [`callback`] - receives Spotify's redirect and exchanges the
//!   authorization code for a token (PKCE)
//! - [`health`] - reports status and version
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use tunethatname::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
