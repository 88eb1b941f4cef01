//! # CLI Module
//!
//! User-facing commands. Each command loads what it needs, calls into the
//! library and reports through the `info!`/`success!`/`warning!`/`error!`
//! macros. Errors from the library are turned into messages here and only
//! here.
//!
//! - [`auth`] - log in to Spotify (OAuth 2.0 PKCE)
//! - [`create`] - build a playlist from contact names or `--name` values
//! - [`save`] - export the last playlist to Spotify
//! - [`preferences`] - show or change the default size and characteristics
//!
//! ```bash
//! tunethatname auth
//! tunethatname create --size 12 --prefer chill
//! tunethatname create --name Susie --name Johnny --size 4 --save "Road Trip"
//! tunethatname save --title "Tune That Name"
//! tunethatname preferences --size 15 --prefer popular,positive
//! ```

mod auth;
mod create;
mod preferences;
mod save;

pub use auth::auth;
pub use create::create;
pub use preferences::preferences;
pub use save::save;
