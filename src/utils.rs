use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{Characteristic, Playlist, PlaylistTableRow};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// `clap` value parser for `--prefer`.
pub fn parse_characteristic(s: &str) -> Result<Characteristic, String> {
    s.parse()
}

pub fn playlist_rows(playlist: &Playlist) -> Vec<PlaylistTableRow> {
    playlist
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| PlaylistTableRow {
            position: i + 1,
            title: item.song.title.clone(),
            artists: item.song.display_artist_name().unwrap_or_default(),
            contact: item
                .contact
                .as_ref()
                .map(|c| c.full_name.clone())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

const MAX_DESCRIPTION_CHARS: usize = 300;

/// Description stored with an exported playlist.
pub fn playlist_description(playlist: &Playlist) -> String {
    let mut names: Vec<String> = Vec::new();
    for item in playlist.items() {
        if let Some(name) = item.contact.as_ref().and_then(|c| c.search_name()) {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }

    let description = if names.is_empty() {
        "Made with Tune That Name".to_string()
    } else {
        format!("Made with Tune That Name for {}", names.join(", "))
    };
    description.chars().take(MAX_DESCRIPTION_CHARS).collect()
}
