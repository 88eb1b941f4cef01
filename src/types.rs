use std::{
    collections::BTreeSet,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// An address-book entry.
///
/// Two contacts are equal when their id and both name parts match; the
/// display name is derived data and does not take part in identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub full_name: String,
}

impl Contact {
    pub fn new(id: i64, first_name: Option<&str>, last_name: Option<&str>) -> Self {
        let full_name = [first_name, last_name]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            id,
            first_name: first_name.map(str::to_string),
            last_name: last_name.map(str::to_string),
            full_name,
        }
    }

    /// The trimmed first name, or `None` when it is missing or blank.
    pub fn search_name(&self) -> Option<&str> {
        self.first_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

impl PartialEq for Contact {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.first_name == other.first_name
            && self.last_name == other.last_name
    }
}

impl Eq for Contact {}

impl Hash for Contact {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.first_name.hash(state);
        self.last_name.hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Characteristic {
    Popular,
    Positive,
    Negative,
    Energetic,
    Chill,
}

impl Characteristic {
    pub const ALL: [Characteristic; 5] = [
        Characteristic::Popular,
        Characteristic::Positive,
        Characteristic::Negative,
        Characteristic::Energetic,
        Characteristic::Chill,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Characteristic::Popular => "popular",
            Characteristic::Positive => "positive",
            Characteristic::Negative => "negative",
            Characteristic::Energetic => "energetic",
            Characteristic::Chill => "chill",
        }
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Characteristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Characteristic::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| {
                format!(
                    "invalid characteristic '{}'; expected one of: {}",
                    s,
                    Characteristic::ALL
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

/// A set of independent mood/popularity flags that steer song selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongPreferences {
    characteristics: BTreeSet<Characteristic>,
}

impl SongPreferences {
    pub fn new(characteristics: impl IntoIterator<Item = Characteristic>) -> Self {
        Self {
            characteristics: characteristics.into_iter().collect(),
        }
    }

    pub fn contains(&self, characteristic: Characteristic) -> bool {
        self.characteristics.contains(&characteristic)
    }

    pub fn is_empty(&self) -> bool {
        self.characteristics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Characteristic> + '_ {
        self.characteristics.iter().copied()
    }
}

impl fmt::Display for SongPreferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.characteristics.is_empty() {
            return f.write_str("none");
        }
        let joined = self
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

/// A playable track.
///
/// Identity is the pair (title, uri). The artist list only describes the
/// song, so two records differing in artists alone are the same song.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub artist_names: Vec<String>,
    pub uri: String,
}

impl Song {
    pub fn new(title: impl Into<String>, artist_names: Vec<String>, uri: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist_names,
            uri: uri.into(),
        }
    }

    /// Artist credit for display: "A", "A and B", "A, B and C".
    pub fn display_artist_name(&self) -> Option<String> {
        match self.artist_names.as_slice() {
            [] => None,
            [only] => Some(only.clone()),
            [init @ .., last] => Some(format!("{} and {}", init.join(", "), last)),
        }
    }
}

impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title && self.uri == other.uri
    }
}

impl Eq for Song {}

impl Hash for Song {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.title.hash(state);
        self.uri.hash(state);
    }
}

/// A raw search hit before ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct SongCandidate {
    pub title: String,
    pub artist_id: Option<String>,
    pub artist_names: Vec<String>,
    pub uri: String,
    pub song_discovery: Option<f64>,
    pub artist_discovery: Option<f64>,
}

impl SongCandidate {
    /// Key used to keep one song per artist. Falls back to the lowercased
    /// artist credit when the source omits an id, and to the track uri when
    /// the credit is missing too, so uncredited songs never collide.
    pub fn artist_key(&self) -> String {
        if let Some(id) = self.artist_id.as_deref().filter(|id| !id.trim().is_empty()) {
            return id.to_string();
        }

        let credit = self.artist_names.join(",").trim().to_lowercase();
        if credit.trim_matches(',').trim().is_empty() {
            format!("uri:{}", self.uri)
        } else {
            credit
        }
    }

    pub fn into_song(self) -> Song {
        Song::new(self.title, self.artist_names, self.uri)
    }
}

/// A search term together with the contact it was taken from, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchName {
    pub term: String,
    pub contact: Option<Contact>,
}

impl SearchName {
    pub fn from_contact(contact: &Contact) -> Option<Self> {
        contact.search_name().map(|name| Self {
            term: name.to_string(),
            contact: Some(contact.clone()),
        })
    }

    pub fn free_text(term: &str) -> Option<Self> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }
        Some(Self {
            term: term.to_string(),
            contact: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub song: Song,
    pub contact: Option<Contact>,
}

/// Ordered songs with their provenance. No two items share a song.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    items: Vec<PlaylistItem>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[PlaylistItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, song: &Song) -> bool {
        self.items.iter().any(|item| &item.song == song)
    }

    /// Appends an item. Returns `false` and leaves the playlist untouched
    /// when the song is already present.
    pub fn push(&mut self, item: PlaylistItem) -> bool {
        if self.contains(&item.song) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<PlaylistItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from >= self.items.len() || to >= self.items.len() {
            return false;
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        true
    }

    pub fn songs(&self) -> Vec<Song> {
        self.items.iter().map(|item| item.song.clone()).collect()
    }

    pub fn uris(&self) -> Vec<String> {
        self.items.iter().map(|item| item.song.uri.clone()).collect()
    }
}

impl FromIterator<PlaylistItem> for Playlist {
    fn from_iter<I: IntoIterator<Item = PlaylistItem>>(iter: I) -> Self {
        let mut playlist = Playlist::new();
        for item in iter {
            playlist.push(item);
        }
        playlist
    }
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub title: String,
    pub artists: String,
    pub contact: String,
}

// Metadata service wire format.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongSearchResponse {
    pub response: SongSearchBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongSearchBody {
    pub status: ServiceStatus,
    #[serde(default)]
    pub songs: Vec<SearchSong>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSong {
    pub title: String,
    #[serde(default)]
    pub artist_id: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub song_discovery: Option<f64>,
    #[serde(default)]
    pub artist_discovery: Option<f64>,
    #[serde(default)]
    pub tracks: Vec<SearchTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTrack {
    pub foreign_id: String,
}

// Spotify Web API.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserPlaylistsResponse {
    pub items: Vec<RemotePlaylist>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemotePlaylist {
    pub id: String,
    pub name: String,
}
