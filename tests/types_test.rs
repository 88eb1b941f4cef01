use std::collections::HashSet;

use tunethatname::types::{
    Characteristic, Contact, Playlist, PlaylistItem, Song, SongCandidate, SongPreferences,
};

fn song(title: &str, artists: &[&str], uri: &str) -> Song {
    Song::new(title, artists.iter().map(|a| a.to_string()).collect(), uri)
}

fn item(title: &str) -> PlaylistItem {
    PlaylistItem {
        song: song(title, &["Someone"], &format!("spotify:track:{}", title)),
        contact: None,
    }
}

fn titles(playlist: &Playlist) -> Vec<String> {
    playlist.songs().into_iter().map(|s| s.title).collect()
}

#[test]
fn test_song_identity_ignores_artists() {
    let a = song("Susie Q", &["Creedence Clearwater Revival"], "spotify:track:1");
    let b = song("Susie Q", &["Dale Hawkins"], "spotify:track:1");
    let c = song("Susie Q", &["Dale Hawkins"], "spotify:track:2");

    assert_eq!(a, b);
    assert_ne!(b, c);

    let set: HashSet<Song> = [a, b, c].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn test_display_artist_name() {
    assert_eq!(song("X", &[], "u").display_artist_name(), None);
    assert_eq!(
        song("X", &["Alpha"], "u").display_artist_name(),
        Some("Alpha".to_string())
    );
    assert_eq!(
        song("X", &["Alpha", "Beta"], "u").display_artist_name(),
        Some("Alpha and Beta".to_string())
    );
    assert_eq!(
        song("X", &["Alpha", "Beta", "Gamma"], "u").display_artist_name(),
        Some("Alpha, Beta and Gamma".to_string())
    );
}

#[test]
fn test_artist_key_fallbacks() {
    let mut candidate = SongCandidate {
        title: "Alice".to_string(),
        artist_id: Some("ar-1".to_string()),
        artist_names: vec!["Tom Waits".to_string()],
        uri: "spotify:track:alice".to_string(),
        song_discovery: None,
        artist_discovery: None,
    };
    assert_eq!(candidate.artist_key(), "ar-1");

    candidate.artist_id = Some("  ".to_string());
    assert_eq!(candidate.artist_key(), "tom waits");

    candidate.artist_id = None;
    candidate.artist_names.clear();
    assert_eq!(candidate.artist_key(), "uri:spotify:track:alice");

    candidate.artist_names = vec![String::new(), " ".to_string()];
    assert_eq!(candidate.artist_key(), "uri:spotify:track:alice");
}

#[test]
fn test_contact_identity() {
    let a = Contact::new(1, Some("Johnny"), Some("Cash"));
    let mut b = Contact::new(1, Some("Johnny"), Some("Cash"));
    b.full_name = "The Man in Black".to_string();
    let c = Contact::new(2, Some("Johnny"), Some("Cash"));

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.full_name, "Johnny Cash");
}

#[test]
fn test_contact_search_name() {
    assert_eq!(Contact::new(1, Some(" Susie "), None).search_name(), Some("Susie"));
    assert_eq!(Contact::new(2, Some("  "), Some("Q")).search_name(), None);
    assert_eq!(Contact::new(3, None, Some("Q")).search_name(), None);
    assert_eq!(Contact::new(3, None, Some("Q")).full_name, "Q");
}

#[test]
fn test_characteristic_parsing() {
    for characteristic in Characteristic::ALL {
        assert_eq!(
            characteristic.to_string().parse::<Characteristic>(),
            Ok(characteristic)
        );
    }
    assert_eq!("POPULAR".parse::<Characteristic>(), Ok(Characteristic::Popular));

    let err = "sad".parse::<Characteristic>().unwrap_err();
    assert!(err.contains("popular, positive, negative, energetic, chill"));
}

#[test]
fn test_song_preferences() {
    let a = SongPreferences::new([Characteristic::Chill, Characteristic::Popular]);
    let b = SongPreferences::new([
        Characteristic::Popular,
        Characteristic::Chill,
        Characteristic::Chill,
    ]);

    assert_eq!(a, b);
    assert!(a.contains(Characteristic::Popular));
    assert!(!a.contains(Characteristic::Negative));
    assert_eq!(a.to_string(), "popular, chill");
    assert_eq!(SongPreferences::default().to_string(), "none");
    assert!(SongPreferences::default().is_empty());
}

#[test]
fn test_playlist_push_rejects_duplicates() {
    let mut playlist = Playlist::new();

    assert!(playlist.push(item("Alice")));
    assert!(playlist.push(item("Bob")));
    assert!(!playlist.push(item("Alice")));
    assert_eq!(playlist.len(), 2);
    assert!(playlist.contains(&item("Bob").song));
}

#[test]
fn test_playlist_collect_skips_duplicates() {
    let playlist: Playlist = vec![item("Alice"), item("Bob"), item("Alice")]
        .into_iter()
        .collect();

    assert_eq!(titles(&playlist), vec!["Alice", "Bob"]);
    assert_eq!(
        playlist.uris(),
        vec!["spotify:track:Alice", "spotify:track:Bob"]
    );
}

#[test]
fn test_playlist_remove() {
    let mut playlist: Playlist = vec![item("Alice"), item("Bob"), item("Carol")]
        .into_iter()
        .collect();

    assert_eq!(playlist.remove(1).map(|i| i.song.title), Some("Bob".to_string()));
    assert!(playlist.remove(5).is_none());
    assert_eq!(titles(&playlist), vec!["Alice", "Carol"]);
}

#[test]
fn test_playlist_move_item() {
    let mut playlist: Playlist = vec![item("Alice"), item("Bob"), item("Carol")]
        .into_iter()
        .collect();

    assert!(playlist.move_item(0, 2));
    assert_eq!(titles(&playlist), vec!["Bob", "Carol", "Alice"]);

    assert!(playlist.move_item(2, 0));
    assert_eq!(titles(&playlist), vec!["Alice", "Bob", "Carol"]);

    assert!(!playlist.move_item(0, 3));
    assert_eq!(playlist.len(), 3);
}

#[test]
fn test_playlist_serializes_items() {
    let playlist: Playlist = vec![item("Alice")].into_iter().collect();

    let json = serde_json::to_string(&playlist).unwrap();
    let restored: Playlist = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, playlist);
}
