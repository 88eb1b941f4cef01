use std::path::PathBuf;

use tunethatname::{
    config::{self, EngineSettings},
    contacts::{ContactsProvider, FileContactsProvider},
    error::PlaylistError,
};

fn temp_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("tunethatname-{}-{}", std::process::id(), name));
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_engine_defaults() {
    let settings = EngineSettings::default();

    assert_eq!(settings.base_search_size, 20);
    assert_eq!(settings.max_search_size, 100);
    assert_eq!(settings.failure_threshold_percent, 20);
    assert_eq!(settings.song_discovery_weight, 250.0);
    assert_eq!(settings.max_playlist_size, 500);
}

#[test]
fn test_accepts_size() {
    let settings = EngineSettings::default();

    assert!(!settings.accepts_size(0));
    assert!(settings.accepts_size(1));
    assert!(settings.accepts_size(500));
    assert!(!settings.accepts_size(501));
    assert!(!settings.accepts_size(usize::MAX));
}

#[test]
fn test_search_size() {
    let settings = EngineSettings::default();

    assert_eq!(settings.search_size(1), 20);
    assert_eq!(settings.search_size(10), 20);
    assert_eq!(settings.search_size(11), 40);
    assert_eq!(settings.search_size(500), 40);

    let capped = EngineSettings {
        max_search_size: 30,
        ..EngineSettings::default()
    };
    assert_eq!(capped.search_size(11), 30);
    assert_eq!(capped.search_size(3), 20);
}

#[test]
fn test_failure_threshold() {
    let settings = EngineSettings::default();

    assert!(!settings.failure_threshold_reached(0, 0));
    assert!(!settings.failure_threshold_reached(0, 5));
    assert!(!settings.failure_threshold_reached(1, 6));
    assert!(settings.failure_threshold_reached(1, 5));
    assert!(settings.failure_threshold_reached(3, 3));
    assert!(!settings.failure_threshold_reached(19, 100));
    assert!(settings.failure_threshold_reached(20, 100));
}

#[test]
fn test_data_path() {
    let path = config::data_path("contacts.json");

    assert!(path.ends_with("tunethatname/contacts.json"));
}

#[tokio::test]
async fn test_file_contacts_provider() {
    let path = temp_file(
        "contacts.json",
        r#"[
            {"id": 1, "first_name": "Johnny", "last_name": "Cash", "full_name": "Johnny Cash"},
            {"id": 2, "first_name": "Billy", "last_name": null},
            {"id": 3, "last_name": "Nobody"}
        ]"#,
    );

    let contacts = FileContactsProvider::new(path.clone()).contacts().await.unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(contacts.len(), 3);
    assert_eq!(contacts[0].full_name, "Johnny Cash");
    assert_eq!(contacts[1].full_name, "Billy");
    assert_eq!(contacts[2].search_name(), None);
    assert_eq!(contacts[2].full_name, "Nobody");
}

#[tokio::test]
async fn test_file_contacts_provider_missing_file() {
    let path = std::env::temp_dir().join("tunethatname-does-not-exist.json");

    let err = FileContactsProvider::new(path).contacts().await.unwrap_err();

    assert!(matches!(err, PlaylistError::ContactsAccessDenied(_)));
}

#[tokio::test]
async fn test_file_contacts_provider_malformed_file() {
    let path = temp_file("broken.json", "{ not json");

    let err = FileContactsProvider::new(path.clone()).contacts().await.unwrap_err();
    let _ = std::fs::remove_file(&path);

    assert!(matches!(err, PlaylistError::ContactsAccessDenied(_)));
}
