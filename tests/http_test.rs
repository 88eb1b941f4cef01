use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tunethatname::{
    error::SearchError,
    http::{RetryPolicy, send_with_retry},
    search::{MetadataSearchClient, SongCandidateSource},
    types::SongPreferences,
};

/// Replies scripted per hit. The last reply repeats once the script runs out.
#[derive(Clone)]
struct Script {
    hits: Arc<AtomicUsize>,
    replies: Arc<Vec<(StatusCode, Option<&'static str>)>>,
}

async fn scripted(State(script): State<Script>) -> Response {
    let hit = script.hits.fetch_add(1, Ordering::SeqCst);
    let (status, retry_after) = script.replies[hit.min(script.replies.len() - 1)];
    match retry_after {
        Some(secs) => (status, [("retry-after", secs)], "busy").into_response(),
        None => (status, "ok").into_response(),
    }
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn scripted_server(
    replies: Vec<(StatusCode, Option<&'static str>)>,
) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let script = Script {
        hits: hits.clone(),
        replies: Arc::new(replies),
    };
    let router = Router::new().route("/", get(scripted)).with_state(script);
    (serve(router).await, hits)
}

fn quick_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::new(max_attempts, Duration::from_millis(10), Duration::from_secs(1))
}

#[tokio::test]
async fn test_bad_gateway_is_retried() {
    let (url, hits) =
        scripted_server(vec![(StatusCode::BAD_GATEWAY, None), (StatusCode::OK, None)]).await;
    let client = reqwest::Client::new();

    let response = send_with_retry(&quick_policy(3), || client.get(&url))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_rate_limit_waits_for_retry_after() {
    let (url, hits) = scripted_server(vec![
        (StatusCode::TOO_MANY_REQUESTS, Some("0")),
        (StatusCode::OK, None),
    ])
    .await;
    let client = reqwest::Client::new();

    let response = send_with_retry(&quick_policy(3), || client.get(&url))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_long_retry_after_gives_up() {
    let (url, hits) =
        scripted_server(vec![(StatusCode::TOO_MANY_REQUESTS, Some("1000"))]).await;
    let client = reqwest::Client::new();

    let err = send_with_retry(&quick_policy(3), || client.get(&url))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::TOO_MANY_REQUESTS));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_attempts_are_bounded() {
    let (url, hits) = scripted_server(vec![(StatusCode::BAD_GATEWAY, None)]).await;
    let client = reqwest::Client::new();

    let err = send_with_retry(&quick_policy(3), || client.get(&url))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_other_errors_are_not_retried() {
    let (url, hits) = scripted_server(vec![(StatusCode::NOT_FOUND, None)]).await;
    let client = reqwest::Client::new();

    let err = send_with_retry(&quick_policy(3), || client.get(&url))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

async fn song_search() -> Json<serde_json::Value> {
    Json(json!({
        "response": {
            "status": { "code": 0, "message": "Success" },
            "songs": [
                {
                    "title": "Johnny B. Goode",
                    "artist_id": "AR1",
                    "artist_name": "Chuck Berry",
                    "song_discovery": 0.4,
                    "tracks": [{ "foreign_id": "spotify:track:1" }]
                },
                {
                    "title": "Johnny Remembered",
                    "artist_id": "AR2",
                    "artist_name": "Nobody",
                    "tracks": []
                }
            ]
        }
    }))
}

async fn song_search_denied() -> Json<serde_json::Value> {
    Json(json!({
        "response": {
            "status": { "code": 1, "message": "Invalid API key" }
        }
    }))
}

#[tokio::test]
async fn test_metadata_client_maps_songs_with_tracks() {
    let url = serve(Router::new().route("/song/search", get(song_search))).await;
    let client = MetadataSearchClient::new(url, "key".to_string()).unwrap();

    let candidates = client
        .search("Johnny", &SongPreferences::default(), 10, None)
        .await
        .unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].title, "Johnny B. Goode");
    assert_eq!(candidates[0].artist_id.as_deref(), Some("AR1"));
    assert_eq!(candidates[0].artist_names, vec!["Chuck Berry".to_string()]);
    assert_eq!(candidates[0].uri, "spotify:track:1");
    assert_eq!(candidates[0].song_discovery, Some(0.4));
    assert_eq!(candidates[0].artist_discovery, None);
}

#[tokio::test]
async fn test_metadata_client_reports_service_status() {
    let url = serve(Router::new().route("/song/search", get(song_search_denied))).await;
    let client = MetadataSearchClient::new(format!("{}/", url), "bad".to_string()).unwrap();

    let err = client
        .search("Johnny", &SongPreferences::default(), 10, None)
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Status { code: 1, .. }));
}
