use reqwest::Client;

use crate::{
    Res, config,
    management::TokenManager,
    http::send_with_retry,
    spotify::SPOTIFY_RETRY,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, GetUserPlaylistsResponse,
    },
};

/// Spotify accepts at most this many URIs per add-tracks call.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

async fn token_manager() -> Res<TokenManager> {
    TokenManager::load()
        .await
        .map_err(|e| format!("Failed to load token. Please run tunethatname auth\n Error: {}", e).into())
}

/// Checks whether the user already owns or follows a playlist called `name`.
pub async fn exists(name: &str) -> Res<bool> {
    let mut token_mgr = token_manager().await?;
    let client = Client::new();
    let mut next = Some(format!("{}/me/playlists?limit=50", config::spotify_apiurl()?));

    while let Some(api_url) = next {
        let token = token_mgr.get_valid_token().await;
        let response = send_with_retry(&SPOTIFY_RETRY, || client.get(&api_url).bearer_auth(&token)).await?;
        let page = response.json::<GetUserPlaylistsResponse>().await?;

        if page.items.iter().any(|p| p.name == name) {
            return Ok(true);
        }
        next = page.next;
    }

    Ok(false)
}

/// Creates a private playlist for the configured user.
pub async fn create(name: String, description: String) -> Res<CreatePlaylistResponse> {
    let mut token_mgr = token_manager().await?;
    let api_url = format!(
        "{uri}/users/{user_id}/playlists",
        uri = config::spotify_apiurl()?,
        user_id = config::spotify_user()?
    );
    let body = CreatePlaylistRequest {
        name,
        description,
        public: false,
        collaborative: false,
    };

    let client = Client::new();
    let token = token_mgr.get_valid_token().await;
    let response =
        send_with_retry(&SPOTIFY_RETRY, || client.post(&api_url).bearer_auth(&token).json(&body)).await?;

    Ok(response.json::<CreatePlaylistResponse>().await?)
}

/// Appends `uris` to a playlist, at most [`MAX_TRACKS_PER_REQUEST`] per call.
pub async fn add_tracks(playlist_id: &str, uris: &[String]) -> Res<AddTrackToPlaylistResponse> {
    if uris.len() > MAX_TRACKS_PER_REQUEST {
        return Err(format!(
            "cannot add {} tracks in one request, the limit is {}",
            uris.len(),
            MAX_TRACKS_PER_REQUEST
        )
        .into());
    }

    let mut token_mgr = token_manager().await?;
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = config::spotify_apiurl()?,
        id = playlist_id
    );
    let body = AddTrackToPlaylistRequest {
        uris: uris.to_vec(),
    };

    let client = Client::new();
    let token = token_mgr.get_valid_token().await;
    let response =
        send_with_retry(&SPOTIFY_RETRY, || client.post(&api_url).bearer_auth(&token).json(&body)).await?;

    Ok(response.json::<AddTrackToPlaylistResponse>().await?)
}
