use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    Res, config,
    server::start_api_server,
    types::{PkceToken, Token},
    utils, warning,
};

/// How long to wait for the browser round trip before giving up.
const LOGIN_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs the OAuth 2.0 PKCE login against Spotify.
///
/// 1. Generates a code verifier and its S256 challenge
/// 2. Starts the local callback server
/// 3. Opens the authorization URL in the default browser
/// 4. Waits for the callback handler to exchange the code for a token
///
/// The caller persists the returned token.
///
/// # Errors
///
/// Fails when configuration is missing or no token arrives before the timeout.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Res<Token> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let auth_url = format!(
        "{spotify_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        spotify_auth_url = config::spotify_apiauth_url()?,
        client_id = config::spotify_client_id()?,
        redirect_uri = config::spotify_redirect_uri()?,
        code_challenge = code_challenge,
        scope = config::spotify_scope()?.replace(' ', "%20"),
    );

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    let server_state = Arc::clone(&shared_state);
    let server = tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state).await;
    server.abort();

    token.ok_or_else(|| "Authentication failed or timed out.".into())
}

/// Polls the shared state until the callback handler stored a token.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    let start = std::time::Instant::now();

    while start.elapsed() < LOGIN_TIMEOUT {
        {
            let lock = shared_state.lock().await;
            if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.clone()) {
                return Some(token);
            }
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges a refresh token for a fresh access token.
///
/// Spotify may or may not rotate the refresh token; an empty
/// `refresh_token` in the result means the old one stays valid.
pub async fn refresh_token(refresh_token: &str) -> Res<Token> {
    let client_id = config::spotify_client_id()?;

    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url()?)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json: Value = res.json().await?;
    token_from_json(&json)
}

/// Completes the PKCE flow by trading the authorization code for a token.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Res<Token> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri()?;

    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url()?)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json: Value = res.json().await?;
    token_from_json(&json)
}

fn token_from_json(json: &Value) -> Res<Token> {
    let access_token = json["access_token"]
        .as_str()
        .ok_or("token response without access_token")?;

    Ok(Token {
        access_token: access_token.to_string(),
        refresh_token: json["refresh_token"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_u64().unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
