use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{
    config,
    error::SearchError,
    http::{RetryPolicy, send_with_retry},
    search::SongCandidateSource,
    types::{Characteristic, SongCandidate, SongPreferences, SongSearchResponse},
};

const SEARCH_RETRY: RetryPolicy =
    RetryPolicy::new(3, Duration::from_secs(2), Duration::from_secs(120));

/// HTTP client for the song metadata service.
///
/// Issues `GET {base}/song/search` with the name as the title filter and the
/// preferences mapped onto the service's sort, mood and energy parameters.
/// Only songs that carry a streaming track id come back as candidates.
pub struct MetadataSearchClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MetadataSearchClient {
    pub fn new(base_url: String, api_key: String) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| e.to_string())?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn from_env() -> Result<Self, String> {
        Self::new(config::metadata_api_url()?, config::metadata_api_key()?)
    }

    fn query(
        &self,
        search_term: &str,
        preferences: &SongPreferences,
        desired: usize,
        locale: Option<&str>,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("api_key", self.api_key.clone()),
            ("format", "json".to_string()),
            ("title", search_term.to_string()),
            ("results", desired.to_string()),
            ("limit", "true".to_string()),
            ("bucket", "id:spotify".to_string()),
            ("bucket", "tracks".to_string()),
            ("bucket", "song_discovery".to_string()),
            ("bucket", "artist_discovery".to_string()),
        ];

        for characteristic in preferences.iter() {
            match characteristic {
                Characteristic::Popular => {
                    params.push(("sort", "song_hotttnesss-desc".to_string()))
                }
                Characteristic::Positive => params.push(("mood", "happy".to_string())),
                Characteristic::Negative => params.push(("mood", "sad".to_string())),
                Characteristic::Energetic => params.push(("min_energy", "0.6".to_string())),
                Characteristic::Chill => params.push(("max_energy", "0.4".to_string())),
            }
        }

        if let Some(locale) = locale {
            params.push(("locale", locale.to_string()));
        }

        params
    }
}

#[async_trait]
impl SongCandidateSource for MetadataSearchClient {
    async fn search(
        &self,
        search_term: &str,
        preferences: &SongPreferences,
        desired: usize,
        locale: Option<&str>,
    ) -> Result<Vec<SongCandidate>, SearchError> {
        let api_url = format!("{}/song/search", self.base_url);
        let params = self.query(search_term, preferences, desired, locale);
        let response = send_with_retry(&SEARCH_RETRY, || {
            self.client.get(&api_url).query(&params)
        })
        .await?;

        let body = response.json::<SongSearchResponse>().await?.response;
        if body.status.code != 0 {
            return Err(SearchError::Status {
                code: body.status.code,
                message: body.status.message,
            });
        }

        let candidates: Vec<SongCandidate> = body
            .songs
            .into_iter()
            .filter_map(|song| {
                let uri = song.tracks.first()?.foreign_id.clone();
                Some(SongCandidate {
                    title: song.title,
                    artist_id: song.artist_id,
                    artist_names: song.artist_name.into_iter().collect(),
                    uri,
                    song_discovery: song.song_discovery,
                    artist_discovery: song.artist_discovery,
                })
            })
            .collect();

        debug!(
            term = search_term,
            candidates = candidates.len(),
            "metadata search finished"
        );
        Ok(candidates)
    }
}
