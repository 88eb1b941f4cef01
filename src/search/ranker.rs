use std::collections::HashSet;

use tracing::trace;

use crate::{
    error::SearchError,
    search::rules::TitleValidator,
    types::{Characteristic, Song, SongCandidate, SongPreferences},
};

/// Filters and orders the candidates returned for one name.
#[derive(Debug, Clone)]
pub struct SongPreferenceRanker {
    song_discovery_weight: f64,
}

impl Default for SongPreferenceRanker {
    fn default() -> Self {
        Self::new(250.0)
    }
}

impl SongPreferenceRanker {
    pub fn new(song_discovery_weight: f64) -> Self {
        Self {
            song_discovery_weight,
        }
    }

    /// Higher means lesser known. A candidate without a song-level metric
    /// scores zero whatever its artist metric is.
    pub fn discovery_score(&self, candidate: &SongCandidate) -> f64 {
        match candidate.song_discovery {
            Some(song) => {
                song * self.song_discovery_weight + candidate.artist_discovery.unwrap_or(0.0)
            }
            None => 0.0,
        }
    }

    /// Applies title rules and one-song-per-artist to `candidates` (kept in
    /// source order), stops after `desired` songs, then sorts by discovery
    /// score unless popular songs were asked for.
    pub fn rank(
        &self,
        candidates: Vec<SongCandidate>,
        search_term: &str,
        preferences: &SongPreferences,
        desired: usize,
    ) -> Result<Vec<Song>, SearchError> {
        let validator = TitleValidator::new(search_term)
            .map_err(|e| SearchError::Service(format!("invalid search term: {}", e)))?;

        let mut artists = HashSet::new();
        let mut accepted: Vec<SongCandidate> = Vec::new();

        for candidate in candidates {
            if accepted.len() >= desired {
                break;
            }
            if let Some(rule) = validator.rejection(&candidate.title) {
                trace!(title = %candidate.title, rule, "rejected candidate");
                continue;
            }
            if !artists.insert(candidate.artist_key()) {
                continue;
            }
            accepted.push(candidate);
        }

        if !preferences.contains(Characteristic::Popular) {
            accepted.sort_by(|a, b| {
                self.discovery_score(b)
                    .total_cmp(&self.discovery_score(a))
            });
        }

        Ok(accepted.into_iter().map(SongCandidate::into_song).collect())
    }
}
