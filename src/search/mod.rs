//! Song search: the candidate source contract, ranking and title rules, and
//! the HTTP client for the metadata service.

mod metadata;
mod ranker;
mod rules;

use async_trait::async_trait;

use crate::{
    error::SearchError,
    types::{Song, SongCandidate, SongPreferences},
};

pub use metadata::MetadataSearchClient;
pub use ranker::SongPreferenceRanker;
pub use rules::TitleValidator;

/// Outcome of one name search after ranking. An empty list is a success.
pub type SongSearchResult = Result<Vec<Song>, SearchError>;

/// Looks up songs whose title matches a name.
#[async_trait]
pub trait SongCandidateSource: Send + Sync {
    /// Up to `desired` raw candidates for `search_term`, in the source's own
    /// order. Implementations should ask for popularity order when
    /// `preferences` includes popular songs.
    async fn search(
        &self,
        search_term: &str,
        preferences: &SongPreferences,
        desired: usize,
        locale: Option<&str>,
    ) -> Result<Vec<SongCandidate>, SearchError>;
}
