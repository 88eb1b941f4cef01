use thiserror::Error;

/// Why a single name search produced no result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("search service returned status {code}: {message}")]
    Status { code: i64, message: String },

    #[error("unreadable search response: {0}")]
    Decode(String),

    #[error("{0}")]
    Service(String),

    #[error("search task did not finish: {0}")]
    Task(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SearchError::Decode(err.to_string())
        } else {
            SearchError::Http(err.to_string())
        }
    }
}

/// Errors surfaced by playlist assembly.
#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("playlist size {0} is out of range")]
    InvalidSize(usize),

    #[error("no contacts with a usable first name")]
    NoContactsAvailable,

    #[error("contacts are not accessible: {0}")]
    ContactsAccessDenied(String),

    /// A single name failed. The engine absorbs these and substitutes.
    #[error("search for '{name}' failed: {source}")]
    NameSearchFailure {
        name: String,
        #[source]
        source: SearchError,
    },

    #[error("{failures} of {attempts} name searches failed, last error: {last}")]
    AggregateSearchFailure {
        failures: usize,
        attempts: usize,
        #[source]
        last: SearchError,
    },

    #[error("only {filled} of {requested} songs could be found")]
    NotEnoughSongs { requested: usize, filled: usize },
}
