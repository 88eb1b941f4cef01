//! Playlist assembly.
//!
//! One assembly pass runs in rounds. Each round searches every pending slot
//! concurrently, one spawned task per name. Tasks report into a shared
//! [`Accumulator`] behind a mutex as they finish, in whatever order that
//! happens. Once the round is joined the accumulator settles outcomes in slot
//! order: a slot takes the first ranked song nobody has claimed yet.
//!
//! Every ranked list is kept for the rest of the pass. Slots left empty draw
//! substitute names; a name that was already searched fills the slot from its
//! remaining songs without another request, and only names without a usable
//! result are searched again in the next round. Settling by slot instead of
//! by completion keeps the result deterministic for a deterministic search
//! source.

use std::{
    collections::{BTreeMap, HashMap, HashSet, VecDeque},
    sync::Arc,
};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    config::EngineSettings,
    contacts::{ContactsProvider, NameQueue, NameSupplyPlanner},
    error::{PlaylistError, SearchError},
    search::{SongCandidateSource, SongPreferenceRanker, SongSearchResult},
    types::{Playlist, PlaylistItem, SearchName, Song, SongPreferences},
};

enum Outcome {
    Found(Vec<Song>),
    Failed,
}

/// State shared by all searches of one assembly pass.
#[derive(Default)]
struct Accumulator {
    attempts: usize,
    completed: usize,
    failures: usize,
    last_failure: Option<SearchError>,
    aborted: bool,
    claimed: HashSet<Song>,
    /// Unclaimed remainder of every successful search, by term.
    ranked: HashMap<String, VecDeque<Song>>,
    outcomes: BTreeMap<usize, (SearchName, Outcome)>,
}

impl Accumulator {
    fn record(
        &mut self,
        slot: usize,
        name: SearchName,
        result: SongSearchResult,
        settings: &EngineSettings,
    ) {
        self.completed += 1;

        let outcome = match result {
            Ok(songs) => Outcome::Found(songs),
            Err(err) => {
                self.failures += 1;
                warn!(
                    "{}",
                    PlaylistError::NameSearchFailure {
                        name: name.term.clone(),
                        source: err.clone(),
                    }
                );
                self.last_failure = Some(err);

                if !self.aborted && settings.failure_threshold_reached(self.failures, self.attempts)
                {
                    self.aborted = true;
                    warn!(
                        failures = self.failures,
                        attempts = self.attempts,
                        "failure threshold reached, abandoning playlist"
                    );
                }
                Outcome::Failed
            }
        };

        // Late arrivals after an abort are only counted.
        if !self.aborted {
            self.outcomes.insert(slot, (name, outcome));
        }
    }

    /// Assigns songs to slots in slot order. Returns how many slots were
    /// filled and which ones are still empty.
    fn settle(&mut self, slots: &mut [Option<PlaylistItem>]) -> (usize, Vec<usize>) {
        let mut filled = 0;
        let mut unfilled = Vec::new();

        for (slot, (name, outcome)) in std::mem::take(&mut self.outcomes) {
            let song = match outcome {
                Outcome::Found(songs) => {
                    self.ranked.insert(name.term.clone(), songs.into());
                    self.claim_next(&name.term)
                }
                Outcome::Failed => None,
            };

            match song {
                Some(song) => {
                    slots[slot] = Some(PlaylistItem {
                        song,
                        contact: name.contact,
                    });
                    filled += 1;
                }
                None => unfilled.push(slot),
            }
        }

        (filled, unfilled)
    }

    fn is_ranked(&self, term: &str) -> bool {
        self.ranked.contains_key(term)
    }

    /// Claims the next song of `term`'s ranked list that no slot holds yet.
    fn claim_next(&mut self, term: &str) -> Option<Song> {
        let songs = self.ranked.get_mut(term)?;
        while let Some(song) = songs.pop_front() {
            if self.claimed.insert(song.clone()) {
                return Some(song);
            }
        }
        None
    }

    fn abort_error(&mut self) -> PlaylistError {
        PlaylistError::AggregateSearchFailure {
            failures: self.failures,
            attempts: self.attempts,
            last: self
                .last_failure
                .take()
                .unwrap_or_else(|| SearchError::Service("no failure recorded".to_string())),
        }
    }
}

/// Builds playlists by matching names to song titles.
///
/// Collaborators are injected: the address book and the candidate source are
/// trait objects so callers can swap in other backends.
pub struct PlaylistAssemblyEngine {
    contacts: Arc<dyn ContactsProvider>,
    source: Arc<dyn SongCandidateSource>,
    ranker: SongPreferenceRanker,
    settings: EngineSettings,
    locale: Option<String>,
}

impl PlaylistAssemblyEngine {
    pub fn new(
        contacts: Arc<dyn ContactsProvider>,
        source: Arc<dyn SongCandidateSource>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            contacts,
            source,
            ranker: SongPreferenceRanker::new(settings.song_discovery_weight),
            settings,
            locale: None,
        }
    }

    pub fn with_locale(mut self, locale: Option<String>) -> Self {
        self.locale = locale;
        self
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Builds a playlist of exactly `number_of_songs` songs from the first
    /// names in the address book.
    pub async fn create_playlist(
        &self,
        number_of_songs: usize,
        preferences: &SongPreferences,
    ) -> Result<Playlist, PlaylistError> {
        self.check_size(number_of_songs)?;
        let contacts = self.contacts.contacts().await?;
        let queue = NameSupplyPlanner::plan(&contacts, number_of_songs)?;
        self.assemble(queue, number_of_songs, preferences).await
    }

    /// Builds a playlist from free-text names. Items carry no contact.
    pub async fn create_playlist_from_names<S: AsRef<str>>(
        &self,
        names: &[S],
        number_of_songs: usize,
        preferences: &SongPreferences,
    ) -> Result<Playlist, PlaylistError> {
        self.check_size(number_of_songs)?;
        let queue = NameSupplyPlanner::plan_names(names, number_of_songs)?;
        self.assemble(queue, number_of_songs, preferences).await
    }

    fn check_size(&self, number_of_songs: usize) -> Result<(), PlaylistError> {
        if self.settings.accepts_size(number_of_songs) {
            Ok(())
        } else {
            Err(PlaylistError::InvalidSize(number_of_songs))
        }
    }

    /// Runs one assembly pass over a planned name queue.
    pub async fn assemble(
        &self,
        queue: NameQueue,
        number_of_songs: usize,
        preferences: &SongPreferences,
    ) -> Result<Playlist, PlaylistError> {
        self.check_size(number_of_songs)?;
        if queue.queued().is_empty() {
            return Err(PlaylistError::NoContactsAvailable);
        }

        let search_size = self.settings.search_size(number_of_songs);
        let mut supply = queue.supply();
        let mut slots: Vec<Option<PlaylistItem>> = vec![None; number_of_songs];

        let mut pending: Vec<(usize, SearchName)> =
            queue.queued().iter().cloned().enumerate().collect();
        // Slots without a name of their own wait for the first results.
        let mut waiting: Vec<usize> = (pending.len()..number_of_songs).collect();
        // Substitute draws since a slot was last filled.
        let mut idle_draws = 0;

        info!(
            songs = number_of_songs,
            names = queue.queued().len(),
            search_size,
            preferences = %preferences,
            "assembling playlist"
        );

        let shared = Arc::new(Mutex::new(Accumulator::default()));
        let mut round = 0;

        while !pending.is_empty() {
            round += 1;
            shared.lock().await.attempts += pending.len();
            debug!(round, searches = pending.len(), "dispatching name searches");

            let mut handles = Vec::with_capacity(pending.len());
            for (slot, name) in pending.drain(..) {
                let source = Arc::clone(&self.source);
                let ranker = self.ranker.clone();
                let settings = self.settings.clone();
                let preferences = preferences.clone();
                let locale = self.locale.clone();
                let shared = Arc::clone(&shared);
                let task_name = name.clone();

                let handle = tokio::spawn(async move {
                    let result = lookup(
                        source.as_ref(),
                        &ranker,
                        &task_name.term,
                        &preferences,
                        search_size,
                        locale.as_deref(),
                    )
                    .await;
                    shared
                        .lock()
                        .await
                        .record(slot, task_name, result, &settings);
                });
                handles.push((slot, name, handle));
            }

            for (slot, name, handle) in handles {
                if let Err(e) = handle.await {
                    shared.lock().await.record(
                        slot,
                        name,
                        Err(SearchError::Task(e.to_string())),
                        &self.settings,
                    );
                }
            }

            let mut acc = shared.lock().await;
            debug!(
                round,
                completed = acc.completed,
                failures = acc.failures,
                "name searches joined"
            );
            if acc.aborted {
                return Err(acc.abort_error());
            }

            let (filled, mut unfilled) = acc.settle(&mut slots);
            if filled > 0 {
                idle_draws = 0;
            }
            unfilled.append(&mut waiting);
            unfilled.sort_unstable();

            for slot in unfilled {
                loop {
                    // A full pass over the pool filled nothing.
                    if idle_draws >= supply.pass_len() {
                        waiting.push(slot);
                        break;
                    }
                    let Some(name) = supply.next() else {
                        waiting.push(slot);
                        break;
                    };

                    if acc.is_ranked(&name.term) {
                        match acc.claim_next(&name.term) {
                            Some(song) => {
                                debug!(slot, name = %name.term, "reusing ranked songs");
                                slots[slot] = Some(PlaylistItem {
                                    song,
                                    contact: name.contact,
                                });
                                idle_draws = 0;
                                break;
                            }
                            None => idle_draws += 1,
                        }
                    } else if pending.iter().any(|(_, p)| p.term == name.term) {
                        idle_draws += 1;
                    } else {
                        debug!(slot, to = %name.term, "substituting name");
                        pending.push((slot, name));
                        idle_draws += 1;
                        break;
                    }
                }
            }
        }

        let filled = slots.iter().filter(|slot| slot.is_some()).count();
        if filled < number_of_songs {
            return Err(PlaylistError::NotEnoughSongs {
                requested: number_of_songs,
                filled,
            });
        }

        info!(songs = filled, rounds = round, "playlist assembled");
        Ok(slots.into_iter().flatten().collect())
    }
}

async fn lookup(
    source: &dyn SongCandidateSource,
    ranker: &SongPreferenceRanker,
    search_term: &str,
    preferences: &SongPreferences,
    desired: usize,
    locale: Option<&str>,
) -> SongSearchResult {
    let candidates = source
        .search(search_term, preferences, desired, locale)
        .await?;
    ranker.rank(candidates, search_term, preferences, desired)
}
