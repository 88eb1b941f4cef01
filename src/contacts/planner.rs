use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::{
    error::PlaylistError,
    types::{Contact, SearchName},
};

/// The names to search for one playlist.
///
/// `queued` holds at most one name per slot and is searched first. The
/// remaining eligible names (`reserve`) and the whole eligible pool back the
/// substitution of slots that come back empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameQueue {
    queued: Vec<SearchName>,
    reserve: Vec<SearchName>,
    pool: Vec<SearchName>,
}

impl NameQueue {
    pub fn queued(&self) -> &[SearchName] {
        &self.queued
    }

    pub fn pool(&self) -> &[SearchName] {
        &self.pool
    }

    /// Substitute names for this queue.
    pub fn supply(&self) -> NameSupply {
        NameSupply {
            reserve: self.reserve.iter().cloned().collect(),
            pool: self.pool.clone(),
            cursor: 0,
        }
    }
}

/// Endless source of substitute names: unused eligible names first, then the
/// eligible pool over and over in queue order. Callers decide when to stop.
#[derive(Debug, Clone)]
pub struct NameSupply {
    reserve: VecDeque<SearchName>,
    pool: Vec<SearchName>,
    cursor: usize,
}

impl NameSupply {
    /// Size of one full pass over the pool.
    pub fn pass_len(&self) -> usize {
        self.pool.len()
    }
}

impl Iterator for NameSupply {
    type Item = SearchName;

    fn next(&mut self) -> Option<SearchName> {
        if let Some(name) = self.reserve.pop_front() {
            return Some(name);
        }
        if self.pool.is_empty() {
            return None;
        }
        let name = self.pool[self.cursor % self.pool.len()].clone();
        self.cursor += 1;
        Some(name)
    }
}

pub struct NameSupplyPlanner;

impl NameSupplyPlanner {
    /// Plans the search names for `number_of_songs` slots from an address book.
    ///
    /// Contacts without a usable first name are skipped. Names are compared
    /// case-insensitively so each name is queued once, first contact wins.
    pub fn plan(contacts: &[Contact], number_of_songs: usize) -> Result<NameQueue, PlaylistError> {
        let eligible = contacts.iter().filter_map(SearchName::from_contact);
        Self::build(eligible, number_of_songs)
    }

    /// Same as [`NameSupplyPlanner::plan`] for free-text names.
    pub fn plan_names<S: AsRef<str>>(
        names: &[S],
        number_of_songs: usize,
    ) -> Result<NameQueue, PlaylistError> {
        let eligible = names
            .iter()
            .filter_map(|name| SearchName::free_text(name.as_ref()));
        Self::build(eligible, number_of_songs)
    }

    fn build(
        eligible: impl Iterator<Item = SearchName>,
        number_of_songs: usize,
    ) -> Result<NameQueue, PlaylistError> {
        if number_of_songs == 0 {
            return Err(PlaylistError::InvalidSize(number_of_songs));
        }

        let mut seen = HashSet::new();
        let pool: Vec<SearchName> = eligible
            .filter(|name| seen.insert(name.term.to_lowercase()))
            .collect();

        if pool.is_empty() {
            return Err(PlaylistError::NoContactsAvailable);
        }

        let split = number_of_songs.min(pool.len());
        let queued = pool[..split].to_vec();
        let reserve = pool[split..].to_vec();

        debug!(
            eligible = pool.len(),
            queued = queued.len(),
            requested = number_of_songs,
            "planned search names"
        );

        Ok(NameQueue {
            queued,
            reserve,
            pool,
        })
    }
}
