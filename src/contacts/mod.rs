//! Address-book access and search-name planning.
//!
//! The address book is an external collaborator reached through the
//! [`ContactsProvider`] trait. [`FileContactsProvider`] reads a JSON export
//! (an array of `{id, first_name, last_name, full_name}` records) and
//! [`StaticContactsProvider`] serves an in-memory list.

mod planner;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::{error::PlaylistError, types::Contact};

pub use planner::{NameQueue, NameSupply};
pub use planner::NameSupplyPlanner;

#[async_trait]
pub trait ContactsProvider: Send + Sync {
    /// Every contact in the address book, in address-book order.
    async fn contacts(&self) -> Result<Vec<Contact>, PlaylistError>;
}

pub struct FileContactsProvider {
    path: PathBuf,
}

impl FileContactsProvider {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ContactsProvider for FileContactsProvider {
    async fn contacts(&self) -> Result<Vec<Contact>, PlaylistError> {
        let content = async_fs::read_to_string(&self.path).await.map_err(|e| {
            PlaylistError::ContactsAccessDenied(format!("{}: {}", self.path.display(), e))
        })?;
        let contacts: Vec<Contact> = serde_json::from_str(&content).map_err(|e| {
            PlaylistError::ContactsAccessDenied(format!("{}: {}", self.path.display(), e))
        })?;

        Ok(contacts
            .into_iter()
            .map(|contact| {
                if contact.full_name.trim().is_empty() {
                    Contact::new(
                        contact.id,
                        contact.first_name.as_deref(),
                        contact.last_name.as_deref(),
                    )
                } else {
                    contact
                }
            })
            .collect())
    }
}

pub struct StaticContactsProvider {
    contacts: Vec<Contact>,
}

impl StaticContactsProvider {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }
}

#[async_trait]
impl ContactsProvider for StaticContactsProvider {
    async fn contacts(&self) -> Result<Vec<Contact>, PlaylistError> {
        Ok(self.contacts.clone())
    }
}
