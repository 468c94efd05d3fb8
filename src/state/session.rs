//! Session context passed explicitly to every component that needs
//! credentials or identity.
//!
//! DESIGN
//! ======
//! `Session` is a cheap `Clone` handle over an injected [`Storage`]. Storage
//! is the only source of truth: nothing here caches tokens, so two handles
//! over the same storage always agree and the last write wins.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::sync::Arc;

use super::storage::{MemoryStorage, Storage, StorageError, keys};
use crate::net::types::{LoginResponse, Role, UserProfile};

#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn Storage>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("logged_in", &self.has_access_token()).finish_non_exhaustive()
    }
}

impl Session {
    #[must_use]
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self { storage: Arc::new(storage) }
    }

    #[must_use]
    pub fn from_shared(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Session over fresh in-memory storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key)
    }

    /// Stored value for `key`, treating an empty string as absent.
    fn non_empty(&self, key: &str) -> Option<String> {
        self.get(key).filter(|value| !value.is_empty())
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.non_empty(keys::ACCESS)
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.non_empty(keys::REFRESH)
    }

    #[must_use]
    pub fn has_access_token(&self) -> bool {
        self.access_token().is_some()
    }

    /// Identity snapshot as currently persisted. Unknown role strings read
    /// as no role.
    #[must_use]
    pub fn stored_profile(&self) -> UserProfile {
        UserProfile {
            role: self.non_empty(keys::ROLE).and_then(|raw| raw.parse::<Role>().ok()),
            email: self.non_empty(keys::EMAIL),
            first_name: self.non_empty(keys::FIRST_NAME),
            last_name: self.non_empty(keys::LAST_NAME),
        }
    }

    /// Persist tokens and identity from a successful login.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if any write fails.
    pub fn persist_login(&self, login: &LoginResponse) -> Result<(), StorageError> {
        self.storage.set_item(keys::ACCESS, &login.access)?;
        self.storage.set_item(keys::REFRESH, &login.refresh)?;
        self.persist_profile(&login.profile())
    }

    /// Persist a new access token (and refresh token, when rotated).
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if any write fails.
    pub fn persist_tokens(&self, access: &str, refresh: Option<&str>) -> Result<(), StorageError> {
        self.storage.set_item(keys::ACCESS, access)?;
        if let Some(refresh) = refresh {
            self.storage.set_item(keys::REFRESH, refresh)?;
        }
        Ok(())
    }

    /// Overwrite the persisted identity. `None` fields remove their key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if any write fails.
    pub fn persist_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        self.put(keys::ROLE, profile.role.map(Role::as_str))?;
        self.put(keys::EMAIL, profile.email.as_deref())?;
        self.put(keys::FIRST_NAME, profile.first_name.as_deref())?;
        self.put(keys::LAST_NAME, profile.last_name.as_deref())
    }

    /// Remove every session key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if any removal fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        for key in keys::SESSION {
            self.storage.remove_item(key)?;
        }
        Ok(())
    }

    fn put(&self, key: &str, value: Option<&str>) -> Result<(), StorageError> {
        match value {
            Some(value) => self.storage.set_item(key, value),
            None => self.storage.remove_item(key),
        }
    }
}
