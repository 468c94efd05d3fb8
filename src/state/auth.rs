#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::session::Session;
use super::storage::StorageError;
use crate::net::types::{Role, UserProfile};

/// Read model of the session used for UI conditionals such as showing
/// admin-only navigation.
///
/// Loaded once from storage; afterwards it only changes through
/// [`AuthState::update`], which callers invoke after login and logout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub is_logged_in: bool,
    pub role: Option<Role>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl AuthState {
    #[must_use]
    pub fn load(session: &Session) -> Self {
        let profile = session.stored_profile();
        Self {
            is_logged_in: session.has_access_token(),
            role: profile.role,
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
        }
    }

    /// Recompute the login flag from storage. With `user`, also overwrite the
    /// identity fields here and in storage.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if persisting the identity fails; the mirror
    /// is left unchanged in that case.
    pub fn update(&mut self, session: &Session, user: Option<&UserProfile>) -> Result<(), StorageError> {
        if let Some(user) = user {
            session.persist_profile(user)?;
            self.role = user.role;
            self.email.clone_from(&user.email);
            self.first_name.clone_from(&user.first_name);
            self.last_name.clone_from(&user.last_name);
        }
        self.is_logged_in = session.has_access_token();
        Ok(())
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_logged_in && self.role == Some(Role::Admin)
    }

    /// `"First Last"`, or whichever half is known.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(one), None) | (None, Some(one)) => Some(one.to_owned()),
            (None, None) => None,
        }
    }
}
