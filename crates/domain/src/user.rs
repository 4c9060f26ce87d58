//! Dashboard operator accounts.

use serde::Deserialize;

use crate::error::{PurgeHubError, ValidationError};
use crate::id::UserId;

/// A stored operator account. The hash is a PHC string (argon2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
}

/// Credentials submitted by the login form.
#[derive(Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    /// Check that both fields were filled in.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for a blank username or
    /// an empty password.
    pub fn validate(&self) -> Result<(), PurgeHubError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::MissingField("username").into());
        }
        if self.password.is_empty() {
            return Err(ValidationError::MissingField("password").into());
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
