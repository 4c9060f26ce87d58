//! Storage port: repository traits for persistence.

use std::future::Future;

use purgehub_domain::config::{ConfigDraft, PurgeConfig};
use purgehub_domain::error::PurgeHubError;
use purgehub_domain::id::ConfigId;
use purgehub_domain::time::Timestamp;
use purgehub_domain::user::User;

/// Repository for [`PurgeConfig`] records. Identifiers are assigned by the store.
pub trait ConfigRepository {
    /// Persist a new configuration stamped with `at` and return it with its id.
    fn create(
        &self,
        draft: ConfigDraft,
        at: Timestamp,
    ) -> impl Future<Output = Result<PurgeConfig, PurgeHubError>> + Send;

    /// Get a configuration by id.
    fn get_by_id(
        &self,
        id: ConfigId,
    ) -> impl Future<Output = Result<Option<PurgeConfig>, PurgeHubError>> + Send;

    /// List every configuration, most recently updated first.
    fn get_all(&self) -> impl Future<Output = Result<Vec<PurgeConfig>, PurgeHubError>> + Send;

    /// Overwrite a stored configuration.
    fn update(
        &self,
        config: PurgeConfig,
    ) -> impl Future<Output = Result<PurgeConfig, PurgeHubError>> + Send;

    /// Delete by id. Resolves to `false` when nothing matched.
    fn delete(&self, id: ConfigId) -> impl Future<Output = Result<bool, PurgeHubError>> + Send;
}

/// Repository for operator [`User`] accounts.
pub trait UserRepository {
    /// Persist a new user with an already-hashed password.
    fn create(
        &self,
        username: &str,
        password_hash: &str,
    ) -> impl Future<Output = Result<User, PurgeHubError>> + Send;

    /// Look a user up by exact username.
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, PurgeHubError>> + Send;
}

impl<T: ConfigRepository + Send + Sync> ConfigRepository for std::sync::Arc<T> {
    fn create(
        &self,
        draft: ConfigDraft,
        at: Timestamp,
    ) -> impl Future<Output = Result<PurgeConfig, PurgeHubError>> + Send {
        (**self).create(draft, at)
    }

    fn get_by_id(
        &self,
        id: ConfigId,
    ) -> impl Future<Output = Result<Option<PurgeConfig>, PurgeHubError>> + Send {
        (**self).get_by_id(id)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<PurgeConfig>, PurgeHubError>> + Send {
        (**self).get_all()
    }

    fn update(
        &self,
        config: PurgeConfig,
    ) -> impl Future<Output = Result<PurgeConfig, PurgeHubError>> + Send {
        (**self).update(config)
    }

    fn delete(&self, id: ConfigId) -> impl Future<Output = Result<bool, PurgeHubError>> + Send {
        (**self).delete(id)
    }
}
