//! Config service: use-cases for managing purge configurations.

use purgehub_domain::config::{ConfigDraft, PurgeConfig};
use purgehub_domain::error::{NotFoundError, PurgeHubError};
use purgehub_domain::id::ConfigId;
use purgehub_domain::time;

use crate::ports::ConfigRepository;

/// Application service for configuration CRUD operations.
pub struct ConfigService<R> {
    repo: R,
}

impl<R: ConfigRepository> ConfigService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a configuration from a form draft.
    ///
    /// # Errors
    ///
    /// Returns [`PurgeHubError::Validation`] when a required field is blank,
    /// or a storage error propagated from the repository.
    #[tracing::instrument(skip(self, draft), fields(zone_id = %draft.zone_id))]
    pub async fn create_config(&self, draft: ConfigDraft) -> Result<PurgeConfig, PurgeHubError> {
        let draft = draft.normalized();
        draft.validate_for_create()?;
        let created = self.repo.create(draft, time::now()).await?;
        tracing::info!(id = %created.id, "configuration created");
        Ok(created)
    }

    /// Look up a configuration by id, credentials in plaintext.
    ///
    /// # Errors
    ///
    /// Returns [`PurgeHubError::NotFound`] when no configuration with `id`
    /// exists, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_config(&self, id: ConfigId) -> Result<PurgeConfig, PurgeHubError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    /// List every configuration with credentials masked, most recently
    /// updated first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_configs(&self) -> Result<Vec<PurgeConfig>, PurgeHubError> {
        let configs = self.repo.get_all().await?;
        Ok(configs.into_iter().map(PurgeConfig::masked).collect())
    }

    /// Merge a draft into an existing configuration.
    ///
    /// Blank draft fields keep their stored value.
    ///
    /// # Errors
    ///
    /// Returns [`PurgeHubError::NotFound`] when `id` does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, draft))]
    pub async fn update_config(
        &self,
        id: ConfigId,
        draft: ConfigDraft,
    ) -> Result<PurgeConfig, PurgeHubError> {
        let mut config = self.get_config(id).await?;
        config.apply(draft, time::now());
        let updated = self.repo.update(config).await?;
        tracing::info!(%id, "configuration updated");
        Ok(updated)
    }

    /// Delete a configuration by id.
    ///
    /// # Errors
    ///
    /// Returns [`PurgeHubError::NotFound`] when `id` does not exist, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_config(&self, id: ConfigId) -> Result<(), PurgeHubError> {
        if self.repo.delete(id).await? {
            tracing::info!(%id, "configuration deleted");
            Ok(())
        } else {
            Err(not_found(id))
        }
    }
}

fn not_found(id: ConfigId) -> PurgeHubError {
    NotFoundError {
        entity: "Config",
        id: id.to_string(),
    }
    .into()
}
