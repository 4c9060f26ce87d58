//! Purge service: resolves a configuration and hands the job to the provider.

use purgehub_domain::error::{NotFoundError, PurgeHubError};
use purgehub_domain::purge::{PurgeReceipt, PurgeRequest};

use crate::ports::{ConfigRepository, PurgeProvider};

/// Result of an accepted purge submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeOutcome {
    /// What the provider returned.
    pub receipt: PurgeReceipt,
    /// User-facing confirmation naming the method used.
    pub message: String,
}

/// Application service submitting purge jobs.
pub struct PurgeService<R, P> {
    repo: R,
    provider: P,
}

impl<R, P> PurgeService<R, P>
where
    R: ConfigRepository,
    P: PurgeProvider,
{
    /// Create a new service from a configuration repository and a provider.
    pub fn new(repo: R, provider: P) -> Self {
        Self { repo, provider }
    }

    /// Submit a purge job against the referenced configuration.
    ///
    /// Targets are trimmed, blank ones dropped, and all of them discarded
    /// for a purge-everything request before the provider is called.
    ///
    /// # Errors
    ///
    /// Returns [`PurgeHubError::Validation`] for a targeted purge without
    /// targets, [`PurgeHubError::NotFound`] for an unknown configuration,
    /// [`PurgeHubError::Provider`] when the provider refuses the job, or a
    /// storage error from the repository.
    #[tracing::instrument(
        skip(self, request),
        fields(config_id = %request.config_id, purge_type = %request.purge_type, method = %request.method)
    )]
    pub async fn submit(&self, request: PurgeRequest) -> Result<PurgeOutcome, PurgeHubError> {
        let request = request.normalized();
        request.validate()?;

        let config = self
            .repo
            .get_by_id(request.config_id)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "Config",
                id: request.config_id.to_string(),
            })?;

        let receipt = self
            .provider
            .create_purge_task(&config, &request)
            .await
            .inspect_err(|err| tracing::warn!(%err, "purge task rejected"))?;

        tracing::info!(
            job_id = receipt.job_id.as_deref().unwrap_or("-"),
            targets = request.targets.len(),
            "purge task submitted"
        );
        if !receipt.failed_targets.is_empty() {
            tracing::warn!(refused = receipt.failed_targets.len(), "provider refused some targets");
        }

        let message = confirmation(&request, &receipt.failed_targets);
        Ok(PurgeOutcome { receipt, message })
    }
}

/// `Purge task submitted (<method>)`, followed by the refused targets if any.
fn confirmation(request: &PurgeRequest, failed_targets: &[String]) -> String {
    let submitted = format!("Purge task submitted ({})", request.method);
    if failed_targets.is_empty() {
        submitted
    } else {
        format!(
            "{submitted}; {} target(s) refused: {}",
            failed_targets.len(),
            failed_targets.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::config_service::tests::{InMemoryConfigRepo, draft};
    use purgehub_domain::config::PurgeConfig;
    use purgehub_domain::error::{ProviderError, ValidationError};
    use purgehub_domain::id::ConfigId;
    use purgehub_domain::purge::{PurgeMethod, PurgeType};
    use purgehub_domain::time;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingProvider {
        calls: Mutex<Vec<(String, PurgeRequest)>>,
        reject: bool,
        refused: Vec<String>,
    }

    impl PurgeProvider for RecordingProvider {
        fn create_purge_task(
            &self,
            config: &PurgeConfig,
            request: &PurgeRequest,
        ) -> impl Future<Output = Result<PurgeReceipt, PurgeHubError>> + Send {
            self.calls
                .lock()
                .unwrap()
                .push((config.zone_id.clone(), request.clone()));
            let result = if self.reject {
                Err(ProviderError::Rejected {
                    code: "InvalidParameter".to_string(),
                    message: "zone is offline".to_string(),
                }
                .into())
            } else {
                Ok(PurgeReceipt {
                    job_id: Some("job-1".to_string()),
                    failed_targets: request
                        .targets
                        .iter()
                        .filter(|t| self.refused.contains(t))
                        .cloned()
                        .collect(),
                })
            };
            async { result }
        }
    }

    async fn seeded_repo() -> InMemoryConfigRepo {
        let repo = InMemoryConfigRepo::default();
        repo.create(draft("zone-a"), time::now()).await.unwrap();
        repo
    }

    fn request(purge_type: PurgeType, targets: &[&str]) -> PurgeRequest {
        PurgeRequest {
            config_id: ConfigId::new(1),
            purge_type,
            method: PurgeMethod::Invalidate,
            targets: targets.iter().map(ToString::to_string).collect(),
        }
    }

    #[tokio::test]
    async fn should_forward_request_with_config_credentials() {
        let svc = PurgeService::new(seeded_repo().await, RecordingProvider::default());

        let outcome = svc
            .submit(request(PurgeType::PurgeUrl, &["https://a/1", " ", " https://a/2 "]))
            .await
            .unwrap();

        assert_eq!(outcome.receipt.job_id.as_deref(), Some("job-1"));
        assert_eq!(outcome.message, "Purge task submitted (invalidate)");

        let calls = svc.provider.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "zone-a");
        assert_eq!(calls[0].1.targets, vec!["https://a/1", "https://a/2"]);
    }

    #[tokio::test]
    async fn should_name_refused_targets_in_confirmation() {
        let provider = RecordingProvider {
            refused: vec!["https://other/x".to_string()],
            ..RecordingProvider::default()
        };
        let svc = PurgeService::new(seeded_repo().await, provider);

        let outcome = svc
            .submit(request(PurgeType::PurgeUrl, &["https://a/1", "https://other/x"]))
            .await
            .unwrap();

        assert_eq!(outcome.receipt.failed_targets, vec!["https://other/x"]);
        assert_eq!(
            outcome.message,
            "Purge task submitted (invalidate); 1 target(s) refused: https://other/x"
        );
    }

    #[tokio::test]
    async fn should_strip_targets_when_purging_everything() {
        let svc = PurgeService::new(seeded_repo().await, RecordingProvider::default());

        svc.submit(request(PurgeType::PurgeAll, &["https://a/1"]))
            .await
            .unwrap();

        let calls = svc.provider.calls.lock().unwrap();
        assert!(calls[0].1.targets.is_empty());
    }

    #[tokio::test]
    async fn should_reject_targeted_purge_without_targets_before_calling_provider() {
        let svc = PurgeService::new(seeded_repo().await, RecordingProvider::default());

        let result = svc.submit(request(PurgeType::PurgePrefix, &[])).await;

        assert!(matches!(
            result,
            Err(PurgeHubError::Validation(ValidationError::MissingTargets(_)))
        ));
        assert!(svc.provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_config() {
        let svc = PurgeService::new(InMemoryConfigRepo::default(), RecordingProvider::default());

        let result = svc.submit(request(PurgeType::PurgeAll, &[])).await;

        assert!(matches!(result, Err(PurgeHubError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_surface_provider_rejection() {
        let provider = RecordingProvider {
            reject: true,
            ..RecordingProvider::default()
        };
        let svc = PurgeService::new(seeded_repo().await, provider);

        let err = svc
            .submit(request(PurgeType::PurgeAll, &[]))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "provider error: zone is offline");
    }
}
