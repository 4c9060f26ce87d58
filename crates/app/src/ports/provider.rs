//! Provider port: the CDN that actually invalidates cached content.

use std::future::Future;

use purgehub_domain::config::PurgeConfig;
use purgehub_domain::error::PurgeHubError;
use purgehub_domain::purge::{PurgeReceipt, PurgeRequest};

/// Submits purge jobs to a CDN provider on behalf of a configuration.
///
/// Implementations authenticate with the configuration's credentials and
/// report provider-side refusals as [`PurgeHubError::Provider`].
pub trait PurgeProvider {
    /// Submit one purge job.
    fn create_purge_task(
        &self,
        config: &PurgeConfig,
        request: &PurgeRequest,
    ) -> impl Future<Output = Result<PurgeReceipt, PurgeHubError>> + Send;
}

impl<T: PurgeProvider + Send + Sync> PurgeProvider for std::sync::Arc<T> {
    fn create_purge_task(
        &self,
        config: &PurgeConfig,
        request: &PurgeRequest,
    ) -> impl Future<Output = Result<PurgeReceipt, PurgeHubError>> + Send {
        (**self).create_purge_task(config, request)
    }
}
