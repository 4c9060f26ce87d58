//! Shared application state for axum handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use purgehub_app::ports::{ConfigRepository, PurgeProvider, SessionStore, UserRepository};
use purgehub_app::services::auth_service::AuthService;
use purgehub_app::services::config_service::ConfigService;
use purgehub_app::services::purge_service::PurgeService;

/// Application state shared across all axum handlers.
///
/// Generic over the configuration repository, user repository, purge
/// provider and session store to avoid dynamic dispatch. `Clone` is
/// implemented manually so the underlying types themselves do not need to
/// be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<C, U, P, S> {
    /// Configuration CRUD service.
    pub config_service: Arc<ConfigService<C>>,
    /// Purge submission service.
    pub purge_service: Arc<PurgeService<C, P>>,
    /// Login and session service.
    pub auth_service: Arc<AuthService<U, S>>,
    assets_dir: Arc<PathBuf>,
}

impl<C, U, P, S> Clone for AppState<C, U, P, S> {
    fn clone(&self) -> Self {
        Self {
            config_service: Arc::clone(&self.config_service),
            purge_service: Arc::clone(&self.purge_service),
            auth_service: Arc::clone(&self.auth_service),
            assets_dir: Arc::clone(&self.assets_dir),
        }
    }
}

impl<C, U, P, S> AppState<C, U, P, S>
where
    C: ConfigRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PurgeProvider + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    ///
    /// `assets_dir` is the directory holding the compiled dashboard
    /// (`index.html` plus its wasm and js files).
    pub fn new(
        config_service: ConfigService<C>,
        purge_service: PurgeService<C, P>,
        auth_service: AuthService<U, S>,
        assets_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config_service: Arc::new(config_service),
            purge_service: Arc::new(purge_service),
            auth_service: Arc::new(auth_service),
            assets_dir: Arc::new(assets_dir.into()),
        }
    }

    /// Directory the dashboard bundle is served from.
    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }
}
