//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod configs;
#[allow(clippy::missing_errors_doc)]
pub mod purge;

use axum::Router;
use axum::routing::{get, post};

use purgehub_app::ports::{ConfigRepository, PurgeProvider, SessionStore, UserRepository};

use crate::state::AppState;

/// Build the `/api` sub-router.
///
/// Session enforcement is layered on by [`crate::router::build`].
pub fn routes<C, U, P, S>() -> Router<AppState<C, U, P, S>>
where
    C: ConfigRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PurgeProvider + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/configs",
            get(configs::list::<C, U, P, S>).post(configs::create::<C, U, P, S>),
        )
        .route(
            "/configs/{id}",
            get(configs::get::<C, U, P, S>)
                .put(configs::update::<C, U, P, S>)
                .delete(configs::delete::<C, U, P, S>),
        )
        .route("/purge", post(purge::submit::<C, U, P, S>))
}
