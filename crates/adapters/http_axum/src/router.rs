//! Axum router assembly.

use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use purgehub_app::ports::{ConfigRepository, PurgeProvider, SessionStore, UserRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the session-guarded API under `/api`, mounts the login flow and
/// serves the dashboard bundle for everything else. Includes a
/// [`TraceLayer`] that logs each HTTP request/response at the `DEBUG` level
/// using the `tracing` ecosystem.
pub fn build<C, U, P, S>(state: AppState<C, U, P, S>) -> Router
where
    C: ConfigRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    P: PurgeProvider + Send + Sync + 'static,
    S: SessionStore + Send + Sync + 'static,
{
    let api = crate::api::routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        crate::auth::require_session::<C, U, P, S>,
    ));

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/login",
            get(crate::dashboard::login_page::<C, U, P, S>).post(crate::auth::login::<C, U, P, S>),
        )
        .route("/logout", get(crate::auth::logout::<C, U, P, S>))
        .nest("/api", api)
        .merge(crate::dashboard::routes(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
